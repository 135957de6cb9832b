use anyhow::Result;

use super::command::BotCommand;
use super::container::Container;
use super::controller::{
    AddController, ClearController, ListController, ReleasesController, RemoveController,
};
use super::output::CommandOutput;

pub const HELP_TEXT: &str = "\
This bot tracks GitHub repositories and their releases.

Commands:
/add owner/repo - Start tracking one or more repositories
/remove owner/repo - Stop tracking repositories
/list - Show all tracked repositories
/releases [page] - Show the latest release of each tracked repository
/clear - Remove all tracked repositories (owner only)
/ping - Health check
/help - Show this help

You can also send owner/repo names or GitHub links directly to track them.";

pub struct Router<'a> {
    add_controller: AddController<'a>,
    remove_controller: RemoveController<'a>,
    list_controller: ListController<'a>,
    clear_controller: ClearController<'a>,
    releases_controller: ReleasesController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            add_controller: AddController::new(container),
            remove_controller: RemoveController::new(container),
            list_controller: ListController::new(container),
            clear_controller: ClearController::new(container),
            releases_controller: ReleasesController::new(container),
        }
    }

    /// Runs `command` on behalf of `caller` (`None` when the caller is unknown).
    pub async fn route(&self, command: BotCommand, caller: Option<&str>) -> Result<CommandOutput> {
        match command {
            BotCommand::Add(text) => self.add_controller.add(&text).await,
            BotCommand::Remove(text) => self.remove_controller.remove(&text).await,
            BotCommand::List => self.list_controller.list().await,
            BotCommand::Clear => self.clear_controller.clear(caller).await,
            BotCommand::Releases { page } => self.releases_controller.releases(page).await,
            BotCommand::Help => Ok(CommandOutput::message(HELP_TEXT)),
            BotCommand::Ping => Ok(CommandOutput::message("Bot is alive and running.")),
        }
    }
}
