use clap::Subcommand;

use crate::BotCommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking repositories (owner/repo names or GitHub links)
    Add {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Stop tracking repositories
    Remove {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    List,

    /// Remove every tracked repository (owner only)
    Clear,

    /// Show the latest release of each tracked repository
    Releases {
        /// One-based page number
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Interpret text exactly as a chat message would be
    Chat {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Serve the chat command endpoint over HTTP
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}

impl Commands {
    /// The registry command this subcommand runs, or `None` for `serve`.
    pub fn into_bot_command(self) -> Option<BotCommand> {
        match self {
            Commands::Add { input } => Some(BotCommand::Add(input.join(" "))),
            Commands::Remove { input } => Some(BotCommand::Remove(input.join(" "))),
            Commands::List => Some(BotCommand::List),
            Commands::Clear => Some(BotCommand::Clear),
            Commands::Releases { page } => Some(BotCommand::Releases {
                page: page.saturating_sub(1),
            }),
            Commands::Chat { text } => Some(BotCommand::parse(&text.join(" "))),
            Commands::Serve { .. } => None,
        }
    }
}
