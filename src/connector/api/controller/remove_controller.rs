use anyhow::Result;

use crate::DomainError;

use super::super::{CommandOutput, Container};
use super::add_controller::NO_REPOSITORIES_FOUND;

pub const REMOVE_USAGE: &str = "Usage: /remove owner/repo";

pub struct RemoveController<'a> {
    container: &'a Container,
}

impl<'a> RemoveController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn remove(&self, text: &str) -> Result<CommandOutput> {
        if text.trim().is_empty() {
            return Ok(CommandOutput::message(REMOVE_USAGE));
        }

        let use_case = self.container.remove_use_case();
        match use_case.execute(text).await {
            Ok(report) => Ok(CommandOutput::Report { report }),
            Err(DomainError::NoIdentifiersFound) => Ok(CommandOutput::message(NO_REPOSITORIES_FOUND)),
            Err(e) => Err(e.into()),
        }
    }
}
