use anyhow::Result;

use crate::DomainError;

use super::super::{CommandOutput, Container};

pub const ADD_USAGE: &str = "Usage: /add owner/repo (or a GitHub link; several separated by spaces, commas or lines)";
pub const NO_REPOSITORIES_FOUND: &str =
    "No repositories found in your message. Send owner/repo or a GitHub link.";

pub struct AddController<'a> {
    container: &'a Container,
}

impl<'a> AddController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add(&self, text: &str) -> Result<CommandOutput> {
        if text.trim().is_empty() {
            return Ok(CommandOutput::message(ADD_USAGE));
        }

        let use_case = self.container.add_use_case();
        match use_case.execute(text).await {
            Ok(report) => Ok(CommandOutput::Report { report }),
            Err(DomainError::NoIdentifiersFound) => Ok(CommandOutput::message(NO_REPOSITORIES_FOUND)),
            Err(e) => Err(e.into()),
        }
    }
}
