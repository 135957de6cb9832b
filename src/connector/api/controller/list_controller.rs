use anyhow::Result;

use super::super::{CommandOutput, Container};

pub struct ListController<'a> {
    container: &'a Container,
}

impl<'a> ListController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self) -> Result<CommandOutput> {
        let repos = self.container.list_use_case().execute().await?;
        Ok(CommandOutput::Repositories { repos })
    }
}
