use anyhow::Result;

use super::super::{CommandOutput, Container};

pub struct ReleasesController<'a> {
    container: &'a Container,
}

impl<'a> ReleasesController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn releases(&self, page: usize) -> Result<CommandOutput> {
        let page = self.container.releases_use_case().execute(page).await?;
        Ok(CommandOutput::Releases { page })
    }
}
