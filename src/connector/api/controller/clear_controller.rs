use anyhow::Result;

use super::super::{CommandOutput, Container};

pub struct ClearController<'a> {
    container: &'a Container,
}

impl<'a> ClearController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn clear(&self, caller: Option<&str>) -> Result<CommandOutput> {
        let report = self.container.clear_use_case().execute(caller).await?;
        Ok(CommandOutput::Report { report })
    }
}
