mod add_repositories;
mod clear_registry;
mod commit;
mod latest_releases;
mod list_repositories;
mod remove_repositories;

pub use add_repositories::*;
pub use clear_registry::*;
pub use latest_releases::*;
pub use list_repositories::*;
pub use remove_repositories::*;
