pub mod add_controller;
pub mod clear_controller;
pub mod list_controller;
pub mod releases_controller;
pub mod remove_controller;

pub use add_controller::AddController;
pub use clear_controller::ClearController;
pub use list_controller::ListController;
pub use releases_controller::ReleasesController;
pub use remove_controller::RemoveController;
