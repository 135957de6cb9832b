pub mod command;
pub mod container;
pub mod controller;
pub mod http_server;
pub mod output;
pub mod router;

pub use command::BotCommand;
pub use container::{Container, ContainerConfig};
pub use output::CommandOutput;
pub use router::Router;
