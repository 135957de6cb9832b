mod registry_store;
mod release_provider;
mod repository_validator;

pub use registry_store::*;
pub use release_provider::*;
pub use repository_validator::*;
