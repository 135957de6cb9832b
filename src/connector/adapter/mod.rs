mod github_client;
mod http_document_store;
mod in_memory_registry_store;
mod mock_provider;

pub use github_client::*;
pub use http_document_store::*;
pub use in_memory_registry_store::*;
pub use mock_provider::*;
