use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No repositories found in the message")]
    NoIdentifiersFound,

    #[error("Too many repositories in one request: {count} (limit {limit})")]
    BatchTooLarge { count: usize, limit: usize },

    #[error("Registry was modified concurrently: {0}")]
    ConcurrentModification(String),

    #[error("Registry store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn concurrent_modification(msg: impl Into<String>) -> Self {
        Self::ConcurrentModification(msg.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_concurrent_modification(&self) -> bool {
        matches!(self, Self::ConcurrentModification(_))
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Stable machine-readable name, used by the HTTP endpoint.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoIdentifiersFound => "no_identifiers_found",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::ConcurrentModification(_) => "concurrent_modification",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Unauthorized(_) => "unauthorized",
            Self::InvalidInput(_) => "invalid_input",
            Self::Provider(_) => "provider_error",
            Self::Internal(_) => "internal",
        }
    }
}
