use indexmap::IndexSet;

use super::RepoId;
use crate::domain::{extract_identifiers, DomainError};

/// Upper bound on identifiers handled by one request.
pub const MAX_BATCH_SIZE: usize = 20;

/// Distinct identifiers taken from one message, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBatch {
    ids: IndexSet<RepoId>,
}

impl CandidateBatch {
    pub fn new(ids: impl IntoIterator<Item = RepoId>) -> Result<Self, DomainError> {
        let ids: IndexSet<RepoId> = ids.into_iter().collect();

        if ids.is_empty() {
            return Err(DomainError::NoIdentifiersFound);
        }
        if ids.len() > MAX_BATCH_SIZE {
            return Err(DomainError::BatchTooLarge {
                count: ids.len(),
                limit: MAX_BATCH_SIZE,
            });
        }

        Ok(Self { ids })
    }

    pub fn from_text(text: &str) -> Result<Self, DomainError> {
        Self::new(extract_identifiers(text))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepoId> {
        self.ids.iter()
    }

    pub fn contains(&self, id: &RepoId) -> bool {
        self.ids.contains(id)
    }
}
