use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::RepoId;
use crate::domain::DomainError;

/// Opaque token describing the remote document's current content state.
///
/// A writer must present the token obtained from its own read; the store
/// rejects the write if the document changed in between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of tracked repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    repos: BTreeSet<RepoId>,
}

impl Registry {
    pub fn new(repos: impl IntoIterator<Item = RepoId>) -> Self {
        Self {
            repos: repos.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &RepoId) -> bool {
        self.repos.contains(id)
    }

    pub fn insert(&mut self, id: RepoId) -> bool {
        self.repos.insert(id)
    }

    pub fn remove(&mut self, id: &RepoId) -> bool {
        self.repos.remove(id)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &RepoId> {
        self.repos.iter()
    }

    pub fn to_vec(&self) -> Vec<RepoId> {
        self.repos.iter().cloned().collect()
    }
}

impl FromIterator<RepoId> for Registry {
    fn from_iter<T: IntoIterator<Item = RepoId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// A registry as read from the store, paired with the token of that read.
///
/// `version` is `None` when no document exists yet; the next write creates it.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    pub registry: Registry,
    pub version: Option<VersionToken>,
}

impl RegistrySnapshot {
    pub fn new(registry: Registry, version: Option<VersionToken>) -> Self {
        Self { registry, version }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Persisted form of the registry: `{"repos": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub repos: Vec<RepoId>,
}

impl RegistryDocument {
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            repos: registry.to_vec(),
        }
    }

    /// Serializes with identifiers sorted, so equal registries encode to
    /// identical bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut repos = self.repos.clone();
        repos.sort();
        repos.dedup();
        serde_json::to_vec_pretty(&RegistryDocument { repos })
            .map_err(|e| DomainError::internal(format!("failed to encode registry: {e}")))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(bytes)
            .map_err(|e| DomainError::invalid_input(format!("malformed registry document: {e}")))
    }

    pub fn into_registry(self) -> Registry {
        Registry::new(self.repos)
    }
}
