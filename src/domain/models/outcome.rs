use serde::{Deserialize, Serialize};

use super::{RepoId, VersionToken};

/// Why a candidate could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The provider answered, and the repository does not exist or is not accessible.
    NotFound,
    /// The lookup itself failed (network, timeout, decoding).
    CallError { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Added,
    AlreadyTracked,
    Failed { reason: FailureReason },
    Removed,
    NotTracked,
}

/// Status discriminant, without the failure detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Added,
    AlreadyTracked,
    Failed,
    Removed,
    NotTracked,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Added => "added",
            OutcomeKind::AlreadyTracked => "already_tracked",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Removed => "removed",
            OutcomeKind::NotTracked => "not_tracked",
        }
    }
}

impl OutcomeStatus {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            OutcomeStatus::Added => OutcomeKind::Added,
            OutcomeStatus::AlreadyTracked => OutcomeKind::AlreadyTracked,
            OutcomeStatus::Failed { .. } => OutcomeKind::Failed,
            OutcomeStatus::Removed => OutcomeKind::Removed,
            OutcomeStatus::NotTracked => OutcomeKind::NotTracked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Whether this outcome changed the registry.
    pub fn is_mutation(&self) -> bool {
        matches!(self, OutcomeStatus::Added | OutcomeStatus::Removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub repo: RepoId,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl ItemOutcome {
    pub fn new(repo: RepoId, status: OutcomeStatus) -> Self {
        Self { repo, status }
    }

    pub fn failed(repo: RepoId, reason: FailureReason) -> Self {
        Self::new(repo, OutcomeStatus::Failed { reason })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Remove,
    Clear,
}

/// Result of one registry mutation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReport {
    pub operation: OperationKind,
    pub outcomes: Vec<ItemOutcome>,
    /// Whether a new document was written.
    pub committed: bool,
    /// Token of the committed document, when `committed`.
    pub version: Option<VersionToken>,
}

impl OperationReport {
    pub fn new(operation: OperationKind, outcomes: Vec<ItemOutcome>) -> Self {
        Self {
            operation,
            outcomes,
            committed: false,
            version: None,
        }
    }

    pub fn with_commit(mut self, version: VersionToken) -> Self {
        self.committed = true;
        self.version = Some(version);
        self
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.kind() == kind)
            .count()
    }

    pub fn repos_with(&self, kind: OutcomeKind) -> Vec<&RepoId> {
        self.outcomes
            .iter()
            .filter(|o| o.status.kind() == kind)
            .map(|o| &o.repo)
            .collect()
    }
}
