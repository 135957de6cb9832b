use std::collections::HashMap;

use crate::domain::{CandidateBatch, FailureReason, ItemOutcome, OutcomeStatus, Registry, RepoId};

/// Result of one provider lookup, as seen by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Exists,
    Missing,
    Errored(String),
}

/// New registry contents plus one outcome per candidate, in batch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub registry: Registry,
    pub outcomes: Vec<ItemOutcome>,
}

impl Reconciliation {
    /// Whether the registry differs from the one reconciled against.
    pub fn changed(&self) -> bool {
        self.outcomes.iter().any(|o| o.status.is_mutation())
    }
}

/// Candidates that are not yet tracked and therefore need a provider lookup.
pub fn needs_validation<'a>(current: &Registry, batch: &'a CandidateBatch) -> Vec<&'a RepoId> {
    batch.iter().filter(|id| !current.contains(id)).collect()
}

pub fn reconcile_add(
    current: &Registry,
    batch: &CandidateBatch,
    validations: &HashMap<RepoId, Validation>,
) -> Reconciliation {
    let mut registry = current.clone();
    let mut outcomes = Vec::with_capacity(batch.len());

    for id in batch.iter() {
        if current.contains(id) {
            outcomes.push(ItemOutcome::new(id.clone(), OutcomeStatus::AlreadyTracked));
            continue;
        }

        let outcome = match validations.get(id) {
            Some(Validation::Exists) => {
                registry.insert(id.clone());
                ItemOutcome::new(id.clone(), OutcomeStatus::Added)
            }
            Some(Validation::Missing) => ItemOutcome::failed(id.clone(), FailureReason::NotFound),
            Some(Validation::Errored(detail)) => ItemOutcome::failed(
                id.clone(),
                FailureReason::CallError {
                    detail: detail.clone(),
                },
            ),
            None => ItemOutcome::failed(
                id.clone(),
                FailureReason::CallError {
                    detail: "not validated".to_string(),
                },
            ),
        };
        outcomes.push(outcome);
    }

    Reconciliation { registry, outcomes }
}

pub fn reconcile_remove(current: &Registry, batch: &CandidateBatch) -> Reconciliation {
    let mut registry = current.clone();
    let outcomes = batch
        .iter()
        .map(|id| {
            let status = if registry.remove(id) {
                OutcomeStatus::Removed
            } else {
                OutcomeStatus::NotTracked
            };
            ItemOutcome::new(id.clone(), status)
        })
        .collect();

    Reconciliation { registry, outcomes }
}

/// Empties the registry, reporting every previously tracked identifier as removed.
pub fn reconcile_clear(current: &Registry) -> Reconciliation {
    let outcomes = current
        .iter()
        .map(|id| ItemOutcome::new(id.clone(), OutcomeStatus::Removed))
        .collect();

    Reconciliation {
        registry: Registry::default(),
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> RepoId {
        RepoId::parse(value).unwrap()
    }

    fn registry(values: &[&str]) -> Registry {
        values.iter().map(|v| id(v)).collect()
    }

    fn batch(values: &[&str]) -> CandidateBatch {
        CandidateBatch::new(values.iter().map(|v| id(v))).unwrap()
    }

    #[test]
    fn add_classifies_each_candidate() {
        let current = registry(&["a/tracked"]);
        let candidates = batch(&["a/tracked", "b/real", "c/missing", "d/flaky"]);
        let validations = HashMap::from([
            (id("b/real"), Validation::Exists),
            (id("c/missing"), Validation::Missing),
            (id("d/flaky"), Validation::Errored("connection reset".to_string())),
        ]);

        let result = reconcile_add(&current, &candidates, &validations);

        let statuses: Vec<&str> = result.outcomes.iter().map(|o| o.status.as_str()).collect();
        assert_eq!(statuses, vec!["already_tracked", "added", "failed", "failed"]);
        assert_eq!(
            result.outcomes[2].status,
            OutcomeStatus::Failed {
                reason: FailureReason::NotFound
            }
        );
        assert_eq!(
            result.outcomes[3].status,
            OutcomeStatus::Failed {
                reason: FailureReason::CallError {
                    detail: "connection reset".to_string()
                }
            }
        );
        assert_eq!(result.registry, registry(&["a/tracked", "b/real"]));
        assert!(result.changed());
    }

    #[test]
    fn add_of_tracked_only_is_unchanged() {
        let current = registry(&["a/b"]);
        let result = reconcile_add(&current, &batch(&["a/b"]), &HashMap::new());
        assert!(!result.changed());
        assert_eq!(result.registry, current);
    }

    #[test]
    fn add_with_only_failures_is_unchanged() {
        let current = Registry::default();
        let validations = HashMap::from([(id("x/y"), Validation::Missing)]);
        let result = reconcile_add(&current, &batch(&["x/y"]), &validations);
        assert!(!result.changed());
        assert!(result.registry.is_empty());
    }

    #[test]
    fn only_untracked_candidates_need_validation() {
        let current = registry(&["a/b"]);
        let candidates = batch(&["a/b", "c/d"]);
        let pending: Vec<&str> = needs_validation(&current, &candidates)
            .into_iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(pending, vec!["c/d"]);
    }

    #[test]
    fn remove_classifies_each_candidate() {
        let current = registry(&["a/b", "c/d"]);
        let result = reconcile_remove(&current, &batch(&["c/d", "e/f"]));

        let statuses: Vec<&str> = result.outcomes.iter().map(|o| o.status.as_str()).collect();
        assert_eq!(statuses, vec!["removed", "not_tracked"]);
        assert_eq!(result.registry, registry(&["a/b"]));
        assert!(result.changed());
    }

    #[test]
    fn remove_of_untracked_is_unchanged() {
        let current = registry(&["a/b"]);
        let result = reconcile_remove(&current, &batch(&["x/y"]));
        assert!(!result.changed());
    }

    #[test]
    fn clear_reports_every_entry() {
        let result = reconcile_clear(&registry(&["a/b", "c/d"]));
        assert!(result.registry.is_empty());
        assert_eq!(result.outcomes.len(), 2);
        assert!(result.outcomes.iter().all(|o| o.status == OutcomeStatus::Removed));
    }
}
