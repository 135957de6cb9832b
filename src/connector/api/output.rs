use serde::Serialize;

use crate::domain::{
    OperationKind, OperationReport, OutcomeStatus, ReleasePage, RepoId,
};

/// Structured result of a routed command.
///
/// Serialized as-is by the HTTP endpoint; [`CommandOutput::render`] gives the
/// chat-ready text.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutput {
    Report { report: OperationReport },
    Repositories { repos: Vec<RepoId> },
    Releases { page: ReleasePage },
    Message { text: String },
}

impl CommandOutput {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    pub fn render(&self) -> String {
        match self {
            CommandOutput::Report { report } => render_report(report),
            CommandOutput::Repositories { repos } => render_repositories(repos),
            CommandOutput::Releases { page } => render_releases(page),
            CommandOutput::Message { text } => text.clone(),
        }
    }
}

fn render_report(report: &OperationReport) -> String {
    if report.operation == OperationKind::Clear {
        return format!(
            "All tracked repositories cleared ({} removed).",
            report.outcomes.len()
        );
    }

    report
        .outcomes
        .iter()
        .map(|outcome| {
            let repo = &outcome.repo;
            match &outcome.status {
                OutcomeStatus::Added => format!("Started tracking {repo}."),
                OutcomeStatus::AlreadyTracked => format!("Already tracking {repo}."),
                // Not-found and lookup errors read the same to the user.
                OutcomeStatus::Failed { .. } => {
                    format!("Could not add {repo}: repository not found or not reachable.")
                }
                OutcomeStatus::Removed => format!("Removed {repo} from tracking."),
                OutcomeStatus::NotTracked => format!("{repo} was not being tracked."),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_repositories(repos: &[RepoId]) -> String {
    if repos.is_empty() {
        return "No repositories are being tracked.".to_string();
    }

    let mut output = format!("Tracked repositories ({}):\n", repos.len());
    for repo in repos {
        output.push_str(&format!("- {repo}\n"));
    }
    output.trim_end().to_string()
}

fn render_releases(page: &ReleasePage) -> String {
    if page.total == 0 {
        return "No repositories are being tracked.".to_string();
    }
    if page.entries.is_empty() {
        return format!("No page {} (only {} tracked repositories).", page.page + 1, page.total);
    }

    let mut output = format!(
        "Latest releases ({}-{} / {}):\n\n",
        page.first_index(),
        page.last_index(),
        page.total
    );

    for entry in &page.entries {
        match &entry.release {
            Some(release) => {
                output.push_str(&format!("{} - {}", entry.repo, release.tag_name));
                if let Some(date) = release.published_date() {
                    output.push_str(&format!(" ({date})"));
                }
                if let Some(name) = release.name.as_deref().filter(|n| !n.is_empty()) {
                    output.push_str(&format!(" {name}"));
                }
                output.push('\n');
            }
            None => output.push_str(&format!("{}: no release\n", entry.repo)),
        }
    }

    if page.has_next {
        output.push_str(&format!("\nNext page: /releases {}", page.page + 2));
    }

    output.trim_end().to_string()
}
