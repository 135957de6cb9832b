use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::domain::RepoId;

/// An `owner/name` pair, optionally behind a hosting-provider URL, that starts
/// the token or follows a character that cannot belong to a URL path.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:^|[^A-Za-z0-9._/-])(?i:(?:https?://)?(?:www\.)?github\.com/)?([A-Za-z0-9._-]+)/([A-Za-z0-9._-]+)",
        )
        .unwrap()
    })
}

const TRAILING_PUNCTUATION: &[char] = &['>', ')', ']', '"', '\'', ';', ':', '.', '!', '?'];

/// Extracts every distinct repository identifier mentioned in `text`.
///
/// Commas and line breaks separate tokens just like spaces. Within a token the
/// first `owner/name` (bare or as a provider URL) is taken, wherever it sits;
/// anything after `owner/name` in a URL is ignored. The result keeps
/// first-appearance order and is empty when nothing matches.
pub fn extract_identifiers(text: &str) -> IndexSet<RepoId> {
    let normalized = text.replace([',', '\n', '\r'], " ");

    normalized
        .split_whitespace()
        .filter_map(identifier_from_token)
        .collect()
}

fn identifier_from_token(token: &str) -> Option<RepoId> {
    let token = token.trim_end_matches(TRAILING_PUNCTUATION);

    identifier_pattern().captures_iter(token).find_map(|caps| {
        let owner = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();
        let name = name.strip_suffix(".git").unwrap_or(name);
        RepoId::parse(&format!("{owner}/{name}")).ok()
    })
}
