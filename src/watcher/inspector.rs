//! Issue inspector: turns a `/kind <name>` command in an issue body into a
//! label request.

use regex::Regex;
use std::sync::LazyLock;

use crate::watcher::types::{AddLabelRequest, IssueSummary};

static KIND_COMMAND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)/kind +([a-z]+)").ok());

/// First `/kind <name>` command in `body`, lowercased.
pub fn parse_kind(body: &str) -> Option<String> {
    KIND_COMMAND
        .as_ref()?
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Label applied for a given kind.
pub fn label_for_kind(kind: &str) -> Option<&'static str> {
    match kind {
        "enhancement" | "feature" => Some("enhancement"),
        "bug" => Some("bug"),
        "doc" => Some("documentation"),
        _ => None,
    }
}

/// Decide whether `issue` needs a label.
///
/// Pull requests, issues without a body or repository URL, unknown kinds
/// and labels that are already present all yield `None`.
pub fn inspect(issue: &IssueSummary) -> Option<AddLabelRequest> {
    if issue.is_pull_request() {
        return None;
    }
    let kind = parse_kind(issue.body.as_deref()?)?;
    let label = label_for_kind(&kind)?;
    if issue.has_label(label) {
        return None;
    }

    Some(AddLabelRequest {
        url: issue.repository_url.clone()?,
        number: issue.number,
        label: label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(json: &str) -> IssueSummary {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(KIND_COMMAND.is_some());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("/kind bug"), Some("bug".into()));
        assert_eq!(parse_kind("text\n/KIND   Feature please"), Some("feature".into()));
        assert_eq!(parse_kind("/kind"), None);
        assert_eq!(parse_kind("/kindbug"), None);
        assert_eq!(parse_kind("/kind 42"), None);
        assert_eq!(parse_kind("/kind doc /kind bug"), Some("doc".into()));
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(label_for_kind("enhancement"), Some("enhancement"));
        assert_eq!(label_for_kind("feature"), Some("enhancement"));
        assert_eq!(label_for_kind("bug"), Some("bug"));
        assert_eq!(label_for_kind("doc"), Some("documentation"));
        assert_eq!(label_for_kind("question"), None);
    }

    #[test]
    fn test_inspect_builds_request() {
        let req = inspect(&issue(
            r#"{"number":7,"repository_url":"https://api.github.com/repos/o/r","body":"broken\n/kind bug"}"#,
        ))
        .unwrap();
        assert_eq!(
            req,
            AddLabelRequest {
                url: "https://api.github.com/repos/o/r".into(),
                number: 7,
                label: "bug".into(),
            }
        );
    }

    #[test]
    fn test_inspect_skips_pull_requests() {
        let pr = issue(
            r#"{"number":8,"repository_url":"u","body":"/kind bug","pull_request":{"url":"https://api.github.com/repos/o/r/pulls/8"}}"#,
        );
        assert!(inspect(&pr).is_none());
    }

    #[test]
    fn test_inspect_pull_request_without_url_is_issue() {
        let item = issue(r#"{"number":8,"repository_url":"u","body":"/kind bug","pull_request":{}}"#);
        assert!(inspect(&item).is_some());
    }

    #[test]
    fn test_inspect_skips_existing_label() {
        let labelled = issue(
            r#"{"number":9,"repository_url":"u","body":"/kind feature","labels":[{"name":"enhancement"}]}"#,
        );
        assert!(inspect(&labelled).is_none());
    }

    #[test]
    fn test_inspect_skips_missing_body_and_unknown_kind() {
        assert!(inspect(&issue(r#"{"number":1,"repository_url":"u"}"#)).is_none());
        assert!(inspect(&issue(r#"{"number":1,"repository_url":"u","body":"/kind question"}"#)).is_none());
        assert!(inspect(&issue(r#"{"number":1,"body":"/kind bug"}"#)).is_none());
    }
}
