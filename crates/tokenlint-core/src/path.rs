//! Token path and naming validation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::NamingPolicy;
use crate::types::{Issue, IssueCode, Suggestion, ValidationResult};

/// Lowercase alphanumerics joined by single hyphens; no leading,
/// trailing, or doubled hyphens.
#[allow(clippy::expect_used)]
static KEBAB_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("kebab segment pattern"));

/// Validates a token path against a naming policy.
///
/// Pure function: splits on `.`, checks segment count bounds, and when
/// the policy enforces kebab-case checks each segment, attaching an
/// advisory normalized suggestion on failure.
#[must_use]
pub fn validate_path(path: &str, policy: &NamingPolicy) -> ValidationResult {
    let mut result = ValidationResult::new();

    if path.trim().is_empty() {
        result.push(Issue::new(IssueCode::EmptyPath, path, "token path is empty"));
        return result;
    }

    let segments: Vec<&str> = path.split('.').collect();

    if segments.len() < policy.min_segments {
        result.push(Issue::new(
            IssueCode::TooFewSegments,
            path,
            format!(
                "path has {} segment(s), policy requires at least {}",
                segments.len(),
                policy.min_segments
            ),
        ));
    }

    if let Some(max) = policy.max_segments {
        if segments.len() > max {
            result.push(Issue::new(
                IssueCode::TooManySegments,
                path,
                format!(
                    "path has {} segment(s), policy allows at most {max}",
                    segments.len()
                ),
            ));
        }
    }

    if policy.enforce_kebab_case {
        for segment in &segments {
            if KEBAB_SEGMENT.is_match(segment) {
                continue;
            }
            let mut issue = Issue::new(
                IssueCode::InvalidSegment,
                path,
                format!("segment `{segment}` is not kebab-case"),
            );
            let suggested = suggest_path(path);
            if !suggested.is_empty() && suggested != path {
                issue = issue.with_suggestion(Suggestion::with_replacement(
                    format!("rename to `{suggested}`"),
                    suggested,
                ));
            }
            result.push(issue);
        }
    }

    result
}

/// Normalizes a single segment: lowercase, non-alphanumeric runs
/// collapsed to single hyphens, hyphens trimmed from both ends.
#[must_use]
pub fn normalize_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut pending_hyphen = false;

    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    out
}

/// Normalizes every segment of a path. Advisory only, never applied.
#[must_use]
pub fn suggest_path(path: &str) -> String {
    let normalized: Vec<String> = path
        .split('.')
        .map(normalize_segment)
        .filter(|s| !s.is_empty())
        .collect();
    normalized.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NamingPolicy {
        NamingPolicy::default()
    }

    #[test]
    fn valid_kebab_paths_pass() {
        for path in ["color.primary.500", "spacing.md", "font-size.heading-1"] {
            let result = validate_path(path, &policy());
            assert!(result.valid, "{path} should be valid: {:?}", result.errors);
        }
    }

    #[test]
    fn empty_path_fails() {
        let result = validate_path("", &policy());
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, IssueCode::EmptyPath);
    }

    #[test]
    fn single_segment_fails() {
        let result = validate_path("color", &policy());
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, IssueCode::TooFewSegments);
    }

    #[test]
    fn camel_case_segment_fails_with_suggestion() {
        let result = validate_path("color.Primary", &policy());
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, IssueCode::InvalidSegment);
        let suggestion = result.errors[0].suggestion.as_ref().expect("suggestion");
        assert_eq!(suggestion.replacement.as_deref(), Some("color.primary"));
    }

    #[test]
    fn camel_case_single_word_fails_twice() {
        // "colorPrimary" is both too few segments and not kebab-case.
        let result = validate_path("colorPrimary", &policy());
        assert!(!result.valid);
        let codes: Vec<IssueCode> = result.errors.iter().map(|i| i.code).collect();
        assert!(codes.contains(&IssueCode::TooFewSegments));
        assert!(codes.contains(&IssueCode::InvalidSegment));
    }

    #[test]
    fn max_segments_enforced_when_set() {
        let p = NamingPolicy {
            max_segments: Some(3),
            ..NamingPolicy::default()
        };
        let result = validate_path("a.b.c.d", &p);
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, IssueCode::TooManySegments);
    }

    #[test]
    fn kebab_check_skipped_when_disabled() {
        let p = NamingPolicy {
            enforce_kebab_case: false,
            ..NamingPolicy::default()
        };
        assert!(validate_path("color.Primary", &p).valid);
    }

    #[test]
    fn double_hyphen_rejected() {
        let result = validate_path("color.primary--dark", &policy());
        assert!(!result.valid);
    }

    #[test]
    fn normalization() {
        insta::assert_snapshot!(normalize_segment("Primary Light"), @"primary-light");
        insta::assert_snapshot!(normalize_segment("--Brand__Color--"), @"brand-color");
        insta::assert_snapshot!(suggest_path("Color.Primary 500"), @"color.primary-500");
        assert_eq!(normalize_segment("!!!"), "");
    }
}
