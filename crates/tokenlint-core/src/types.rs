//! Core types for validation findings and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, never fails validation.
    Info,
    /// Warning that should be addressed but does not block.
    Warning,
    /// Error that makes the token invalid.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: error, warning, info"
            )),
        }
    }
}

/// Stable code identifying the kind of finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    /// Path is null or empty.
    EmptyPath,
    /// Path has fewer segments than the policy minimum.
    TooFewSegments,
    /// Path has more segments than the policy maximum.
    TooManySegments,
    /// A path segment violates the kebab-case grammar.
    InvalidSegment,
    /// Token has no value.
    MissingValue,
    /// Token type is unknown and unknown types are forbidden.
    UnsupportedType,
    /// Color value does not parse.
    InvalidColorFormat,
    /// Dimension value does not match the dimension grammar.
    InvalidDimensionFormat,
    /// Duration value does not match the duration grammar.
    InvalidDurationFormat,
    /// Font weight is not numeric in [1,1000] or a recognized keyword.
    InvalidFontWeight,
    /// Cubic bezier does not have exactly 4 components in [0,1].
    InvalidCubicBezier,
    /// Number value is not numeric.
    InvalidNumber,
    /// Font family is not a string or list of strings.
    InvalidFontFamily,
    /// Alias references a token that does not exist.
    BrokenReference,
    /// Alias chain loops back on itself.
    CircularReference,
    /// Alias target type differs from the referencing token's type.
    AliasTypeMismatch,
    /// Token type is unknown (allowed, but worth flagging).
    UnknownType,
    /// Token has no description.
    MissingDescription,
    /// Contrast passes required thresholds but misses a recommended one.
    ContrastAdvisory,
}

impl IssueCode {
    /// Returns the stable short code (e.g., "TL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyPath => "TL001",
            Self::TooFewSegments => "TL002",
            Self::TooManySegments => "TL003",
            Self::InvalidSegment => "TL004",
            Self::MissingValue => "TL005",
            Self::UnsupportedType => "TL006",
            Self::InvalidColorFormat => "TL007",
            Self::InvalidDimensionFormat => "TL008",
            Self::InvalidDurationFormat => "TL009",
            Self::InvalidFontWeight => "TL010",
            Self::InvalidCubicBezier => "TL011",
            Self::InvalidNumber => "TL012",
            Self::InvalidFontFamily => "TL013",
            Self::BrokenReference => "TL014",
            Self::CircularReference => "TL015",
            Self::AliasTypeMismatch => "TL016",
            Self::UnknownType => "TL101",
            Self::MissingDescription => "TL102",
            Self::ContrastAdvisory => "TL103",
        }
    }

    /// Returns the kebab-case name (e.g., "empty-path").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EmptyPath => "empty-path",
            Self::TooFewSegments => "too-few-segments",
            Self::TooManySegments => "too-many-segments",
            Self::InvalidSegment => "invalid-segment",
            Self::MissingValue => "missing-value",
            Self::UnsupportedType => "unsupported-type",
            Self::InvalidColorFormat => "invalid-color-format",
            Self::InvalidDimensionFormat => "invalid-dimension-format",
            Self::InvalidDurationFormat => "invalid-duration-format",
            Self::InvalidFontWeight => "invalid-font-weight",
            Self::InvalidCubicBezier => "invalid-cubic-bezier",
            Self::InvalidNumber => "invalid-number",
            Self::InvalidFontFamily => "invalid-font-family",
            Self::BrokenReference => "broken-reference",
            Self::CircularReference => "circular-reference",
            Self::AliasTypeMismatch => "alias-type-mismatch",
            Self::UnknownType => "unknown-type",
            Self::MissingDescription => "missing-description",
            Self::ContrastAdvisory => "contrast-advisory",
        }
    }

    /// Returns the default severity for this code.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        match self {
            Self::UnknownType | Self::MissingDescription | Self::ContrastAdvisory => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An advisory fix for a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
    /// Optional replacement text (e.g., a normalized path). Advisory only,
    /// never applied automatically.
    pub replacement: Option<String>,
}

impl Suggestion {
    /// Creates a new suggestion without a replacement.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Creates a new suggestion with a concrete replacement.
    #[must_use]
    pub fn with_replacement(message: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement.into()),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Code identifying the kind of finding.
    pub code: IssueCode,
    /// Severity of this finding.
    pub severity: Severity,
    /// Path of the token this finding is about (may be empty for
    /// findings not tied to a token, e.g. contrast advisories).
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Issue {
    /// Creates a new issue with the code's default severity.
    #[must_use]
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Overrides the severity of this issue.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Adds a suggestion to this issue.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Formats the issue for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at `{}`\n", self.code.code(), self.code, self.path);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(output, "  = help: {}", suggestion.message);
        }
        output
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.path,
            self.severity,
            self.code.code(),
            self.message
        )
    }
}

/// Converts an [`Issue`] to a miette [`Diagnostic`] for rich display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct IssueDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Issue> for IssueDiagnostic {
    fn from(issue: &Issue) -> Self {
        Self {
            message: format!("[{} {}] {}", issue.code.code(), issue.code, issue.message),
            help: issue.suggestion.as_ref().map(|s| s.message.clone()),
        }
    }
}

/// Result of validating a single token.
///
/// `valid` is true iff there are no errors; warnings never affect it.
/// Transient by design: the engine never persists results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the token passed validation.
    pub valid: bool,
    /// Blocking findings.
    pub errors: Vec<Issue>,
    /// Non-blocking findings.
    pub warnings: Vec<Issue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationResult {
    /// Creates a new empty (valid) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding, routing it by severity.
    pub fn push(&mut self, issue: Issue) {
        if issue.severity >= Severity::Error {
            self.valid = false;
            self.errors.push(issue);
        } else {
            self.warnings.push(issue);
        }
    }

    /// Absorbs all findings from another result.
    pub fn merge(&mut self, other: Self) {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Iterates over all findings, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Returns true if any finding is at or above the given severity.
    #[must_use]
    pub fn has_issues_at(&self, severity: Severity) -> bool {
        self.issues().any(|i| i.severity >= severity)
    }
}

/// Per-token entry in a batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenReport {
    /// Path of the validated token.
    pub path: String,
    /// The validation outcome for this token.
    pub result: ValidationResult,
}

/// Aggregate counts for a batch run.
///
/// `valid + invalid == total` always holds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of tokens validated.
    pub total: usize,
    /// Tokens with no errors.
    pub valid: usize,
    /// Tokens with at least one error.
    pub invalid: usize,
    /// Tokens with at least one warning.
    pub with_warnings: usize,
}

/// Result of validating a batch of tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-token results, in input order.
    pub results: Vec<TokenReport>,
    /// Aggregate counts.
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Returns true if any token failed validation.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.summary.invalid > 0
    }

    /// Returns true if any finding is at or above the given severity.
    #[must_use]
    pub fn has_issues_at(&self, severity: Severity) -> bool {
        self.results.iter().any(|r| r.result.has_issues_at(severity))
    }

    /// Counts findings by severity across the whole batch.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self.results.iter().map(|r| r.result.errors.len()).sum();
        let warnings = self.results.iter().map(|r| r.result.warnings.len()).sum();
        (errors, warnings)
    }

    /// Iterates over all findings in the batch.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.results.iter().flat_map(|r| r.result.issues())
    }

    /// Formats findings as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()`
    /// messages in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&Issue> = self
            .issues()
            .filter(|i| i.severity >= fail_on)
            .collect();

        let mut report = String::new();
        let _ = writeln!(report, "\n=== tokenlint: {} finding(s) ===\n", failing.len());

        for issue in &failing {
            let _ = writeln!(report, "{} [{}] at `{}`", issue.code, issue.code.code(), issue.path);
            let _ = writeln!(report, "  {}: {}", issue.severity, issue.message);
            if let Some(suggestion) = &issue.suggestion {
                let _ = writeln!(report, "  = help: {}", suggestion.message);
            }
            let _ = writeln!(report);
        }

        let (errors, warnings) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {} error(s), {} warning(s) in {} token(s)",
            errors, warnings, self.summary.total
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_issue(severity: Severity) -> Issue {
        Issue::new(IssueCode::InvalidSegment, "color.Primary", "segment `Primary` is not kebab-case")
            .with_severity(severity)
    }

    #[test]
    fn push_error_invalidates() {
        let mut result = ValidationResult::new();
        assert!(result.valid);
        result.push(make_issue(Severity::Error));
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn push_warning_keeps_valid() {
        let mut result = ValidationResult::new();
        result.push(make_issue(Severity::Warning));
        assert!(result.valid);
        assert!(result.has_warnings());
    }

    #[test]
    fn merge_combines_findings() {
        let mut a = ValidationResult::new();
        a.push(make_issue(Severity::Warning));
        let mut b = ValidationResult::new();
        b.push(make_issue(Severity::Error));

        a.merge(b);
        assert!(!a.valid);
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
    }

    #[test]
    fn issue_format_includes_suggestion() {
        let issue = make_issue(Severity::Error)
            .with_suggestion(Suggestion::with_replacement("rename to `color.primary`", "color.primary"));
        let formatted = issue.format();
        assert!(formatted.contains("= help: rename to `color.primary`"));
        assert!(formatted.contains("TL004"));
    }

    #[test]
    fn code_roundtrip_identity() {
        assert_eq!(IssueCode::EmptyPath.code(), "TL001");
        assert_eq!(IssueCode::ContrastAdvisory.code(), "TL103");
        assert_eq!(IssueCode::BrokenReference.name(), "broken-reference");
    }

    #[test]
    fn default_severities() {
        assert_eq!(IssueCode::UnknownType.default_severity(), Severity::Warning);
        assert_eq!(IssueCode::MissingDescription.default_severity(), Severity::Warning);
        assert_eq!(IssueCode::CircularReference.default_severity(), Severity::Error);
    }

    #[test]
    fn test_report_filters_by_severity() {
        let mut result = ValidationResult::new();
        result.push(make_issue(Severity::Warning));
        result.push(make_issue(Severity::Error));

        let report = BatchReport {
            results: vec![TokenReport {
                path: "color.Primary".into(),
                result,
            }],
            summary: BatchSummary {
                total: 1,
                valid: 0,
                invalid: 1,
                with_warnings: 1,
            },
        };

        let text = report.format_test_report(Severity::Error);
        assert!(text.contains("1 finding(s)"));
        assert!(text.contains("1 error(s), 1 warning(s)"));
    }

    #[test]
    fn severity_parse() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert!("critical".parse::<Severity>().is_err());
    }
}
