//! Per-type value grammar validation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::alias;
use crate::color::Rgba;
use crate::rules::TypePolicy;
use crate::token::{TokenType, TokenValue};
use crate::types::{Issue, IssueCode, Severity, ValidationResult};

#[allow(clippy::expect_used)]
static DIMENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?(px|rem|em|%|vh|vw|vmin|vmax)$").expect("dimension pattern")
});

#[allow(clippy::expect_used)]
static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?(ms|s)$").expect("duration pattern"));

const FONT_WEIGHT_KEYWORDS: &[&str] = &["normal", "bold", "lighter", "bolder"];

/// Validates a token value against its declared type's grammar.
///
/// An alias value short-circuits to valid; target existence is the
/// alias resolver's concern. When the policy is not strict, grammar
/// failures demote to warnings so nothing is silently swallowed.
#[must_use]
pub fn validate_value(
    path: &str,
    kind: &TokenType,
    value: &TokenValue,
    policy: &TypePolicy,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if value.is_empty_text() {
        result.push(Issue::new(IssueCode::MissingValue, path, "token has no value"));
        return result;
    }

    if alias::extract_alias(value).is_some() {
        return result;
    }

    match kind {
        TokenType::Color => {
            if !is_valid_color(value) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidColorFormat,
                    path,
                    format!(
                        "`{value}` is not a valid color (expected hex, rgb()/rgba(), hsl()/hsla(), or a named color)"
                    ),
                );
            }
        }
        TokenType::Dimension => {
            if !value.as_text().is_some_and(|s| DIMENSION.is_match(s)) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidDimensionFormat,
                    path,
                    format!("`{value}` is not a valid dimension (number + px|rem|em|%|vh|vw|vmin|vmax)"),
                );
            }
        }
        TokenType::Duration => {
            if !value.as_text().is_some_and(|s| DURATION.is_match(s)) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidDurationFormat,
                    path,
                    format!("`{value}` is not a valid duration (number + ms|s)"),
                );
            }
        }
        TokenType::FontWeight => {
            if !is_valid_font_weight(value) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidFontWeight,
                    path,
                    format!("`{value}` is not a number in [1,1000] or one of normal|bold|lighter|bolder"),
                );
            }
        }
        TokenType::CubicBezier => {
            if !is_valid_cubic_bezier(value) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidCubicBezier,
                    path,
                    format!("`{value}` is not a cubic bezier (exactly 4 components in [0,1])"),
                );
            }
        }
        TokenType::Number => {
            if value.as_number().is_none() {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidNumber,
                    path,
                    format!("`{value}` is not numeric"),
                );
            }
        }
        TokenType::FontFamily => {
            if !is_valid_font_family(value) {
                fail(
                    &mut result,
                    policy,
                    IssueCode::InvalidFontFamily,
                    path,
                    format!("`{value}` is not a font family name or list of names"),
                );
            }
        }
        TokenType::String => {}
        TokenType::Other(name) => {
            if policy.allow_unknown_types {
                result.push(Issue::new(
                    IssueCode::UnknownType,
                    path,
                    format!("type `{name}` is not in the known set; value not type-checked"),
                ));
            } else {
                result.push(Issue::new(
                    IssueCode::UnsupportedType,
                    path,
                    format!("type `{name}` is not supported"),
                ));
            }
        }
    }

    result
}

/// Records a grammar failure, demoting to a warning in non-strict mode.
fn fail(
    result: &mut ValidationResult,
    policy: &TypePolicy,
    code: IssueCode,
    path: &str,
    message: String,
) {
    let severity = if policy.strict {
        Severity::Error
    } else {
        Severity::Warning
    };
    result.push(Issue::new(code, path, message).with_severity(severity));
}

fn is_valid_color(value: &TokenValue) -> bool {
    value.as_text().is_some_and(|s| Rgba::parse(s).is_ok())
}

fn is_valid_font_weight(value: &TokenValue) -> bool {
    if let Some(n) = value.as_number() {
        return (1.0..=1000.0).contains(&n);
    }
    value
        .as_text()
        .is_some_and(|s| FONT_WEIGHT_KEYWORDS.contains(&s.trim()))
}

fn is_valid_cubic_bezier(value: &TokenValue) -> bool {
    let components: Vec<f64> = match value {
        TokenValue::Numbers(list) => list.clone(),
        TokenValue::Text(text) => {
            let body = text
                .trim()
                .strip_prefix("cubic-bezier(")
                .and_then(|rest| rest.strip_suffix(')'))
                .unwrap_or(text.trim());
            let parsed: Option<Vec<f64>> = body
                .split(',')
                .map(|part| part.trim().parse().ok())
                .collect();
            match parsed {
                Some(list) => list,
                None => return false,
            }
        }
        _ => return false,
    };

    components.len() == 4 && components.iter().all(|c| (0.0..=1.0).contains(c))
}

fn is_valid_font_family(value: &TokenValue) -> bool {
    match value {
        TokenValue::Text(s) => !s.trim().is_empty(),
        TokenValue::Strings(list) => !list.is_empty() && list.iter().all(|s| !s.trim().is_empty()),
        _ => false,
    }
}
