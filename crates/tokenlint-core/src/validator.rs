//! The validation orchestrator: one token or a whole batch.

use crate::rules::ValidationRules;
use crate::token::Token;
use crate::types::{BatchReport, BatchSummary, Issue, IssueCode, TokenReport, ValidationResult};
use crate::{alias, path, value};

/// Composes the path, value, and alias checks under one rule set.
///
/// Stateless apart from the rules it was built with; safe to share
/// across threads and to call concurrently.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    /// Creates a validator with the given rule set.
    #[must_use]
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Creates a validator with the built-in default rules.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The rule set this validator applies.
    #[must_use]
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validates a single token.
    ///
    /// `alias_targets` is the flat token set used for reference and
    /// cycle checks; without it, alias values are accepted as-is (the
    /// single-token contract). All findings are aggregated into one
    /// result; `valid` is true iff no errors. Running twice over the
    /// same inputs yields identical results.
    #[must_use]
    pub fn validate_token(&self, token: &Token, alias_targets: Option<&[Token]>) -> ValidationResult {
        let mut result = path::validate_path(&token.path, &self.rules.naming);

        result.merge(value::validate_value(
            &token.path,
            &token.kind,
            &token.value,
            &self.rules.types,
        ));

        if let Some(alias_path) = alias::extract_alias(&token.value) {
            if let Some(targets) = alias_targets {
                result.merge(alias::check_exists(
                    token,
                    alias_path,
                    targets,
                    &self.rules.aliases,
                ));

                if self.rules.aliases.forbid_cycles {
                    if let Some(chain) =
                        alias::detect_cycle(&token.path, targets, self.rules.aliases.max_depth)
                    {
                        result.push(Issue::new(
                            IssueCode::CircularReference,
                            &token.path,
                            format!("circular alias chain: {}", chain.join(" → ")),
                        ));
                    }
                }
            }
        }

        if self.rules.naming.require_description
            && token.description.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            result.push(Issue::new(
                IssueCode::MissingDescription,
                &token.path,
                "token has no description",
            ));
        }

        result
    }

    /// Validates a batch, using the batch itself as the alias target
    /// set.
    ///
    /// One token's failure never prevents evaluation of the rest. The
    /// summary always satisfies `valid + invalid == total`.
    #[must_use]
    pub fn validate_batch(&self, tokens: &[Token]) -> BatchReport {
        let mut results = Vec::with_capacity(tokens.len());
        let mut summary = BatchSummary {
            total: tokens.len(),
            ..BatchSummary::default()
        };

        for token in tokens {
            let result = self.validate_token(token, Some(tokens));
            if result.valid {
                summary.valid += 1;
            } else {
                summary.invalid += 1;
            }
            if result.has_warnings() {
                summary.with_warnings += 1;
            }
            results.push(TokenReport {
                path: token.path.clone(),
                result,
            });
        }

        tracing::debug!(
            total = summary.total,
            invalid = summary.invalid,
            "validated batch"
        );

        BatchReport { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::NamingPolicy;
    use crate::token::TokenType;

    fn validator() -> Validator {
        Validator::with_defaults()
    }

    #[test]
    fn well_formed_token_passes() {
        let token = Token::new("color.primary.500", TokenType::Color, "#3b82f6");
        let result = validator().validate_token(&token, None);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn findings_aggregate_across_checks() {
        // Bad path and bad value in one token: both reported.
        let token = Token::new("Color", TokenType::Color, "#zzz");
        let result = validator().validate_token(&token, None);
        let codes: Vec<IssueCode> = result.errors.iter().map(|i| i.code).collect();
        assert!(codes.contains(&IssueCode::TooFewSegments));
        assert!(codes.contains(&IssueCode::InvalidSegment));
        assert!(codes.contains(&IssueCode::InvalidColorFormat));
    }

    #[test]
    fn alias_without_target_set_is_accepted() {
        let token = Token::new("color.brand", TokenType::Color, "{color.primary.500}");
        assert!(validator().validate_token(&token, None).valid);
    }

    #[test]
    fn broken_alias_reported_against_set() {
        let token = Token::new("color.brand", TokenType::Color, "{color.gone}");
        let set = vec![token.clone()];
        let result = validator().validate_token(&token, Some(&set));
        assert!(!result.valid);
        assert_eq!(result.errors[0].code, IssueCode::BrokenReference);
    }

    #[test]
    fn cycle_reported_with_chain() {
        let set = vec![
            Token::new("a.x", TokenType::Color, "{b.x}"),
            Token::new("b.x", TokenType::Color, "{a.x}"),
        ];
        let result = validator().validate_token(&set[0], Some(&set));
        assert!(!result.valid);
        let cycle = result
            .errors
            .iter()
            .find(|i| i.code == IssueCode::CircularReference)
            .expect("cycle issue");
        assert!(cycle.message.contains("a.x → b.x → a.x"), "{}", cycle.message);
    }

    #[test]
    fn validation_is_idempotent() {
        let set = vec![
            Token::new("a.x", TokenType::Color, "{b.x}"),
            Token::new("b.x", TokenType::Color, "#fff"),
        ];
        let first = validator().validate_token(&set[0], Some(&set));
        let second = validator().validate_token(&set[0], Some(&set));
        assert_eq!(first.valid, second.valid);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn missing_description_warns_when_required() {
        let rules = ValidationRules {
            naming: NamingPolicy {
                require_description: true,
                ..NamingPolicy::default()
            },
            ..ValidationRules::default()
        };
        let token = Token::new("color.primary.500", TokenType::Color, "#3b82f6");
        let result = Validator::new(rules).validate_token(&token, None);
        assert!(result.valid);
        assert_eq!(result.warnings[0].code, IssueCode::MissingDescription);
    }

    #[test]
    fn batch_summary_counts_add_up() {
        let tokens = vec![
            Token::new("color.ok", TokenType::Color, "#ffffff"),
            Token::new("color.bad", TokenType::Color, "nope-color"),
            Token::new("size.odd", TokenType::Other("elevation".into()), "2"),
        ];
        let report = validator().validate_batch(&tokens);
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.valid + report.summary.invalid, report.summary.total);
        assert_eq!(report.summary.invalid, 1);
        assert_eq!(report.summary.with_warnings, 1);
    }

    #[test]
    fn batch_continues_past_failures() {
        let tokens = vec![
            Token::new("", TokenType::Color, "#fff"),
            Token::new("color.fine", TokenType::Color, "#fff"),
        ];
        let report = validator().validate_batch(&tokens);
        assert_eq!(report.results.len(), 2);
        assert!(report.results[1].result.valid);
    }

    #[test]
    fn batch_resolves_aliases_within_itself() {
        let tokens = vec![
            Token::new("color.base", TokenType::Color, "#3b82f6"),
            Token::new("color.link", TokenType::Color, "{color.base}"),
        ];
        let report = validator().validate_batch(&tokens);
        assert_eq!(report.summary.invalid, 0);
    }
}
