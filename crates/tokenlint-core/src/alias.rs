//! Alias reference extraction, scoped lookup, and cycle detection.
//!
//! The cycle walk is the one correctness-critical loop in the engine:
//! it is iterative, keeps a per-call visited chain, and is always
//! bounded by a depth cap so malformed data cannot hang a caller.

use crate::rules::AliasPolicy;
use crate::token::{Token, TokenScope, TokenValue};
use crate::types::{Issue, IssueCode, ValidationResult};

/// Extracts the alias path from a `{path}` literal.
///
/// Only the exact form is recognized; partial or interpolated aliases
/// are not. Re-wrapping the returned path in braces reproduces the
/// original literal.
#[must_use]
pub fn extract_alias(value: &TokenValue) -> Option<&str> {
    let text = value.as_text()?;
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    if inner.is_empty() || inner.contains('{') || inner.contains('}') {
        return None;
    }
    Some(inner)
}

/// Whether a target scope is a legal alias destination for a referrer.
///
/// Cross-scope references accept the same scope tuple, a global token,
/// or (for a brand referrer) a brand-less project token — the caller
/// supplies the visible set, so a project target is taken to belong to
/// the referrer's project. With cross-scope forbidden, only the same
/// scope tuple counts.
fn scope_permits(referrer: &TokenScope, target: &TokenScope, allow_cross_scope: bool) -> bool {
    if referrer == target {
        return true;
    }
    if !allow_cross_scope {
        return false;
    }
    match (referrer, target) {
        (_, TokenScope::Global) => true,
        (TokenScope::Brand { .. }, TokenScope::Project { .. }) => true,
        _ => false,
    }
}

/// Finds the alias target for a referrer, honoring the scope policy.
#[must_use]
pub fn find_target<'a>(
    path: &str,
    tokens: &'a [Token],
    referrer: &TokenScope,
    allow_cross_scope: bool,
) -> Option<&'a Token> {
    tokens
        .iter()
        .find(|t| t.path == path && scope_permits(referrer, &t.scope, allow_cross_scope))
}

/// Checks that an alias target exists (and, by policy, type-matches).
///
/// Reports `broken-reference` when the target is absent and
/// `alias-type-mismatch` when type matching is enforced and the target's
/// declared type differs. Never mutates its inputs.
#[must_use]
pub fn check_exists(
    token: &Token,
    alias_path: &str,
    tokens: &[Token],
    policy: &AliasPolicy,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    if !policy.require_resolvable {
        return result;
    }

    match find_target(alias_path, tokens, &token.scope, policy.allow_cross_scope) {
        None => {
            result.push(Issue::new(
                IssueCode::BrokenReference,
                &token.path,
                format!("alias `{{{alias_path}}}` does not resolve to any visible token"),
            ));
        }
        Some(target) => {
            if policy.enforce_type_match && target.kind != token.kind {
                result.push(Issue::new(
                    IssueCode::AliasTypeMismatch,
                    &token.path,
                    format!(
                        "alias target `{}` has type `{}`, expected `{}`",
                        target.path, target.kind, token.kind
                    ),
                ));
            }
        }
    }

    result
}

/// Walks the alias chain from `start`, reporting a cycle if one exists.
///
/// Returns the full chain including the revisited path (e.g.
/// `["a", "b", "c", "a"]`). A missing token or a non-alias value
/// terminates the walk successfully; absence is `check_exists`'s
/// concern. The walk is bounded by `max_depth` (defaulting to the token
/// count) even on malformed data.
#[must_use]
pub fn detect_cycle(start: &str, tokens: &[Token], max_depth: Option<usize>) -> Option<Vec<String>> {
    let cap = max_depth.unwrap_or_else(|| tokens.len().max(1));
    let mut chain: Vec<String> = vec![start.to_string()];
    let mut current = start.to_string();

    loop {
        if chain.len() > cap {
            tracing::warn!(start, cap, "alias walk hit depth cap without terminating");
            return None;
        }

        let token = tokens.iter().find(|t| t.path == current)?;
        let next = extract_alias(&token.value)?;

        if let Some(position) = chain.iter().position(|seen| seen == next) {
            let mut cycle = chain[position..].to_vec();
            cycle.push(next.to_string());
            return Some(cycle);
        }

        chain.push(next.to_string());
        current = next.to_string();
    }
}

/// Outcome of following an alias chain to its end.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// Chain ended at a token with a literal value.
    Resolved {
        /// The token the chain ended at.
        token: &'a Token,
        /// Paths visited, start first.
        chain: Vec<String>,
    },
    /// Chain reached a path with no matching token.
    Broken {
        /// The missing path.
        missing: String,
        /// Paths visited before the dead end.
        chain: Vec<String>,
    },
    /// Chain revisited a path already in it.
    CycleDetected {
        /// The cycle, including the revisited path.
        chain: Vec<String>,
    },
    /// Chain exceeded the depth cap.
    DepthExceeded {
        /// Paths visited before giving up.
        chain: Vec<String>,
    },
}

/// Follows an alias chain from a starting token to its final target.
///
/// For consumers that need the end of a chain (the engine itself only
/// flags aliases). Lookup is by path alone; scope policy applies to
/// existence checking, not traversal.
#[must_use]
pub fn resolve_chain<'a>(
    start: &'a Token,
    tokens: &'a [Token],
    max_depth: Option<usize>,
) -> Resolution<'a> {
    let cap = max_depth.unwrap_or_else(|| tokens.len().max(1));
    let mut chain = vec![start.path.clone()];
    let mut current = start;

    loop {
        let Some(next) = extract_alias(&current.value) else {
            return Resolution::Resolved {
                token: current,
                chain,
            };
        };

        if chain.iter().any(|seen| seen == next) {
            chain.push(next.to_string());
            return Resolution::CycleDetected { chain };
        }

        if chain.len() >= cap {
            return Resolution::DepthExceeded { chain };
        }

        match tokens.iter().find(|t| t.path == next) {
            Some(token) => {
                chain.push(next.to_string());
                current = token;
            }
            None => {
                return Resolution::Broken {
                    missing: next.to_string(),
                    chain,
                };
            }
        }
    }
}
