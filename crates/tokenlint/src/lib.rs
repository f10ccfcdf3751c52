//! # tokenlint
//!
//! Design-token validation and inheritance resolution.
//!
//! This facade re-exports the [`tokenlint_core`] engine and adds a
//! [`runner`] for guarding a repository's token documents from
//! `cargo test`:
//!
//! ```ignore
//! #[test]
//! fn design_tokens_stay_valid() {
//!     tokenlint::runner::run_check(None, None);
//! }
//! ```
//!
//! The runner discovers `tokenlint.toml` at the workspace root, loads
//! every declared token document, validates each scope with its
//! cascaded rule set, and panics with a formatted report when findings
//! at or above the failure threshold exist.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod runner;

pub use tokenlint_core::{
    analyze_contrast, loader, resolve_brand_tokens, resolve_rules, AliasPolicy, ApcaAnalysis,
    ApcaBand, BatchReport, BatchSummary, BrandConfig, Config, ConfigError, ContrastPolicy,
    ContrastReport, Issue, IssueCode, NamingPolicy, Polarity, ProjectConfig, ResolvedToken,
    ResolvedTokenSet, RuleSource, Severity, SourceError, SourceLevel, Suggestion, TextSize, Token,
    TokenReport, TokenScope, TokenSource, TokenType, TokenValue, TypePolicy, ValidationResult,
    ValidationRules, Validator, WcagAnalysis, WcagLevel,
};
