//! # tokenlint-core
//!
//! Core engine for design-token validation and inheritance resolution.
//!
//! This crate provides the pure, synchronous building blocks:
//!
//! - [`Validator`] composing path, value, and alias checks per token or
//!   batch
//! - [`contrast`] for combined WCAG 2.1 + APCA compliance reports
//! - [`resolve_brand_tokens`] merging Brand → Project → Global tiers
//!   into one effective set
//! - [`resolve_rules`] cascading scope-keyed rule sets to the first hit
//! - [`loader`] normalizing `$value`/`value` token documents at the
//!   boundary
//!
//! Every operation reads caller-supplied data and allocates its own
//! working state, so concurrent use needs no locking. The engine never
//! performs I/O except in the explicit config/document loaders.
//!
//! ## Example
//!
//! ```
//! use tokenlint_core::{Token, TokenType, Validator};
//!
//! let tokens = vec![
//!     Token::new("color.primary.500", TokenType::Color, "#3b82f6"),
//!     Token::new("color.brand", TokenType::Color, "{color.primary.500}"),
//! ];
//!
//! let report = Validator::with_defaults().validate_batch(&tokens);
//! assert_eq!(report.summary.invalid, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alias;
pub mod color;
mod config;
pub mod contrast;
mod inherit;
pub mod loader;
pub mod path;
mod rules;
mod token;
mod types;
mod validator;
pub mod value;

pub use config::{BrandConfig, Config, ConfigError, ProjectConfig};
pub use contrast::{
    analyze as analyze_contrast, ApcaAnalysis, ApcaBand, ContrastReport, Polarity, TextSize,
    WcagAnalysis, WcagLevel,
};
pub use inherit::{resolve_brand_tokens, SourceError, TokenSource};
pub use rules::{
    resolve_rules, AliasPolicy, ContrastPolicy, NamingPolicy, RuleSource, TypePolicy,
    ValidationRules,
};
pub use token::{
    ResolvedToken, ResolvedTokenSet, SourceLevel, Token, TokenScope, TokenType, TokenValue,
};
pub use types::{
    BatchReport, BatchSummary, Issue, IssueCode, IssueDiagnostic, Severity, Suggestion,
    TokenReport, ValidationResult,
};
pub use validator::Validator;
