//! Validation-rule configuration and the scope-hierarchy rule cascade.
//!
//! Rule sets cascade brand → project → global → built-in default. The
//! cascade returns whole sets, never a field-by-field merge across
//! levels; defaulting of unspecified fields happens within one declared
//! set at deserialization time.

use serde::{Deserialize, Serialize};

use crate::contrast::WcagLevel;

/// Naming policy for token paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingPolicy {
    /// Require kebab-case segments.
    #[serde(default = "default_true")]
    pub enforce_kebab_case: bool,
    /// Minimum number of path segments.
    #[serde(default = "default_min_segments")]
    pub min_segments: usize,
    /// Maximum number of path segments, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_segments: Option<usize>,
    /// Warn when a token has no description.
    #[serde(default)]
    pub require_description: bool,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            enforce_kebab_case: true,
            min_segments: 2,
            max_segments: None,
            require_description: false,
        }
    }
}

/// Type-safety policy for token values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePolicy {
    /// When false, value-grammar failures demote to warnings.
    #[serde(default = "default_true")]
    pub strict: bool,
    /// Whether type names outside the closed set are tolerated.
    #[serde(default = "default_true")]
    pub allow_unknown_types: bool,
}

impl Default for TypePolicy {
    fn default() -> Self {
        Self {
            strict: true,
            allow_unknown_types: true,
        }
    }
}

/// Alias-integrity policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasPolicy {
    /// Report circular alias chains.
    #[serde(default = "default_true")]
    pub forbid_cycles: bool,
    /// Report aliases whose target does not exist.
    #[serde(default = "default_true")]
    pub require_resolvable: bool,
    /// Allow targets in other visible scopes (project, global).
    #[serde(default = "default_true")]
    pub allow_cross_scope: bool,
    /// Report aliases whose target type differs from the referrer's.
    #[serde(default)]
    pub enforce_type_match: bool,
    /// Traversal depth cap; defaults to the token count when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for AliasPolicy {
    fn default() -> Self {
        Self {
            forbid_cycles: true,
            require_resolvable: true,
            allow_cross_scope: true,
            enforce_type_match: false,
            max_depth: None,
        }
    }
}

/// Contrast-compliance policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastPolicy {
    /// Require the WCAG 2.1 level below.
    #[serde(default = "default_true")]
    pub require_wcag: bool,
    /// Required WCAG 2.1 level.
    #[serde(default = "default_wcag_level")]
    pub wcag_level: WcagLevel,
    /// Require the APCA minimum below.
    #[serde(default)]
    pub require_apca: bool,
    /// Required minimum |Lc| when APCA is required.
    #[serde(default = "default_apca_minimum")]
    pub apca_minimum: f64,
    /// Advisory WCAG level; misses produce warnings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advise_wcag_level: Option<WcagLevel>,
    /// Advisory APCA |Lc|; misses produce warnings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advise_apca_minimum: Option<f64>,
}

impl Default for ContrastPolicy {
    fn default() -> Self {
        Self {
            require_wcag: true,
            wcag_level: WcagLevel::Aa,
            require_apca: false,
            apca_minimum: 60.0,
            advise_wcag_level: None,
            advise_apca_minimum: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_segments() -> usize {
    2
}

fn default_wcag_level() -> WcagLevel {
    WcagLevel::Aa
}

fn default_apca_minimum() -> f64 {
    60.0
}

/// A complete validation rule set for one scope level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Naming policy.
    #[serde(default)]
    pub naming: NamingPolicy,
    /// Type-safety policy.
    #[serde(default)]
    pub types: TypePolicy,
    /// Alias-integrity policy.
    #[serde(default)]
    pub aliases: AliasPolicy,
    /// Contrast policy.
    #[serde(default)]
    pub contrast: ContrastPolicy,
}

impl ValidationRules {
    /// The built-in default rule set; the cascade's ultimate fallback.
    #[must_use]
    pub fn recommended() -> Self {
        Self::default()
    }

    /// Everything on: descriptions required, unknown types rejected,
    /// alias type matching enforced, APCA required alongside WCAG.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            naming: NamingPolicy {
                require_description: true,
                ..NamingPolicy::default()
            },
            types: TypePolicy {
                allow_unknown_types: false,
                ..TypePolicy::default()
            },
            aliases: AliasPolicy {
                enforce_type_match: true,
                ..AliasPolicy::default()
            },
            contrast: ContrastPolicy {
                require_apca: true,
                advise_wcag_level: Some(WcagLevel::Aaa),
                ..ContrastPolicy::default()
            },
        }
    }

    /// Structural checks only, for gradual adoption: grammar failures
    /// demote to warnings and contrast is not required. Cycles stay
    /// fatal.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            types: TypePolicy {
                strict: false,
                ..TypePolicy::default()
            },
            contrast: ContrastPolicy {
                require_wcag: false,
                ..ContrastPolicy::default()
            },
            ..Self::default()
        }
    }
}

/// Injectable storage for scope-keyed rule sets.
///
/// Implementations return `None` when no rule set is declared at that
/// level; the cascade in [`resolve_rules`] handles the fallback.
pub trait RuleSource {
    /// Rule set declared for a brand, if any.
    fn brand_rules(&self, brand: &str) -> Option<ValidationRules>;
    /// Rule set declared for a brand-less project, if any.
    fn project_rules(&self, project: &str) -> Option<ValidationRules>;
    /// Rule set declared at the global level, if any.
    fn global_rules(&self) -> Option<ValidationRules>;
}

/// Resolves the effective rule set for a scope.
///
/// Pure ordered fallback with early return on first hit: brand →
/// project → global → built-in default. Never returns "no rules".
#[must_use]
pub fn resolve_rules(
    source: &dyn RuleSource,
    project: Option<&str>,
    brand: Option<&str>,
) -> ValidationRules {
    if let Some(id) = brand {
        if let Some(rules) = source.brand_rules(id) {
            tracing::debug!(brand = id, "resolved brand-level rules");
            return rules;
        }
    }
    if let Some(id) = project {
        if let Some(rules) = source.project_rules(id) {
            tracing::debug!(project = id, "resolved project-level rules");
            return rules;
        }
    }
    if let Some(rules) = source.global_rules() {
        tracing::debug!("resolved global rules");
        return rules;
    }
    ValidationRules::default()
}
