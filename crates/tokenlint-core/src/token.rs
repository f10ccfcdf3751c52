//! The canonical token record and resolved-token output types.

use serde::{Deserialize, Serialize};

/// The closed set of token types, plus an escape hatch for extensions.
///
/// Unknown type names are preserved in [`TokenType::Other`] so they can be
/// validated (or rejected) by policy rather than lost at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    /// Color value (hex, rgb()/rgba(), hsl()/hsla(), or named).
    Color,
    /// Length with a CSS unit (px, rem, em, %, vh, vw, vmin, vmax).
    Dimension,
    /// Time with a CSS unit (ms, s).
    Duration,
    /// Numeric weight in [1,1000] or a weight keyword.
    FontWeight,
    /// Easing curve with exactly 4 components in [0,1].
    CubicBezier,
    /// Plain number.
    Number,
    /// Font family name or ordered fallback list.
    FontFamily,
    /// Free-form string, always valid.
    String,
    /// Any other type name; validated but not strictly type-checked.
    Other(std::string::String),
}

impl TokenType {
    /// Returns the canonical type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Duration => "duration",
            Self::FontWeight => "font-weight",
            Self::CubicBezier => "cubic-bezier",
            Self::Number => "number",
            Self::FontFamily => "font-family",
            Self::String => "string",
            Self::Other(name) => name,
        }
    }

    /// Returns true for type names outside the closed set.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for TokenType {
    fn from(name: &str) -> Self {
        match name {
            "color" => Self::Color,
            "dimension" => Self::Dimension,
            "duration" => Self::Duration,
            "font-weight" | "fontWeight" => Self::FontWeight,
            "cubic-bezier" | "cubicBezier" => Self::CubicBezier,
            "number" => Self::Number,
            "font-family" | "fontFamily" => Self::FontFamily,
            "string" => Self::String,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for TokenType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<TokenType> for String {
    fn from(kind: TokenType) -> Self {
        kind.name().to_string()
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token's raw value, as found in a token document.
///
/// The untagged representation matches the JSON shapes that occur in the
/// wild: scalars for most types, string lists for font stacks, number
/// lists for easing curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// A plain number.
    Number(f64),
    /// A text value (including the `{path}` alias form).
    Text(String),
    /// An ordered list of strings (font stacks).
    Strings(Vec<String>),
    /// An ordered list of numbers (easing curves).
    Numbers(Vec<f64>),
}

impl TokenValue {
    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for an empty text value.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Returns the numeric content, accepting numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl std::fmt::Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Strings(list) => write!(f, "{}", list.join(", ")),
            Self::Numbers(list) => {
                let parts: Vec<String> = list.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

/// Where a token lives in the scope hierarchy.
///
/// A global token carries no identifier; non-global tokens carry exactly
/// one of project/brand. The invariant is held by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "lowercase")]
pub enum TokenScope {
    /// Organization-wide defaults.
    Global,
    /// Project-scoped, brand-less.
    Project {
        /// Project identifier.
        project: String,
    },
    /// Brand-scoped override.
    Brand {
        /// Brand identifier.
        brand: String,
    },
}

impl TokenScope {
    /// Creates a project scope.
    #[must_use]
    pub fn project(id: impl Into<String>) -> Self {
        Self::Project { project: id.into() }
    }

    /// Creates a brand scope.
    #[must_use]
    pub fn brand(id: impl Into<String>) -> Self {
        Self::Brand { brand: id.into() }
    }

    /// Returns true for the global scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project { project } => write!(f, "project:{project}"),
            Self::Brand { brand } => write!(f, "brand:{brand}"),
        }
    }
}

/// A design token: the unit of configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Dot-delimited kebab-case path (e.g., `color.primary.500`).
    pub path: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub kind: TokenType,
    /// Literal value or `{path}` alias.
    pub value: TokenValue,
    /// Scope this token belongs to.
    #[serde(default = "default_scope")]
    pub scope: TokenScope,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_scope() -> TokenScope {
    TokenScope::Global
}

impl Token {
    /// Creates a new global token.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: TokenType, value: impl Into<TokenValue>) -> Self {
        Self {
            path: path.into(),
            kind,
            value: value.into(),
            scope: TokenScope::Global,
            description: None,
        }
    }

    /// Sets the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: TokenScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the value is an alias reference.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        crate::alias::extract_alias(&self.value).is_some()
    }
}

/// Which tier a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLevel {
    /// Brand-scoped override (wins over everything).
    Brand,
    /// Project-scoped, brand-less.
    Project,
    /// Organization-wide default.
    Global,
}

impl SourceLevel {
    /// Merge priority; lower wins.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Brand => 1,
            Self::Project => 2,
            Self::Global => 3,
        }
    }
}

impl std::fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Brand => write!(f, "brand"),
            Self::Project => write!(f, "project"),
            Self::Global => write!(f, "global"),
        }
    }
}

/// One surviving token after inheritance resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedToken {
    /// Token path.
    pub path: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub kind: TokenType,
    /// Effective value (aliases are flagged, not chased).
    pub value: TokenValue,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Which tier this value came from.
    pub source_level: SourceLevel,
}

impl ResolvedToken {
    /// Returns true if the surviving value is an alias reference.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        crate::alias::extract_alias(&self.value).is_some()
    }
}

/// The effective token set for one brand, ordered by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTokenSet {
    /// The brand this set was resolved for.
    pub brand: String,
    /// The brand's project, if it has one.
    pub project: Option<String>,
    tokens: Vec<ResolvedToken>,
}

impl ResolvedTokenSet {
    /// Builds a set from already-sorted tokens.
    ///
    /// Callers must guarantee path order and uniqueness; the inheritance
    /// resolver does via its ordered-map merge.
    #[must_use]
    pub(crate) fn from_sorted(
        brand: impl Into<String>,
        project: Option<String>,
        tokens: Vec<ResolvedToken>,
    ) -> Self {
        Self {
            brand: brand.into(),
            project,
            tokens,
        }
    }

    /// Looks a token up by exact path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ResolvedToken> {
        self.tokens
            .binary_search_by(|t| t.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.tokens[idx])
    }

    /// The resolved tokens, sorted by path.
    #[must_use]
    pub fn tokens(&self) -> &[ResolvedToken] {
        &self.tokens
    }

    /// Number of resolved tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Flattens back into plain tokens, all scoped to the brand.
    ///
    /// The effective set is one namespace as seen by the brand, so the
    /// original tiers are deliberately not reconstructed; aliases that
    /// survived resolution stay resolvable within the flattened set.
    #[must_use]
    pub fn to_tokens(&self) -> Vec<Token> {
        self.tokens
            .iter()
            .map(|t| Token {
                path: t.path.clone(),
                kind: t.kind.clone(),
                value: t.value.clone(),
                scope: TokenScope::brand(&self.brand),
                description: t.description.clone(),
            })
            .collect()
    }
}
