//! Three-tier inheritance resolution: Brand → Project → Global.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::token::{ResolvedToken, ResolvedTokenSet, SourceLevel, Token};

/// Failures surfaced by a token source collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The brand is not known to the source.
    #[error("unknown brand: {0}")]
    UnknownBrand(String),
    /// The project is not known to the source.
    #[error("unknown project: {0}")]
    UnknownProject(String),
    /// The backing store failed.
    #[error("token source failure: {0}")]
    Backend(String),
}

/// Injectable read-only access to scope-partitioned tokens.
///
/// The engine never writes through this trait, and has no opinion on
/// snapshot freshness: if the backing store allows concurrent writes,
/// resolution may see a stale snapshot. That is an accepted limitation.
pub trait TokenSource {
    /// Tokens scoped to a brand.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the brand is unknown or the backing
    /// store fails.
    fn brand_tokens(&self, brand: &str) -> Result<Vec<Token>, SourceError>;

    /// Brand-less tokens scoped to a project.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the project is unknown or the
    /// backing store fails.
    fn project_tokens(&self, project: &str) -> Result<Vec<Token>, SourceError>;

    /// Organization-wide tokens.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backing store fails.
    fn global_tokens(&self) -> Result<Vec<Token>, SourceError>;

    /// The project a brand belongs to, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the brand is unknown or the backing
    /// store fails.
    fn project_of(&self, brand: &str) -> Result<Option<String>, SourceError>;
}

/// Computes the effective token set for one brand.
///
/// Candidates are merged in priority order (brand=1, project=2,
/// global=3; lower wins) into an ordered map keyed by path: the first
/// insertion for a path survives, so a brand value overrides project
/// and global, and ties within one level resolve deterministically to
/// the first-inserted token. Single pass per tier, output sorted by
/// path.
///
/// # Errors
///
/// Propagates [`SourceError`] from the collaborator.
pub fn resolve_brand_tokens(
    source: &dyn TokenSource,
    brand: &str,
) -> Result<ResolvedTokenSet, SourceError> {
    let project = source.project_of(brand)?;
    let mut merged: BTreeMap<String, ResolvedToken> = BTreeMap::new();

    absorb(&mut merged, source.brand_tokens(brand)?, SourceLevel::Brand);
    if let Some(project_id) = project.as_deref() {
        absorb(
            &mut merged,
            source.project_tokens(project_id)?,
            SourceLevel::Project,
        );
    }
    absorb(&mut merged, source.global_tokens()?, SourceLevel::Global);

    tracing::debug!(
        brand,
        project = project.as_deref(),
        resolved = merged.len(),
        "resolved brand token set"
    );

    Ok(ResolvedTokenSet::from_sorted(
        brand,
        project,
        merged.into_values().collect(),
    ))
}

fn absorb(merged: &mut BTreeMap<String, ResolvedToken>, tokens: Vec<Token>, level: SourceLevel) {
    for token in tokens {
        merged.entry(token.path.clone()).or_insert(ResolvedToken {
            path: token.path,
            kind: token.kind,
            value: token.value,
            description: token.description,
            source_level: level,
        });
    }
}
