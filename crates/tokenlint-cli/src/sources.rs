//! File-backed token source built from the configuration.

use std::path::{Path, PathBuf};

use tokenlint_core::{loader, Config, SourceError, Token, TokenScope, TokenSource};

/// Serves tokens from the documents declared in `tokenlint.toml`.
///
/// Paths in the config are resolved relative to the config file's
/// directory. Every call re-reads the documents; the engine treats the
/// result as a snapshot either way.
pub struct FileTokenSource {
    config: Config,
    base_dir: PathBuf,
}

impl FileTokenSource {
    /// Creates a source over a parsed config.
    pub fn new(config: Config, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    /// The underlying configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn load_documents(&self, files: &[PathBuf], scope: &TokenScope) -> Result<Vec<Token>, SourceError> {
        let mut tokens = Vec::new();
        for file in files {
            let path = self.absolute(file);
            let content = std::fs::read_to_string(&path)
                .map_err(|e| SourceError::Backend(format!("{}: {e}", path.display())))?;
            let parsed = loader::parse_document(&content, scope)
                .map_err(|e| SourceError::Backend(format!("{}: {e}", path.display())))?;
            tokens.extend(parsed);
        }
        Ok(tokens)
    }

    fn absolute(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base_dir.join(file)
        }
    }
}

impl TokenSource for FileTokenSource {
    fn brand_tokens(&self, brand: &str) -> Result<Vec<Token>, SourceError> {
        let declared = self
            .config
            .brands
            .get(brand)
            .ok_or_else(|| SourceError::UnknownBrand(brand.to_string()))?;
        self.load_documents(&declared.files, &TokenScope::brand(brand))
    }

    fn project_tokens(&self, project: &str) -> Result<Vec<Token>, SourceError> {
        let declared = self
            .config
            .projects
            .get(project)
            .ok_or_else(|| SourceError::UnknownProject(project.to_string()))?;
        self.load_documents(&declared.files, &TokenScope::project(project))
    }

    fn global_tokens(&self) -> Result<Vec<Token>, SourceError> {
        self.load_documents(&self.config.files, &TokenScope::Global)
    }

    fn project_of(&self, brand: &str) -> Result<Option<String>, SourceError> {
        let declared = self
            .config
            .brands
            .get(brand)
            .ok_or_else(|| SourceError::UnknownBrand(brand.to_string()))?;
        Ok(declared.project.clone())
    }
}
