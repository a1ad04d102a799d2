//! Document name registries.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use docai_core::config::IngestionConfig;
use docai_core::constants::SUPPORTED_EXTENSIONS;
use docai_core::errors::{DocaiResult, RetrievalError};
use docai_core::traits::IDocumentRegistry;
use tracing::debug;

/// Lists the supported documents in a directory, sorted by file name.
///
/// The directory is read on every call.
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectoryRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extensions(root, SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()))
    }

    /// Accept only `extensions` (without the dot, any case).
    pub fn with_extensions(
        root: impl Into<PathBuf>,
        extensions: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            root: root.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &IngestionConfig) -> Self {
        Self::with_extensions(&config.document_dir, config.extensions.iter().cloned())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
    }

    fn unavailable(&self, reason: impl ToString) -> RetrievalError {
        RetrievalError::RegistryUnavailable {
            path: self.root.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl IDocumentRegistry for DirectoryRegistry {
    fn list_documents(&self) -> DocaiResult<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| self.unavailable(e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| self.unavailable(e))?.path();
            if !path.is_file() || !self.accepts(&path) {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => names.push(name.to_string()),
                None => debug!(path = %path.display(), "skipping non-UTF-8 file name"),
            }
        }
        names.sort();
        debug!(root = %self.root.display(), documents = names.len(), "listed document pool");
        Ok(names)
    }
}

/// A fixed, replaceable list of document names.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    documents: RwLock<Vec<String>>,
}

impl StaticRegistry {
    pub fn new<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documents: RwLock::new(documents.into_iter().map(Into::into).collect()),
        }
    }

    /// Swap in a new document list; later retrievals see it immediately.
    pub fn replace<I, S>(&self, documents: I) -> DocaiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.documents.write().map_err(|e| RetrievalError::RegistryUnavailable {
            path: "static".to_string(),
            reason: format!("registry lock poisoned: {e}"),
        })?;
        *guard = documents.into_iter().map(Into::into).collect();
        Ok(())
    }
}

impl IDocumentRegistry for StaticRegistry {
    fn list_documents(&self) -> DocaiResult<Vec<String>> {
        let guard = self.documents.read().map_err(|e| RetrievalError::RegistryUnavailable {
            path: "static".to_string(),
            reason: format!("registry lock poisoned: {e}"),
        })?;
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_registry_keeps_given_order() {
        let registry = StaticRegistry::new(["b.pdf", "a.docx"]);
        assert_eq!(registry.list_documents().unwrap(), vec!["b.pdf", "a.docx"]);
        registry.replace(["c.pdf"]).unwrap();
        assert_eq!(registry.list_documents().unwrap(), vec!["c.pdf"]);
    }

    #[test]
    fn extension_filter_ignores_case_and_dots() {
        let registry = DirectoryRegistry::with_extensions(".", vec![".PDF".to_string()]);
        assert!(registry.accepts(Path::new("report.pdf")));
        assert!(registry.accepts(Path::new("REPORT.Pdf")));
        assert!(!registry.accepts(Path::new("notes.docx")));
        assert!(!registry.accepts(Path::new("pdf")));
    }
}
