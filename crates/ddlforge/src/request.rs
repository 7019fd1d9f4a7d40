//! The generation request and its per-dialect result.

use std::path::{Path, PathBuf};

use ddlforge_core::Dialect;

use crate::error::{DdlError, Result};

/// An immutable description of one generation run.
///
/// Constructed once by the caller and passed by reference to every stage;
/// no stage mutates it. [`GenerationRequest::validate`] must pass before
/// any generation work starts.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    output_dir: PathBuf,
    namespaces: Vec<String>,
    dialects: Vec<String>,
    audit_tables: bool,
    drop_statements: bool,
    include_embeddables: bool,
    overlay_path: Option<PathBuf>,
}

impl GenerationRequest {
    /// Creates a request targeting the given destination directory, with
    /// default flags: no audit tables, no drop statements, embeddables
    /// included in the scan.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            namespaces: Vec::new(),
            dialects: Vec::new(),
            audit_tables: false,
            drop_statements: false,
            include_embeddables: true,
            overlay_path: None,
        }
    }

    /// Adds a namespace prefix to scan.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// Adds namespace prefixes to scan.
    #[must_use]
    pub fn namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces.extend(namespaces.into_iter().map(Into::into));
        self
    }

    /// Adds a dialect identifier to generate for.
    #[must_use]
    pub fn dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialects.push(dialect.into());
        self
    }

    /// Adds dialect identifiers to generate for.
    #[must_use]
    pub fn dialects<I, S>(mut self, dialects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dialects.extend(dialects.into_iter().map(Into::into));
        self
    }

    /// Emits additional history tables per entity.
    #[must_use]
    pub fn audit_tables(mut self, enabled: bool) -> Self {
        self.audit_tables = enabled;
        self
    }

    /// Prefixes create statements with corresponding drop statements.
    #[must_use]
    pub fn drop_statements(mut self, enabled: bool) -> Self {
        self.drop_statements = enabled;
        self
    }

    /// Whether the scan picks up embeddable value types in addition to
    /// entities. Defaults to true.
    #[must_use]
    pub fn include_embeddables(mut self, enabled: bool) -> Self {
        self.include_embeddables = enabled;
        self
    }

    /// Sets the property overlay source. A missing or malformed overlay
    /// file is never fatal.
    #[must_use]
    pub fn overlay(mut self, path: impl Into<PathBuf>) -> Self {
        self.overlay_path = Some(path.into());
        self
    }

    /// Validates the request before any work starts.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Configuration`] if the namespace or dialect set
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.namespaces.is_empty() {
            return Err(DdlError::Configuration(
                "at least one namespace is required".to_string(),
            ));
        }
        if self.dialects.is_empty() {
            return Err(DdlError::Configuration(
                "at least one dialect is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Destination directory for generated scripts.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Namespace prefixes to scan.
    #[must_use]
    pub fn namespace_prefixes(&self) -> &[String] {
        &self.namespaces
    }

    /// Requested dialect identifiers, as given by the caller.
    #[must_use]
    pub fn dialect_ids(&self) -> &[String] {
        &self.dialects
    }

    /// Whether audit augmentation was requested.
    #[must_use]
    pub fn wants_audit_tables(&self) -> bool {
        self.audit_tables
    }

    /// Whether drop statements were requested.
    #[must_use]
    pub fn wants_drop_statements(&self) -> bool {
        self.drop_statements
    }

    /// Whether embeddable value types are scanned.
    #[must_use]
    pub fn scans_embeddables(&self) -> bool {
        self.include_embeddables
    }

    /// The overlay source path, if configured.
    #[must_use]
    pub fn overlay_path(&self) -> Option<&Path> {
        self.overlay_path.as_deref()
    }
}

/// Outcome of generating and synchronizing one dialect's script.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The resolved dialect.
    pub dialect: Dialect,
    /// Destination file path, `<output_dir>/<dialect-id>.sql`.
    pub path: PathBuf,
    /// The generated script text.
    pub script: String,
    /// Whether the destination file content changed on this run.
    pub changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_namespaces() {
        let request = GenerationRequest::new("out").dialect("hsql");
        assert!(matches!(
            request.validate(),
            Err(DdlError::Configuration(_))
        ));
    }

    #[test]
    fn validate_rejects_empty_dialects() {
        let request = GenerationRequest::new("out").namespace("pkg.entities");
        assert!(matches!(
            request.validate(),
            Err(DdlError::Configuration(_))
        ));
    }

    #[test]
    fn validate_accepts_populated_request() {
        let request = GenerationRequest::new("out")
            .namespace("pkg.entities")
            .dialects(["hsql", "mysql5"])
            .audit_tables(true)
            .overlay("overrides.toml");

        assert!(request.validate().is_ok());
        assert!(request.wants_audit_tables());
        assert!(!request.wants_drop_statements());
        assert!(request.scans_embeddables());
        assert_eq!(request.dialect_ids().len(), 2);
        assert!(request.overlay_path().is_some());
    }
}
