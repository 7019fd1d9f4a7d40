//! Mapped-type registry and namespace scanning.
//!
//! The original design located mapped types by runtime classpath
//! reflection; here discovery is registration-based. A [`TypeContext`] is
//! the host-supplied source of mapped-type definitions, populated either
//! programmatically or from a TOML model manifest, and [`scan`] filters it
//! down to the namespaces a request asks for.

use std::collections::BTreeMap;
use std::path::Path;

use ddlforge_core::{MappedType, TypeKind};
use tracing::debug;

use crate::error::Result;
use crate::manifest;

/// Registry of mapped-type definitions supplied by the host.
///
/// Keyed by fully-qualified type name; registering the same name twice
/// replaces the earlier definition.
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    types: BTreeMap<String, MappedType>,
}

impl TypeContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapped type, replacing any earlier registration with
    /// the same fully-qualified name.
    pub fn register(&mut self, mapped: MappedType) {
        self.types.insert(mapped.type_name().to_string(), mapped);
    }

    /// Loads a context from a TOML model manifest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DdlError::ScanConfiguration`] if the manifest
    /// cannot be read or parsed. Unlike the property overlay, a broken
    /// manifest aborts the whole request.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        manifest::load(path)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over registered types in name order.
    pub fn iter(&self) -> impl Iterator<Item = &MappedType> {
        self.types.values()
    }
}

/// Returns true when `namespace` equals `prefix` or sits below it,
/// segment-aligned: `pkg.entities` matches `pkg.entities` and
/// `pkg.entities.admin` but not `pkg.entitiesx`.
fn namespace_matches(namespace: &str, prefix: &str) -> bool {
    namespace == prefix
        || (namespace.starts_with(prefix) && namespace.as_bytes().get(prefix.len()) == Some(&b'.'))
}

/// Scans the context for mapped types under the given namespace prefixes.
///
/// Results across namespaces are unioned and deduplicated by
/// fully-qualified name; ordering is deterministic. When
/// `include_embeddables` is false only entity types survive the filter.
#[must_use]
pub fn scan(
    context: &TypeContext,
    namespaces: &[String],
    include_embeddables: bool,
) -> BTreeMap<String, MappedType> {
    let mut found = BTreeMap::new();
    for mapped in context.iter() {
        if !include_embeddables && mapped.kind() == TypeKind::Embeddable {
            continue;
        }
        let namespace = mapped.namespace();
        if namespaces
            .iter()
            .any(|prefix| namespace_matches(namespace, prefix))
        {
            found.insert(mapped.type_name().to_string(), mapped.clone());
        }
    }
    debug!(
        types = found.len(),
        namespaces = namespaces.len(),
        "scanned mapped types"
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_core::{
        ColumnSchema, EmbeddableMapping, EntityMapping, SqlType, TableSchema,
    };

    fn entity(type_name: &str, table: &str) -> MappedType {
        MappedType::Entity(EntityMapping {
            type_name: type_name.to_string(),
            table: TableSchema::new(table)
                .column(ColumnSchema::new("id", SqlType::BigInt).primary_key()),
        })
    }

    fn embeddable(type_name: &str) -> MappedType {
        MappedType::Embeddable(EmbeddableMapping {
            type_name: type_name.to_string(),
            columns: vec![ColumnSchema::new("street", SqlType::Varchar(255))],
        })
    }

    fn context() -> TypeContext {
        let mut ctx = TypeContext::new();
        ctx.register(entity("pkg.entities.Person", "persons"));
        ctx.register(entity("pkg.entities.admin.Account", "accounts"));
        ctx.register(entity("other.Thing", "things"));
        ctx.register(embeddable("pkg.values.Address"));
        ctx
    }

    #[test]
    fn scan_filters_by_namespace_prefix() {
        let ctx = context();
        let found = scan(&ctx, &["pkg.entities".to_string()], true);

        assert_eq!(found.len(), 2);
        assert!(found.contains_key("pkg.entities.Person"));
        assert!(found.contains_key("pkg.entities.admin.Account"));
    }

    #[test]
    fn scan_is_segment_aligned() {
        let mut ctx = context();
        ctx.register(entity("pkg.entitiesx.Decoy", "decoys"));

        let found = scan(&ctx, &["pkg.entities".to_string()], true);
        assert!(!found.contains_key("pkg.entitiesx.Decoy"));
    }

    #[test]
    fn scan_unions_and_dedupes_across_namespaces() {
        let ctx = context();
        let found = scan(
            &ctx,
            &[
                "pkg".to_string(),
                "pkg.entities".to_string(),
                "other".to_string(),
            ],
            true,
        );

        // "pkg" already covers "pkg.entities"; each type appears once.
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn scan_can_exclude_embeddables() {
        let ctx = context();
        let found = scan(&ctx, &["pkg".to_string()], false);

        assert!(found.contains_key("pkg.entities.Person"));
        assert!(!found.contains_key("pkg.values.Address"));
    }

    #[test]
    fn register_last_wins() {
        let mut ctx = TypeContext::new();
        ctx.register(entity("pkg.entities.Person", "persons"));
        ctx.register(entity("pkg.entities.Person", "people"));

        assert_eq!(ctx.len(), 1);
        let found = scan(&ctx, &["pkg.entities".to_string()], true);
        match found.get("pkg.entities.Person") {
            Some(MappedType::Entity(e)) => assert_eq!(e.table.name, "people"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
