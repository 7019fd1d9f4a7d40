//! Per-dialect DDL script generation from declaratively mapped types.
//!
//! ddlforge generates schema definition scripts from a set of mapped
//! data-model types, one script per requested dialect, and synchronizes
//! them into a destination tree without disturbing files whose content has
//! not changed. No database connection is ever opened; generation is a
//! pure function of the type metadata, the dialect, and the configuration
//! overlay.
//!
//! # Pipeline
//!
//! - **Registry** — mapped-type definitions supplied by the host, scanned
//!   by namespace prefix ([`registry`])
//! - **Overlay** — optional configuration overrides, never fatal when
//!   missing or malformed ([`overlay`])
//! - **Engine** — per-dialect script generation with optional drop
//!   statements and audit/history augmentation ([`engine`])
//! - **Sync** — write-if-changed reconciliation against the destination
//!   tree ([`sync`])
//!
//! # Example
//!
//! ```rust,no_run
//! use ddlforge::prelude::*;
//! use ddlforge_core::{ColumnSchema, EntityMapping, MappedType, SqlType, TableSchema};
//!
//! let mut context = TypeContext::new();
//! context.register(MappedType::Entity(EntityMapping {
//!     type_name: "pkg.entities.Person".to_string(),
//!     table: TableSchema::new("persons")
//!         .column(ColumnSchema::new("id", SqlType::BigInt).primary_key()),
//! }));
//!
//! let request = GenerationRequest::new("src/main/sql/ddl")
//!     .namespace("pkg.entities")
//!     .dialects(["hsql", "mysql5", "postgresql9"]);
//!
//! let results = ddlforge::generate_ddl(&request, &context)?;
//! for result in &results {
//!     println!("{}: changed = {}", result.path.display(), result.changed);
//! }
//! # Ok::<(), ddlforge::DdlError>(())
//! ```

pub mod engine;
pub mod error;
pub mod manifest;
pub mod overlay;
pub mod registry;
pub mod request;
pub mod sync;

use std::collections::BTreeSet;

use ddlforge_core::Dialect;
use tracing::info;

pub use crate::error::{DdlError, Result};
pub use crate::request::{GenerationRequest, GenerationResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::engine::ScriptConfig;
    pub use crate::error::{DdlError, Result};
    pub use crate::overlay::PropertyOverlay;
    pub use crate::registry::TypeContext;
    pub use crate::request::{GenerationRequest, GenerationResult};
    pub use ddlforge_core::{Dialect, DialectFamily, UnknownDialectError};
}

/// Generates script text per dialect without touching the destination
/// tree.
///
/// Validates the request, resolves and deduplicates every dialect before
/// any generation work, scans the mapped-type set, loads the overlay, and
/// runs the engine once per distinct dialect. Used directly for dry runs.
///
/// # Errors
///
/// Any of [`DdlError::Configuration`], [`DdlError::UnknownDialect`], or
/// [`DdlError::Generation`].
pub fn generate_scripts(
    request: &GenerationRequest,
    context: &registry::TypeContext,
) -> Result<Vec<(Dialect, String)>> {
    request.validate()?;

    let mut dialects = BTreeSet::new();
    for identifier in request.dialect_ids() {
        dialects.insert(Dialect::resolve(identifier)?);
    }

    let types = registry::scan(
        context,
        request.namespace_prefixes(),
        request.scans_embeddables(),
    );
    info!(types = types.len(), "found mapped types");

    let overlay = overlay::load(request.overlay_path());

    let mut scripts = Vec::with_capacity(dialects.len());
    for dialect in dialects {
        let script = engine::generate(
            &types,
            dialect,
            &overlay,
            request.wants_audit_tables(),
            request.wants_drop_statements(),
        )?;
        scripts.push((dialect, script));
    }
    Ok(scripts)
}

/// Generates one schema script per requested dialect and synchronizes
/// each into the destination tree.
///
/// Returns one [`GenerationResult`] per distinct resolved dialect. A
/// failure while processing one dialect aborts the remaining work but
/// does not undo already-synchronized sibling dialects.
///
/// # Errors
///
/// Any variant of [`DdlError`]; only a missing or malformed property
/// overlay is swallowed (generation proceeds without overrides).
pub fn generate_ddl(
    request: &GenerationRequest,
    context: &registry::TypeContext,
) -> Result<Vec<GenerationResult>> {
    let scripts = generate_scripts(request, context)?;

    // Unique per-invocation scratch directory, outside the destination
    // tree; cleaned up on drop.
    let scratch = tempfile::Builder::new().prefix("ddlforge-").tempdir()?;

    let mut results = Vec::with_capacity(scripts.len());
    for (dialect, script) in scripts {
        let (path, changed) = sync::sync(dialect, &script, request.output_dir(), scratch.path())?;
        info!(%dialect, path = %path.display(), changed, "synchronized schema script");
        results.push(GenerationResult {
            dialect,
            path,
            script,
            changed,
        });
    }
    Ok(results)
}
