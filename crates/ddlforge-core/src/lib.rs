//! # ddlforge-core
//!
//! Schema model and dialect-aware DDL rendering.
//!
//! This crate provides the pure, database-free core of ddlforge:
//!
//! - A schema model describing mapped types: entities with their table
//!   schemas and embeddable value types ([`schema`])
//! - A closed, self-describing registry of supported dialects grouped into
//!   rendering families ([`dialect`])
//! - Deterministic rendering of CREATE/DROP statement text per dialect
//!   ([`render`])
//!
//! Nothing here touches a database or the filesystem; generation is a pure
//! function of (schema model, dialect).
//!
//! ```rust
//! use ddlforge_core::{ColumnSchema, DdlRenderer, Dialect, SqlType, TableSchema};
//!
//! let table = TableSchema::new("persons")
//!     .column(ColumnSchema::new("id", SqlType::BigInt).primary_key())
//!     .column(ColumnSchema::new("name", SqlType::Varchar(255)).not_null());
//!
//! let sql = DdlRenderer::new(Dialect::Hsql).create_table(&table);
//! assert!(sql.contains("CREATE TABLE \"persons\""));
//! ```

pub mod dialect;
pub mod render;
pub mod schema;

pub use dialect::{Dialect, DialectFamily, UnknownDialectError};
pub use render::DdlRenderer;
pub use schema::{
    ColumnSchema, DefaultValue, EmbeddableMapping, EmbeddedUse, EntityMapping, MappedType,
    SqlType, TableSchema, TypeKind,
};
