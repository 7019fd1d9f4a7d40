//! The generation engine.
//!
//! Combines the scanned mapped-type set, a resolved dialect, and the
//! property overlay into one script: expands embedded value types into
//! their owning tables, picks the DDL mode, optionally appends audit
//! tables, and renders everything through the dialect's renderer. Pure
//! with respect to the filesystem; the synchronizer owns all IO.

use std::collections::BTreeMap;

use ddlforge_core::{
    ColumnSchema, DdlRenderer, Dialect, EmbeddableMapping, EntityMapping, MappedType, SqlType,
    TableSchema,
};
use tracing::{debug, warn};

use crate::error::{DdlError, Result};
use crate::overlay::PropertyOverlay;

/// Script configuration: built-in defaults overridden by the overlay.
///
/// Unknown overlay keys are retained so future keys pass through without
/// code changes.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    values: BTreeMap<String, String>,
}

/// Statement delimiter appended to every rendered statement.
pub const KEY_DELIMITER: &str = "format.delimiter";
/// Suffix appended to entity table names for their history tables.
pub const KEY_AUDIT_SUFFIX: &str = "audit.table_suffix";
/// Name of the revision number column added to history tables.
pub const KEY_REVISION_FIELD: &str = "audit.revision_field";
/// Name of the revision type column added to history tables.
pub const KEY_REVISION_TYPE_FIELD: &str = "audit.revision_type_field";
/// Name of the shared revision-info table.
pub const KEY_REVISION_TABLE: &str = "audit.revision_table";

impl ScriptConfig {
    /// Builds the config from built-in defaults plus overlay overrides;
    /// overlay keys take precedence.
    #[must_use]
    pub fn with_overlay(overlay: &PropertyOverlay) -> Self {
        let mut values: BTreeMap<String, String> = [
            (KEY_DELIMITER, ";"),
            (KEY_AUDIT_SUFFIX, "_aud"),
            (KEY_REVISION_FIELD, "rev"),
            (KEY_REVISION_TYPE_FIELD, "revtype"),
            (KEY_REVISION_TABLE, "revinfo"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        for (key, value) in overlay.iter() {
            values.insert(key.to_string(), value.to_string());
        }
        Self { values }
    }

    /// Looks up a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn required(&self, key: &str) -> &str {
        // All required keys carry built-in defaults.
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    fn delimiter(&self) -> &str {
        self.required(KEY_DELIMITER)
    }

    fn audit_suffix(&self) -> &str {
        self.required(KEY_AUDIT_SUFFIX)
    }

    fn revision_field(&self) -> &str {
        self.required(KEY_REVISION_FIELD)
    }

    fn revision_type_field(&self) -> &str {
        self.required(KEY_REVISION_TYPE_FIELD)
    }

    fn revision_table(&self) -> &str {
        self.required(KEY_REVISION_TABLE)
    }
}

/// Generates the full script text for one dialect.
///
/// Tables are emitted in name order so repeated runs over the same type
/// set produce byte-identical output. Drop statements and audit
/// augmentation are driven by the two mode flags; requesting both
/// downgrades to create-plus-audit (drops omitted) with a warning.
///
/// # Errors
///
/// Returns [`DdlError::Generation`] when an entity references an
/// embeddable type missing from the set, or when audit augmentation is
/// requested for a dialect that does not support it.
pub fn generate(
    types: &BTreeMap<String, MappedType>,
    dialect: Dialect,
    overlay: &PropertyOverlay,
    audit_tables: bool,
    drop_statements: bool,
) -> Result<String> {
    let config = ScriptConfig::with_overlay(overlay);

    if audit_tables && !dialect.supports_audit() {
        return Err(DdlError::Generation {
            type_name: "<audit augmentation>".to_string(),
            dialect,
            message: "dialect does not support audit augmentation".to_string(),
        });
    }

    let include_drops = if drop_statements && audit_tables {
        warn!(
            %dialect,
            "drop statements combined with audit tables are not supported; \
             omitting drop statements"
        );
        false
    } else {
        drop_statements
    };

    let mut entities: Vec<&EntityMapping> = Vec::new();
    let mut embeddables: BTreeMap<&str, &EmbeddableMapping> = BTreeMap::new();
    for mapped in types.values() {
        match mapped {
            MappedType::Entity(entity) => entities.push(entity),
            MappedType::Embeddable(embeddable) => {
                embeddables.insert(embeddable.type_name.as_str(), embeddable);
            }
        }
    }
    entities.sort_by(|a, b| a.table.name.cmp(&b.table.name));

    let mut tables = Vec::with_capacity(entities.len());
    for entity in &entities {
        tables.push(expand_embedded(entity, &embeddables, dialect)?);
    }

    let renderer = DdlRenderer::new(dialect);
    let mut statements = Vec::new();

    if include_drops {
        for table in &tables {
            statements.push(renderer.drop_table(table));
        }
    }
    for table in &tables {
        statements.push(renderer.create_table(table));
    }
    if audit_tables {
        for table in &tables {
            statements.push(renderer.create_table(&audit_table(table, &config)));
        }
        statements.push(renderer.create_table(&revision_info_table(&config)));
    }

    debug!(
        %dialect,
        tables = tables.len(),
        statements = statements.len(),
        "generated schema script"
    );
    Ok(join_statements(&statements, config.delimiter()))
}

/// One statement per block, each terminated by the delimiter, separated
/// by a blank line, with a single trailing newline.
fn join_statements(statements: &[String], delimiter: &str) -> String {
    let mut script = String::new();
    for (idx, statement) in statements.iter().enumerate() {
        if idx > 0 {
            script.push('\n');
        }
        script.push_str(statement);
        script.push_str(delimiter);
        script.push('\n');
    }
    script
}

/// Inlines embedded value types into the entity's table, prefixing each
/// pulled-in column with the attribute name.
fn expand_embedded(
    entity: &EntityMapping,
    embeddables: &BTreeMap<&str, &EmbeddableMapping>,
    dialect: Dialect,
) -> Result<TableSchema> {
    let mut table = entity.table.clone();
    for embedded in &entity.table.embedded {
        let Some(embeddable) = embeddables.get(embedded.type_name.as_str()) else {
            return Err(DdlError::Generation {
                type_name: entity.type_name.clone(),
                dialect,
                message: format!(
                    "embedded type '{}' is not in the mapped-type set",
                    embedded.type_name
                ),
            });
        };
        for column in &embeddable.columns {
            let mut inlined = column.clone();
            inlined.name = format!("{}_{}", embedded.attribute, column.name);
            table.columns.push(inlined);
        }
    }
    table.embedded.clear();
    Ok(table)
}

/// Derives the history table for an entity table: the entity's columns
/// with constraints stripped, plus the revision number column (which
/// joins the primary key) and the revision type column.
fn audit_table(table: &TableSchema, config: &ScriptConfig) -> TableSchema {
    let mut audit = TableSchema::new(format!("{}{}", table.name, config.audit_suffix()));
    for column in &table.columns {
        let mut mirrored = column.clone();
        mirrored.auto_increment = false;
        mirrored.unique = false;
        mirrored.default = None;
        mirrored.check = None;
        mirrored.nullable = !column.primary_key;
        audit.columns.push(mirrored);
    }
    audit
        .columns
        .push(ColumnSchema::new(config.revision_field(), SqlType::BigInt).not_null());
    audit
        .columns
        .push(ColumnSchema::new(config.revision_type_field(), SqlType::SmallInt));

    audit.primary_key = table.primary_key.clone();
    audit.primary_key.push(config.revision_field().to_string());
    audit
}

/// The shared revision-info table emitted once per audit-augmented script.
fn revision_info_table(config: &ScriptConfig) -> TableSchema {
    TableSchema::new(config.revision_table())
        .column(
            ColumnSchema::new(config.revision_field(), SqlType::BigInt)
                .primary_key()
                .auto_increment(),
        )
        .column(ColumnSchema::new("revtstmp", SqlType::BigInt))
}
