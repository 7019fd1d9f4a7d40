//! TOML model manifest parsing.
//!
//! A manifest declares the mapped types a project exposes, replacing the
//! runtime reflection of the original design with a declarative file:
//!
//! ```toml
//! [[entity]]
//! type = "pkg.entities.Person"
//! table = "persons"
//!
//! [[entity.column]]
//! name = "id"
//! type = "bigint"
//! primary-key = true
//! auto-increment = true
//!
//! [[entity.embedded]]
//! attribute = "address"
//! type = "pkg.values.Address"
//!
//! [[embeddable]]
//! type = "pkg.values.Address"
//!
//! [[embeddable.column]]
//! name = "street"
//! type = "varchar"
//! length = 120
//! ```

use std::path::Path;

use ddlforge_core::{
    ColumnSchema, DefaultValue, EmbeddableMapping, EntityMapping, MappedType, SqlType,
    TableSchema,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{DdlError, Result};
use crate::registry::TypeContext;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    entity: Vec<EntityDef>,
    #[serde(default)]
    embeddable: Vec<EmbeddableDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EntityDef {
    #[serde(rename = "type")]
    type_name: String,
    table: String,
    #[serde(default)]
    column: Vec<ColumnDef>,
    #[serde(default)]
    embedded: Vec<EmbeddedDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EmbeddableDef {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    column: Vec<ColumnDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EmbeddedDef {
    attribute: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ColumnDef {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    length: Option<u32>,
    precision: Option<u8>,
    scale: Option<u8>,
    #[serde(default)]
    primary_key: bool,
    #[serde(default)]
    auto_increment: bool,
    nullable: Option<bool>,
    #[serde(default)]
    unique: bool,
    default: Option<String>,
    check: Option<String>,
}

impl ColumnDef {
    fn sql_type(&self) -> Result<SqlType> {
        let sql_type = match self.type_name.to_ascii_lowercase().as_str() {
            "integer" | "int" => SqlType::Integer,
            "bigint" => SqlType::BigInt,
            "smallint" => SqlType::SmallInt,
            "varchar" | "string" => SqlType::Varchar(self.length.unwrap_or(255)),
            "char" => SqlType::Char(self.length.unwrap_or(1)),
            "text" => SqlType::Text,
            "boolean" | "bool" => SqlType::Boolean,
            "date" => SqlType::Date,
            "time" => SqlType::Time,
            "timestamp" | "datetime" => SqlType::Timestamp,
            "real" | "float" => SqlType::Real,
            "double" => SqlType::Double,
            "decimal" | "numeric" => {
                SqlType::Decimal(self.precision.unwrap_or(19), self.scale.unwrap_or(2))
            }
            "blob" => SqlType::Blob,
            "binary" => SqlType::Binary(self.length.unwrap_or(255)),
            "json" => SqlType::Json,
            "uuid" => SqlType::Uuid,
            other => {
                return Err(DdlError::ScanConfiguration(format!(
                    "column '{}' has unknown type '{other}'",
                    self.name
                )))
            }
        };
        Ok(sql_type)
    }

    fn into_schema(self) -> Result<ColumnSchema> {
        let sql_type = self.sql_type()?;
        let mut column = ColumnSchema::new(&self.name, sql_type);
        if self.primary_key {
            column = column.primary_key();
        }
        if self.nullable == Some(false) {
            column = column.not_null();
        }
        if self.auto_increment {
            column = column.auto_increment();
        }
        if self.unique {
            column = column.unique();
        }
        if let Some(default) = self.default {
            column = column.default(DefaultValue::Expression(default));
        }
        if let Some(check) = self.check {
            column = column.check(check);
        }
        Ok(column)
    }
}

/// Loads a [`TypeContext`] from a manifest file.
pub fn load(path: &Path) -> Result<TypeContext> {
    let text = std::fs::read_to_string(path).map_err(|err| {
        DdlError::ScanConfiguration(format!(
            "cannot read manifest '{}': {err}",
            path.display()
        ))
    })?;
    let parsed: ManifestFile = toml::from_str(&text).map_err(|err| {
        DdlError::ScanConfiguration(format!(
            "cannot parse manifest '{}': {err}",
            path.display()
        ))
    })?;

    let mut context = TypeContext::new();
    for entity in parsed.entity {
        let mut table = TableSchema::new(&entity.table);
        for column in entity.column {
            table = table.column(column.into_schema()?);
        }
        for embedded in entity.embedded {
            table = table.embed(embedded.attribute, embedded.type_name);
        }
        context.register(MappedType::Entity(EntityMapping {
            type_name: entity.type_name,
            table,
        }));
    }
    for embeddable in parsed.embeddable {
        let mut columns = Vec::with_capacity(embeddable.column.len());
        for column in embeddable.column {
            columns.push(column.into_schema()?);
        }
        context.register(MappedType::Embeddable(EmbeddableMapping {
            type_name: embeddable.type_name,
            columns,
        }));
    }

    debug!(
        path = %path.display(),
        types = context.len(),
        "loaded model manifest"
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
[[entity]]
type = "pkg.entities.Person"
table = "persons"

[[entity.column]]
name = "id"
type = "bigint"
primary-key = true
auto-increment = true

[[entity.column]]
name = "name"
type = "varchar"
length = 255
nullable = false

[[entity.embedded]]
attribute = "address"
type = "pkg.values.Address"

[[embeddable]]
type = "pkg.values.Address"

[[embeddable.column]]
name = "street"
type = "varchar"
length = 120
"#;

    fn write_manifest(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_builds_entities_and_embeddables() {
        let file = write_manifest(MANIFEST);
        let context = load(file.path()).unwrap();

        assert_eq!(context.len(), 2);
        let person = context
            .iter()
            .find(|m| m.type_name() == "pkg.entities.Person")
            .unwrap();
        match person {
            MappedType::Entity(entity) => {
                assert_eq!(entity.table.name, "persons");
                assert_eq!(entity.table.primary_key, vec!["id"]);
                assert_eq!(entity.table.embedded.len(), 1);
                let name = entity.table.get_column("name").unwrap();
                assert!(!name.nullable);
                assert_eq!(name.sql_type, SqlType::Varchar(255));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let file = write_manifest("[[entity]\ntype = broken");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, DdlError::ScanConfiguration(_)));
    }

    #[test]
    fn load_rejects_unknown_column_type() {
        let file = write_manifest(
            r#"
[[entity]]
type = "pkg.A"
table = "a"

[[entity.column]]
name = "x"
type = "geometry"
"#,
        );
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, DdlError::ScanConfiguration(_)));
        assert!(err.to_string().contains("geometry"));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = load(Path::new("/nonexistent/model.toml")).unwrap_err();
        assert!(matches!(err, DdlError::ScanConfiguration(_)));
    }
}
