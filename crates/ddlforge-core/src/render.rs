//! Statement rendering for the generation engine.
//!
//! Given a fully-expanded [`TableSchema`] and a dialect, produces the
//! literal CREATE/DROP statement text. Rendering is a pure function of its
//! inputs: the same schema and dialect always produce byte-identical text.

use crate::dialect::{Dialect, DialectFamily};
use crate::schema::{ColumnSchema, DefaultValue, TableSchema};

/// Renders DDL statements for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct DdlRenderer {
    family: DialectFamily,
}

impl DdlRenderer {
    /// Creates a renderer for the given dialect.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self {
            family: dialect.family(),
        }
    }

    /// Renders a CREATE TABLE statement, without trailing delimiter.
    ///
    /// Single-column primary keys are declared inline on the column;
    /// composite keys get a table-level PRIMARY KEY clause.
    #[must_use]
    pub fn create_table(&self, table: &TableSchema) -> String {
        let inline_pk = table.primary_key.len() == 1;

        let mut sql = String::from("CREATE TABLE ");
        sql.push_str(&self.family.quote(&table.name));
        sql.push_str(" (\n");

        let column_defs: Vec<String> = table
            .columns
            .iter()
            .map(|col| format!("    {}", self.column_definition(col, inline_pk)))
            .collect();
        sql.push_str(&column_defs.join(",\n"));

        if !inline_pk && !table.primary_key.is_empty() {
            sql.push_str(",\n    PRIMARY KEY (");
            let quoted: Vec<String> = table
                .primary_key
                .iter()
                .map(|name| self.family.quote(name))
                .collect();
            sql.push_str(&quoted.join(", "));
            sql.push(')');
        }

        sql.push_str("\n)");
        sql
    }

    /// Renders a DROP TABLE statement, without trailing delimiter.
    #[must_use]
    pub fn drop_table(&self, table: &TableSchema) -> String {
        self.family.drop_table_sql(&table.name)
    }

    fn column_definition(&self, col: &ColumnSchema, inline_pk: bool) -> String {
        let mut sql = format!(
            "{} {}",
            self.family.quote(&col.name),
            self.family.type_name(&col.sql_type)
        );

        if col.primary_key && inline_pk {
            sql.push_str(" PRIMARY KEY");
            if col.auto_increment {
                sql.push(' ');
                sql.push_str(self.family.auto_increment_sql());
            }
        } else {
            if !col.nullable {
                sql.push_str(" NOT NULL");
            }
            if col.unique {
                sql.push_str(" UNIQUE");
            }
            if col.auto_increment {
                sql.push(' ');
                sql.push_str(self.family.auto_increment_sql());
            }
        }

        if let Some(ref default) = col.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.render_default(default));
        }

        if let Some(ref check) = col.check {
            sql.push_str(&format!(" CHECK ({check})"));
        }

        sql
    }

    fn render_default(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Null => "NULL".to_string(),
            DefaultValue::Bool(b) => self.family.boolean_literal(*b).to_string(),
            DefaultValue::Integer(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::String(s) => format!("'{}'", s.replace('\'', "''")),
            DefaultValue::Expression(expr) => expr.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SqlType;

    fn person_table() -> TableSchema {
        TableSchema::new("persons")
            .column(
                ColumnSchema::new("id", SqlType::BigInt)
                    .primary_key()
                    .auto_increment(),
            )
            .column(ColumnSchema::new("name", SqlType::Varchar(255)).not_null())
            .column(ColumnSchema::new("email", SqlType::Varchar(255)).unique())
    }

    #[test]
    fn create_table_inline_primary_key() {
        let sql = DdlRenderer::new(Dialect::Hsql).create_table(&person_table());

        assert!(sql.starts_with("CREATE TABLE \"persons\" (\n"));
        assert!(sql.contains("    \"id\" BIGINT PRIMARY KEY GENERATED BY DEFAULT AS IDENTITY,\n"));
        assert!(sql.contains("    \"name\" VARCHAR(255) NOT NULL,\n"));
        assert!(sql.contains("    \"email\" VARCHAR(255) UNIQUE\n"));
        assert!(sql.ends_with(')'));
        // Inline key means no table-level clause.
        assert!(!sql.contains("PRIMARY KEY ("));
    }

    #[test]
    fn create_table_composite_primary_key() {
        let table = TableSchema::new("persons_aud")
            .column(ColumnSchema::new("id", SqlType::BigInt).primary_key())
            .column(ColumnSchema::new("rev", SqlType::BigInt).primary_key())
            .column(ColumnSchema::new("name", SqlType::Varchar(255)));

        let sql = DdlRenderer::new(Dialect::Postgres9).create_table(&table);
        assert!(sql.contains("PRIMARY KEY (\"id\", \"rev\")"));
        // Member columns still rendered NOT NULL, not inline PRIMARY KEY.
        assert!(sql.contains("\"id\" BIGINT NOT NULL"));
    }

    #[test]
    fn mysql_quoting_and_autoincrement() {
        let sql = DdlRenderer::new(Dialect::MySql5).create_table(&person_table());
        assert!(sql.contains("CREATE TABLE `persons`"));
        assert!(sql.contains("`id` BIGINT PRIMARY KEY AUTO_INCREMENT"));
    }

    #[test]
    fn defaults_and_checks() {
        let table = TableSchema::new("flags")
            .column(
                ColumnSchema::new("active", SqlType::Boolean)
                    .not_null()
                    .default(DefaultValue::Bool(true)),
            )
            .column(
                ColumnSchema::new("level", SqlType::Integer)
                    .default(DefaultValue::Integer(3))
                    .check("level > 0"),
            )
            .column(
                ColumnSchema::new("label", SqlType::Varchar(64))
                    .default(DefaultValue::String("it's".to_string())),
            );

        let pg = DdlRenderer::new(Dialect::Postgres9).create_table(&table);
        assert!(pg.contains("DEFAULT TRUE"));
        assert!(pg.contains("DEFAULT 3 CHECK (level > 0)"));
        assert!(pg.contains("DEFAULT 'it''s'"));

        let ms = DdlRenderer::new(Dialect::SqlServer2012).create_table(&table);
        assert!(ms.contains("DEFAULT 1"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let renderer = DdlRenderer::new(Dialect::Oracle10g);
        let first = renderer.create_table(&person_table());
        let second = renderer.create_table(&person_table());
        assert_eq!(first, second);
    }

    #[test]
    fn drop_table_uses_family_rules() {
        let table = person_table();
        assert_eq!(
            DdlRenderer::new(Dialect::Hsql).drop_table(&table),
            "DROP TABLE IF EXISTS \"persons\""
        );
        assert_eq!(
            DdlRenderer::new(Dialect::Oracle9i).drop_table(&table),
            "DROP TABLE \"persons\" CASCADE CONSTRAINTS"
        );
    }
}
