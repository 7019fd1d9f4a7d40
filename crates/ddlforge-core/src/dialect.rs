//! The closed registry of supported schema-generation dialects.
//!
//! Every dialect the tool can target is a variant of [`Dialect`]; there is
//! no runtime extension point. Identifiers resolve case-insensitively and
//! an unknown identifier reports the full list of valid ones so the caller
//! can self-correct. Rendering rules are shared per [`DialectFamily`]:
//! dialects within a family differ only in identity, not in output.

use crate::schema::SqlType;

/// Rendering rules shared by a group of related dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectFamily {
    /// ANSI-leaning fallback used by dialects without special rules.
    Generic,
    /// MySQL and its storage-engine variants.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// Microsoft SQL Server.
    SqlServer,
    /// Sybase ASE / Anywhere.
    Sybase,
    /// Oracle Database.
    Oracle,
    /// IBM DB2 (LUW, AS/400, OS/390).
    Db2,
    /// HSQLDB and H2.
    Hsql,
}

impl DialectFamily {
    /// Quotes an identifier using the family's quoting style.
    #[must_use]
    pub fn quote(self, name: &str) -> String {
        match self {
            Self::MySql => format!("`{name}`"),
            Self::SqlServer => format!("[{name}]"),
            _ => format!("\"{name}\""),
        }
    }

    /// Keyword appended to auto-incrementing key columns.
    #[must_use]
    pub fn auto_increment_sql(self) -> &'static str {
        match self {
            Self::MySql => "AUTO_INCREMENT",
            Self::SqlServer | Self::Sybase => "IDENTITY",
            _ => "GENERATED BY DEFAULT AS IDENTITY",
        }
    }

    /// Renders a boolean literal for DEFAULT clauses.
    #[must_use]
    pub fn boolean_literal(self, value: bool) -> &'static str {
        match self {
            Self::MySql | Self::SqlServer | Self::Sybase | Self::Oracle | Self::Db2 => {
                if value {
                    "1"
                } else {
                    "0"
                }
            }
            _ => {
                if value {
                    "TRUE"
                } else {
                    "FALSE"
                }
            }
        }
    }

    /// DROP TABLE statement for this family.
    #[must_use]
    pub fn drop_table_sql(self, table_name: &str) -> String {
        let quoted = self.quote(table_name);
        match self {
            Self::Oracle => format!("DROP TABLE {quoted} CASCADE CONSTRAINTS"),
            Self::Postgres => format!("DROP TABLE IF EXISTS {quoted} CASCADE"),
            Self::MySql | Self::Hsql | Self::Generic => {
                format!("DROP TABLE IF EXISTS {quoted}")
            }
            Self::SqlServer | Self::Sybase | Self::Db2 => format!("DROP TABLE {quoted}"),
        }
    }

    /// Maps a [`SqlType`] to the family's SQL type name.
    #[must_use]
    pub fn type_name(self, sql_type: &SqlType) -> String {
        match self {
            Self::Generic => generic_type_name(sql_type),
            Self::MySql => mysql_type_name(sql_type),
            Self::Postgres => postgres_type_name(sql_type),
            Self::SqlServer => sql_server_type_name(sql_type),
            Self::Sybase => sybase_type_name(sql_type),
            Self::Oracle => oracle_type_name(sql_type),
            Self::Db2 => db2_type_name(sql_type),
            Self::Hsql => hsql_type_name(sql_type),
        }
    }
}

fn generic_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Integer => "INTEGER".to_string(),
        SqlType::BigInt => "BIGINT".to_string(),
        SqlType::SmallInt => "SMALLINT".to_string(),
        SqlType::Varchar(len) => format!("VARCHAR({len})"),
        SqlType::Char(len) => format!("CHAR({len})"),
        SqlType::Text | SqlType::Json => "CLOB".to_string(),
        SqlType::Boolean => "BOOLEAN".to_string(),
        SqlType::Date => "DATE".to_string(),
        SqlType::Time => "TIME".to_string(),
        SqlType::Timestamp => "TIMESTAMP".to_string(),
        SqlType::Real => "REAL".to_string(),
        SqlType::Double => "DOUBLE PRECISION".to_string(),
        SqlType::Decimal(p, s) => format!("DECIMAL({p}, {s})"),
        SqlType::Blob => "BLOB".to_string(),
        SqlType::Binary(len) => format!("VARBINARY({len})"),
        SqlType::Uuid => "CHAR(36)".to_string(),
    }
}

fn mysql_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Text => "LONGTEXT".to_string(),
        SqlType::Boolean => "TINYINT(1)".to_string(),
        SqlType::Timestamp => "DATETIME".to_string(),
        SqlType::Double => "DOUBLE".to_string(),
        SqlType::Blob => "LONGBLOB".to_string(),
        SqlType::Json => "JSON".to_string(),
        other => generic_type_name(other),
    }
}

fn postgres_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Text => "TEXT".to_string(),
        SqlType::Blob | SqlType::Binary(_) => "BYTEA".to_string(),
        SqlType::Json => "JSONB".to_string(),
        SqlType::Uuid => "UUID".to_string(),
        other => generic_type_name(other),
    }
}

fn sql_server_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Integer => "INT".to_string(),
        SqlType::Text => "VARCHAR(MAX)".to_string(),
        SqlType::Boolean => "BIT".to_string(),
        SqlType::Timestamp => "DATETIME2".to_string(),
        SqlType::Double => "FLOAT".to_string(),
        SqlType::Blob => "VARBINARY(MAX)".to_string(),
        SqlType::Json => "NVARCHAR(MAX)".to_string(),
        SqlType::Uuid => "UNIQUEIDENTIFIER".to_string(),
        other => generic_type_name(other),
    }
}

fn sybase_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Integer => "INT".to_string(),
        SqlType::Text | SqlType::Json => "TEXT".to_string(),
        SqlType::Boolean => "BIT".to_string(),
        SqlType::Timestamp => "DATETIME".to_string(),
        SqlType::Blob => "IMAGE".to_string(),
        SqlType::Uuid => "VARCHAR(36)".to_string(),
        other => generic_type_name(other),
    }
}

fn oracle_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Integer => "NUMBER(10, 0)".to_string(),
        SqlType::BigInt => "NUMBER(19, 0)".to_string(),
        SqlType::SmallInt => "NUMBER(5, 0)".to_string(),
        SqlType::Varchar(len) => format!("VARCHAR2({len})"),
        SqlType::Text | SqlType::Json => "CLOB".to_string(),
        SqlType::Boolean => "NUMBER(1, 0)".to_string(),
        SqlType::Time => "DATE".to_string(),
        SqlType::Real => "BINARY_FLOAT".to_string(),
        SqlType::Double => "BINARY_DOUBLE".to_string(),
        SqlType::Decimal(p, s) => format!("NUMBER({p}, {s})"),
        SqlType::Binary(len) => format!("RAW({len})"),
        SqlType::Uuid => "RAW(16)".to_string(),
        other => generic_type_name(other),
    }
}

fn db2_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Boolean => "SMALLINT".to_string(),
        SqlType::Double => "DOUBLE".to_string(),
        other => generic_type_name(other),
    }
}

fn hsql_type_name(sql_type: &SqlType) -> String {
    match sql_type {
        SqlType::Text => "LONGVARCHAR".to_string(),
        SqlType::Double => "DOUBLE".to_string(),
        SqlType::Json => "LONGVARCHAR".to_string(),
        SqlType::Uuid => "UUID".to_string(),
        other => generic_type_name(other),
    }
}

/// Error returned when a requested dialect identifier does not match the
/// closed registry. The message enumerates every valid identifier.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown dialect '{name}'; available dialects are:\n{available}")]
pub struct UnknownDialectError {
    /// The identifier that failed to resolve.
    pub name: String,
    /// Sorted list of valid identifiers, one per line.
    pub available: String,
}

macro_rules! dialects {
    ($( $variant:ident => ($id:literal, $family:ident) ),+ $(,)?) => {
        /// A supported schema-generation dialect.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[allow(missing_docs)]
        pub enum Dialect {
            $( $variant, )+
        }

        impl Dialect {
            /// Every supported dialect, in identifier order.
            pub const ALL: &'static [Dialect] = &[ $( Dialect::$variant, )+ ];

            /// Canonical lowercase identifier; also the destination file stem.
            #[must_use]
            pub fn id(self) -> &'static str {
                match self {
                    $( Self::$variant => $id, )+
                }
            }

            /// The rendering family the dialect belongs to.
            #[must_use]
            pub fn family(self) -> DialectFamily {
                match self {
                    $( Self::$variant => DialectFamily::$family, )+
                }
            }
        }
    };
}

dialects! {
    Cubrid => ("cubrid", Generic),
    Db2 => ("db2", Db2),
    Db2As400 => ("db2_as400", Db2),
    Db2Os390 => ("db2_os390", Db2),
    Firebird => ("firebird", Generic),
    Frontbase => ("frontbase", Generic),
    H2 => ("h2", Hsql),
    Hsql => ("hsql", Hsql),
    Informix => ("informix", Generic),
    Ingres => ("ingres", Generic),
    Ingres9 => ("ingres9", Generic),
    Ingres10 => ("ingres10", Generic),
    Interbase => ("interbase", Generic),
    IntersystemsCache => ("intersystems_cache", Generic),
    JDataStore => ("jdatastore", Generic),
    MckoiSql => ("mckoisql", Generic),
    MimerSql => ("mimersql", Generic),
    MySql => ("mysql", MySql),
    MySql5 => ("mysql5", MySql),
    MySql5InnoDb => ("mysql5_innodb", MySql),
    MySqlInnoDb => ("mysql_innodb", MySql),
    MySqlMyIsam => ("mysql_myisam", MySql),
    Oracle8i => ("oracle8i", Oracle),
    Oracle9i => ("oracle9i", Oracle),
    Oracle10g => ("oracle10g", Oracle),
    OracleTimesTen => ("oracle_times_ten", Generic),
    Pointbase => ("pointbase", Generic),
    Postgres81 => ("postgresql81", Postgres),
    Postgres82 => ("postgresql82", Postgres),
    Postgres9 => ("postgresql9", Postgres),
    Progress => ("progress", Generic),
    SapDb => ("sap_db", Generic),
    SapHanaCol => ("sap_hana_col", Generic),
    SapHanaRow => ("sap_hana_row", Generic),
    SqlServer2000 => ("sqlserver2000", SqlServer),
    SqlServer2005 => ("sqlserver2005", SqlServer),
    SqlServer2008 => ("sqlserver2008", SqlServer),
    SqlServer2012 => ("sqlserver2012", SqlServer),
    Sybase => ("sybase", Sybase),
    Sybase11 => ("sybase11", Sybase),
    SybaseAnywhere => ("sybase_anywhere", Sybase),
    SybaseAse155 => ("sybase_ase155", Sybase),
    SybaseAse157 => ("sybase_ase157", Sybase),
    Teradata => ("teradata", Generic),
    UnisysOs2200Rdms => ("unisys_os_2200_rdms", Generic),
}

impl Dialect {
    /// Resolves an identifier case-insensitively against the closed
    /// registry. Exact match only, no partial or fuzzy matching.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownDialectError`] listing all valid identifiers when
    /// the identifier is not in the registry.
    pub fn resolve(identifier: &str) -> Result<Self, UnknownDialectError> {
        let lowered = identifier.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|dialect| dialect.id() == lowered)
            .ok_or_else(|| UnknownDialectError {
                name: identifier.to_string(),
                available: Self::available_ids(),
            })
    }

    /// Whether the dialect can render audit/history augmentation. All
    /// shipped dialects can; the generation engine checks the flag before
    /// emitting revision structures.
    #[must_use]
    pub fn supports_audit(self) -> bool {
        true
    }

    fn available_ids() -> String {
        let mut ids: Vec<&'static str> = Self::ALL.iter().map(|d| d.id()).collect();
        ids.sort_unstable();
        ids.join("\n")
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(Dialect::resolve("hsql").unwrap(), Dialect::Hsql);
        assert_eq!(Dialect::resolve("HSQL").unwrap(), Dialect::Hsql);
        assert_eq!(Dialect::resolve("Hsql").unwrap(), Dialect::Hsql);
        assert_eq!(Dialect::resolve("PostgreSQL9").unwrap(), Dialect::Postgres9);
    }

    #[test]
    fn resolve_rejects_unknown_identifier() {
        let err = Dialect::resolve("fooDB").unwrap_err();
        assert_eq!(err.name, "fooDB");
        // The payload enumerates every valid identifier.
        for dialect in Dialect::ALL {
            assert!(err.available.contains(dialect.id()));
        }
        // Sorted, one per line.
        let lines: Vec<&str> = err.available.lines().collect();
        assert_eq!(lines.len(), Dialect::ALL.len());
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
    }

    #[test]
    fn resolve_does_not_partial_match() {
        assert!(Dialect::resolve("postgres").is_err());
        assert!(Dialect::resolve("mysql5_").is_err());
    }

    #[test]
    fn identifiers_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for dialect in Dialect::ALL {
            assert!(seen.insert(dialect.id()), "duplicate id {}", dialect.id());
            assert_eq!(dialect.id(), dialect.id().to_ascii_lowercase());
        }
    }

    #[test]
    fn family_quoting_styles() {
        assert_eq!(DialectFamily::MySql.quote("persons"), "`persons`");
        assert_eq!(DialectFamily::SqlServer.quote("persons"), "[persons]");
        assert_eq!(DialectFamily::Postgres.quote("persons"), "\"persons\"");
    }

    #[test]
    fn family_type_names_differ() {
        assert_eq!(
            DialectFamily::Oracle.type_name(&SqlType::Varchar(255)),
            "VARCHAR2(255)"
        );
        assert_eq!(
            DialectFamily::Postgres.type_name(&SqlType::Varchar(255)),
            "VARCHAR(255)"
        );
        assert_eq!(DialectFamily::MySql.type_name(&SqlType::Boolean), "TINYINT(1)");
        assert_eq!(DialectFamily::SqlServer.type_name(&SqlType::Blob), "VARBINARY(MAX)");
        assert_eq!(
            DialectFamily::Db2.type_name(&SqlType::Double),
            "DOUBLE"
        );
    }

    #[test]
    fn drop_table_variants() {
        assert_eq!(
            DialectFamily::Oracle.drop_table_sql("persons"),
            "DROP TABLE \"persons\" CASCADE CONSTRAINTS"
        );
        assert_eq!(
            DialectFamily::Postgres.drop_table_sql("persons"),
            "DROP TABLE IF EXISTS \"persons\" CASCADE"
        );
        assert_eq!(
            DialectFamily::SqlServer.drop_table_sql("persons"),
            "DROP TABLE [persons]"
        );
    }
}
