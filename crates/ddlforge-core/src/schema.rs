//! Schema model for mapped data-model types.
//!
//! These types describe the structure implied by a set of mapped types:
//! entities (which own a table) and embeddable value types (whose columns
//! are inlined into the tables that embed them). The generation engine
//! builds its per-dialect schema model from these descriptors.

use serde::{Deserialize, Serialize};

/// SQL data types understood by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// Integer (32-bit).
    Integer,
    /// Big integer (64-bit).
    BigInt,
    /// Small integer (16-bit).
    SmallInt,
    /// Variable-length character string.
    Varchar(u32),
    /// Fixed-length character string.
    Char(u32),
    /// Unbounded character data.
    Text,
    /// Boolean.
    Boolean,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    Timestamp,
    /// Floating point (single precision).
    Real,
    /// Floating point (double precision).
    Double,
    /// Decimal with precision and scale.
    Decimal(u8, u8),
    /// Binary large object.
    Blob,
    /// Variable-length binary data with a maximum length.
    Binary(u32),
    /// JSON data.
    Json,
    /// UUID.
    Uuid,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g. "CURRENT_TIMESTAMP").
    Expression(String),
}

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// SQL data type.
    pub sql_type: SqlType,
    /// Whether the column allows NULL values.
    pub nullable: bool,
    /// Whether this column is part of the primary key.
    pub primary_key: bool,
    /// Whether this column auto-increments.
    pub auto_increment: bool,
    /// Whether this column has a UNIQUE constraint.
    pub unique: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Check constraint expression, if any.
    pub check: Option<String>,
}

impl ColumnSchema {
    /// Creates a new nullable column without constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default: None,
            check: None,
        }
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as part of the primary key. Primary key columns
    /// are always NOT NULL.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Adds a UNIQUE constraint.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets a check constraint expression.
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.check = Some(expr.into());
        self
    }
}

/// Use of an embeddable value type inside an entity table.
///
/// The embeddable's columns are inlined into the owning table, each
/// prefixed with the attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedUse {
    /// Attribute name on the owning entity.
    pub attribute: String,
    /// Fully-qualified name of the embeddable type.
    pub type_name: String,
}

/// Schema definition for an entity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Column definitions.
    pub columns: Vec<ColumnSchema>,
    /// Primary key column(s).
    pub primary_key: Vec<String>,
    /// Embedded value type uses.
    pub embedded: Vec<EmbeddedUse>,
}

impl TableSchema {
    /// Creates a new empty table schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            embedded: Vec::new(),
        }
    }

    /// Adds a column. Columns flagged as primary key are tracked in the
    /// table's primary key list.
    #[must_use]
    pub fn column(mut self, column: ColumnSchema) -> Self {
        if column.primary_key && !self.primary_key.contains(&column.name) {
            self.primary_key.push(column.name.clone());
        }
        self.columns.push(column);
        self
    }

    /// Inlines an embeddable value type under the given attribute name.
    #[must_use]
    pub fn embed(mut self, attribute: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.embedded.push(EmbeddedUse {
            attribute: attribute.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Classification of a mapped type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// A persisted type owning a table.
    Entity,
    /// A value type embedded inside entities.
    Embeddable,
}

/// A mapped entity: a fully-qualified type name bound to a table schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMapping {
    /// Fully-qualified type name, e.g. `pkg.entities.Person`.
    pub type_name: String,
    /// The table the entity maps to.
    pub table: TableSchema,
}

/// A mapped embeddable value type: columns inlined into owning entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddableMapping {
    /// Fully-qualified type name.
    pub type_name: String,
    /// Columns contributed to embedding tables.
    pub columns: Vec<ColumnSchema>,
}

/// A discovered mapped type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MappedType {
    /// An entity with its table schema.
    Entity(EntityMapping),
    /// An embeddable value type.
    Embeddable(EmbeddableMapping),
}

impl MappedType {
    /// Fully-qualified type name, the identity of the mapped type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Entity(entity) => &entity.type_name,
            Self::Embeddable(embeddable) => &embeddable.type_name,
        }
    }

    /// Classification of the mapped type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Entity(_) => TypeKind::Entity,
            Self::Embeddable(_) => TypeKind::Embeddable,
        }
    }

    /// The namespace the type originates from: the fully-qualified name
    /// minus its last segment, or the empty string for bare names.
    #[must_use]
    pub fn namespace(&self) -> &str {
        let name = self.type_name();
        match name.rfind('.') {
            Some(idx) => &name[..idx],
            None => "",
        }
    }
}
