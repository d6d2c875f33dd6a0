//! Raw table metadata handed over by a schema reader.

use crate::error::BoxError;
use crate::model::{Deferrability, ReferentialAction};
use serde::{Deserialize, Serialize};

/// Metadata of one column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Native type name.
    pub type_name: String,
    /// JDBC type code.
    pub jdbc_type_code: i32,
    /// Size (max characters or precision).
    pub size: u32,
    /// NOT NULL constraint.
    pub not_null: bool,
    /// Part of the primary key.
    pub in_primary_key: bool,
    /// Auto-incremented column.
    pub auto_incremented: bool,
    /// Ordinal position (1-based).
    pub ordinal_position: u32,
    /// Declared default value.
    pub default_value: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
}

impl ColumnMetadata {
    /// Create column metadata.
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        jdbc_type_code: i32,
        ordinal_position: u32,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            jdbc_type_code,
            ordinal_position,
            ..Default::default()
        }
    }

    /// Mark as a primary key column (implies NOT NULL).
    pub fn primary_key(mut self) -> Self {
        self.in_primary_key = true;
        self.not_null = true;
        self
    }

    /// Mark as NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

/// One row of foreign key metadata: a single column pair of a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKeyColumnMetadata {
    /// Foreign key name.
    pub fk_name: String,
    /// Referencing table.
    pub fk_table: String,
    /// Referencing column.
    pub fk_column: String,
    /// Referenced table.
    pub pk_table: String,
    /// Referenced column.
    pub pk_column: String,
    /// Position within the key (1-based).
    pub sequence: u32,
    /// JDBC update rule code.
    pub update_rule: i32,
    /// JDBC delete rule code.
    pub delete_rule: i32,
    /// JDBC deferrability code.
    pub deferrability: i32,
}

/// Metadata of one table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name.
    pub name: String,
    /// Catalog.
    pub catalog: Option<String>,
    /// Schema.
    pub schema: Option<String>,
    /// Object type ("TABLE", "VIEW", ...).
    pub table_type: Option<String>,
    /// Table comment.
    pub comment: Option<String>,
    /// Columns.
    pub columns: Vec<ColumnMetadata>,
    /// Foreign key rows, any order.
    pub foreign_key_columns: Vec<ForeignKeyColumnMetadata>,
}

impl TableMetadata {
    /// Create table metadata of type "TABLE".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_type: Some("TABLE".to_string()),
            ..Default::default()
        }
    }

    /// Add a column.
    pub fn with_column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a single-column foreign key row at the next sequence of that key.
    pub fn with_foreign_key_column(
        mut self,
        fk_name: impl Into<String>,
        fk_column: impl Into<String>,
        pk_table: impl Into<String>,
        pk_column: impl Into<String>,
    ) -> Self {
        let fk_name = fk_name.into();
        let sequence = self
            .foreign_key_columns
            .iter()
            .filter(|c| c.fk_name == fk_name)
            .count() as u32
            + 1;
        self.foreign_key_columns.push(ForeignKeyColumnMetadata {
            fk_table: self.name.clone(),
            fk_name,
            fk_column: fk_column.into(),
            pk_table: pk_table.into(),
            pk_column: pk_column.into(),
            sequence,
            update_rule: ReferentialAction::default().jdbc_code(),
            delete_rule: ReferentialAction::default().jdbc_code(),
            deferrability: Deferrability::default().jdbc_code(),
        });
        self
    }
}

/// Provider of already-acquired schema metadata.
///
/// Failures are reported as boxed errors; the generator wraps them with the
/// table and operation they occurred in.
pub trait SchemaSource {
    /// Product name of the database, when known.
    fn database_product_name(&self) -> Option<String> {
        None
    }

    /// Names of the tables to model.
    fn table_names(&self) -> Result<Vec<String>, BoxError>;

    /// Metadata of one table.
    fn read_table(&self, table: &str) -> Result<TableMetadata, BoxError>;
}

impl SchemaSource for [TableMetadata] {
    fn table_names(&self) -> Result<Vec<String>, BoxError> {
        Ok(self.iter().map(|t| t.name.clone()).collect())
    }

    fn read_table(&self, table: &str) -> Result<TableMetadata, BoxError> {
        self.iter()
            .find(|t| t.name == table)
            .cloned()
            .ok_or_else(|| format!("table '{table}' not found").into())
    }
}

impl SchemaSource for Vec<TableMetadata> {
    fn table_names(&self) -> Result<Vec<String>, BoxError> {
        self.as_slice().table_names()
    }

    fn read_table(&self, table: &str) -> Result<TableMetadata, BoxError> {
        self.as_slice().read_table(table)
    }
}
