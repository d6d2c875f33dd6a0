//! Attribute definitions (column projections).

use super::types::DateType;
use serde::{Deserialize, Serialize};

/// An attribute of an entity, projected from a table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Column name (unique within the entity).
    pub database_name: String,
    /// Native database type name (e.g. "VARCHAR").
    pub database_type: String,
    /// JDBC type code.
    pub jdbc_type_code: i32,
    /// Column size (max characters or numeric precision).
    pub database_size: u32,
    /// Ordinal position of the column in its table (1-based).
    pub database_position: u32,
    /// Whether the column is declared NOT NULL.
    pub database_not_null: bool,
    /// Default value declared in the database.
    pub database_default_value: Option<String>,
    /// Column comment.
    pub database_comment: String,
    /// Attribute name in the generated model.
    pub name: String,
    /// Attribute type in the generated model.
    pub model_type: String,
    /// Whether the column is part of the primary key.
    pub key_element: bool,
    /// Whether the column is auto-incremented.
    pub auto_incremented: bool,
    /// Whether the column holds long text (CLOB, BLOB, ...).
    pub long_text: bool,
    /// Temporal flavour of the attribute.
    pub date_type: DateType,
    /// Validation hint: value required.
    pub not_null: bool,
    /// Validation hint: text must not be empty.
    pub not_empty: bool,
    /// Validation hint: maximum text length.
    pub max_length: Option<u32>,
    /// Whether the column participates in at least one foreign key.
    pub fk: bool,
    /// Whether the column is the single column of a foreign key.
    pub fk_simple: bool,
    /// Whether the column is part of a multi-column foreign key.
    pub fk_composite: bool,
    /// Table referenced through the (first) foreign key using this column.
    pub referenced_table: Option<String>,
}

impl Attribute {
    /// Create an attribute for a column. The model name defaults to the column name.
    pub fn new(
        database_name: impl Into<String>,
        database_type: impl Into<String>,
        jdbc_type_code: i32,
        database_position: u32,
    ) -> Self {
        let database_name = database_name.into();
        Self {
            name: database_name.clone(),
            database_name,
            database_type: database_type.into(),
            jdbc_type_code,
            database_size: 0,
            database_position,
            database_not_null: false,
            database_default_value: None,
            database_comment: String::new(),
            model_type: String::new(),
            key_element: false,
            auto_incremented: false,
            long_text: false,
            date_type: DateType::from_jdbc_code(jdbc_type_code),
            not_null: false,
            not_empty: false,
            max_length: None,
            fk: false,
            fk_simple: false,
            fk_composite: false,
            referenced_table: None,
        }
    }

    /// Mark as a primary key element (implies NOT NULL).
    pub fn with_primary_key(mut self) -> Self {
        self.key_element = true;
        self.database_not_null = true;
        self
    }

    /// Mark as NOT NULL.
    pub fn with_not_null(mut self) -> Self {
        self.database_not_null = true;
        self
    }

    /// Set the model name and type.
    pub fn with_model(mut self, name: impl Into<String>, model_type: impl Into<String>) -> Self {
        self.name = name.into();
        self.model_type = model_type.into();
        self
    }

    /// Set the column size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.database_size = size;
        self
    }

    /// Mark as auto-incremented.
    pub fn with_auto_increment(mut self) -> Self {
        self.auto_incremented = true;
        self
    }

    /// Check if this attribute participates in a foreign key.
    pub fn is_fk(&self) -> bool {
        self.fk
    }

    /// Check if this attribute is the only column of some foreign key.
    pub fn is_fk_simple(&self) -> bool {
        self.fk_simple
    }

    /// Check if this attribute belongs to a multi-column foreign key.
    pub fn is_fk_composite(&self) -> bool {
        self.fk_composite
    }

    /// Check if this attribute is part of the primary key.
    pub fn is_key_element(&self) -> bool {
        self.key_element
    }

    pub(crate) fn clear_foreign_key_flags(&mut self) {
        self.fk = false;
        self.fk_simple = false;
        self.fk_composite = false;
        self.referenced_table = None;
    }
}
