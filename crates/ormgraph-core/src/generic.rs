//! Read-only views of the model for template consumers.
//!
//! Each view is an owned snapshot built with `From`, serializable as-is.

use crate::model::{
    Attribute, Cardinality, DateType, Entity, FetchType, JoinColumn, JoinTable, Link, Model,
};
use serde::Serialize;

/// View of a whole model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericModel {
    /// Logical name of the source database.
    pub database_name: Option<String>,
    /// Product name of the source database.
    pub database_product_name: Option<String>,
    /// Entities sorted by table name.
    pub entities: Vec<GenericEntity>,
}

/// View of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericEntity {
    /// Class name in the generated model.
    pub class_name: String,
    /// Table name.
    pub table_name: String,
    /// Catalog, if any.
    pub catalog: Option<String>,
    /// Schema, if any.
    pub schema: Option<String>,
    /// Object type ("TABLE", "VIEW", ...).
    pub database_type: Option<String>,
    /// Table comment.
    pub comment: String,
    /// Whether the entity is a join table.
    pub join_table: bool,
    /// Warnings collected while building the entity.
    pub warnings: Vec<String>,
    /// Attributes in column order.
    pub attributes: Vec<GenericAttribute>,
    /// Selected links only, sorted by id.
    pub links: Vec<GenericLink>,
}

/// View of an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericAttribute {
    /// Attribute name in the generated model.
    pub name: String,
    /// Attribute type in the generated model.
    pub model_type: String,
    /// Column name.
    pub database_name: String,
    /// Native database type name.
    pub database_type: String,
    /// JDBC type code.
    pub jdbc_type_code: i32,
    /// Column size.
    pub database_size: u32,
    /// Default value declared in the database.
    pub database_default_value: Option<String>,
    /// Column comment.
    pub database_comment: String,
    /// Part of the primary key.
    pub key_element: bool,
    /// Auto-incremented column.
    pub auto_incremented: bool,
    /// Long text column (CLOB, BLOB, ...).
    pub long_text: bool,
    /// Temporal flavour.
    pub date_type: DateType,
    /// Validation hint: value required.
    pub not_null: bool,
    /// Validation hint: text must not be empty.
    pub not_empty: bool,
    /// Validation hint: maximum text length.
    pub max_length: Option<u32>,
    /// Participates in a foreign key.
    pub fk: bool,
    /// Single column of a foreign key.
    pub fk_simple: bool,
    /// Part of a multi-column foreign key.
    pub fk_composite: bool,
    /// Table referenced through the first foreign key using the column.
    pub referenced_table: Option<String>,
}

/// View of a link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericLink {
    /// Rendered link id.
    pub id: String,
    /// Rendered id of the paired link.
    pub mirror_id: String,
    /// Field name on the source entity.
    pub field_name: String,
    /// Class name of the target entity.
    pub target_entity_class_name: String,
    /// Table name of the target entity.
    pub target_table_name: String,
    /// Cardinality seen from the source entity.
    pub cardinality: Cardinality,
    /// Fetch strategy.
    pub fetch_type: FetchType,
    /// Whether this is the owning side.
    pub owning_side: bool,
    /// Field name of the owning side, on inverse links.
    pub mapped_by: Option<String>,
    /// Foreign key behind a many-to-one relation.
    pub foreign_key_name: Option<String>,
    /// Join table behind a many-to-many relation.
    pub join_table_name: Option<String>,
    /// Join columns of the owning many-to-one side.
    pub join_columns: Vec<GenericJoinColumn>,
    /// Join table descriptor of the owning many-to-many side.
    pub join_table: Option<GenericJoinTable>,
}

/// View of a join column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericJoinColumn {
    /// Referencing column.
    pub name: String,
    /// Referenced column.
    pub referenced_column_name: String,
    /// Unique constraint.
    pub unique: bool,
    /// Nullable column.
    pub nullable: bool,
    /// Included in inserts.
    pub insertable: bool,
    /// Included in updates.
    pub updatable: bool,
}

/// View of a join table descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericJoinTable {
    /// Join table name.
    pub name: String,
    /// Schema, if any.
    pub schema: Option<String>,
    /// Catalog, if any.
    pub catalog: Option<String>,
    /// Columns referencing the owning side.
    pub join_columns: Vec<GenericJoinColumn>,
    /// Columns referencing the inverse side.
    pub inverse_join_columns: Vec<GenericJoinColumn>,
}

impl From<&Model> for GenericModel {
    fn from(model: &Model) -> Self {
        Self {
            database_name: model.database_name.clone(),
            database_product_name: model.database_product_name.clone(),
            entities: model
                .entities_sorted_by_table_name()
                .into_iter()
                .map(GenericEntity::from)
                .collect(),
        }
    }
}

impl From<&Entity> for GenericEntity {
    fn from(entity: &Entity) -> Self {
        Self {
            class_name: entity.class_name.clone(),
            table_name: entity.table_name.clone(),
            catalog: entity.catalog.clone(),
            schema: entity.schema.clone(),
            database_type: entity.database_type.clone(),
            comment: entity.comment.clone(),
            join_table: entity.is_join_table(),
            warnings: entity.warnings(),
            attributes: entity.attributes().into_iter().map(GenericAttribute::from).collect(),
            links: entity.selected_links().into_iter().map(GenericLink::from).collect(),
        }
    }
}

impl From<&Attribute> for GenericAttribute {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name.clone(),
            model_type: attribute.model_type.clone(),
            database_name: attribute.database_name.clone(),
            database_type: attribute.database_type.clone(),
            jdbc_type_code: attribute.jdbc_type_code,
            database_size: attribute.database_size,
            database_default_value: attribute.database_default_value.clone(),
            database_comment: attribute.database_comment.clone(),
            key_element: attribute.key_element,
            auto_incremented: attribute.auto_incremented,
            long_text: attribute.long_text,
            date_type: attribute.date_type,
            not_null: attribute.not_null,
            not_empty: attribute.not_empty,
            max_length: attribute.max_length,
            fk: attribute.fk,
            fk_simple: attribute.fk_simple,
            fk_composite: attribute.fk_composite,
            referenced_table: attribute.referenced_table.clone(),
        }
    }
}

impl From<&Link> for GenericLink {
    fn from(link: &Link) -> Self {
        Self {
            id: link.id.to_string(),
            mirror_id: link.mirror_id.to_string(),
            field_name: link.field_name.clone(),
            target_entity_class_name: link.target_entity_class_name.clone(),
            target_table_name: link.target_table_name.clone(),
            cardinality: link.cardinality,
            fetch_type: link.fetch_type,
            owning_side: link.owning_side,
            mapped_by: link.mapped_by.clone(),
            foreign_key_name: link.foreign_key_name.clone(),
            join_table_name: link.join_table_name.clone(),
            join_columns: link.join_columns.iter().map(GenericJoinColumn::from).collect(),
            join_table: link.join_table.as_ref().map(GenericJoinTable::from),
        }
    }
}

impl From<&JoinColumn> for GenericJoinColumn {
    fn from(column: &JoinColumn) -> Self {
        Self {
            name: column.name.clone(),
            referenced_column_name: column.referenced_column_name.clone(),
            unique: column.unique,
            nullable: column.nullable,
            insertable: column.insertable,
            updatable: column.updatable,
        }
    }
}

impl From<&JoinTable> for GenericJoinTable {
    fn from(table: &JoinTable) -> Self {
        Self {
            name: table.name.clone(),
            schema: table.schema.clone(),
            catalog: table.catalog.clone(),
            join_columns: table.join_columns.iter().map(GenericJoinColumn::from).collect(),
            inverse_join_columns: table
                .inverse_join_columns
                .iter()
                .map(GenericJoinColumn::from)
                .collect(),
        }
    }
}
