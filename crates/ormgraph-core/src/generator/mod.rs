//! Model generation from already-acquired schema metadata.

mod metadata;

pub use metadata::{ColumnMetadata, ForeignKeyColumnMetadata, SchemaSource, TableMetadata};

use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::model::{
    jdbc, Attribute, Deferrability, Entity, ForeignKey, ForeignKeyColumn, Model,
    ReferentialAction,
};
use crate::relation::RelationBuilder;
use crate::rules::NamingRules;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Builds a complete model (entities and links) from a [`SchemaSource`].
pub struct ModelGenerator<'a> {
    rules: &'a dyn NamingRules,
    config: LinkConfig,
    database_name: Option<String>,
}

impl<'a> ModelGenerator<'a> {
    /// Create a generator using the given naming rules.
    pub fn new(rules: &'a dyn NamingRules) -> Self {
        Self {
            rules,
            config: LinkConfig::default(),
            database_name: None,
        }
    }

    /// Set the link configuration.
    pub fn with_config(mut self, config: LinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the logical database name recorded in the model.
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    /// Generate the model: one entity per table, then every link.
    #[instrument(skip_all)]
    pub fn generate<S: SchemaSource + ?Sized>(&self, source: &S) -> Result<Model> {
        let mut model = Model::new();
        model.database_name = self.database_name.clone();
        model.database_product_name = source.database_product_name();

        let tables = source
            .table_names()
            .map_err(|e| Error::acquisition("*", "list tables", e))?;

        for table in &tables {
            let metadata = source
                .read_table(table)
                .map_err(|e| Error::acquisition(table.as_str(), "read table", e))?;
            let entity = self.build_entity(&metadata);
            if !entity.has_primary_key() {
                warn!(table = %entity.table_name, "Entity has no primary key");
            }
            debug!(
                table = %entity.table_name,
                class = %entity.class_name,
                attributes = entity.attributes_count(),
                foreign_keys = entity.foreign_keys_count(),
                "Entity generated"
            );
            model.store_entity(entity);
        }

        // The full pass sets the foreign key flags before building links.
        let links = RelationBuilder::new(self.rules)
            .with_config(self.config.clone())
            .rebuild_all_links(&mut model)?;

        info!(
            entities = model.entities_count(),
            links,
            "Model generation completed"
        );
        Ok(model)
    }

    /// Build an entity (without links) from table metadata.
    pub fn build_entity(&self, table: &TableMetadata) -> Entity {
        let mut entity = Entity::new(&table.name, self.rules.entity_class_name(&table.name));
        entity.catalog = table.catalog.clone();
        entity.schema = table.schema.clone();
        entity.database_type = table.table_type.clone();
        entity.comment = table.comment.clone().unwrap_or_default();

        for column in &table.columns {
            entity.store_attribute(self.build_attribute(column));
        }
        for foreign_key in build_foreign_keys(table) {
            entity.store_foreign_key(foreign_key);
        }
        entity
    }

    /// Build an attribute from column metadata.
    pub fn build_attribute(&self, column: &ColumnMetadata) -> Attribute {
        let mut attribute = Attribute::new(
            &column.name,
            &column.type_name,
            column.jdbc_type_code,
            column.ordinal_position,
        )
        .with_model(
            self.rules.attribute_name(&column.name),
            self.rules
                .attribute_type(&column.type_name, column.jdbc_type_code, column.not_null),
        )
        .with_size(column.size);

        attribute.key_element = column.in_primary_key;
        attribute.auto_incremented = column.auto_incremented;
        attribute.database_not_null = column.not_null;
        attribute.database_default_value = column.default_value.clone();
        attribute.database_comment = column.comment.clone().unwrap_or_default();
        attribute.long_text = jdbc::is_long_text(column.jdbc_type_code);

        // Validation hints
        attribute.not_null = column.not_null;
        if jdbc::is_text(column.jdbc_type_code) {
            attribute.not_empty = column.not_null;
            attribute.max_length = (column.size > 0).then_some(column.size);
        }
        attribute
    }
}

/// Group foreign key rows by key name; rules are taken from the first row.
fn build_foreign_keys(table: &TableMetadata) -> Vec<ForeignKey> {
    let mut keys: BTreeMap<&str, ForeignKey> = BTreeMap::new();
    for row in &table.foreign_key_columns {
        let key = keys.entry(row.fk_name.as_str()).or_insert_with(|| {
            ForeignKey::new(&row.fk_name, &row.fk_table, &row.pk_table)
                .on_update(ReferentialAction::from_jdbc_code(row.update_rule))
                .on_delete(ReferentialAction::from_jdbc_code(row.delete_rule))
                .with_deferrability(Deferrability::from_jdbc_code(row.deferrability))
        });
        key.store_column(ForeignKeyColumn {
            sequence: row.sequence,
            column_name: row.fk_column.clone(),
            referenced_column_name: row.pk_column.clone(),
        });
    }
    keys.into_values().collect()
}
