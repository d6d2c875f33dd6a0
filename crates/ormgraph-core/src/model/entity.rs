//! Entity definitions.

use super::{Attribute, ForeignKey, Link, LinkId};
use crate::relation::classifier;
use std::collections::HashMap;

/// An entity: a database table mapped to a class.
///
/// Attributes, foreign keys and links are stored in hash maps keyed by their
/// stable identity; every read accessor returns them sorted so that output is
/// independent of insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    /// Table name (unique within the model).
    pub table_name: String,
    /// Class name in the generated model.
    pub class_name: String,
    /// Database catalog.
    pub catalog: Option<String>,
    /// Database schema.
    pub schema: Option<String>,
    /// Database object type ("TABLE", "VIEW", ...).
    pub database_type: Option<String>,
    /// Table comment.
    pub comment: String,
    attributes: HashMap<String, Attribute>,
    foreign_keys: HashMap<String, ForeignKey>,
    links: HashMap<LinkId, Link>,
}

impl Entity {
    /// Create an entity for a table.
    pub fn new(table_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            class_name: class_name.into(),
            ..Default::default()
        }
    }

    /// Set the database catalog.
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Set the database schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the database object type.
    pub fn with_database_type(mut self, database_type: impl Into<String>) -> Self {
        self.database_type = Some(database_type.into());
        self
    }

    /// Set the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.store_attribute(attribute);
        self
    }

    /// Add a foreign key.
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.store_foreign_key(foreign_key);
        self
    }

    /// Check if the entity is a pure association table.
    ///
    /// Re-evaluated on every call; relies on the attributes' foreign key
    /// flags being up to date.
    pub fn is_join_table(&self) -> bool {
        classifier::is_join_table(self)
    }

    /// Check if the entity maps a table.
    pub fn is_table_type(&self) -> bool {
        self.database_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("TABLE"))
    }

    /// Check if the entity maps a view.
    pub fn is_view_type(&self) -> bool {
        self.database_type
            .as_deref()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("VIEW"))
    }

    /// Check if at least one attribute is part of the primary key.
    pub fn has_primary_key(&self) -> bool {
        self.attributes.values().any(|a| a.key_element)
    }

    /// Modelling warnings for this entity.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.has_primary_key() {
            warnings.push("No Primary Key".to_string());
        }
        warnings
    }

    // Attributes

    /// Number of attributes.
    pub fn attributes_count(&self) -> usize {
        self.attributes.len()
    }

    /// All attributes, sorted by database position (then column name).
    pub fn attributes(&self) -> Vec<&Attribute> {
        let mut attributes: Vec<_> = self.attributes.values().collect();
        attributes.sort_by(|a, b| {
            a.database_position
                .cmp(&b.database_position)
                .then_with(|| a.database_name.cmp(&b.database_name))
        });
        attributes
    }

    /// Get an attribute by column name.
    pub fn attribute(&self, column_name: &str) -> Option<&Attribute> {
        self.attributes.get(column_name)
    }

    /// Add or replace an attribute.
    pub fn store_attribute(&mut self, attribute: Attribute) {
        self.attributes
            .insert(attribute.database_name.clone(), attribute);
    }

    /// Remove an attribute by column name.
    pub fn remove_attribute(&mut self, column_name: &str) -> Option<Attribute> {
        self.attributes.remove(column_name)
    }

    pub(crate) fn attributes_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.attributes.values_mut()
    }

    // Foreign keys

    /// All foreign keys, sorted by name.
    pub fn foreign_keys(&self) -> Vec<&ForeignKey> {
        let mut foreign_keys: Vec<_> = self.foreign_keys.values().collect();
        foreign_keys.sort_by(|a, b| a.name.cmp(&b.name));
        foreign_keys
    }

    /// Number of foreign keys.
    pub fn foreign_keys_count(&self) -> usize {
        self.foreign_keys.len()
    }

    /// Get a foreign key by name.
    pub fn foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.get(name)
    }

    /// Add or replace a foreign key.
    pub fn store_foreign_key(&mut self, foreign_key: ForeignKey) {
        self.foreign_keys
            .insert(foreign_key.name.clone(), foreign_key);
    }

    /// Remove a foreign key by name.
    pub fn remove_foreign_key(&mut self, name: &str) -> Option<ForeignKey> {
        self.foreign_keys.remove(name)
    }

    // Links

    /// Number of links.
    pub fn links_count(&self) -> usize {
        self.links.len()
    }

    /// All links, sorted by id.
    pub fn links(&self) -> Vec<&Link> {
        let mut links: Vec<_> = self.links.values().collect();
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links
    }

    /// Links selected for code generation, sorted by id.
    pub fn selected_links(&self) -> Vec<&Link> {
        self.links().into_iter().filter(|l| l.selected).collect()
    }

    /// Links navigating to the given table, sorted by id.
    pub fn links_to(&self, table: &str) -> Vec<&Link> {
        self.links()
            .into_iter()
            .filter(|l| l.target_table_name == table)
            .collect()
    }

    /// Get a link by id.
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// Check if a field name is already used by an attribute or a link.
    pub fn has_field_named(&self, name: &str) -> bool {
        self.links.values().any(|l| l.field_name == name)
            || self.attributes.values().any(|a| a.name == name)
    }

    pub(crate) fn store_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    pub(crate) fn remove_link(&mut self, id: &LinkId) -> Option<Link> {
        self.links.remove(id)
    }

    /// Remove every link matching the predicate, returning how many were removed.
    pub(crate) fn remove_links_where(&mut self, mut predicate: impl FnMut(&Link) -> bool) -> usize {
        let before = self.links.len();
        self.links.retain(|_, link| !predicate(link));
        before - self.links.len()
    }

    pub(crate) fn remove_all_links(&mut self) -> usize {
        let count = self.links.len();
        self.links.clear();
        count
    }

    /// Replace structure and metadata with another snapshot of the same
    /// table, keeping this entity's links.
    pub(crate) fn replace_structure(&mut self, snapshot: &Entity) {
        self.class_name = snapshot.class_name.clone();
        self.catalog = snapshot.catalog.clone();
        self.schema = snapshot.schema.clone();
        self.database_type = snapshot.database_type.clone();
        self.comment = snapshot.comment.clone();
        self.attributes = snapshot.attributes.clone();
        self.foreign_keys = snapshot.foreign_keys.clone();
    }

    /// A copy of this entity without any link.
    pub(crate) fn without_links(&self) -> Entity {
        Entity {
            links: HashMap::new(),
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}|{}|columns={}|foreignKeys={}|links={}",
            self.class_name,
            self.table_name,
            self.attributes.len(),
            self.foreign_keys.len(),
            self.links.len()
        )
    }
}
