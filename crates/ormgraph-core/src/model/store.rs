//! Model store - all entities of a schema snapshot and their links.

use super::{Entity, ForeignKey, Link, LinkId};
use std::collections::HashMap;

/// The model graph: entities keyed by table name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Logical name of the source database.
    pub database_name: Option<String>,
    /// Product name of the source database (e.g. "PostgreSQL").
    pub database_product_name: Option<String>,
    entities: HashMap<String, Entity>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the model.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.store_entity(entity);
        self
    }

    /// Add or replace an entity, returning the replaced one.
    pub fn store_entity(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.table_name.clone(), entity)
    }

    /// Remove an entity by table name.
    ///
    /// Links held by other entities are left untouched.
    pub fn remove_entity(&mut self, table: &str) -> Option<Entity> {
        self.entities.remove(table)
    }

    /// Get an entity by table name.
    pub fn entity(&self, table: &str) -> Option<&Entity> {
        self.entities.get(table)
    }

    /// Get a mutable entity by table name.
    pub fn entity_mut(&mut self, table: &str) -> Option<&mut Entity> {
        self.entities.get_mut(table)
    }

    /// Check if the model holds an entity for the table.
    pub fn contains_entity(&self, table: &str) -> bool {
        self.entities.contains_key(table)
    }

    /// Number of entities.
    pub fn entities_count(&self) -> usize {
        self.entities.len()
    }

    /// All entities sorted by table name (ascending, case-sensitive).
    pub fn entities_sorted_by_table_name(&self) -> Vec<&Entity> {
        let mut entities: Vec<_> = self.entities.values().collect();
        entities.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        entities
    }

    /// All table names, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entities.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    // Links

    /// Total number of links across all entities.
    pub fn links_count(&self) -> usize {
        self.entities.values().map(Entity::links_count).sum()
    }

    /// Every link of the model, sorted by id.
    pub fn all_links(&self) -> Vec<&Link> {
        let mut links: Vec<_> = self
            .entities
            .values()
            .flat_map(|e| e.links())
            .collect();
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links
    }

    /// Find a link by id in any entity.
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.entities.values().find_map(|e| e.link(id))
    }

    /// Remove a link by id from whichever entity holds it.
    ///
    /// Returns the number of links removed (0 when absent).
    pub fn remove_link_by_id(&mut self, id: &LinkId) -> usize {
        self.entities
            .values_mut()
            .filter_map(|e| e.remove_link(id))
            .count()
    }

    /// Remove both links of the relation defined by a foreign key.
    pub fn remove_links_by_foreign_key(&mut self, foreign_key: &ForeignKey) -> usize {
        let (owning, inverse) = LinkId::foreign_key_pair(foreign_key);
        self.remove_link_by_id(&inverse) + self.remove_link_by_id(&owning)
    }

    /// Remove every link starting or ending at the given table.
    pub fn remove_links_by_entity_name(&mut self, table: &str) -> usize {
        self.entities
            .values_mut()
            .map(|e| e.remove_links_where(|l| l.uses_table(table)))
            .sum()
    }

    /// Remove every many-to-many link realized through the given join table.
    pub fn remove_links_by_join_table_name(&mut self, table: &str) -> usize {
        self.entities
            .values_mut()
            .map(|e| e.remove_links_where(|l| l.uses_join_table(table)))
            .sum()
    }

    /// Remove all links of all entities.
    pub fn remove_all_links(&mut self) -> usize {
        self.entities.values_mut().map(Entity::remove_all_links).sum()
    }
}
