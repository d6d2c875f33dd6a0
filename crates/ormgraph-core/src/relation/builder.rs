//! Relationship builder.
//!
//! Turns foreign keys and join tables into pairs of links (owning side and
//! inverse side) stored on the entities they start from.

use super::mark_foreign_key_attributes;
use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::model::{
    Cardinality, Entity, ForeignKey, JoinColumn, JoinTable, Link, LinkId, LinkSide, Model,
};
use crate::rules::NamingRules;
use tracing::{debug, info, instrument};

/// Number of links produced by one relation.
pub const LINKS_PER_RELATION: usize = 2;

/// Builds link pairs from foreign keys and join tables.
pub struct RelationBuilder<'a> {
    rules: &'a dyn NamingRules,
    config: LinkConfig,
}

impl<'a> RelationBuilder<'a> {
    /// Create a builder using the given naming rules and the default config.
    pub fn new(rules: &'a dyn NamingRules) -> Self {
        Self {
            rules,
            config: LinkConfig::default(),
        }
    }

    /// Set the link configuration.
    pub fn with_config(mut self, config: LinkConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the link configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Regenerate every link of the model.
    ///
    /// Recomputes the foreign key flags, drops all existing links and builds
    /// the relations of each entity in table name order. Running it twice on
    /// an unchanged model yields the same links.
    ///
    /// The pass works on a copy of the model; on error the model is left
    /// exactly as it was.
    #[instrument(skip_all, fields(entities = model.entities_count()))]
    pub fn rebuild_all_links(&self, model: &mut Model) -> Result<usize> {
        let mut next = model.clone();
        mark_foreign_key_attributes(&mut next);
        let removed = next.remove_all_links();

        let mut count = 0;
        for table in next.table_names() {
            count += self.build_relations_for_entity(&mut next, &table)?;
        }
        *model = next;

        info!(
            links_removed = removed,
            links_created = count,
            "Link generation completed"
        );
        Ok(count)
    }

    /// Build the relations defined by one entity.
    ///
    /// A join table yields one many-to-many relation; any other entity
    /// yields one many-to-one relation per foreign key. Returns the number
    /// of links created.
    pub fn build_relations_for_entity(&self, model: &mut Model, table: &str) -> Result<usize> {
        let entity = lookup(model, table)?;

        if entity.is_join_table() {
            self.build_many_to_many_relation(model, table)?;
            return Ok(LINKS_PER_RELATION);
        }

        let foreign_keys: Vec<ForeignKey> = entity.foreign_keys().into_iter().cloned().collect();
        let mut count = 0;
        for foreign_key in &foreign_keys {
            self.build_many_to_one_relation(model, foreign_key)?;
            count += LINKS_PER_RELATION;
        }
        Ok(count)
    }

    /// Build the many-to-one relation defined by a foreign key.
    ///
    /// The owning entity is the one holding the foreign key
    /// (`foreign_key.table_name`). Links previously stored under the same
    /// ids are replaced. Returns `(owning, inverse)`.
    pub fn build_many_to_one_relation(
        &self,
        model: &mut Model,
        foreign_key: &ForeignKey,
    ) -> Result<(Link, Link)> {
        let owning_table = foreign_key.table_name.as_str();
        let target_table = foreign_key.referenced_table_name.as_str();

        lookup(model, owning_table)?;
        lookup_referenced(model, foreign_key)?;

        let (owning_id, inverse_id) = LinkId::foreign_key_pair(foreign_key);
        model.remove_link_by_id(&owning_id);
        model.remove_link_by_id(&inverse_id);

        // Owning side first: the inverse side is named after it.
        let owning_link = {
            let owning = lookup(model, owning_table)?;
            let target = lookup(model, target_table)?;
            let mut link = self.base_link(owning_id, Cardinality::ManyToOne, owning, target);
            link.foreign_key_name = Some(foreign_key.name.clone());
            link.field_name = self.rules.attribute_name_for_link_to_one(owning, target);
            link.join_columns = JoinColumn::from_foreign_key(foreign_key);
            link
        };
        store_link(model, owning_table, owning_link.clone())?;

        let inverse_link = {
            let owning = lookup(model, owning_table)?;
            let target = lookup(model, target_table)?;
            let mut link = self.base_link(inverse_id, Cardinality::OneToMany, target, owning);
            link.foreign_key_name = Some(foreign_key.name.clone());
            link.field_name = self.rules.attribute_name_for_link_to_many(target, owning);
            link.mapped_by = Some(owning_link.field_name.clone());
            link
        };
        store_link(model, target_table, inverse_link.clone())?;

        debug!(
            foreign_key = %foreign_key.name,
            owning = %owning_table,
            target = %target_table,
            field = %owning_link.field_name,
            "Many-to-one relation built"
        );
        Ok((owning_link, inverse_link))
    }

    /// Build the many-to-many relation realized by a join table.
    ///
    /// The join table must have exactly two foreign keys. The one whose
    /// name sorts first references the owning side entity, the other one
    /// the inverse side entity. Returns `(owning, inverse)`.
    pub fn build_many_to_many_relation(
        &self,
        model: &mut Model,
        join_table: &str,
    ) -> Result<(Link, Link)> {
        let join_entity = lookup(model, join_table)?;
        let foreign_keys: Vec<ForeignKey> =
            join_entity.foreign_keys().into_iter().cloned().collect();
        let [owning_fk, inverse_fk] = foreign_keys.as_slice() else {
            return Err(Error::InvalidJoinTableShape {
                table: join_table.to_string(),
                foreign_key_count: foreign_keys.len(),
            });
        };
        let descriptor = JoinTable {
            name: join_entity.table_name.clone(),
            schema: join_entity.schema.clone(),
            catalog: join_entity.catalog.clone(),
            join_columns: JoinColumn::from_foreign_key(owning_fk),
            inverse_join_columns: JoinColumn::from_foreign_key(inverse_fk),
        };

        lookup_referenced(model, owning_fk)?;
        lookup_referenced(model, inverse_fk)?;
        let owning_table = owning_fk.referenced_table_name.as_str();
        let inverse_table = inverse_fk.referenced_table_name.as_str();

        let (owning_id, inverse_id) = LinkId::join_table_pair(join_table);
        model.remove_link_by_id(&owning_id);
        model.remove_link_by_id(&inverse_id);

        let owning_link = {
            let owning = lookup(model, owning_table)?;
            let inverse = lookup(model, inverse_table)?;
            let mut link = self.base_link(owning_id, Cardinality::ManyToMany, owning, inverse);
            link.join_table_name = Some(join_table.to_string());
            link.field_name = self.rules.attribute_name_for_link_to_many(owning, inverse);
            link.join_table = Some(descriptor);
            link
        };
        store_link(model, owning_table, owning_link.clone())?;

        let inverse_link = {
            let owning = lookup(model, owning_table)?;
            let inverse = lookup(model, inverse_table)?;
            let mut link = self.base_link(inverse_id, Cardinality::ManyToMany, inverse, owning);
            link.join_table_name = Some(join_table.to_string());
            link.field_name = self.rules.attribute_name_for_link_to_many(inverse, owning);
            link.mapped_by = Some(owning_link.field_name.clone());
            link
        };
        store_link(model, inverse_table, inverse_link.clone())?;

        debug!(
            join_table = %join_table,
            owning = %owning_table,
            inverse = %inverse_table,
            "Many-to-many relation built"
        );
        Ok((owning_link, inverse_link))
    }

    fn base_link(
        &self,
        id: LinkId,
        cardinality: Cardinality,
        source: &Entity,
        target: &Entity,
    ) -> Link {
        Link {
            mirror_id: id.mirror(),
            owning_side: id.side() == LinkSide::Owning,
            id,
            foreign_key_name: None,
            join_table_name: None,
            cardinality,
            fetch_type: self.config.fetch_type,
            source_table_name: source.table_name.clone(),
            target_table_name: target.table_name.clone(),
            target_entity_class_name: target.class_name.clone(),
            field_name: String::new(),
            mapped_by: None,
            join_columns: Vec::new(),
            join_table: None,
            selected: self.config.select_new_links,
        }
    }
}

fn lookup<'m>(model: &'m Model, table: &str) -> Result<&'m Entity> {
    model.entity(table).ok_or_else(|| Error::EntityNotFound {
        table: table.to_string(),
    })
}

fn lookup_referenced<'m>(model: &'m Model, foreign_key: &ForeignKey) -> Result<&'m Entity> {
    model
        .entity(&foreign_key.referenced_table_name)
        .ok_or_else(|| Error::ReferencedEntityNotFound {
            foreign_key: foreign_key.name.clone(),
            table: foreign_key.table_name.clone(),
            referenced_table: foreign_key.referenced_table_name.clone(),
        })
}

fn store_link(model: &mut Model, table: &str, link: Link) -> Result<()> {
    model
        .entity_mut(table)
        .ok_or_else(|| Error::EntityNotFound {
            table: table.to_string(),
        })?
        .store_link(link);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{jdbc, Attribute, FetchType};
    use crate::rules::DefaultRules;

    fn id_column() -> Attribute {
        key_column("ID", 1)
    }

    fn key_column(name: &str, position: u32) -> Attribute {
        Attribute::new(name, "INTEGER", jdbc::INTEGER, position).with_primary_key()
    }

    fn shop_model() -> Model {
        Model::new()
            .with_entity(Entity::new("CUSTOMERS", "Customers").with_attribute(id_column()))
            .with_entity(
                Entity::new("ORDERS", "Orders")
                    .with_attribute(id_column())
                    .with_attribute(Attribute::new("CUSTOMER_ID", "INTEGER", jdbc::INTEGER, 2))
                    .with_attribute(Attribute::new("BILLED_TO", "INTEGER", jdbc::INTEGER, 3))
                    .with_foreign_key(
                        ForeignKey::new("FK_ORDER_CUSTOMER", "ORDERS", "CUSTOMERS")
                            .with_column("CUSTOMER_ID", "ID"),
                    ),
            )
    }

    fn library_model() -> Model {
        Model::new()
            .with_entity(Entity::new("BOOKS", "Books").with_attribute(id_column()))
            .with_entity(Entity::new("AUTHORS", "Authors").with_attribute(id_column()))
            .with_entity(
                Entity::new("BOOK_AUTHOR", "BookAuthor")
                    .with_schema("LIB")
                    .with_attribute(key_column("BOOK_ID", 1))
                    .with_attribute(key_column("AUTHOR_ID", 2))
                    .with_foreign_key(
                        ForeignKey::new("FK_BA_BOOK", "BOOK_AUTHOR", "BOOKS")
                            .with_column("BOOK_ID", "ID"),
                    )
                    .with_foreign_key(
                        ForeignKey::new("FK_BA_AUTHOR", "BOOK_AUTHOR", "AUTHORS")
                            .with_column("AUTHOR_ID", "ID"),
                    ),
            )
    }

    #[test]
    fn test_many_to_one_relation() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        let fk = model.entity("ORDERS").unwrap().foreign_key("FK_ORDER_CUSTOMER").unwrap().clone();

        let (owning, inverse) = builder.build_many_to_one_relation(&mut model, &fk).unwrap();

        assert_eq!(owning.cardinality, Cardinality::ManyToOne);
        assert!(owning.owning_side);
        assert_eq!(owning.field_name, "customers");
        assert_eq!(owning.join_columns.len(), 1);
        assert_eq!(owning.source_table_name, "ORDERS");
        assert_eq!(owning.target_entity_class_name, "Customers");

        assert_eq!(inverse.cardinality, Cardinality::OneToMany);
        assert!(!inverse.owning_side);
        assert_eq!(inverse.field_name, "listOfOrders");
        assert_eq!(inverse.mapped_by.as_deref(), Some("customers"));
        assert!(inverse.join_columns.is_empty());

        assert_eq!(owning.mirror_id, inverse.id);
        assert_eq!(inverse.mirror_id, owning.id);
        assert_eq!(model.entity("ORDERS").unwrap().links_count(), 1);
        assert_eq!(model.entity("CUSTOMERS").unwrap().links_count(), 1);
    }

    #[test]
    fn test_rebuilding_a_relation_replaces_it() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        let fk = model.entity("ORDERS").unwrap().foreign_key("FK_ORDER_CUSTOMER").unwrap().clone();

        let first = builder.build_many_to_one_relation(&mut model, &fk).unwrap();
        let second = builder.build_many_to_one_relation(&mut model, &fk).unwrap();

        assert_eq!(first, second);
        assert_eq!(model.links_count(), 2);
    }

    #[test]
    fn test_two_keys_to_the_same_target_get_distinct_names() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        model.entity_mut("ORDERS").unwrap().store_foreign_key(
            ForeignKey::new("FK_ORDER_PAYER", "ORDERS", "CUSTOMERS").with_column("BILLED_TO", "ID"),
        );

        assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 4);

        let orders = model.entity("ORDERS").unwrap();
        let names: Vec<_> = orders.links().iter().map(|l| l.field_name.clone()).collect();
        assert_eq!(names, vec!["customers", "customers2"]);

        let customers = model.entity("CUSTOMERS").unwrap();
        let names: Vec<_> = customers.links().iter().map(|l| l.field_name.clone()).collect();
        assert_eq!(names, vec!["listOfOrders", "listOfOrders2"]);
    }

    #[test]
    fn test_missing_referenced_entity() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        let fk = ForeignKey::new("FK_ORDER_SHOP", "ORDERS", "SHOPS").with_column("SHOP_ID", "ID");

        let err = builder.build_many_to_one_relation(&mut model, &fk).unwrap_err();

        assert!(matches!(
            err,
            Error::ReferencedEntityNotFound { ref referenced_table, .. }
                if referenced_table == "SHOPS"
        ));
        assert_eq!(model.links_count(), 0);
    }

    #[test]
    fn test_failed_relation_keeps_existing_links() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        builder.rebuild_all_links(&mut model).unwrap();

        let dangling = ForeignKey::new("FK_ORDER_CUSTOMER", "ORDERS", "CLIENTS");
        assert!(builder.build_many_to_one_relation(&mut model, &dangling).is_err());
        assert_eq!(model.links_count(), 2);
    }

    #[test]
    fn test_failed_rebuild_leaves_model_untouched() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = shop_model();
        builder.rebuild_all_links(&mut model).unwrap();
        let before = model.clone();

        // Sorts ahead of every other table, so it fails first.
        model.store_entity(
            Entity::new("AAA", "Aaa")
                .with_attribute(id_column())
                .with_foreign_key(
                    ForeignKey::new("FK_AX", "AAA", "MISSING").with_column("ID", "ID"),
                ),
        );
        let err = builder.rebuild_all_links(&mut model).unwrap_err();

        assert!(matches!(err, Error::ReferencedEntityNotFound { .. }));
        assert_eq!(model.links_count(), 2);
        model.remove_entity("AAA");
        assert_eq!(model, before);
    }

    #[test]
    fn test_many_to_many_relation() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = library_model();
        mark_foreign_key_attributes(&mut model);

        let (owning, inverse) = builder
            .build_many_to_many_relation(&mut model, "BOOK_AUTHOR")
            .unwrap();

        // FK_BA_AUTHOR sorts before FK_BA_BOOK
        assert_eq!(owning.source_table_name, "AUTHORS");
        assert_eq!(owning.field_name, "listOfBooks");
        assert_eq!(owning.id, LinkId::for_join_table("BOOK_AUTHOR", LinkSide::Owning));
        let descriptor = owning.join_table.as_ref().unwrap();
        assert_eq!(descriptor.name, "BOOK_AUTHOR");
        assert_eq!(descriptor.schema.as_deref(), Some("LIB"));
        assert_eq!(descriptor.join_columns[0].name, "AUTHOR_ID");
        assert_eq!(descriptor.inverse_join_columns[0].name, "BOOK_ID");

        assert_eq!(inverse.source_table_name, "BOOKS");
        assert_eq!(inverse.cardinality, Cardinality::ManyToMany);
        assert!(inverse.join_table.is_none());
        assert_eq!(inverse.join_table_name.as_deref(), Some("BOOK_AUTHOR"));
        assert_eq!(inverse.mapped_by.as_deref(), Some("listOfBooks"));
        assert!(model.entity("BOOK_AUTHOR").unwrap().links().is_empty());
    }

    #[test]
    fn test_many_to_many_requires_two_foreign_keys() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = library_model();
        model
            .entity_mut("BOOK_AUTHOR")
            .unwrap()
            .remove_foreign_key("FK_BA_BOOK");

        let err = builder.build_many_to_many_relation(&mut model, "BOOK_AUTHOR").unwrap_err();

        assert!(matches!(err, Error::InvalidJoinTableShape { foreign_key_count: 1, .. }));
    }

    #[test]
    fn test_rebuild_all_is_idempotent() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = library_model();

        assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 2);
        let first: Vec<Link> = model.all_links().into_iter().cloned().collect();
        assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 2);
        let second: Vec<Link> = model.all_links().into_iter().cloned().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_config_is_applied() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules).with_config(
            LinkConfig::new()
                .with_fetch_type(FetchType::Lazy)
                .with_select_new_links(false),
        );
        let mut model = shop_model();
        builder.rebuild_all_links(&mut model).unwrap();

        assert!(model.all_links().iter().all(|l| l.fetch_type == FetchType::Lazy && !l.selected));
        assert!(model.entity("ORDERS").unwrap().selected_links().is_empty());
    }

    #[test]
    fn test_self_reference() {
        let rules = DefaultRules::new();
        let builder = RelationBuilder::new(&rules);
        let mut model = Model::new().with_entity(
            Entity::new("EMPLOYEES", "Employees")
                .with_attribute(id_column())
                .with_attribute(Attribute::new("MANAGER_ID", "INTEGER", jdbc::INTEGER, 2))
                .with_foreign_key(
                    ForeignKey::new("FK_EMP_MANAGER", "EMPLOYEES", "EMPLOYEES")
                        .with_column("MANAGER_ID", "ID"),
                ),
        );

        assert_eq!(builder.rebuild_all_links(&mut model).unwrap(), 2);

        let employees = model.entity("EMPLOYEES").unwrap();
        let names: Vec<_> = employees.links().iter().map(|l| l.field_name.clone()).collect();
        assert_eq!(names, vec!["employees", "listOfEmployees"]);
    }
}
