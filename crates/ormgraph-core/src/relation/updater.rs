//! Incremental link maintenance driven by a change log.

use super::{mark_entity_foreign_key_attributes, mark_foreign_key_attributes, RelationBuilder};
use crate::changelog::{ChangeLog, EntityChange, EntityUpdate, ForeignKeyChange};
use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::model::{Entity, Model};
use crate::rules::NamingRules;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Applies change logs to a model, touching only the affected links.
pub struct LinkUpdater<'a> {
    builder: RelationBuilder<'a>,
}

/// Links created and removed while applying changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LinkMutations {
    created: usize,
    removed: usize,
}

impl LinkMutations {
    fn total(self) -> usize {
        self.created + self.removed
    }

    fn add(&mut self, other: LinkMutations) {
        self.created += other.created;
        self.removed += other.removed;
    }
}

impl<'a> LinkUpdater<'a> {
    /// Create an updater using the given naming rules and the default config.
    pub fn new(rules: &'a dyn NamingRules) -> Self {
        Self {
            builder: RelationBuilder::new(rules),
        }
    }

    /// Set the link configuration.
    pub fn with_config(mut self, config: LinkConfig) -> Self {
        self.builder = self.builder.with_config(config);
        self
    }

    /// The relationship builder used for regeneration.
    pub fn builder(&self) -> &RelationBuilder<'a> {
        &self.builder
    }

    /// Repair the links affected by a change log.
    ///
    /// The model's entities must already reflect the after state of every
    /// change (see [`apply_change_log`](Self::apply_change_log) to do both).
    /// Returns the number of links created plus the number removed.
    #[instrument(skip_all, fields(changes = log.len()))]
    pub fn update_links(&self, model: &mut Model, log: &ChangeLog) -> Result<usize> {
        let mut mutations = LinkMutations::default();
        for change in log.changes() {
            let applied = match change {
                EntityChange::Created(entity) => self.on_created(model, &entity.table_name)?,
                EntityChange::Updated(update) => self.on_updated(model, update)?,
                EntityChange::Deleted(entity) => self.on_deleted(model, &entity.table_name),
            };
            debug!(
                table = %change.table_name(),
                change = ?change.change_type(),
                created = applied.created,
                removed = applied.removed,
                "Entity change applied to links"
            );
            mutations.add(applied);
        }

        info!(
            links_created = mutations.created,
            links_removed = mutations.removed,
            "Link update completed"
        );
        Ok(mutations.total())
    }

    /// Synchronize the model's entities with a change log, then repair links.
    ///
    /// Created entities are inserted (without any link they may carry),
    /// updated entities get their structure replaced while keeping their
    /// links, deleted entities are removed. Record consistency and the
    /// presence of created and updated entities are checked before the
    /// model is touched; a failure while repairing links is reported after
    /// the entities are synchronized. Returns the number of links created
    /// plus the number removed.
    #[instrument(skip_all, fields(changes = log.len()))]
    pub fn apply_change_log(&self, model: &mut Model, log: &ChangeLog) -> Result<usize> {
        log.validate()?;
        check_against_model(model, log)?;

        // Deleted entities drop their links while still in the store.
        let mut removed = 0;
        for change in log.changes() {
            match change {
                EntityChange::Created(entity) => {
                    model.store_entity(entity.without_links());
                }
                EntityChange::Updated(update) => {
                    let table = &update.after.table_name;
                    model
                        .entity_mut(table)
                        .ok_or_else(|| Error::EntityNotFound {
                            table: table.clone(),
                        })?
                        .replace_structure(&update.after);
                }
                EntityChange::Deleted(entity) => {
                    removed += self.on_deleted(model, &entity.table_name).removed;
                    model.remove_entity(&entity.table_name);
                }
            }
        }
        mark_foreign_key_attributes(model);

        Ok(removed + self.update_links(model, log)?)
    }

    fn on_created(&self, model: &mut Model, table: &str) -> Result<LinkMutations> {
        refresh_flags(model, table)?;
        let created = self.builder.build_relations_for_entity(model, table)?;
        Ok(LinkMutations {
            created,
            removed: 0,
        })
    }

    fn on_deleted(&self, model: &mut Model, table: &str) -> LinkMutations {
        let mut removed = model.remove_links_by_entity_name(table);
        if self.builder.config().cascade_join_table_links {
            removed += model.remove_links_by_join_table_name(table);
        }
        LinkMutations { created: 0, removed }
    }

    fn on_updated(&self, model: &mut Model, update: &EntityUpdate) -> Result<LinkMutations> {
        let table = update.after.table_name.as_str();
        refresh_flags(model, table)?;

        let was_join_table = classified_as_join_table(&update.before);
        let is_join_table = model
            .entity(table)
            .is_some_and(Entity::is_join_table);

        let mut mutations = LinkMutations::default();

        if was_join_table != is_join_table {
            debug!(table = %table, is_join_table, "Entity changed shape");
            mutations.removed += if was_join_table {
                model.remove_links_by_join_table_name(table)
            } else {
                update
                    .before
                    .foreign_keys()
                    .into_iter()
                    .map(|fk| model.remove_links_by_foreign_key(fk))
                    .sum::<usize>()
            };
            mutations.created += self.builder.build_relations_for_entity(model, table)?;
            return Ok(mutations);
        }

        if is_join_table {
            if !update.foreign_key_changes.is_empty() {
                mutations.removed += model.remove_links_by_join_table_name(table);
                self.builder.build_many_to_many_relation(model, table)?;
                mutations.created += super::LINKS_PER_RELATION;
            }
            return Ok(mutations);
        }

        for change in &update.foreign_key_changes {
            match change {
                ForeignKeyChange::Created(fk) => {
                    mutations.removed += model.remove_links_by_foreign_key(fk);
                    self.builder.build_many_to_one_relation(model, fk)?;
                    mutations.created += super::LINKS_PER_RELATION;
                }
                ForeignKeyChange::Updated { before, after } => {
                    mutations.removed += model.remove_links_by_foreign_key(before);
                    self.builder.build_many_to_one_relation(model, after)?;
                    mutations.created += super::LINKS_PER_RELATION;
                }
                ForeignKeyChange::Deleted(fk) => {
                    mutations.removed += model.remove_links_by_foreign_key(fk);
                }
            }
        }
        Ok(mutations)
    }
}

/// Recompute the foreign key flags of one entity held by the model.
fn refresh_flags(model: &mut Model, table: &str) -> Result<()> {
    let entity = model.entity_mut(table).ok_or_else(|| Error::EntityNotFound {
        table: table.to_string(),
    })?;
    mark_entity_foreign_key_attributes(entity);
    Ok(())
}

/// Classify a snapshot that may not carry up to date foreign key flags.
fn classified_as_join_table(snapshot: &Entity) -> bool {
    let mut entity = snapshot.without_links();
    mark_entity_foreign_key_attributes(&mut entity);
    entity.is_join_table()
}

/// Check that every record can be applied, in order, to the model.
fn check_against_model(model: &Model, log: &ChangeLog) -> Result<()> {
    let mut present: HashSet<&str> = model
        .entities_sorted_by_table_name()
        .into_iter()
        .map(|e| e.table_name.as_str())
        .collect();

    for change in log.changes() {
        let table = change.table_name();
        match change {
            EntityChange::Created(_) => {
                if !present.insert(table) {
                    return Err(Error::InvalidChange {
                        table: table.to_string(),
                        reason: "created entity already exists".to_string(),
                    });
                }
            }
            EntityChange::Updated(_) => {
                if !present.contains(table) {
                    return Err(Error::EntityNotFound {
                        table: table.to_string(),
                    });
                }
            }
            EntityChange::Deleted(_) => {
                present.remove(table);
            }
        }
    }
    Ok(())
}
