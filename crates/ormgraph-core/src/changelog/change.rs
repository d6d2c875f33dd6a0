//! Per-entity and per-item change records.

use crate::error::{Error, Result};
use crate::model::{Attribute, Entity, ForeignKey};

/// Kind of change recorded for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// The item exists only in the new snapshot.
    Created,
    /// The item exists in both snapshots with differences.
    Updated,
    /// The item exists only in the old snapshot.
    Deleted,
}

/// Change to a foreign key of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignKeyChange {
    /// Foreign key was added.
    Created(ForeignKey),
    /// Foreign key was modified.
    Updated {
        /// State before the change.
        before: ForeignKey,
        /// State after the change.
        after: ForeignKey,
    },
    /// Foreign key was removed.
    Deleted(ForeignKey),
}

impl ForeignKeyChange {
    /// Get the change type.
    pub fn change_type(&self) -> ChangeType {
        match self {
            ForeignKeyChange::Created(_) => ChangeType::Created,
            ForeignKeyChange::Updated { .. } => ChangeType::Updated,
            ForeignKeyChange::Deleted(_) => ChangeType::Deleted,
        }
    }

    /// Get the foreign key name for this change.
    pub fn foreign_key_name(&self) -> &str {
        match self {
            ForeignKeyChange::Created(fk) => &fk.name,
            ForeignKeyChange::Updated { after, .. } => &after.name,
            ForeignKeyChange::Deleted(fk) => &fk.name,
        }
    }
}

/// Change to an attribute (column) of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeChange {
    /// Column was added.
    Created(Attribute),
    /// Column was modified.
    Updated {
        /// State before the change.
        before: Attribute,
        /// State after the change.
        after: Attribute,
    },
    /// Column was removed.
    Deleted(Attribute),
}

impl AttributeChange {
    /// Get the change type.
    pub fn change_type(&self) -> ChangeType {
        match self {
            AttributeChange::Created(_) => ChangeType::Created,
            AttributeChange::Updated { .. } => ChangeType::Updated,
            AttributeChange::Deleted(_) => ChangeType::Deleted,
        }
    }

    /// Get the column name for this change.
    pub fn column_name(&self) -> &str {
        match self {
            AttributeChange::Created(a) => &a.database_name,
            AttributeChange::Updated { after, .. } => &after.database_name,
            AttributeChange::Deleted(a) => &a.database_name,
        }
    }
}

/// Differences recorded for an entity present in both snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityUpdate {
    /// Entity before the change.
    pub before: Entity,
    /// Entity after the change.
    pub after: Entity,
    /// Changes to foreign keys.
    pub foreign_key_changes: Vec<ForeignKeyChange>,
    /// Changes to attributes.
    pub attribute_changes: Vec<AttributeChange>,
    /// Whether the database object type changed.
    pub database_type_changed: bool,
    /// Whether the table comment changed.
    pub comment_changed: bool,
}

impl EntityUpdate {
    /// Create an update record. Both snapshots must describe the same table.
    pub fn new(before: Entity, after: Entity) -> Result<Self> {
        let update = Self {
            before,
            after,
            foreign_key_changes: Vec::new(),
            attribute_changes: Vec::new(),
            database_type_changed: false,
            comment_changed: false,
        };
        update.validate()?;
        Ok(update)
    }

    /// Add a foreign key change.
    pub fn with_foreign_key_change(mut self, change: ForeignKeyChange) -> Self {
        self.foreign_key_changes.push(change);
        self
    }

    /// Add an attribute change.
    pub fn with_attribute_change(mut self, change: AttributeChange) -> Self {
        self.attribute_changes.push(change);
        self
    }

    /// Flag a database type change.
    pub fn with_database_type_changed(mut self) -> Self {
        self.database_type_changed = true;
        self
    }

    /// Flag a comment change.
    pub fn with_comment_changed(mut self) -> Self {
        self.comment_changed = true;
        self
    }

    /// Total number of recorded differences.
    pub fn number_of_changes(&self) -> usize {
        self.foreign_key_changes.len()
            + self.attribute_changes.len()
            + usize::from(self.database_type_changed)
            + usize::from(self.comment_changed)
    }

    /// Check that both snapshots describe the same table.
    pub fn validate(&self) -> Result<()> {
        if self.before.table_name != self.after.table_name {
            return Err(Error::InvalidChange {
                table: self.after.table_name.clone(),
                reason: format!(
                    "table name differs between before ('{}') and after state",
                    self.before.table_name
                ),
            });
        }
        Ok(())
    }
}

/// Change to an entity between two schema snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityChange {
    /// Entity was added (after state).
    Created(Entity),
    /// Entity was modified.
    Updated(EntityUpdate),
    /// Entity was removed (before state).
    Deleted(Entity),
}

impl EntityChange {
    /// Get the change type.
    pub fn change_type(&self) -> ChangeType {
        match self {
            EntityChange::Created(_) => ChangeType::Created,
            EntityChange::Updated(_) => ChangeType::Updated,
            EntityChange::Deleted(_) => ChangeType::Deleted,
        }
    }

    /// Get the table name for this change.
    pub fn table_name(&self) -> &str {
        match self {
            EntityChange::Created(e) => &e.table_name,
            EntityChange::Updated(u) => &u.after.table_name,
            EntityChange::Deleted(e) => &e.table_name,
        }
    }

    /// State before the change (updated and deleted entities).
    pub fn entity_before(&self) -> Option<&Entity> {
        match self {
            EntityChange::Created(_) => None,
            EntityChange::Updated(u) => Some(&u.before),
            EntityChange::Deleted(e) => Some(e),
        }
    }

    /// State after the change (created and updated entities).
    pub fn entity_after(&self) -> Option<&Entity> {
        match self {
            EntityChange::Created(e) => Some(e),
            EntityChange::Updated(u) => Some(&u.after),
            EntityChange::Deleted(_) => None,
        }
    }

    /// Check the record's internal consistency.
    pub fn validate(&self) -> Result<()> {
        match self {
            EntityChange::Updated(update) => update.validate(),
            _ => Ok(()),
        }
    }
}
