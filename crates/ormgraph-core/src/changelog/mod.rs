//! Change log between two schema snapshots.
//!
//! The change log is produced elsewhere (by diffing two snapshots) and
//! consumed here to drive incremental link maintenance.

mod change;

pub use change::{
    AttributeChange, ChangeType, EntityChange, EntityUpdate, ForeignKeyChange,
};

use crate::error::Result;

/// Ordered list of entity changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeLog {
    changes: Vec<EntityChange>,
}

impl ChangeLog {
    /// Create an empty change log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change.
    pub fn with_change(mut self, change: EntityChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Append a change.
    pub fn push(&mut self, change: EntityChange) {
        self.changes.push(change);
    }

    /// Changes in recording order.
    pub fn changes(&self) -> &[EntityChange] {
        &self.changes
    }

    /// Number of entity changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Check if there are any changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Check every record's internal consistency.
    pub fn validate(&self) -> Result<()> {
        self.changes.iter().try_for_each(EntityChange::validate)
    }
}

impl FromIterator<EntityChange> for ChangeLog {
    fn from_iter<I: IntoIterator<Item = EntityChange>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
