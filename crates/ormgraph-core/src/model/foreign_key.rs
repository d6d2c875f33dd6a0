//! Foreign key definitions.

use super::types::{Deferrability, ReferentialAction};
use serde::{Deserialize, Serialize};

/// One column pair of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyColumn {
    /// Position of the pair within the key (1-based).
    pub sequence: u32,
    /// Local (referencing) column.
    pub column_name: String,
    /// Column of the referenced table.
    pub referenced_column_name: String,
}

/// A foreign key owned by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Foreign key name (unique within the owning entity).
    pub name: String,
    /// Owning (referencing) table.
    pub table_name: String,
    /// Referenced table.
    pub referenced_table_name: String,
    /// Column pairs ordered by sequence.
    pub columns: Vec<ForeignKeyColumn>,
    /// Action on update of the referenced key.
    pub update_rule: ReferentialAction,
    /// Action on delete of the referenced row.
    pub delete_rule: ReferentialAction,
    /// When the constraint is checked.
    pub deferrability: Deferrability,
}

impl ForeignKey {
    /// Create a foreign key without columns.
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        referenced_table_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            referenced_table_name: referenced_table_name.into(),
            columns: Vec::new(),
            update_rule: ReferentialAction::default(),
            delete_rule: ReferentialAction::default(),
            deferrability: Deferrability::default(),
        }
    }

    /// Append a column pair; its sequence follows the last one.
    pub fn with_column(
        mut self,
        column_name: impl Into<String>,
        referenced_column_name: impl Into<String>,
    ) -> Self {
        let sequence = self.columns.last().map_or(1, |c| c.sequence + 1);
        self.columns.push(ForeignKeyColumn {
            sequence,
            column_name: column_name.into(),
            referenced_column_name: referenced_column_name.into(),
        });
        self
    }

    /// Insert a column pair at an explicit sequence, keeping pairs ordered.
    pub fn store_column(&mut self, column: ForeignKeyColumn) {
        let pos = self
            .columns
            .partition_point(|c| c.sequence <= column.sequence);
        self.columns.insert(pos, column);
    }

    /// Set the update rule.
    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.update_rule = action;
        self
    }

    /// Set the delete rule.
    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.delete_rule = action;
        self
    }

    /// Set the deferrability.
    pub fn with_deferrability(mut self, deferrability: Deferrability) -> Self {
        self.deferrability = deferrability;
        self
    }

    /// Check if the key spans more than one column.
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }

    /// Check if the given local column takes part in this key.
    pub fn uses_column(&self, column_name: &str) -> bool {
        self.columns.iter().any(|c| c.column_name == column_name)
    }
}
