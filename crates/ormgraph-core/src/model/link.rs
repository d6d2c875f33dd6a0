//! Links: the directed ends of relations between entities.

use super::{ForeignKey, LinkId};
use serde::{Deserialize, Serialize};

/// Cardinality of a link, seen from its source entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// Many source rows reference one target row (owning side of a foreign key).
    ManyToOne,
    /// One source row is referenced by many target rows (inverse side).
    OneToMany,
    /// Association through a join table.
    ManyToMany,
}

/// Fetch policy for the link in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchType {
    /// Leave the decision to the target framework.
    #[default]
    Default,
    /// Load with the owning object.
    Eager,
    /// Load on first access.
    Lazy,
}

/// A join column: one local column mapped to a referenced column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinColumn {
    /// Local column name.
    pub name: String,
    /// Referenced column name.
    pub referenced_column_name: String,
    /// Unique constraint hint.
    pub unique: bool,
    /// Nullability hint.
    pub nullable: bool,
    /// Whether the column is included in generated INSERTs.
    pub insertable: bool,
    /// Whether the column is included in generated UPDATEs.
    pub updatable: bool,
}

impl JoinColumn {
    /// Create a join column with default mapping hints.
    pub fn new(name: impl Into<String>, referenced_column_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            referenced_column_name: referenced_column_name.into(),
            unique: false,
            nullable: true,
            insertable: false,
            updatable: false,
        }
    }

    /// Build the join columns mirroring a foreign key's column pairs.
    pub fn from_foreign_key(foreign_key: &ForeignKey) -> Vec<JoinColumn> {
        foreign_key
            .columns
            .iter()
            .map(|c| JoinColumn::new(&c.column_name, &c.referenced_column_name))
            .collect()
    }
}

/// Join table descriptor carried by the owning side of a many-to-many link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTable {
    /// Join table name.
    pub name: String,
    /// Join table schema.
    pub schema: Option<String>,
    /// Join table catalog.
    pub catalog: Option<String>,
    /// Columns referencing the owning side entity.
    pub join_columns: Vec<JoinColumn>,
    /// Columns referencing the inverse side entity.
    pub inverse_join_columns: Vec<JoinColumn>,
}

/// One directed end of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link id (unique in the model).
    pub id: LinkId,
    /// Id of the other end of the relation.
    pub mirror_id: LinkId,
    /// Foreign key defining the relation (none for many-to-many).
    pub foreign_key_name: Option<String>,
    /// Join table realizing the relation (many-to-many only, both sides).
    pub join_table_name: Option<String>,
    /// Whether this is the owning side.
    pub owning_side: bool,
    /// Cardinality seen from the source entity.
    pub cardinality: Cardinality,
    /// Fetch policy.
    pub fetch_type: FetchType,
    /// Table of the entity holding this link.
    pub source_table_name: String,
    /// Table of the entity this link navigates to.
    pub target_table_name: String,
    /// Class name of the target entity.
    pub target_entity_class_name: String,
    /// Field name in the source entity.
    pub field_name: String,
    /// Owning side field name (inverse side only).
    pub mapped_by: Option<String>,
    /// Join columns (owning side of a many-to-one only).
    pub join_columns: Vec<JoinColumn>,
    /// Join table descriptor (owning side of a many-to-many only).
    pub join_table: Option<JoinTable>,
    /// Whether the link is selected for code generation.
    pub selected: bool,
}

impl Link {
    /// Check if this link navigates to a single object.
    pub fn is_to_one(&self) -> bool {
        self.cardinality == Cardinality::ManyToOne
    }

    /// Check if this link navigates to a collection.
    pub fn is_collection(&self) -> bool {
        !self.is_to_one()
    }

    /// Check if this is a many-to-many link.
    pub fn is_many_to_many(&self) -> bool {
        self.cardinality == Cardinality::ManyToMany
    }

    /// Check if this is the inverse side.
    pub fn is_inverse_side(&self) -> bool {
        !self.owning_side
    }

    /// Check if the link starts or ends at the given table.
    pub fn uses_table(&self, table: &str) -> bool {
        self.source_table_name == table || self.target_table_name == table
    }

    /// Check if the link is realized through the given join table.
    pub fn uses_join_table(&self, table: &str) -> bool {
        self.join_table_name.as_deref() == Some(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkSide;

    #[test]
    fn test_join_columns_follow_foreign_key() {
        let fk = ForeignKey::new("FK_LINE_ORDER", "LINES", "ORDERS")
            .with_column("ORDER_NO", "NO")
            .with_column("ORDER_YEAR", "YEAR");

        let cols = JoinColumn::from_foreign_key(&fk);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].name, "ORDER_NO");
        assert_eq!(cols[1].referenced_column_name, "YEAR");
        assert!(cols[0].nullable);
        assert!(!cols[0].insertable);
    }

    #[test]
    fn test_link_predicates() {
        let id = LinkId::for_join_table("BOOK_AUTHOR", LinkSide::Inverse);
        let link = Link {
            mirror_id: id.mirror(),
            id,
            foreign_key_name: None,
            join_table_name: Some("BOOK_AUTHOR".into()),
            owning_side: false,
            cardinality: Cardinality::ManyToMany,
            fetch_type: FetchType::Default,
            source_table_name: "AUTHORS".into(),
            target_table_name: "BOOKS".into(),
            target_entity_class_name: "Books".into(),
            field_name: "listOfBooks".into(),
            mapped_by: Some("listOfAuthors".into()),
            join_columns: Vec::new(),
            join_table: None,
            selected: true,
        };

        assert!(link.is_collection());
        assert!(link.is_many_to_many());
        assert!(link.is_inverse_side());
        assert!(link.uses_table("BOOKS"));
        assert!(!link.uses_table("BOOK_AUTHOR"));
        assert!(link.uses_join_table("BOOK_AUTHOR"));
    }
}
