//! Deterministic link identities.
//!
//! A relation is always stored as two links, one per side. Both ids are
//! derived from the thing that defines the relation: the foreign key (owning
//! table + key name) for many-to-one relations, the join table for
//! many-to-many relations. Regenerating a relation therefore always targets
//! the same ids, which is what makes "remove then rebuild" idempotent.

use super::ForeignKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a relation a link stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkSide {
    /// The side carrying the mapping (join columns / join table).
    Owning,
    /// The side mapped by the owning side's field.
    Inverse,
}

impl LinkSide {
    /// The opposite side.
    pub fn opposite(self) -> Self {
        match self {
            LinkSide::Owning => LinkSide::Inverse,
            LinkSide::Inverse => LinkSide::Owning,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            LinkSide::Owning => "O",
            LinkSide::Inverse => "I",
        }
    }
}

/// Identity of a link.
///
/// The two variants never compare equal, so ids derived from a foreign key
/// cannot collide with ids derived from a join table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkId {
    /// Link of a many-to-one / one-to-many relation.
    ForeignKey {
        /// Table owning the foreign key.
        table: String,
        /// Foreign key name.
        foreign_key: String,
        /// Relation side.
        side: LinkSide,
    },
    /// Link of a many-to-many relation.
    JoinTable {
        /// Join table name.
        table: String,
        /// Relation side.
        side: LinkSide,
    },
}

impl LinkId {
    /// Id of one side of the relation defined by a foreign key.
    pub fn for_foreign_key(foreign_key: &ForeignKey, side: LinkSide) -> Self {
        LinkId::ForeignKey {
            table: foreign_key.table_name.clone(),
            foreign_key: foreign_key.name.clone(),
            side,
        }
    }

    /// Id of one side of the relation realized by a join table.
    pub fn for_join_table(table: impl Into<String>, side: LinkSide) -> Self {
        LinkId::JoinTable {
            table: table.into(),
            side,
        }
    }

    /// Owning and inverse ids for a foreign key.
    pub fn foreign_key_pair(foreign_key: &ForeignKey) -> (Self, Self) {
        (
            Self::for_foreign_key(foreign_key, LinkSide::Owning),
            Self::for_foreign_key(foreign_key, LinkSide::Inverse),
        )
    }

    /// Owning and inverse ids for a join table.
    pub fn join_table_pair(table: &str) -> (Self, Self) {
        (
            Self::for_join_table(table, LinkSide::Owning),
            Self::for_join_table(table, LinkSide::Inverse),
        )
    }

    /// The side this id stands for.
    pub fn side(&self) -> LinkSide {
        match self {
            LinkId::ForeignKey { side, .. } | LinkId::JoinTable { side, .. } => *side,
        }
    }

    /// Id of the other side of the same relation.
    pub fn mirror(&self) -> Self {
        match self {
            LinkId::ForeignKey {
                table,
                foreign_key,
                side,
            } => LinkId::ForeignKey {
                table: table.clone(),
                foreign_key: foreign_key.clone(),
                side: side.opposite(),
            },
            LinkId::JoinTable { table, side } => LinkId::JoinTable {
                table: table.clone(),
                side: side.opposite(),
            },
        }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkId::ForeignKey {
                table,
                foreign_key,
                side,
            } => write!(f, "LINK_FK_{}_{}_{}", table, foreign_key, side.suffix()),
            LinkId::JoinTable { table, side } => {
                write!(f, "LINK_JT_{}_{}", table, side.suffix())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk() -> ForeignKey {
        ForeignKey::new("FK_ORDER_CUSTOMER", "ORDERS", "CUSTOMERS").with_column("CUSTOMER_ID", "ID")
    }

    #[test]
    fn test_foreign_key_ids_are_deterministic() {
        assert_eq!(LinkId::foreign_key_pair(&fk()), LinkId::foreign_key_pair(&fk()));
    }

    #[test]
    fn test_sides_are_distinct_and_mirrored() {
        let (owning, inverse) = LinkId::foreign_key_pair(&fk());

        assert_ne!(owning, inverse);
        assert_eq!(owning.mirror(), inverse);
        assert_eq!(inverse.mirror(), owning);
        assert_eq!(owning.side(), LinkSide::Owning);
        assert_eq!(inverse.side(), LinkSide::Inverse);
    }

    #[test]
    fn test_same_key_name_on_different_tables() {
        let a = ForeignKey::new("FK1", "ORDERS", "CUSTOMERS");
        let b = ForeignKey::new("FK1", "INVOICES", "CUSTOMERS");

        assert_ne!(
            LinkId::for_foreign_key(&a, LinkSide::Owning),
            LinkId::for_foreign_key(&b, LinkSide::Owning)
        );
    }

    #[test]
    fn test_no_collision_between_kinds() {
        // A foreign key and a join table sharing names still yield distinct ids.
        let fk = ForeignKey::new("BOOK_AUTHOR", "BOOK_AUTHOR", "BOOKS");
        let (fk_owning, _) = LinkId::foreign_key_pair(&fk);
        let (jt_owning, _) = LinkId::join_table_pair("BOOK_AUTHOR");

        assert_ne!(fk_owning, jt_owning);
        assert_ne!(fk_owning.to_string(), jt_owning.to_string());
    }

    #[test]
    fn test_display() {
        let (owning, inverse) = LinkId::foreign_key_pair(&fk());
        assert_eq!(owning.to_string(), "LINK_FK_ORDERS_FK_ORDER_CUSTOMER_O");
        assert_eq!(inverse.to_string(), "LINK_FK_ORDERS_FK_ORDER_CUSTOMER_I");

        let (owning, _) = LinkId::join_table_pair("BOOK_AUTHOR");
        assert_eq!(owning.to_string(), "LINK_JT_BOOK_AUTHOR_O");
    }
}
