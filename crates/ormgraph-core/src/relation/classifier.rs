//! Join table classification.

use crate::model::Entity;

/// Number of foreign keys a join table must have.
pub const JOIN_TABLE_FOREIGN_KEYS: usize = 2;

/// Check if an entity is a pure association ("join") table.
///
/// True iff the entity has exactly two foreign keys and every attribute is
/// both a primary key element and part of a foreign key. The foreign key
/// flags of the attributes must have been computed beforehand (see
/// [`mark_foreign_key_attributes`](super::mark_foreign_key_attributes)).
pub fn is_join_table(entity: &Entity) -> bool {
    if entity.foreign_keys_count() != JOIN_TABLE_FOREIGN_KEYS {
        return false;
    }
    entity
        .attributes()
        .iter()
        .all(|a| a.is_key_element() && a.is_fk())
}
