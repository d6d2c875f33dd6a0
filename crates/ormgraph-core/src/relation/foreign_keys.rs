//! Foreign key flags on attributes.
//!
//! Join table classification reads these flags, so this pass must run
//! before any link generation.

use crate::model::{Entity, Model};

/// Recompute the foreign key flags of every attribute of every entity.
pub fn mark_foreign_key_attributes(model: &mut Model) {
    for entity in model.entities_mut() {
        mark_entity_foreign_key_attributes(entity);
    }
}

/// Recompute the foreign key flags of the attributes of one entity.
pub fn mark_entity_foreign_key_attributes(entity: &mut Entity) {
    // (column, composite key, referenced table), foreign keys in name order
    let usages: Vec<(String, bool, String)> = entity
        .foreign_keys()
        .into_iter()
        .flat_map(|fk| {
            fk.columns.iter().map(move |c| {
                (
                    c.column_name.clone(),
                    fk.is_composite(),
                    fk.referenced_table_name.clone(),
                )
            })
        })
        .collect();

    for attribute in entity.attributes_mut() {
        attribute.clear_foreign_key_flags();
        for (column, composite, referenced_table) in &usages {
            if *column != attribute.database_name {
                continue;
            }
            attribute.fk = true;
            if *composite {
                attribute.fk_composite = true;
            } else {
                attribute.fk_simple = true;
            }
            if attribute.referenced_table.is_none() {
                attribute.referenced_table = Some(referenced_table.clone());
            }
        }
    }
}
