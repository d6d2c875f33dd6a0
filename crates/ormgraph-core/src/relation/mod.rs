//! Relation management: join table classification, foreign key flags,
//! full link generation and incremental link maintenance.

mod builder;
pub(crate) mod classifier;
mod foreign_keys;
mod updater;

pub use builder::{RelationBuilder, LINKS_PER_RELATION};
pub use classifier::{is_join_table, JOIN_TABLE_FOREIGN_KEYS};
pub use foreign_keys::{mark_entity_foreign_key_attributes, mark_foreign_key_attributes};
pub use updater::LinkUpdater;
