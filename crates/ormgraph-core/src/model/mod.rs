//! Model store.
//!
//! Entities, their attributes and foreign keys, and the links generated
//! between them.

mod attribute;
mod entity;
mod foreign_key;
mod link;
mod link_id;
mod store;
mod types;

pub use attribute::Attribute;
pub use entity::Entity;
pub use foreign_key::{ForeignKey, ForeignKeyColumn};
pub use link::{Cardinality, FetchType, JoinColumn, JoinTable, Link};
pub use link_id::{LinkId, LinkSide};
pub use store::Model;
pub use types::{jdbc, DateType, Deferrability, ReferentialAction};
