//! ORMGraph Core - entity model graph built from relational schema metadata.
//!
//! This crate turns tables, columns and foreign keys into entities linked by
//! bidirectional relations (many-to-one / one-to-many pairs and many-to-many
//! pairs through join tables), and keeps those links up to date from change
//! logs between two schema snapshots.

pub mod changelog;
pub mod config;
pub mod error;
pub mod generator;
pub mod generic;
pub mod model;
pub mod relation;
pub mod rules;

pub use changelog::{
    AttributeChange, ChangeLog, ChangeType, EntityChange, EntityUpdate, ForeignKeyChange,
};
pub use config::LinkConfig;
pub use error::{BoxError, Error, Result};
pub use generator::{
    ColumnMetadata, ForeignKeyColumnMetadata, ModelGenerator, SchemaSource, TableMetadata,
};
pub use model::{
    Attribute, Cardinality, Entity, FetchType, ForeignKey, ForeignKeyColumn, JoinColumn,
    JoinTable, Link, LinkId, LinkSide, Model,
};
pub use relation::{
    is_join_table, mark_foreign_key_attributes, LinkUpdater, RelationBuilder,
};
pub use rules::{DefaultRules, NamingRules};
