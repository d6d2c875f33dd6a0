//! Naming and type rules.
//!
//! The builder, the updater and the generator never invent names
//! themselves; they ask a [`NamingRules`] implementation handed to them at
//! construction time.

mod default;

pub use default::DefaultRules;

use crate::model::Entity;

/// Rule provider turning database names and types into model names and types.
pub trait NamingRules {
    /// Class name for a table (e.g. "CUSTOMER_ORDERS" -> "CustomerOrders").
    fn entity_class_name(&self, table_name: &str) -> String;

    /// Attribute name for a column (e.g. "CUSTOMER_ID" -> "customerId").
    fn attribute_name(&self, column_name: &str) -> String;

    /// Attribute type for a column type.
    fn attribute_type(&self, database_type: &str, jdbc_type_code: i32, not_null: bool) -> String;

    /// Field name of a to-one link held by `owning` and targeting `target`.
    ///
    /// Must return distinct names when `owning` already holds links to `target`.
    fn attribute_name_for_link_to_one(&self, owning: &Entity, target: &Entity) -> String;

    /// Field name of a collection link held by `owning` and targeting `target`.
    ///
    /// Must return distinct names when `owning` already holds links to `target`.
    fn attribute_name_for_link_to_many(&self, owning: &Entity, target: &Entity) -> String;
}
