//! Default naming rules.

use super::NamingRules;
use crate::model::{jdbc, Entity};
use convert_case::{Case, Casing};

/// Prefix of collection link field names.
const COLLECTION_PREFIX: &str = "listOf";

/// Default rule provider.
///
/// - class names in PascalCase, attribute names in camelCase
/// - language-neutral attribute types derived from the JDBC type code
/// - link field names suffixed with 2, 3, ... when already taken
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRules;

impl DefaultRules {
    /// Create the default rules.
    pub fn new() -> Self {
        Self
    }

    /// First free field name in `entity` derived from `base`.
    fn unique_field_name(entity: &Entity, base: String) -> String {
        if !entity.has_field_named(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}{n}");
            if !entity.has_field_named(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl NamingRules for DefaultRules {
    fn entity_class_name(&self, table_name: &str) -> String {
        table_name.to_case(Case::Pascal)
    }

    fn attribute_name(&self, column_name: &str) -> String {
        column_name.to_case(Case::Camel)
    }

    // Neutral types do not distinguish nullable from non-nullable.
    fn attribute_type(&self, _database_type: &str, jdbc_type_code: i32, _not_null: bool) -> String {
        let neutral = match jdbc_type_code {
            jdbc::BIT | jdbc::BOOLEAN => "boolean",
            jdbc::TINYINT => "byte",
            jdbc::SMALLINT => "short",
            jdbc::INTEGER => "int",
            jdbc::BIGINT => "long",
            jdbc::REAL | jdbc::FLOAT => "float",
            jdbc::DOUBLE => "double",
            jdbc::NUMERIC | jdbc::DECIMAL => "decimal",
            jdbc::DATE => "date",
            jdbc::TIME | jdbc::TIME_WITH_TIMEZONE => "time",
            jdbc::TIMESTAMP | jdbc::TIMESTAMP_WITH_TIMEZONE => "timestamp",
            jdbc::BINARY | jdbc::VARBINARY | jdbc::LONGVARBINARY | jdbc::BLOB => "binary",
            _ => "string",
        };
        neutral.to_string()
    }

    fn attribute_name_for_link_to_one(&self, owning: &Entity, target: &Entity) -> String {
        Self::unique_field_name(owning, target.class_name.to_case(Case::Camel))
    }

    fn attribute_name_for_link_to_many(&self, owning: &Entity, target: &Entity) -> String {
        Self::unique_field_name(owning, format!("{COLLECTION_PREFIX}{}", target.class_name))
    }
}
