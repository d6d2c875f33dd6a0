//! Link generation configuration.

use crate::model::FetchType;
use serde::Deserialize;

/// Settings applied by the relationship builder and the change-log updater.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Fetch policy given to every generated link.
    pub fetch_type: FetchType,

    /// Initial "selected" flag of generated links.
    pub select_new_links: bool,

    /// When an entity is deleted, also drop the many-to-many links it
    /// realized as a join table.
    pub cascade_join_table_links: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            fetch_type: FetchType::Default,
            select_new_links: true,
            cascade_join_table_links: true,
        }
    }
}

impl LinkConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fetch type.
    pub fn with_fetch_type(mut self, fetch_type: FetchType) -> Self {
        self.fetch_type = fetch_type;
        self
    }

    /// Set the initial selection flag.
    pub fn with_select_new_links(mut self, selected: bool) -> Self {
        self.select_new_links = selected;
        self
    }

    /// Set whether deleting a join table drops its many-to-many links.
    pub fn with_cascade_join_table_links(mut self, cascade: bool) -> Self {
        self.cascade_join_table_links = cascade;
        self
    }
}
