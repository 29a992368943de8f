use std::collections::HashMap;

use crate::definition::{DEFAULT_GROUP, DETAILS_GROUP};

/// Exclusion policy for one panel group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PanelGroupConfig {
    pub id: String,
    pub exclusive: bool,
    pub restore_on_close: bool,
}

impl PanelGroupConfig {
    pub fn new(id: impl Into<String>, exclusive: bool, restore_on_close: bool) -> Self {
        Self {
            id: id.into(),
            exclusive,
            restore_on_close,
        }
    }
}

/// Fixed table of group policies. The "default" group is exclusive and
/// restores evicted panels on close; panels in "details" never evict
/// each other.
#[derive(Clone, Debug)]
pub struct PanelGroupTable {
    groups: HashMap<String, PanelGroupConfig>,
}

impl Default for PanelGroupTable {
    fn default() -> Self {
        let mut table = Self {
            groups: HashMap::new(),
        };
        table.insert(PanelGroupConfig::new(DEFAULT_GROUP, true, true));
        table.insert(PanelGroupConfig::new(DETAILS_GROUP, false, false));
        table
    }
}

impl PanelGroupTable {
    pub fn insert(&mut self, config: PanelGroupConfig) {
        self.groups.insert(config.id.clone(), config);
    }

    /// A group id with no table entry falls back to the default
    /// exclusive+restoring policy rather than failing the operation.
    pub fn policy(&self, group_id: &str) -> PanelGroupConfig {
        self.groups
            .get(group_id)
            .cloned()
            .unwrap_or_else(|| PanelGroupConfig::new(group_id, true, true))
    }
}
