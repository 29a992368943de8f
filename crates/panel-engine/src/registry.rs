use std::collections::HashMap;

use crate::definition::{PanelDefinition, PanelPosition};

/// Catalog of panel definitions. Holds static metadata only; open and
/// closed state lives in `PanelStateStore`. Constructed explicitly by
/// the host and passed by reference, never a process-wide singleton.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: HashMap<String, PanelDefinition>,
    revision: u64,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition, normalizing it first. Re-registering an
    /// id overwrites the prior entry with a diagnostic, never an error.
    pub fn register(&mut self, def: PanelDefinition) {
        let def = def.normalized();
        if self.panels.contains_key(&def.id) {
            tracing::warn!(panel_id = %def.id, "replacing existing panel definition");
        }
        self.panels.insert(def.id.clone(), def);
        self.revision = self.revision.saturating_add(1);
    }

    pub fn register_all(&mut self, defs: impl IntoIterator<Item = PanelDefinition>) {
        for def in defs {
            self.register(def);
        }
    }

    pub fn unregister(&mut self, panel_id: &str) {
        if self.panels.remove(panel_id).is_some() {
            self.revision = self.revision.saturating_add(1);
        }
    }

    pub fn get(&self, panel_id: &str) -> Option<&PanelDefinition> {
        self.panels.get(panel_id)
    }

    /// All definitions sorted by priority, then id for a stable order.
    pub fn all(&self) -> Vec<&PanelDefinition> {
        let mut defs: Vec<&PanelDefinition> = self.panels.values().collect();
        defs.sort_by(|left, right| {
            left.priority
                .cmp(&right.priority)
                .then_with(|| left.id.cmp(&right.id))
        });
        defs
    }

    pub fn by_position(&self, position: PanelPosition) -> Vec<&PanelDefinition> {
        self.all()
            .into_iter()
            .filter(|def| def.position == position)
            .collect()
    }

    pub fn by_group(&self, group_id: &str) -> Vec<&PanelDefinition> {
        self.all()
            .into_iter()
            .filter(|def| def.group == group_id)
            .collect()
    }

    /// Bumped on every successful register/unregister. Subscribers
    /// watch this counter and re-query when it moves; the registry
    /// carries no other notification machinery.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
