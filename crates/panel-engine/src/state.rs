use std::collections::HashMap;

use crate::definition::{DisplayMode, PanelDefinition};
use crate::settings::{ClosedStackEntry, PanelSettings};

/// Per-panel runtime state with an explicit two-layer read policy for
/// open flags:
///
/// - the session runtime layer always wins, so an explicit user action
///   in this session overrides stale persisted state;
/// - the persisted layer is consulted only while the panel's current
///   display mode is side-peek. Overlay and full-page panels must
///   never spring back open after a restart, so their persisted open
///   flag is ignored on read (it is still written, in case the user
///   later switches the panel back to side-peek).
#[derive(Debug, Default)]
pub struct PanelStateStore {
    settings: PanelSettings,
    runtime_open: HashMap<(String, String), bool>,
}

impl PanelStateStore {
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            settings,
            runtime_open: HashMap::new(),
        }
    }

    pub fn is_open(&self, def: &PanelDefinition, chat_instance_id: &str) -> bool {
        let key = (chat_instance_id.to_string(), def.id.clone());
        if let Some(open) = self.runtime_open.get(&key) {
            return *open;
        }
        if self.display_mode(def) == DisplayMode::SidePeek {
            return self.settings.open(chat_instance_id, &def.id).unwrap_or(false);
        }
        false
    }

    pub fn set_open(&mut self, def: &PanelDefinition, chat_instance_id: &str, open: bool) {
        self.runtime_open
            .insert((chat_instance_id.to_string(), def.id.clone()), open);
        self.settings.set_open(chat_instance_id, &def.id, open);
    }

    /// Global per-panel mode preference. A stored mode the definition
    /// no longer supports falls back to the definition default.
    pub fn display_mode(&self, def: &PanelDefinition) -> DisplayMode {
        let Some(stored) = self.settings.display_mode(&def.id) else {
            return def.default_display_mode;
        };
        if def.supports_mode(stored) {
            stored
        } else {
            def.default_display_mode
        }
    }

    pub fn set_display_mode(&mut self, def: &PanelDefinition, mode: DisplayMode) {
        let accepted = if def.supports_mode(mode) {
            mode
        } else {
            tracing::debug!(
                panel_id = %def.id,
                requested = mode.as_str(),
                fallback = def.default_display_mode.as_str(),
                "unsupported display mode, storing panel default instead"
            );
            def.default_display_mode
        };
        self.settings.set_display_mode(&def.id, accepted);
    }

    /// Size for one chat sub-instance; an empty `sub_instance_id` is
    /// the shared fallback slot. Clamped to the definition bounds on
    /// read as well as write, so stale persisted values from an older
    /// definition cannot escape the current bounds.
    pub fn size(&self, def: &PanelDefinition, sub_instance_id: &str) -> u32 {
        let stored = self
            .settings
            .size(&def.id, sub_instance_id)
            .or_else(|| self.settings.size(&def.id, ""))
            .unwrap_or(def.default_size);
        def.clamp_size(stored)
    }

    pub fn set_size(&mut self, def: &PanelDefinition, sub_instance_id: &str, size: u32) {
        self.settings
            .set_size(&def.id, sub_instance_id, def.clamp_size(size));
    }

    // Closed-stack storage. The coordinator is the only writer; every
    // other component treats these as read-only.

    pub fn closed_stack(&self, chat_instance_id: &str, group_id: &str) -> Vec<ClosedStackEntry> {
        self.settings.closed_stack(chat_instance_id, group_id)
    }

    pub fn replace_closed_stack(
        &mut self,
        chat_instance_id: &str,
        group_id: &str,
        entries: Vec<ClosedStackEntry>,
    ) {
        self.settings
            .set_closed_stack(chat_instance_id, group_id, entries);
    }

    /// Drains and clears the stack for one (chat instance, group).
    pub fn take_closed_stack(
        &mut self,
        chat_instance_id: &str,
        group_id: &str,
    ) -> Vec<ClosedStackEntry> {
        let entries = self.settings.closed_stack(chat_instance_id, group_id);
        if !entries.is_empty() {
            self.settings
                .set_closed_stack(chat_instance_id, group_id, Vec::new());
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::PanelStateStore;
    use crate::definition::{DisplayMode, PanelDefinition};
    use crate::settings::PanelSettings;

    fn diff_panel() -> PanelDefinition {
        PanelDefinition::new("diff")
            .display_modes([
                DisplayMode::SidePeek,
                DisplayMode::CenterPeek,
                DisplayMode::FullPage,
            ])
            .size_bounds(220, 420, 960)
    }

    #[test]
    fn session_runtime_value_wins_over_persisted_state() {
        let mut settings = PanelSettings::in_memory();
        settings.set_open("chat-1", "diff", true);

        let mut store = PanelStateStore::new(settings);
        let def = diff_panel();
        assert!(store.is_open(&def, "chat-1"));

        store.set_open(&def, "chat-1", false);
        assert!(!store.is_open(&def, "chat-1"));
    }

    #[test]
    fn persisted_open_flag_only_restores_side_peek_panels() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("panel-layout.v1.json");
        let def = diff_panel();

        // Overlay mode: the open flag must not survive a reload.
        let mut store = PanelStateStore::new(PanelSettings::load(path.clone()));
        store.set_display_mode(&def, DisplayMode::CenterPeek);
        store.set_open(&def, "chat-1", true);

        let reloaded = PanelStateStore::new(PanelSettings::load(path.clone()));
        assert!(!reloaded.is_open(&def, "chat-1"));

        // Side-peek mode: the open flag is restorable.
        let mut store = PanelStateStore::new(PanelSettings::load(path.clone()));
        store.set_display_mode(&def, DisplayMode::SidePeek);
        store.set_open(&def, "chat-1", true);

        let reloaded = PanelStateStore::new(PanelSettings::load(path));
        assert!(reloaded.is_open(&def, "chat-1"));
    }

    #[test]
    fn switching_back_to_side_peek_recovers_last_known_open_state() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("panel-layout.v1.json");
        let def = diff_panel();

        let mut store = PanelStateStore::new(PanelSettings::load(path.clone()));
        store.set_display_mode(&def, DisplayMode::CenterPeek);
        store.set_open(&def, "chat-1", true);

        // A fresh session in center-peek mode defaults closed, but the
        // persisted flag is still there; switching the panel back to
        // side-peek makes the last known open state visible again.
        let mut fresh = PanelStateStore::new(PanelSettings::load(path));
        assert!(!fresh.is_open(&def, "chat-1"));
        fresh.set_display_mode(&def, DisplayMode::SidePeek);
        assert!(fresh.is_open(&def, "chat-1"));
    }

    #[test]
    fn unsupported_display_mode_falls_back_to_panel_default() {
        let mut store = PanelStateStore::new(PanelSettings::in_memory());
        let def = PanelDefinition::new("plan").display_modes([DisplayMode::SidePeek]);

        store.set_display_mode(&def, DisplayMode::FullPage);
        assert_eq!(store.display_mode(&def), DisplayMode::SidePeek);
    }

    #[test]
    fn size_writes_clamp_to_definition_bounds() {
        let mut store = PanelStateStore::new(PanelSettings::in_memory());
        let def = diff_panel();

        store.set_size(&def, "", 219);
        assert_eq!(store.size(&def, ""), 220);

        store.set_size(&def, "", 961);
        assert_eq!(store.size(&def, ""), 960);
    }

    #[test]
    fn sub_instance_sizes_fall_back_to_default_slot_then_definition() {
        let mut store = PanelStateStore::new(PanelSettings::in_memory());
        let def = diff_panel();

        assert_eq!(store.size(&def, "split-2"), 420);

        store.set_size(&def, "", 500);
        assert_eq!(store.size(&def, "split-2"), 500);

        store.set_size(&def, "split-2", 640);
        assert_eq!(store.size(&def, "split-2"), 640);
        assert_eq!(store.size(&def, ""), 500);
    }

    #[test]
    fn take_closed_stack_drains_and_clears() {
        let mut store = PanelStateStore::new(PanelSettings::in_memory());
        store.replace_closed_stack(
            "chat-1",
            "default",
            vec![crate::settings::ClosedStackEntry {
                panel_id: "plan".to_string(),
                display_mode: DisplayMode::SidePeek,
            }],
        );

        let drained = store.take_closed_stack("chat-1", "default");
        assert_eq!(drained.len(), 1);
        assert!(store.closed_stack("chat-1", "default").is_empty());
    }
}
