use crate::definition::DisplayMode;
use crate::group::PanelGroupTable;
use crate::registry::PanelRegistry;
use crate::settings::ClosedStackEntry;
use crate::state::PanelStateStore;

/// Sole mutator of panel open state. Each entry point runs to
/// completion synchronously, so on a single-threaded event loop no
/// other operation can observe intermediate state for the same
/// (chat instance, group).
pub struct MutualExclusionCoordinator;

impl MutualExclusionCoordinator {
    /// Opens a panel. When the panel's group is exclusive and its
    /// current mode is side-peek, every other open side-peek panel in
    /// the group (same chat instance) is closed by direct state write
    /// and recorded on the group's closed-stack; the batch replaces
    /// any prior stack contents so only the most recent eviction is
    /// remembered. Overlay and bottom modes never evict and are never
    /// evicted.
    pub fn open(
        registry: &PanelRegistry,
        groups: &PanelGroupTable,
        store: &mut PanelStateStore,
        panel_id: &str,
        chat_instance_id: &str,
    ) {
        let Some(def) = registry.get(panel_id) else {
            tracing::debug!(panel_id, "open ignored, panel is not registered");
            return;
        };
        let policy = groups.policy(&def.group);

        let mut evicted: Vec<ClosedStackEntry> = Vec::new();
        if policy.exclusive && store.display_mode(def) == DisplayMode::SidePeek {
            for other in registry.by_group(&def.group) {
                if other.id == def.id {
                    continue;
                }
                let other_mode = store.display_mode(other);
                if other_mode != DisplayMode::SidePeek {
                    continue;
                }
                if !store.is_open(other, chat_instance_id) {
                    continue;
                }
                store.set_open(other, chat_instance_id, false);
                evicted.push(ClosedStackEntry {
                    panel_id: other.id.clone(),
                    display_mode: other_mode,
                });
            }
        }

        if !evicted.is_empty() && policy.restore_on_close {
            tracing::debug!(
                panel_id,
                chat_instance_id,
                evicted = evicted.len(),
                "recording evicted side-peek panels for restore"
            );
            store.replace_closed_stack(chat_instance_id, &def.group, evicted);
        }

        store.set_open(def, chat_instance_id, true);
    }

    /// Closes a panel and, for restoring groups, re-opens every panel
    /// on the group's closed-stack. Closing an already-closed panel is
    /// a no-op and leaves the stack untouched.
    pub fn close(
        registry: &PanelRegistry,
        groups: &PanelGroupTable,
        store: &mut PanelStateStore,
        panel_id: &str,
        chat_instance_id: &str,
    ) {
        let Some(def) = registry.get(panel_id) else {
            tracing::debug!(panel_id, "close ignored, panel is not registered");
            return;
        };
        if !store.is_open(def, chat_instance_id) {
            return;
        }

        store.set_open(def, chat_instance_id, false);

        let policy = groups.policy(&def.group);
        if !policy.restore_on_close {
            return;
        }

        for entry in store.take_closed_stack(chat_instance_id, &def.group) {
            if let Some(restored) = registry.get(&entry.panel_id) {
                store.set_open(restored, chat_instance_id, true);
            } else {
                tracing::debug!(
                    panel_id = %entry.panel_id,
                    "restore skipped, evicted panel is no longer registered"
                );
            }
        }
    }

    pub fn toggle(
        registry: &PanelRegistry,
        groups: &PanelGroupTable,
        store: &mut PanelStateStore,
        panel_id: &str,
        chat_instance_id: &str,
    ) {
        let Some(def) = registry.get(panel_id) else {
            tracing::debug!(panel_id, "toggle ignored, panel is not registered");
            return;
        };
        if store.is_open(def, chat_instance_id) {
            Self::close(registry, groups, store, panel_id, chat_instance_id);
        } else {
            Self::open(registry, groups, store, panel_id, chat_instance_id);
        }
    }
}
