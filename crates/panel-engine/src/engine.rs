use crate::availability::{AvailabilityContext, is_available};
use crate::coordinator::MutualExclusionCoordinator;
use crate::definition::{DisplayMode, PanelDefinition};
use crate::group::{PanelGroupConfig, PanelGroupTable};
use crate::registry::PanelRegistry;
use crate::settings::PanelSettings;
use crate::state::PanelStateStore;
use crate::zone::{PanelPlacement, PanelViewModel, Zone, ZoneRouter};

/// Facade wiring the registry, group table, state store, and
/// coordinator together. Constructed explicitly by the host and passed
/// by reference; there is no hidden global instance.
pub struct PanelEngine {
    registry: PanelRegistry,
    groups: PanelGroupTable,
    state: PanelStateStore,
}

impl Default for PanelEngine {
    fn default() -> Self {
        Self::new(PanelSettings::in_memory())
    }
}

impl PanelEngine {
    pub fn new(settings: PanelSettings) -> Self {
        Self {
            registry: PanelRegistry::new(),
            groups: PanelGroupTable::default(),
            state: PanelStateStore::new(settings),
        }
    }

    // --- registration contract ---

    pub fn register(&mut self, def: PanelDefinition) {
        self.registry.register(def);
    }

    pub fn register_all(&mut self, defs: impl IntoIterator<Item = PanelDefinition>) {
        self.registry.register_all(defs);
    }

    pub fn insert_group(&mut self, config: PanelGroupConfig) {
        self.groups.insert(config);
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    // --- control contract ---

    pub fn open(&mut self, panel_id: &str, chat_instance_id: &str) {
        MutualExclusionCoordinator::open(
            &self.registry,
            &self.groups,
            &mut self.state,
            panel_id,
            chat_instance_id,
        );
    }

    pub fn close(&mut self, panel_id: &str, chat_instance_id: &str) {
        MutualExclusionCoordinator::close(
            &self.registry,
            &self.groups,
            &mut self.state,
            panel_id,
            chat_instance_id,
        );
    }

    pub fn toggle(&mut self, panel_id: &str, chat_instance_id: &str) {
        MutualExclusionCoordinator::toggle(
            &self.registry,
            &self.groups,
            &mut self.state,
            panel_id,
            chat_instance_id,
        );
    }

    pub fn set_size(&mut self, panel_id: &str, sub_instance_id: &str, size: u32) {
        let Some(def) = self.registry.get(panel_id) else {
            return;
        };
        let def = def.clone();
        self.state.set_size(&def, sub_instance_id, size);
    }

    pub fn set_display_mode(&mut self, panel_id: &str, mode: DisplayMode) {
        let Some(def) = self.registry.get(panel_id) else {
            return;
        };
        let def = def.clone();
        self.state.set_display_mode(&def, mode);
    }

    // --- query contract ---

    pub fn is_open(&self, panel_id: &str, chat_instance_id: &str) -> bool {
        self.registry
            .get(panel_id)
            .is_some_and(|def| self.state.is_open(def, chat_instance_id))
    }

    pub fn display_mode(&self, panel_id: &str) -> Option<DisplayMode> {
        self.registry
            .get(panel_id)
            .map(|def| self.state.display_mode(def))
    }

    pub fn size(&self, panel_id: &str, sub_instance_id: &str) -> Option<u32> {
        self.registry
            .get(panel_id)
            .map(|def| self.state.size(def, sub_instance_id))
    }

    /// The eligible set for the supplied context snapshot, evaluated
    /// fresh on every call. Stored state for ineligible panels is left
    /// intact so they reappear correctly when availability returns.
    pub fn available_panels(&self, ctx: &AvailabilityContext) -> Vec<&PanelDefinition> {
        self.registry
            .all()
            .into_iter()
            .filter(|def| is_available(def, ctx))
            .collect()
    }

    pub fn placements(
        &self,
        ctx: &AvailabilityContext,
        chat_instance_id: &str,
        sub_instance_id: &str,
        zone: Zone,
    ) -> Vec<PanelPlacement> {
        ZoneRouter::placements(
            &self.registry,
            &self.state,
            ctx,
            chat_instance_id,
            sub_instance_id,
            zone,
        )
    }

    pub fn view_model(&self, panel_id: &str, sub_instance_id: &str) -> Option<PanelViewModel> {
        self.registry
            .get(panel_id)
            .map(|def| ZoneRouter::view_model(&self.state, def, sub_instance_id))
    }
}
