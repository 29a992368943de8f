use crate::availability::{AvailabilityContext, is_available};
use crate::definition::{DisplayMode, PanelDefinition};
use crate::registry::PanelRegistry;
use crate::state::PanelStateStore;

/// The three physical render targets a display mode maps to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Zone {
    Right,
    Bottom,
    Overlay,
}

pub const fn zone_for(mode: DisplayMode) -> Zone {
    match mode {
        DisplayMode::SidePeek => Zone::Right,
        DisplayMode::Bottom => Zone::Bottom,
        DisplayMode::CenterPeek | DisplayMode::FullPage => Zone::Overlay,
    }
}

/// Container semantics the rendering layer must honor for one placed
/// panel. Overlay containers are not size-managed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PanelContainer {
    DockedPanel { size: u32, resizable: bool },
    BottomDrawer { size: u32, resizable: bool },
    CenteredOverlay,
    FullPageTakeover,
    /// Legacy bridge panels render their own container; the router
    /// only gates them on availability, no double wrapping.
    SelfManaged,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PanelPlacement {
    pub panel_id: String,
    pub display_mode: DisplayMode,
    pub container: PanelContainer,
    /// `false` only for keep-mounted panels that are logically closed:
    /// the content stays mounted and is hidden via layout instead of
    /// being torn down.
    pub visible: bool,
}

/// What a placed panel's content receives, per the render contract.
/// Close and display-mode changes travel back through the engine's
/// control methods.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PanelViewModel {
    pub display_mode: DisplayMode,
    pub size: u32,
}

/// Pure function of current state: no transition events, re-run on
/// every read. A display-mode change that crosses a zone boundary
/// simply routes to the other zone on the next call.
pub struct ZoneRouter;

impl ZoneRouter {
    pub fn placements(
        registry: &PanelRegistry,
        store: &PanelStateStore,
        ctx: &AvailabilityContext,
        chat_instance_id: &str,
        sub_instance_id: &str,
        zone: Zone,
    ) -> Vec<PanelPlacement> {
        let mut placements = Vec::new();
        for def in registry.all() {
            if !is_available(def, ctx) {
                continue;
            }
            let mode = store.display_mode(def);
            if zone_for(mode) != zone {
                continue;
            }
            let open = store.is_open(def, chat_instance_id);
            let mounted = open || (def.keep_mounted && zone == Zone::Right);
            if !mounted {
                continue;
            }
            placements.push(PanelPlacement {
                panel_id: def.id.clone(),
                display_mode: mode,
                container: Self::container_for(def, store, mode, sub_instance_id),
                visible: open,
            });
        }
        placements
    }

    fn container_for(
        def: &PanelDefinition,
        store: &PanelStateStore,
        mode: DisplayMode,
        sub_instance_id: &str,
    ) -> PanelContainer {
        if def.manages_own_container {
            return PanelContainer::SelfManaged;
        }
        match mode {
            DisplayMode::SidePeek => PanelContainer::DockedPanel {
                size: store.size(def, sub_instance_id),
                resizable: def.resizable,
            },
            DisplayMode::Bottom => PanelContainer::BottomDrawer {
                size: store.size(def, sub_instance_id),
                resizable: def.resizable,
            },
            DisplayMode::CenterPeek => PanelContainer::CenteredOverlay,
            DisplayMode::FullPage => PanelContainer::FullPageTakeover,
        }
    }

    pub fn view_model(
        store: &PanelStateStore,
        def: &PanelDefinition,
        sub_instance_id: &str,
    ) -> PanelViewModel {
        PanelViewModel {
            display_mode: store.display_mode(def),
            size: store.size(def, sub_instance_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PanelContainer, Zone, ZoneRouter, zone_for};
    use crate::availability::AvailabilityContext;
    use crate::coordinator::MutualExclusionCoordinator;
    use crate::definition::{DisplayMode, PanelDefinition};
    use crate::group::PanelGroupTable;
    use crate::registry::PanelRegistry;
    use crate::settings::PanelSettings;
    use crate::state::PanelStateStore;

    const CHAT: &str = "chat-1";
    const SUB: &str = "";

    #[test]
    fn display_modes_map_to_their_zones() {
        assert_eq!(zone_for(DisplayMode::SidePeek), Zone::Right);
        assert_eq!(zone_for(DisplayMode::Bottom), Zone::Bottom);
        assert_eq!(zone_for(DisplayMode::CenterPeek), Zone::Overlay);
        assert_eq!(zone_for(DisplayMode::FullPage), Zone::Overlay);
    }

    fn fixture() -> (PanelRegistry, PanelGroupTable, PanelStateStore) {
        let mut registry = PanelRegistry::new();
        registry.register(
            PanelDefinition::new("diff")
                .display_modes([DisplayMode::SidePeek, DisplayMode::CenterPeek])
                .size_bounds(220, 420, 960),
        );
        registry.register(
            PanelDefinition::new("terminal")
                .display_modes([DisplayMode::Bottom])
                .size_bounds(140, 280, 600)
                .availability(|ctx| ctx.can_open_terminal),
        );
        registry.register(
            PanelDefinition::new("browser")
                .display_modes([DisplayMode::SidePeek])
                .keep_mounted(true),
        );
        registry.register(
            PanelDefinition::new("explorer")
                .display_modes([DisplayMode::SidePeek])
                .group("details")
                .manages_own_container(true),
        );
        (
            registry,
            PanelGroupTable::default(),
            PanelStateStore::new(PanelSettings::in_memory()),
        )
    }

    fn terminal_ctx() -> AvailabilityContext {
        AvailabilityContext {
            can_open_terminal: true,
            ..Default::default()
        }
    }

    #[test]
    fn open_side_peek_panel_routes_to_right_zone_with_docked_container() {
        let (registry, groups, mut store) = fixture();
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "diff", CHAT);

        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Right);
        let diff = placements
            .iter()
            .find(|placement| placement.panel_id == "diff")
            .unwrap();
        assert!(diff.visible);
        assert_eq!(
            diff.container,
            PanelContainer::DockedPanel {
                size: 420,
                resizable: true
            }
        );
    }

    #[test]
    fn bottom_mode_routes_to_bottom_drawer() {
        let (registry, groups, mut store) = fixture();
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "terminal", CHAT);

        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Bottom);
        assert_eq!(placements.len(), 1);
        assert_eq!(
            placements[0].container,
            PanelContainer::BottomDrawer {
                size: 280,
                resizable: true
            }
        );
    }

    #[test]
    fn overlay_modes_carry_no_managed_size() {
        let (registry, groups, mut store) = fixture();
        let diff = registry.get("diff").unwrap().clone();
        store.set_display_mode(&diff, DisplayMode::CenterPeek);
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "diff", CHAT);

        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Overlay);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].container, PanelContainer::CenteredOverlay);

        let right =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Right);
        assert!(right.iter().all(|placement| placement.panel_id != "diff"));
    }

    #[test]
    fn unavailable_panel_is_absent_regardless_of_open_flag() {
        let (registry, groups, mut store) = fixture();
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "terminal", CHAT);

        let no_terminal = AvailabilityContext::default();
        let placements =
            ZoneRouter::placements(&registry, &store, &no_terminal, CHAT, SUB, Zone::Bottom);
        assert!(placements.is_empty());

        // Capability returns: the panel reappears with its stored state.
        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Bottom);
        assert_eq!(placements.len(), 1);
        assert!(placements[0].visible);
    }

    #[test]
    fn keep_mounted_panel_stays_placed_but_hidden_while_closed() {
        let (registry, groups, mut store) = fixture();
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "browser", CHAT);
        MutualExclusionCoordinator::close(&registry, &groups, &mut store, "browser", CHAT);

        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Right);
        let browser = placements
            .iter()
            .find(|placement| placement.panel_id == "browser")
            .unwrap();
        assert!(!browser.visible);
    }

    #[test]
    fn self_managed_panel_gets_no_engine_container() {
        let (registry, groups, mut store) = fixture();
        MutualExclusionCoordinator::open(&registry, &groups, &mut store, "explorer", CHAT);

        let placements =
            ZoneRouter::placements(&registry, &store, &terminal_ctx(), CHAT, SUB, Zone::Right);
        let explorer = placements
            .iter()
            .find(|placement| placement.panel_id == "explorer")
            .unwrap();
        assert_eq!(explorer.container, PanelContainer::SelfManaged);
    }

    #[test]
    fn view_model_reflects_current_mode_and_clamped_size() {
        let (registry, _groups, mut store) = fixture();
        let diff = registry.get("diff").unwrap().clone();
        store.set_size(&diff, SUB, 10_000);

        let view = ZoneRouter::view_model(&store, &diff, SUB);
        assert_eq!(view.display_mode, DisplayMode::SidePeek);
        assert_eq!(view.size, 960);
    }
}
