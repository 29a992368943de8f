//! Built-in panel catalog for the chat workbench. Definitions only;
//! all open/close/zone behavior comes from `panel-engine`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use panel_engine::{
    DETAILS_GROUP, DisplayMode, PanelDefinition, PanelPosition, PanelRegistry, ProjectMode,
};

pub const PANEL_DIFF: &str = "diff";
pub const PANEL_PLAN: &str = "plan";
pub const PANEL_TERMINAL: &str = "terminal";
pub const PANEL_BROWSER: &str = "browser";
pub const PANEL_PREVIEW: &str = "preview";
pub const PANEL_FILE_VIEWER: &str = "file_viewer";
pub const PANEL_EXPLORER: &str = "explorer";
pub const PANEL_DETAILS: &str = "details";

pub const FEATURE_PREVIEW: &str = "preview";

pub fn builtin_panels() -> Vec<PanelDefinition> {
    vec![
        PanelDefinition::new(PANEL_DIFF)
            .position(PanelPosition::Right)
            .priority(10)
            .display_modes([
                DisplayMode::SidePeek,
                DisplayMode::CenterPeek,
                DisplayMode::FullPage,
            ])
            .size_bounds(320, 480, 960)
            .availability(|ctx| ctx.can_open_diff),
        PanelDefinition::new(PANEL_PLAN)
            .position(PanelPosition::Right)
            .priority(20)
            .display_modes([DisplayMode::SidePeek])
            .size_bounds(280, 380, 720),
        PanelDefinition::new(PANEL_TERMINAL)
            .position(PanelPosition::Bottom)
            .priority(30)
            .display_modes([DisplayMode::Bottom])
            .default_display_mode(DisplayMode::Bottom)
            .size_bounds(140, 280, 600)
            .availability(|ctx| ctx.can_open_terminal && ctx.is_desktop),
        PanelDefinition::new(PANEL_BROWSER)
            .position(PanelPosition::Right)
            .priority(40)
            .display_modes([DisplayMode::SidePeek, DisplayMode::FullPage])
            .size_bounds(360, 520, 960)
            // Embedded live view; tearing the content down on close
            // would lose page state, so it stays mounted.
            .keep_mounted(true)
            .availability(|ctx| ctx.can_open_browser && !ctx.is_remote_chat),
        PanelDefinition::new(PANEL_PREVIEW)
            .position(PanelPosition::Right)
            .priority(50)
            .display_modes([DisplayMode::SidePeek, DisplayMode::CenterPeek])
            .size_bounds(320, 460, 900)
            .availability(|ctx| ctx.has_feature(FEATURE_PREVIEW)),
        PanelDefinition::new(PANEL_FILE_VIEWER)
            .position(PanelPosition::Right)
            .priority(60)
            .display_modes([DisplayMode::SidePeek, DisplayMode::CenterPeek])
            .size_bounds(320, 460, 900),
        PanelDefinition::new(PANEL_EXPLORER)
            .position(PanelPosition::Left)
            .priority(70)
            .display_modes([DisplayMode::SidePeek])
            .size_bounds(220, 300, 520)
            // Legacy file tree that renders its own container.
            .manages_own_container(true)
            .availability(|ctx| ctx.project_mode != ProjectMode::Restricted),
        PanelDefinition::new(PANEL_DETAILS)
            .position(PanelPosition::Right)
            .priority(80)
            .group(DETAILS_GROUP)
            .display_modes([DisplayMode::SidePeek])
            .size_bounds(260, 360, 700)
            .collapsible(true),
    ]
}

pub fn register_builtin_panels(registry: &mut PanelRegistry) {
    registry.register_all(builtin_panels());
}
