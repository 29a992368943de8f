//! Panel orchestration engine for the chat workbench: decides which
//! panels may exist for the current context, which zone renders them,
//! and how mutual exclusion and layout restoration behave when panels
//! open and close. Rendering and panel content are the host's concern;
//! this crate only defines the orchestration contract.

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

pub mod availability;
pub mod coordinator;
pub mod definition;
pub mod engine;
pub mod group;
pub mod registry;
pub mod settings;
pub mod state;
pub mod zone;

pub use availability::{AvailabilityContext, ProjectMode, is_available};
pub use coordinator::MutualExclusionCoordinator;
pub use definition::{
    AvailabilityPredicate, DEFAULT_GROUP, DETAILS_GROUP, DisplayMode, PanelDefinition,
    PanelPosition,
};
pub use engine::PanelEngine;
pub use group::{PanelGroupConfig, PanelGroupTable};
pub use registry::PanelRegistry;
pub use settings::{ClosedStackEntry, PanelSettings, SettingsError};
pub use state::PanelStateStore;
pub use zone::{PanelContainer, PanelPlacement, PanelViewModel, Zone, ZoneRouter, zone_for};
