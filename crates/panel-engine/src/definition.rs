use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityContext;

pub const DEFAULT_GROUP: &str = "default";
pub const DETAILS_GROUP: &str = "details";

pub const PANEL_MIN_SIZE: u32 = 220;
pub const PANEL_DEFAULT_SIZE: u32 = 420;
pub const PANEL_MAX_SIZE: u32 = 960;

/// Eligibility predicate over a host-supplied context snapshot.
pub type AvailabilityPredicate = Arc<dyn Fn(&AvailabilityContext) -> bool + Send + Sync>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    SidePeek,
    CenterPeek,
    FullPage,
    Bottom,
}

impl DisplayMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SidePeek => "side-peek",
            Self::CenterPeek => "center-peek",
            Self::FullPage => "full-page",
            Self::Bottom => "bottom",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PanelPosition {
    Left,
    Right,
    Bottom,
    Floating,
}

/// Static panel metadata, registered once at startup and immutable for
/// the process lifetime. Runtime state (open flags, current mode, size)
/// lives in `PanelStateStore`, never here.
#[derive(Clone)]
pub struct PanelDefinition {
    pub id: String,
    pub position: PanelPosition,
    pub priority: i32,
    pub group: String,
    pub display_modes: Vec<DisplayMode>,
    pub default_display_mode: DisplayMode,
    pub min_size: u32,
    pub default_size: u32,
    pub max_size: u32,
    pub resizable: bool,
    pub collapsible: bool,
    pub keep_mounted: bool,
    pub manages_own_container: bool,
    pub availability: Option<AvailabilityPredicate>,
}

impl fmt::Debug for PanelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDefinition")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("priority", &self.priority)
            .field("group", &self.group)
            .field("display_modes", &self.display_modes)
            .field("default_display_mode", &self.default_display_mode)
            .field("min_size", &self.min_size)
            .field("default_size", &self.default_size)
            .field("max_size", &self.max_size)
            .field("resizable", &self.resizable)
            .field("collapsible", &self.collapsible)
            .field("keep_mounted", &self.keep_mounted)
            .field("manages_own_container", &self.manages_own_container)
            .field("availability", &self.availability.is_some())
            .finish()
    }
}

impl PanelDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: PanelPosition::Right,
            priority: 0,
            group: DEFAULT_GROUP.to_string(),
            display_modes: vec![DisplayMode::SidePeek],
            default_display_mode: DisplayMode::SidePeek,
            min_size: PANEL_MIN_SIZE,
            default_size: PANEL_DEFAULT_SIZE,
            max_size: PANEL_MAX_SIZE,
            resizable: true,
            collapsible: false,
            keep_mounted: false,
            manages_own_container: false,
            availability: None,
        }
    }

    pub fn position(mut self, position: PanelPosition) -> Self {
        self.position = position;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn display_modes(mut self, modes: impl IntoIterator<Item = DisplayMode>) -> Self {
        self.display_modes = modes.into_iter().collect();
        self
    }

    pub fn default_display_mode(mut self, mode: DisplayMode) -> Self {
        self.default_display_mode = mode;
        self
    }

    pub fn size_bounds(mut self, min: u32, default: u32, max: u32) -> Self {
        self.min_size = min;
        self.default_size = default;
        self.max_size = max;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    pub fn keep_mounted(mut self, keep_mounted: bool) -> Self {
        self.keep_mounted = keep_mounted;
        self
    }

    pub fn manages_own_container(mut self, manages_own_container: bool) -> Self {
        self.manages_own_container = manages_own_container;
        self
    }

    pub fn availability(
        mut self,
        predicate: impl Fn(&AvailabilityContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.availability = Some(Arc::new(predicate));
        self
    }

    pub fn supports_mode(&self, mode: DisplayMode) -> bool {
        self.display_modes.contains(&mode)
    }

    pub fn clamp_size(&self, size: u32) -> u32 {
        size.clamp(self.min_size, self.max_size)
    }

    /// Repairs an inconsistent definition by clamping instead of
    /// rejecting: an empty mode set collapses to the default mode, a
    /// default mode outside the set falls back to the first member,
    /// and size bounds are reordered so `min <= default <= max` holds.
    pub fn normalized(mut self) -> Self {
        if self.display_modes.is_empty() {
            self.display_modes = vec![self.default_display_mode];
        }
        if !self.display_modes.contains(&self.default_display_mode) {
            self.default_display_mode = self
                .display_modes
                .first()
                .copied()
                .unwrap_or(DisplayMode::SidePeek);
        }
        if self.min_size > self.max_size {
            std::mem::swap(&mut self.min_size, &mut self.max_size);
        }
        self.default_size = self.default_size.clamp(self.min_size, self.max_size);
        self
    }
}
