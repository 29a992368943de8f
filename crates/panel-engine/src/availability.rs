use std::collections::BTreeSet;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::definition::PanelDefinition;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProjectMode {
    #[default]
    Workspace,
    Remote,
    Restricted,
}

impl ProjectMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Remote => "remote",
            Self::Restricted => "restricted",
        }
    }
}

/// Flat snapshot of host capabilities, supplied fresh on every query.
/// The evaluator never mutates it and never caches a verdict across
/// snapshots, so panels appear and disappear the moment the
/// surrounding capabilities change.
#[derive(Clone, Debug, Default)]
pub struct AvailabilityContext {
    pub can_open_diff: bool,
    pub can_open_terminal: bool,
    pub can_open_browser: bool,
    pub is_remote_chat: bool,
    pub is_desktop: bool,
    pub project_mode: ProjectMode,
    pub enabled_features: BTreeSet<String>,
}

impl AvailabilityContext {
    pub fn has_feature(&self, feature_id: &str) -> bool {
        self.enabled_features.contains(feature_id)
    }

    pub fn enable_feature(&mut self, feature_id: impl Into<String>) {
        self.enabled_features.insert(feature_id.into());
    }
}

/// A panel without a predicate is always eligible. A predicate that
/// panics marks the panel unavailable instead of taking down the host
/// layout.
pub fn is_available(def: &PanelDefinition, ctx: &AvailabilityContext) -> bool {
    let Some(predicate) = def.availability.as_ref() else {
        return true;
    };
    match catch_unwind(AssertUnwindSafe(|| predicate(ctx))) {
        Ok(eligible) => eligible,
        Err(_) => {
            tracing::warn!(
                panel_id = %def.id,
                "availability predicate panicked, treating panel as unavailable"
            );
            false
        }
    }
}
