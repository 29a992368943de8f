use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::definition::DisplayMode;

const LAYOUT_SCHEMA_VERSION: u32 = 1;
const LAYOUT_FILE_NAME: &str = "panel-layout.v1.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("layout directory create failed: {0}")]
    CreateDir(std::io::Error),
    #[error("layout encode failed: {0}")]
    Encode(serde_json::Error),
    #[error("layout write failed: {0}")]
    Write(std::io::Error),
}

/// One auto-evicted panel, remembered so closing the evictor can
/// restore the prior layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClosedStackEntry {
    pub panel_id: String,
    pub display_mode: DisplayMode,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct OpenEntry {
    chat_instance_id: String,
    panel_id: String,
    open: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct DisplayModeEntry {
    panel_id: String,
    mode: DisplayMode,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct SizeEntry {
    panel_id: String,
    sub_instance_id: String,
    size: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct ClosedStackRecord {
    chat_instance_id: String,
    group_id: String,
    entries: Vec<ClosedStackEntry>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct PanelLayoutDocument {
    version: u32,
    saved_at: String,
    open: Vec<OpenEntry>,
    display_modes: Vec<DisplayModeEntry>,
    sizes: Vec<SizeEntry>,
    closed_stacks: Vec<ClosedStackRecord>,
}

/// Persisted layout settings, stored as one versioned JSON document.
/// A missing, corrupt, or version-mismatched file loads as empty;
/// writes flush the whole sorted document and failures are logged
/// rather than surfaced, so callers never wait on persistence.
#[derive(Clone, Debug, Default)]
pub struct PanelSettings {
    path: Option<PathBuf>,
    open: HashMap<(String, String), bool>,
    display_modes: HashMap<String, DisplayMode>,
    sizes: HashMap<(String, String), u32>,
    closed_stacks: HashMap<(String, String), Vec<ClosedStackEntry>>,
}

impl PanelSettings {
    /// Session-only store with no backing file. Used for tests and for
    /// hosts that opt out of layout persistence.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn load_default() -> Self {
        Self::load(default_layout_path())
    }

    pub fn load(path: PathBuf) -> Self {
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                return Self {
                    path: Some(path),
                    ..Self::default()
                };
            }
        };

        let mut settings = Self {
            path: Some(path),
            ..Self::default()
        };
        let parsed = serde_json::from_str::<PanelLayoutDocument>(raw.as_str());
        if let Ok(document) = parsed
            && document.version == LAYOUT_SCHEMA_VERSION
        {
            for entry in document.open {
                settings
                    .open
                    .insert((entry.chat_instance_id, entry.panel_id), entry.open);
            }
            for entry in document.display_modes {
                settings.display_modes.insert(entry.panel_id, entry.mode);
            }
            for entry in document.sizes {
                settings
                    .sizes
                    .insert((entry.panel_id, entry.sub_instance_id), entry.size);
            }
            for record in document.closed_stacks {
                settings.closed_stacks.insert(
                    (record.chat_instance_id, record.group_id),
                    record.entries,
                );
            }
        }
        settings
    }

    pub fn open(&self, chat_instance_id: &str, panel_id: &str) -> Option<bool> {
        self.open
            .get(&(chat_instance_id.to_string(), panel_id.to_string()))
            .copied()
    }

    pub fn set_open(&mut self, chat_instance_id: &str, panel_id: &str, open: bool) {
        self.open
            .insert((chat_instance_id.to_string(), panel_id.to_string()), open);
        self.persist();
    }

    pub fn display_mode(&self, panel_id: &str) -> Option<DisplayMode> {
        self.display_modes.get(panel_id).copied()
    }

    pub fn set_display_mode(&mut self, panel_id: &str, mode: DisplayMode) {
        self.display_modes.insert(panel_id.to_string(), mode);
        self.persist();
    }

    pub fn size(&self, panel_id: &str, sub_instance_id: &str) -> Option<u32> {
        self.sizes
            .get(&(panel_id.to_string(), sub_instance_id.to_string()))
            .copied()
    }

    pub fn set_size(&mut self, panel_id: &str, sub_instance_id: &str, size: u32) {
        self.sizes
            .insert((panel_id.to_string(), sub_instance_id.to_string()), size);
        self.persist();
    }

    pub fn closed_stack(&self, chat_instance_id: &str, group_id: &str) -> Vec<ClosedStackEntry> {
        self.closed_stacks
            .get(&(chat_instance_id.to_string(), group_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_closed_stack(
        &mut self,
        chat_instance_id: &str,
        group_id: &str,
        entries: Vec<ClosedStackEntry>,
    ) {
        let key = (chat_instance_id.to_string(), group_id.to_string());
        if entries.is_empty() {
            self.closed_stacks.remove(&key);
        } else {
            self.closed_stacks.insert(key, entries);
        }
        self.persist();
    }

    // Fire-and-forget: layout persistence must never fail a user
    // action, so flush errors are logged and swallowed.
    fn persist(&self) {
        if self.path.is_none() {
            return;
        }
        if let Err(error) = self.flush() {
            tracing::warn!(%error, "panel layout flush failed");
        }
    }

    fn flush(&self) -> Result<(), SettingsError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(SettingsError::CreateDir)?;
        }

        let mut open: Vec<OpenEntry> = self
            .open
            .iter()
            .map(|((chat_instance_id, panel_id), is_open)| OpenEntry {
                chat_instance_id: chat_instance_id.clone(),
                panel_id: panel_id.clone(),
                open: *is_open,
            })
            .collect();
        open.sort_by(|left, right| {
            left.chat_instance_id
                .cmp(&right.chat_instance_id)
                .then_with(|| left.panel_id.cmp(&right.panel_id))
        });

        let mut display_modes: Vec<DisplayModeEntry> = self
            .display_modes
            .iter()
            .map(|(panel_id, mode)| DisplayModeEntry {
                panel_id: panel_id.clone(),
                mode: *mode,
            })
            .collect();
        display_modes.sort_by(|left, right| left.panel_id.cmp(&right.panel_id));

        let mut sizes: Vec<SizeEntry> = self
            .sizes
            .iter()
            .map(|((panel_id, sub_instance_id), size)| SizeEntry {
                panel_id: panel_id.clone(),
                sub_instance_id: sub_instance_id.clone(),
                size: *size,
            })
            .collect();
        sizes.sort_by(|left, right| {
            left.panel_id
                .cmp(&right.panel_id)
                .then_with(|| left.sub_instance_id.cmp(&right.sub_instance_id))
        });

        let mut closed_stacks: Vec<ClosedStackRecord> = self
            .closed_stacks
            .iter()
            .map(|((chat_instance_id, group_id), entries)| ClosedStackRecord {
                chat_instance_id: chat_instance_id.clone(),
                group_id: group_id.clone(),
                entries: entries.clone(),
            })
            .collect();
        closed_stacks.sort_by(|left, right| {
            left.chat_instance_id
                .cmp(&right.chat_instance_id)
                .then_with(|| left.group_id.cmp(&right.group_id))
        });

        let encoded = serde_json::to_string_pretty(&PanelLayoutDocument {
            version: LAYOUT_SCHEMA_VERSION,
            saved_at: Utc::now().to_rfc3339(),
            open,
            display_modes,
            sizes,
            closed_stacks,
        })
        .map_err(SettingsError::Encode)?;
        fs::write(path, encoded).map_err(SettingsError::Write)
    }
}

fn default_layout_path() -> PathBuf {
    if let Some(mut data_dir) = dirs::data_local_dir() {
        data_dir.push("workbench");
        data_dir.push(LAYOUT_FILE_NAME);
        return data_dir;
    }

    if let Some(mut home_dir) = dirs::home_dir() {
        home_dir.push(".workbench");
        home_dir.push(LAYOUT_FILE_NAME);
        return home_dir;
    }

    PathBuf::from(LAYOUT_FILE_NAME)
}
