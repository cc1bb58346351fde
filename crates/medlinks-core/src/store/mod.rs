//! Persistent Store
//!
//! Reads and writes the section collection and the UI-state maps through a
//! [`KeyValueBackend`]. Loading never fails: absent, unreadable or malformed
//! values degrade to the default collection (or an empty map).

mod backend;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::defaults::default_sections;
use crate::error::StoreResult;
use crate::model::{insert_section_copy, Collection, Section};

pub use backend::{KeyValueBackend, MemoryBackend};

/// Storage keys
pub mod keys {
    /// The collection, JSON array of sections
    pub const SECTIONS: &str = "medlinks_sections_v1";
    /// title -> collapsed
    pub const COLLAPSED: &str = "collapsedStates";
    /// title -> visible (absent means visible)
    pub const VISIBLE: &str = "visibleStates";
    /// "light" | "dark", stored raw
    pub const THEME: &str = "theme";
}

/// Per-section boolean UI state, keyed by section title
pub type FlagMap = BTreeMap<String, bool>;

/// Color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Collection and UI-state persistence over a key-value backend
pub struct SectionStore<B> {
    backend: B,
    defaults: Vec<Section>,
}

impl<B: KeyValueBackend> SectionStore<B> {
    /// Store seeded with the built-in default collection
    pub fn new(backend: B) -> Self {
        Self::with_defaults(backend, default_sections())
    }

    /// Store seeded with a custom default collection
    pub fn with_defaults(backend: B, defaults: Vec<Section>) -> Self {
        Self { backend, defaults }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn defaults(&self) -> &[Section] {
        &self.defaults
    }

    /// Deep copy of one default section
    pub fn default_section(&self, title: &str) -> Option<Section> {
        self.defaults.iter().find(|s| s.title == title).map(Section::deep_copy)
    }

    fn seed(&self) -> Collection {
        self.defaults.iter().map(Section::deep_copy).collect()
    }

    // ========================
    // Collection
    // ========================

    /// Load the persisted collection.
    ///
    /// First run seeds and persists the defaults. Malformed data yields the
    /// defaults without overwriting what is stored. Default titles missing
    /// from a well-formed collection are appended and persisted immediately.
    pub fn load(&self) -> Collection {
        let raw = match self.backend.get(keys::SECTIONS) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("[STORE] No stored sections, seeding defaults");
                let seeded = self.seed();
                if let Err(e) = self.save(&seeded) {
                    log::warn!("[STORE] Failed to persist seed: {}", e);
                }
                return seeded;
            }
            Err(e) => {
                log::warn!("[STORE] {}; using defaults", e);
                return self.seed();
            }
        };

        let stored: Collection = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("[STORE] Stored sections malformed ({}); using defaults", e);
                return self.seed();
            }
        };

        let (mut sections, mut modified) = dedup_titles(stored);
        for def in &self.defaults {
            if insert_section_copy(&mut sections, def) {
                log::info!("[STORE] Reconciled missing default section '{}'", def.title);
                modified = true;
            }
        }

        if modified {
            if let Err(e) = self.save(&sections) {
                log::warn!("[STORE] Failed to persist reconciled sections: {}", e);
            }
        }
        sections
    }

    /// Serialize and overwrite the stored collection.
    pub fn save(&self, sections: &[Section]) -> StoreResult<()> {
        let json = serde_json::to_string(sections)?;
        self.backend.set(keys::SECTIONS, &json)
    }

    // ========================
    // UI state
    // ========================

    /// Load a title -> bool map. Absent or malformed yields an empty map.
    pub fn load_flags(&self, key: &str) -> FlagMap {
        match self.backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("[STORE] Malformed `{}` ({}); resetting", key, e);
                FlagMap::new()
            }),
            Ok(None) => FlagMap::new(),
            Err(e) => {
                log::warn!("[STORE] {}", e);
                FlagMap::new()
            }
        }
    }

    pub fn save_flags(&self, key: &str, flags: &FlagMap) -> StoreResult<()> {
        let json = serde_json::to_string(flags)?;
        self.backend.set(key, &json)
    }

    /// Stored theme, `Dark` when absent or unrecognized
    pub fn load_theme(&self) -> Theme {
        match self.backend.get(keys::THEME) {
            Ok(Some(raw)) => Theme::from_stored(&raw).unwrap_or_default(),
            _ => Theme::default(),
        }
    }

    pub fn save_theme(&self, theme: Theme) -> StoreResult<()> {
        self.backend.set(keys::THEME, theme.as_str())
    }
}

/// Drop later sections whose title repeats an earlier one.
fn dedup_titles(stored: Collection) -> (Collection, bool) {
    let before = stored.len();
    let mut out: Collection = Vec::with_capacity(before);
    for sec in stored {
        if out.iter().any(|s| s.title == sec.title) {
            log::warn!("[STORE] Dropping duplicate section '{}'", sec.title);
            continue;
        }
        out.push(sec);
    }
    let changed = out.len() != before;
    (out, changed)
}
