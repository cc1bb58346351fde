//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The dashboard
//! controller is the source of truth; this store only mirrors what it
//! renders.

use leptos::prelude::*;
use medlinks_core::{DashboardEvent, FlagMap, RenderTarget, Section, Theme};
use reactive_stores::Store;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Sections currently drawn (visible, narrowed by the query)
    pub sections: Vec<Section>,
    /// Collapsed flag per section title
    pub collapsed: FlagMap,
    /// Titles of default sections the user hid, for the add-section menu
    pub hidden_defaults: Vec<String>,
    /// Search box contents
    pub query: String,
    pub theme: Theme,
    /// Last change, announced to screen readers
    pub status: String,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Render target that writes into the reactive store
pub struct StoreRenderer(pub AppStore);

impl RenderTarget for StoreRenderer {
    fn render(&mut self, sections: &[Section], collapsed: &FlagMap) {
        *self.0.sections().write() = sections.to_vec();
        *self.0.collapsed().write() = collapsed.clone();
    }
}

// ========================
// Status line
// ========================

/// Short human-readable line for a dashboard change
pub fn describe_event(event: &DashboardEvent) -> String {
    match event {
        DashboardEvent::SectionAdded { title } => format!("Added section {}", title),
        DashboardEvent::SectionRemoved { title } => format!("Removed section {}", title),
        DashboardEvent::ItemAdded { section, name } => format!("Added {} to {}", name, section),
        DashboardEvent::ItemRemoved { section, name } => format!("Removed {} from {}", name, section),
        DashboardEvent::ItemReordered { section, from, to } => {
            format!("Moved link {} to position {} in {}", from + 1, to + 1, section)
        }
        DashboardEvent::SectionReordered { source, target, .. } => {
            format!("Moved section {} to {}'s place", source, target)
        }
        DashboardEvent::SectionHidden { title } => format!("Hid {}", title),
        DashboardEvent::SectionShown { title } => format!("Restored {}", title),
        DashboardEvent::SectionCollapseToggled { title, collapsed } => {
            if *collapsed {
                format!("Collapsed {}", title)
            } else {
                format!("Expanded {}", title)
            }
        }
    }
}
