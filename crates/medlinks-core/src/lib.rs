//! MedLinks Core
//!
//! Data and state engine for the link-launcher dashboard:
//! - model: sections, items and the in-memory reorder/insert/remove rules
//! - store: key-value persistence with default seeding and reconciliation
//! - dashboard: controller owning the collection, UI-state maps and observers
//! - drag: item/section drag sessions producing reorder intents
//! - favicon: icon URL, color derivation and the fallback cascade
//!
//! Nothing here touches the browser; the UI crate supplies a storage backend
//! and drives the state machines from DOM events.

mod defaults;
mod error;

pub mod dashboard;
pub mod drag;
pub mod events;
pub mod favicon;
pub mod model;
pub mod store;

pub use dashboard::{Dashboard, RenderTarget};
pub use defaults::{default_section, default_sections, default_titles};
pub use drag::{DragKind, DragMachine, DragPayload, ItemRef, ReorderIntent};
pub use error::{StoreError, StoreResult};
pub use events::{DashboardEvent, ListenerId};
pub use favicon::{
    FallbackGlyph, FallbackReason, FaviconConfig, FaviconOutcome, FaviconResolution, FaviconResolver, FaviconState, IconPlan,
    PlaceholderPredicate, UrlMarkerPredicate,
};
pub use model::{Collection, Item, Section};
pub use store::{FlagMap, KeyValueBackend, MemoryBackend, SectionStore, Theme};
