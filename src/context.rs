//! Application Context
//!
//! Shared handles provided via Leptos Context API. Components mutate the
//! dashboard through `mutate`, which re-renders into the store afterwards.

use leptos::prelude::*;
use medlinks_core::{Dashboard, FaviconResolver};

use crate::storage::BrowserStorage;
use crate::store::{AppStore, AppStateStoreFields, StoreRenderer};

pub type AppDashboard = Dashboard<BrowserStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    dashboard: StoredValue<AppDashboard, LocalStorage>,
    resolver: StoredValue<FaviconResolver>,
    pub store: AppStore,
}

impl AppContext {
    pub fn new(dashboard: AppDashboard, resolver: FaviconResolver, store: AppStore) -> Self {
        Self {
            dashboard: StoredValue::new_local(dashboard),
            resolver: StoredValue::new(resolver),
            store,
        }
    }

    /// Mutate the dashboard, then push the new view into the store.
    /// Listeners fire inside `f` and must not call back into the context.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut AppDashboard) -> R) -> Option<R> {
        let out = self.dashboard.try_update_value(f);
        self.render();
        out
    }

    /// Re-render the current query into the store
    pub fn render(&self) {
        let store = self.store;
        let query = store.query().get_untracked();
        self.dashboard.with_value(|d| {
            d.render_to(&mut StoreRenderer(store), &query);
            *store.hidden_defaults().write() = d.hidden_defaults().iter().map(|s| s.title.clone()).collect();
            if store.theme().get_untracked() != d.theme() {
                *store.theme().write() = d.theme();
            }
        });
    }

    pub fn resolver(&self) -> FaviconResolver {
        self.resolver.get_value()
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
