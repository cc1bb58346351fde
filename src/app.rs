//! MedLinks Frontend App
//!
//! Header bar over a vertical list of link sections.

use leptos::prelude::*;
use leptos_dragdrop::create_dnd_signals;
use medlinks_core::{Dashboard, DashboardEvent, FaviconResolver, SectionStore, Theme};
use reactive_stores::Store;

use crate::components::{HeaderBar, SectionView};
use crate::context::AppContext;
use crate::storage::{load_favicon_config, BrowserStorage};
use crate::store::{describe_event, AppState, AppStateStoreFields};

const LIGHT_THEME_CLASS: &str = "light-theme";

fn apply_theme(theme: Theme) {
    let Some(body) = document().body() else {
        return;
    };
    if body
        .class_list()
        .toggle_with_force(LIGHT_THEME_CLASS, theme == Theme::Light)
        .is_err()
    {
        log::warn!("[APP] Could not apply theme {}", theme.as_str());
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let config = load_favicon_config(&BrowserStorage::open());
    let mut dashboard = Dashboard::open(SectionStore::new(BrowserStorage::open()));
    dashboard.subscribe(Box::new(move |event: &DashboardEvent| {
        *store.status().write() = describe_event(event);
    }));

    let ctx = AppContext::new(dashboard, FaviconResolver::new(config), store);
    provide_context(ctx);
    ctx.render();

    Effect::new(move |_| apply_theme(store.theme().get()));

    // One drag session shared by every section and card
    let dnd = create_dnd_signals();

    view! {
        <HeaderBar />
        <main id="app-container">
            <For
                each=move || store.sections().get()
                key=|section| section.clone()
                let:section
            >
                <SectionView section=section dnd=dnd />
            </For>
            <Show when=move || store.sections().read().is_empty()>
                <p class="empty-state">"No matching links"</p>
            </Show>
        </main>
    }
}
