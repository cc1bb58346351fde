//! Header Bar Component
//!
//! Title, today's date, the search box, the add-section menu, the theme
//! toggle and a polite live region for change announcements.

use leptos::prelude::*;
use medlinks_core::Theme;
use wasm_bindgen::JsValue;

use super::AddSectionMenu;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

const DATE_LOCALE: &str = "en-US";
const DATE_OPTIONS: [(&str, &str); 4] = [("weekday", "long"), ("year", "numeric"), ("month", "long"), ("day", "numeric")];

/// e.g. "Wednesday, October 15, 2026"
fn today_label() -> String {
    let options = js_sys::Object::new();
    for (key, value) in DATE_OPTIONS {
        if js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value)).is_err() {
            log::warn!("[APP] Could not set date option `{}`", key);
        }
    }
    js_sys::Date::new_0().to_locale_date_string(DATE_LOCALE, &options).into()
}

#[component]
pub fn HeaderBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let toggle_theme = move |_| {
        ctx.mutate(|d| d.toggle_theme());
    };

    view! {
        <header class="header-bar">
            <div class="header-title">
                <h1>"MedLinks"</h1>
                <span class="header-date">{today_label()}</span>
            </div>
            <input
                id="search-input"
                class="search-input"
                type="search"
                placeholder="Search links..."
                autocomplete="off"
                prop:value=move || store.query().get()
                on:input=move |ev| {
                    *store.query().write() = event_target_value(&ev);
                    ctx.render();
                }
            />
            <div class="header-actions">
                <AddSectionMenu />
                <button
                    class="theme-toggle"
                    title=move || match store.theme().get() {
                        Theme::Dark => "Switch to light theme",
                        Theme::Light => "Switch to dark theme",
                    }
                    on:click=toggle_theme
                >
                    <i class=move || match store.theme().get() {
                        Theme::Dark => "ph ph-sun",
                        Theme::Light => "ph ph-moon",
                    }></i>
                </button>
            </div>
            <div class="status-line" role="status" aria-live="polite">
                {move || store.status().get()}
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_options_include_year() {
        assert!(DATE_OPTIONS.contains(&("year", "numeric")));
        assert!(DATE_OPTIONS.contains(&("weekday", "long")));
    }
}
