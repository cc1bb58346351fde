//! Add Section Menu Component
//!
//! Dropdown listing hidden default sections; picking one restores it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn AddSectionMenu() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let open = RwSignal::new(false);

    view! {
        <div class="add-section">
            <button
                class="add-section-btn"
                title="Add section"
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <i class="ph ph-plus"></i>
            </button>
            <Show when=move || open.get()>
                <ul class="add-section-menu">
                    <Show when=move || store.hidden_defaults().read().is_empty()>
                        <li class="add-section-empty">"No hidden sections to add"</li>
                    </Show>
                    <For
                        each=move || store.hidden_defaults().get()
                        key=|title| title.clone()
                        let:title
                    >
                        <li
                            class="add-section-option"
                            on:click={
                                let title = title.clone();
                                move |_| {
                                    ctx.mutate(|d| d.show_default_section(&title));
                                    open.set(false);
                                }
                            }
                        >
                            {title.clone()}
                        </li>
                    </For>
                </ul>
            </Show>
        </div>
    }
}
