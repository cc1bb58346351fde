//! App Card Component
//!
//! A link tile. The remote favicon races a timer; until it wins, the card
//! shows a gradient, and if it loses the gradient stays with a glyph on top.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_dragdrop::{
    make_on_dragend, make_on_item_dragenter, make_on_item_dragleave, make_on_item_dragover, make_on_item_dragstart,
    make_on_item_drop, DndSignals,
};
use medlinks_core::{FallbackGlyph, FaviconOutcome, FaviconResolution, FaviconState, Item, ItemRef, ReorderIntent};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlImageElement, MouseEvent};

use crate::context::use_app_context;

fn glyph_view(glyph: &FallbackGlyph) -> AnyView {
    match glyph {
        FallbackGlyph::Icon(name) => view! { <i class=format!("ph {} app-glyph", name)></i> }.into_any(),
        FallbackGlyph::Initial(letter) => view! { <div class="app-initial">{letter.to_string()}</div> }.into_any(),
    }
}

#[component]
pub fn AppCard(
    item: Item,
    item_ref: ItemRef,
    dnd: DndSignals,
    on_intent: Callback<ReorderIntent>,
    #[prop(into)] draggable: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let resolver = ctx.resolver();
    let plan = resolver.plan(&item);

    let resolution = RwSignal::new(FaviconResolution::new());
    let timer = StoredValue::new_local(None::<Timeout>);

    // Every outcome ends the race
    let cancel_timer = move |outcome: Option<FaviconOutcome>| {
        if outcome.is_some() {
            timer.try_update_value(|t| t.take());
        }
    };

    match plan.src {
        Some(_) => {
            let handle = Timeout::new(resolver.config().timeout_ms, move || {
                if resolution.try_update(|r| r.on_timeout()).flatten().is_some() {
                    log::debug!("[FAVICON] Timed out");
                }
            });
            timer.set_value(Some(handle));
        }
        None => {
            resolution.update(|r| {
                r.on_no_source();
            });
        }
    }
    on_cleanup(move || {
        timer.try_update_value(|t| t.take());
    });

    let on_load = move |ev: Event| {
        let Some(img) = ev.target().and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) else {
            return;
        };
        let src = match img.current_src() {
            current if current.is_empty() => img.src(),
            current => current,
        };
        let outcome = resolution
            .try_update(|r| r.on_load(&resolver, img.natural_width(), &src))
            .flatten();
        cancel_timer(outcome);
    };
    let on_error = move |_| {
        cancel_timer(resolution.try_update(|r| r.on_error()).flatten());
    };

    let loaded = Memo::new(move |_| resolution.with(|r| r.state() == FaviconState::Loaded));
    let show_img = Memo::new(move |_| !resolution.with(|r| r.shows_fallback()));
    let show_glyph = Memo::new(move |_| resolution.with(|r| r.shows_fallback()));

    let background = plan.background.clone();
    let icon_style = move || {
        if loaded.get() {
            "background: transparent;".to_string()
        } else {
            format!("background: {};", background)
        }
    };

    let card_class = {
        let item_ref = item_ref.clone();
        move || {
            let mut class = String::from("app-card");
            if dnd.is_dragging_item(&item_ref) {
                class.push_str(" dragging");
            }
            if dnd.is_item_highlighted(&item_ref) {
                class.push_str(" drag-over-target");
            }
            class
        }
    };

    let on_context_menu = {
        let section = item_ref.section.clone();
        let name = item.name.clone();
        move |ev: MouseEvent| {
            ev.prevent_default();
            let confirmed = window()
                .confirm_with_message(&format!("Remove \"{}\" from {}?", name, section))
                .unwrap_or(false);
            if confirmed {
                ctx.mutate(|d| d.remove_item(&section, &name));
            }
        }
    };

    let apply = move |intent: ReorderIntent| on_intent.run(intent);
    let has_src = plan.src.is_some();
    let src = plan.src.clone().unwrap_or_default();
    let glyph = plan.glyph.clone();

    view! {
        <a
            class=card_class
            href=item.url.clone()
            target="_blank"
            rel="noopener noreferrer"
            title=item.url.clone()
            draggable=move || if draggable.get() { "true" } else { "false" }
            on:dragstart=make_on_item_dragstart(dnd, item_ref.clone())
            on:dragenter=make_on_item_dragenter(dnd, item_ref.clone())
            on:dragover=make_on_item_dragover(dnd)
            on:dragleave=make_on_item_dragleave(dnd, item_ref.clone())
            on:drop=make_on_item_drop(dnd, item_ref.clone(), apply)
            on:dragend=make_on_dragend(dnd)
            on:contextmenu=on_context_menu
        >
            <div class="app-icon" style=icon_style>
                <Show when=move || has_src && show_img.get()>
                    <img
                        class=move || if loaded.get() { "favicon loaded" } else { "favicon" }
                        src=src.clone()
                        alt=""
                        draggable="false"
                        on:load=on_load.clone()
                        on:error=on_error
                    />
                </Show>
                <Show when=move || show_glyph.get()>
                    {glyph_view(&glyph)}
                </Show>
            </div>
            <span class="app-label">{item.name.clone()}</span>
        </a>
    }
}
