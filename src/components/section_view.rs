//! Section View Component
//!
//! One collapsible section: a header with a drag handle and a hide button,
//! and a grid of cards. The whole container is a section drop target.

use leptos::prelude::*;
use leptos_dragdrop::{
    make_on_dragend, make_on_section_dragenter, make_on_section_dragleave, make_on_section_dragover,
    make_on_section_dragstart, make_on_section_drop, DndSignals,
};
use medlinks_core::{ItemRef, ReorderIntent, Section};

use super::{AppCard, ConfirmButton};
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn SectionView(section: Section, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let title = section.title.clone();

    let collapsed = Memo::new({
        let title = title.clone();
        move |_| store.collapsed().read().get(&title).copied().unwrap_or(false)
    });
    // Rendered indices only match stored ones when nothing is filtered out
    let draggable = Signal::derive(move || store.query().read().trim().is_empty());

    let on_intent = Callback::new(move |intent: ReorderIntent| {
        ctx.mutate(|d| d.apply_intent(&intent));
    });
    let apply = move |intent: ReorderIntent| on_intent.run(intent);

    let container_class = {
        let title = title.clone();
        move || {
            let mut class = String::from("section-container");
            if collapsed.get() {
                class.push_str(" collapsed");
            }
            if dnd.is_dragging_section(&title) {
                class.push_str(" dragging");
            }
            if dnd.is_section_highlighted(&title) {
                class.push_str(" drag-over-target");
            }
            class
        }
    };

    let toggle = {
        let title = title.clone();
        move |_| {
            ctx.mutate(|d| d.toggle_collapsed(&title));
        }
    };

    let hide = {
        let title = title.clone();
        Callback::new(move |_: ()| {
            ctx.mutate(|d| d.hide_section(&title));
        })
    };

    let cards = section
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let item_ref = ItemRef {
                section: title.clone(),
                index,
            };
            view! {
                <AppCard item=item item_ref=item_ref dnd=dnd on_intent=on_intent draggable=draggable />
            }
        })
        .collect_view();

    view! {
        <section
            class=container_class
            on:dragenter=make_on_section_dragenter(dnd, title.clone())
            on:dragover=make_on_section_dragover(dnd)
            on:dragleave=make_on_section_dragleave(dnd, title.clone())
            on:drop=make_on_section_drop(dnd, title.clone(), apply)
        >
            <div class="section-header" on:click=toggle>
                <span
                    class="drag-handle"
                    title="Drag to reorder"
                    draggable=move || if draggable.get() { "true" } else { "false" }
                    on:click=|ev| ev.stop_propagation()
                    on:dragstart=make_on_section_dragstart(dnd, title.clone())
                    on:dragend=make_on_dragend(dnd)
                >
                    <i class="ph ph-dots-six-vertical"></i>
                </span>
                <h2 class="section-title">{title.clone()}</h2>
                <i class=move || {
                    if collapsed.get() { "ph ph-caret-right section-caret" } else { "ph ph-caret-down section-caret" }
                }></i>
                <ConfirmButton button_class="section-hide-btn" title="Hide section" prompt="Hide?" on_confirm=hide />
            </div>
            <div class="apps-grid">{cards}</div>
        </section>
    }
}
