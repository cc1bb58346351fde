//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for Leptos, backed by the medlinks-core drag machine.
//! The payload travels on the `DataTransfer` as tagged JSON text; the
//! machine lives in a signal so cards and sections can react to highlights.

use leptos::prelude::*;
use medlinks_core::{DragMachine, ItemRef, ReorderIntent};
use wasm_bindgen::JsCast;
use web_sys::DragEvent;

const PAYLOAD_MIME: &str = "text/plain";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub machine: RwSignal<DragMachine>,
}

impl DndSignals {
    /// Card is the source of the current item drag
    pub fn is_dragging_item(&self, item: &ItemRef) -> bool {
        self.machine.with(|m| m.is_dragging_item(item))
    }

    pub fn is_item_highlighted(&self, item: &ItemRef) -> bool {
        self.machine.with(|m| m.is_item_highlighted(item))
    }

    pub fn is_dragging_section(&self, title: &str) -> bool {
        self.machine.with(|m| m.is_dragging_section(title))
    }

    pub fn is_section_highlighted(&self, title: &str) -> bool {
        self.machine.with(|m| m.is_section_highlighted(title))
    }

    fn item_drag_active(&self) -> bool {
        self.machine.with_untracked(|m| m.is_item_drag())
    }

    fn section_drag_active(&self) -> bool {
        self.machine.with_untracked(|m| m.is_section_drag())
    }
}

pub fn create_dnd_signals() -> DndSignals {
    DndSignals {
        machine: RwSignal::new(DragMachine::new()),
    }
}

// ========================
// DataTransfer helpers
// ========================

fn write_payload(ev: &DragEvent, json: &str) {
    if let Some(dt) = ev.data_transfer() {
        dt.set_effect_allowed("move");
        if dt.set_data(PAYLOAD_MIME, json).is_err() {
            log::warn!("[DND] Could not write drag payload");
        }
    }
}

fn read_payload(ev: &DragEvent) -> String {
    ev.data_transfer()
        .and_then(|dt| dt.get_data(PAYLOAD_MIME).ok())
        .unwrap_or_default()
}

fn allow_move(ev: &DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }
}

/// Pointer moved into a descendant of the element the listener is on
fn moved_within(ev: &DragEvent) -> bool {
    let Some(current) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok()) else {
        return false;
    };
    ev.related_target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|related| current.contains(Some(&related)))
}

/// End drag operation, clearing every highlight
pub fn end_drag(dnd: &DndSignals) {
    dnd.machine.update(|m| m.end());
}

// ========================
// Item cards
// ========================

/// Start dragging a card
pub fn make_on_item_dragstart(dnd: DndSignals, item: ItemRef) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        // Keep the section container from treating this as its own drag
        ev.stop_propagation();
        if let Some(payload) = dnd.machine.try_update(|m| m.start_item(item.clone())) {
            write_payload(&ev, &payload.to_json());
        }
    }
}

pub fn make_on_item_dragenter(dnd: DndSignals, item: ItemRef) -> impl Fn(DragEvent) + Clone + 'static {
    move |_ev: DragEvent| {
        if dnd.item_drag_active() {
            dnd.machine.update(|m| {
                m.enter_item(&item);
            });
        }
    }
}

/// Accept the drop only while an item drag is active
pub fn make_on_item_dragover(dnd: DndSignals) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if dnd.item_drag_active() {
            allow_move(&ev);
        }
    }
}

pub fn make_on_item_dragleave(dnd: DndSignals, item: ItemRef) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if dnd.item_drag_active() {
            let inside = moved_within(&ev);
            dnd.machine.update(|m| m.leave_item(&item, inside));
        }
    }
}

/// Drop on a card. Non-item drags fall through to the section container.
pub fn make_on_item_drop<F>(dnd: DndSignals, item: ItemRef, on_intent: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(ReorderIntent) + Clone + 'static,
{
    move |ev: DragEvent| {
        if !dnd.item_drag_active() {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let raw = read_payload(&ev);
        // The source card may be re-rendered before its dragend fires
        let intent = dnd.machine.try_update(|m| {
            let intent = m.drop_on_item(&item, &raw);
            m.end();
            intent
        });
        if let Some(Some(intent)) = intent {
            log::debug!("[DND] Item intent: {:?}", intent);
            on_intent(intent);
        }
    }
}

/// Drop or cancel on either a card or a section handle
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| end_drag(&dnd)
}

// ========================
// Sections
// ========================

/// Start dragging a section from its handle, using the whole container
/// as the drag image
pub fn make_on_section_dragstart(dnd: DndSignals, title: String) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        let Some(payload) = dnd.machine.try_update(|m| m.start_section(&title)) else {
            return;
        };
        write_payload(&ev, &payload.to_json());

        let container = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".section-container").ok().flatten());
        if let (Some(dt), Some(container)) = (ev.data_transfer(), container) {
            dt.set_drag_image(&container, 10, 10);
        }
    }
}

pub fn make_on_section_dragenter(dnd: DndSignals, title: String) -> impl Fn(DragEvent) + Clone + 'static {
    move |_ev: DragEvent| {
        if dnd.section_drag_active() {
            dnd.machine.update(|m| {
                m.enter_section(&title);
            });
        }
    }
}

pub fn make_on_section_dragover(dnd: DndSignals) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if dnd.section_drag_active() {
            allow_move(&ev);
        }
    }
}

pub fn make_on_section_dragleave(dnd: DndSignals, title: String) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if dnd.section_drag_active() {
            let inside = moved_within(&ev);
            dnd.machine.update(|m| m.leave_section(&title, inside));
        }
    }
}

pub fn make_on_section_drop<F>(dnd: DndSignals, title: String, on_intent: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(ReorderIntent) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let raw = read_payload(&ev);
        let intent = dnd.machine.try_update(|m| {
            let intent = m.drop_on_section(&title, &raw);
            m.end();
            intent
        });
        if let Some(Some(intent)) = intent {
            log::debug!("[DND] Section intent: {:?}", intent);
            on_intent(intent);
        }
    }
}
