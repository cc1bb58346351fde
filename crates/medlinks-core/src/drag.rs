//! Drag-Reorder State Machine
//!
//! Tracks one drag session at a time (item or section), the set of
//! highlighted drop targets, and turns valid drops into reorder intents.
//! All transitions are synchronous; the UI calls them from DOM drag events.

use serde::{Deserialize, Serialize};

/// Position of an item card: owning section plus index within it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub section: String,
    pub index: usize,
}

impl ItemRef {
    pub fn new(section: impl Into<String>, index: usize) -> Self {
        Self {
            section: section.into(),
            index,
        }
    }
}

/// Data carried on the native drag transfer, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragPayload {
    Item { section: String, index: usize },
    Section { title: String },
}

impl DragPayload {
    /// Parse a transfer string. Anything unrecognized is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Requested position change, consumed by [`crate::Dashboard::apply_intent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderIntent {
    Items { section: String, from: usize, to: usize },
    Sections { source: String, target: String },
}

/// Current drag session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragKind {
    #[default]
    None,
    Item(ItemRef),
    Section(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Item(ItemRef),
    Section(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragMachine {
    session: DragKind,
    highlighted: Vec<Target>,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &DragKind {
        &self.session
    }

    pub fn is_item_drag(&self) -> bool {
        matches!(self.session, DragKind::Item(_))
    }

    pub fn is_section_drag(&self) -> bool {
        matches!(self.session, DragKind::Section(_))
    }

    pub fn is_dragging_item(&self, item: &ItemRef) -> bool {
        matches!(&self.session, DragKind::Item(src) if src == item)
    }

    pub fn is_dragging_section(&self, title: &str) -> bool {
        matches!(&self.session, DragKind::Section(src) if src == title)
    }

    pub fn is_item_highlighted(&self, item: &ItemRef) -> bool {
        self.highlighted.iter().any(|t| matches!(t, Target::Item(i) if i == item))
    }

    pub fn is_section_highlighted(&self, title: &str) -> bool {
        self.highlighted.iter().any(|t| matches!(t, Target::Section(s) if s == title))
    }

    pub fn has_highlights(&self) -> bool {
        !self.highlighted.is_empty()
    }

    fn highlight(&mut self, target: Target) {
        if !self.highlighted.contains(&target) {
            self.highlighted.push(target);
        }
    }

    fn unhighlight(&mut self, target: &Target) {
        self.highlighted.retain(|t| t != target);
    }

    // ========================
    // Item drag
    // ========================

    /// Begin dragging a card. Returns the payload to put on the transfer.
    pub fn start_item(&mut self, source: ItemRef) -> DragPayload {
        log::debug!("[DND] Item drag start: {}#{}", source.section, source.index);
        let payload = DragPayload::Item {
            section: source.section.clone(),
            index: source.index,
        };
        self.session = DragKind::Item(source);
        self.highlighted.clear();
        payload
    }

    /// Pointer entered a card. Highlights it if it is a valid target.
    pub fn enter_item(&mut self, target: &ItemRef) -> bool {
        let DragKind::Item(src) = &self.session else {
            return false;
        };
        if src == target || src.section != target.section {
            return false;
        }
        self.highlight(Target::Item(target.clone()));
        true
    }

    /// Pointer left a card. `still_inside` is true when it moved to a
    /// descendant of that card, in which case the highlight stays.
    pub fn leave_item(&mut self, target: &ItemRef, still_inside: bool) {
        if still_inside || !self.is_item_drag() {
            return;
        }
        self.unhighlight(&Target::Item(target.clone()));
    }

    /// Drop on a card. Returns an intent only for a same-section move
    /// carried by a well-formed item payload.
    pub fn drop_on_item(&mut self, target: &ItemRef, raw_payload: &str) -> Option<ReorderIntent> {
        if !self.is_item_drag() {
            return None;
        }
        self.unhighlight(&Target::Item(target.clone()));

        let Some(DragPayload::Item { section, index }) = DragPayload::parse(raw_payload) else {
            log::debug!("[DND] Ignoring non-item payload on card drop");
            return None;
        };
        if section != target.section || index == target.index {
            return None;
        }
        log::debug!("[DND] Drop item {}#{} -> #{}", section, index, target.index);
        Some(ReorderIntent::Items {
            section,
            from: index,
            to: target.index,
        })
    }

    // ========================
    // Section drag
    // ========================

    /// Begin dragging a section by its handle
    pub fn start_section(&mut self, title: &str) -> DragPayload {
        log::debug!("[DND] Section drag start: {}", title);
        self.session = DragKind::Section(title.to_string());
        self.highlighted.clear();
        DragPayload::Section {
            title: title.to_string(),
        }
    }

    pub fn enter_section(&mut self, title: &str) -> bool {
        let DragKind::Section(src) = &self.session else {
            return false;
        };
        if src == title {
            return false;
        }
        self.highlight(Target::Section(title.to_string()));
        true
    }

    pub fn leave_section(&mut self, title: &str, still_inside: bool) {
        if still_inside || !self.is_section_drag() {
            return;
        }
        self.unhighlight(&Target::Section(title.to_string()));
    }

    /// Drop on a section container. Only section payloads produce an intent.
    pub fn drop_on_section(&mut self, title: &str, raw_payload: &str) -> Option<ReorderIntent> {
        self.unhighlight(&Target::Section(title.to_string()));

        let Some(DragPayload::Section { title: source }) = DragPayload::parse(raw_payload) else {
            return None;
        };
        if source == title {
            return None;
        }
        log::debug!("[DND] Drop section {} -> {}", source, title);
        Some(ReorderIntent::Sections {
            source,
            target: title.to_string(),
        })
    }

    // ========================
    // End / cancel
    // ========================

    /// Drag ended by drop or cancel: clear the session and every highlight
    pub fn end(&mut self) {
        self.session = DragKind::None;
        self.highlighted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(section: &str, index: usize) -> ItemRef {
        ItemRef::new(section, index)
    }

    #[test]
    fn test_payload_tagged_json() {
        let p = DragPayload::Item {
            section: "Work".to_string(),
            index: 2,
        };
        assert_eq!(p.to_json(), r#"{"type":"item","section":"Work","index":2}"#);
        assert_eq!(DragPayload::parse(&p.to_json()), Some(p));

        let s = DragPayload::parse(r#"{"type":"section","title":"Home"}"#);
        assert_eq!(s, Some(DragPayload::Section { title: "Home".to_string() }));
    }

    #[test]
    fn test_payload_rejects_foreign() {
        assert_eq!(DragPayload::parse(""), None);
        assert_eq!(DragPayload::parse("https://example.com"), None);
        assert_eq!(DragPayload::parse(r#"{"type":"file","name":"x"}"#), None);
        assert_eq!(DragPayload::parse(r#"{"type":"item","section":"Work","index":"2"}"#), None);
    }

    #[test]
    fn test_item_drop_same_section() {
        let mut m = DragMachine::new();
        let payload = m.start_item(item("Work", 0)).to_json();

        assert!(m.enter_item(&item("Work", 2)));
        assert!(m.is_item_highlighted(&item("Work", 2)));

        let intent = m.drop_on_item(&item("Work", 2), &payload);
        assert_eq!(
            intent,
            Some(ReorderIntent::Items {
                section: "Work".to_string(),
                from: 0,
                to: 2
            })
        );
        assert!(!m.is_item_highlighted(&item("Work", 2)));
        m.end();
        assert_eq!(m.session(), &DragKind::None);
    }

    #[test]
    fn test_item_drop_cross_section_rejected() {
        let mut m = DragMachine::new();
        let payload = m.start_item(item("Work", 0)).to_json();
        assert!(!m.enter_item(&item("Home", 0)));
        assert_eq!(m.drop_on_item(&item("Home", 0), &payload), None);
    }

    #[test]
    fn test_item_drop_on_self_is_noop() {
        let mut m = DragMachine::new();
        let payload = m.start_item(item("Work", 1)).to_json();
        assert!(!m.enter_item(&item("Work", 1)));
        assert_eq!(m.drop_on_item(&item("Work", 1), &payload), None);
    }

    #[test]
    fn test_item_drop_malformed_payload() {
        let mut m = DragMachine::new();
        m.start_item(item("Work", 0));
        assert_eq!(m.drop_on_item(&item("Work", 1), "garbage"), None);
        assert_eq!(m.drop_on_item(&item("Work", 1), r#"{"type":"section","title":"Work"}"#), None);
    }

    #[test]
    fn test_leave_into_child_keeps_highlight() {
        let mut m = DragMachine::new();
        m.start_item(item("Work", 0));
        m.enter_item(&item("Work", 1));
        m.leave_item(&item("Work", 1), true);
        assert!(m.is_item_highlighted(&item("Work", 1)));
        m.leave_item(&item("Work", 1), false);
        assert!(!m.is_item_highlighted(&item("Work", 1)));
    }

    #[test]
    fn test_end_clears_all_highlights() {
        let mut m = DragMachine::new();
        m.start_item(item("Work", 0));
        m.enter_item(&item("Work", 1));
        m.enter_item(&item("Work", 2));
        m.end();
        assert!(!m.has_highlights());
        assert!(!m.is_item_drag());
    }

    #[test]
    fn test_section_drag_suppresses_item_handling() {
        let mut m = DragMachine::new();
        let payload = m.start_section("Work").to_json();
        assert!(!m.enter_item(&item("Home", 1)));
        assert_eq!(m.drop_on_item(&item("Home", 1), &payload), None);

        assert!(m.enter_section("Home"));
        assert!(!m.enter_section("Work"));
        assert_eq!(
            m.drop_on_section("Home", &payload),
            Some(ReorderIntent::Sections {
                source: "Work".to_string(),
                target: "Home".to_string()
            })
        );
    }

    #[test]
    fn test_section_drop_rejects_item_payload_and_self() {
        let mut m = DragMachine::new();
        let item_payload = m.start_item(item("Work", 0)).to_json();
        assert!(!m.enter_section("Home"));
        assert_eq!(m.drop_on_section("Home", &item_payload), None);

        m.end();
        let payload = m.start_section("Home").to_json();
        assert_eq!(m.drop_on_section("Home", &payload), None);
    }

    #[test]
    fn test_new_drag_replaces_previous_session() {
        let mut m = DragMachine::new();
        m.start_item(item("Work", 0));
        m.enter_item(&item("Work", 1));
        m.start_section("Work");
        assert!(m.is_section_drag());
        assert!(!m.has_highlights());
    }
}
