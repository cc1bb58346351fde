//! Dashboard Controller
//!
//! Owns the live collection, the UI-state maps and the listener registry.
//! Every mutation is applied to a candidate copy, persisted, and only then
//! committed, so a failed write leaves both memory and storage unchanged.

use crate::drag::ReorderIntent;
use crate::events::{DashboardEvent, Listener, ListenerId, Listeners};
use crate::model::{self, Collection, Item, Section};
use crate::store::{keys, FlagMap, KeyValueBackend, SectionStore, Theme};

/// Render collaborator: receives the sections to draw and their collapse state
pub trait RenderTarget {
    fn render(&mut self, sections: &[Section], collapsed: &FlagMap);
}

/// Which UI-state map a flag write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagKind {
    Collapsed,
    Visible,
}

impl FlagKind {
    fn key(self) -> &'static str {
        match self {
            FlagKind::Collapsed => keys::COLLAPSED,
            FlagKind::Visible => keys::VISIBLE,
        }
    }
}

pub struct Dashboard<B> {
    store: SectionStore<B>,
    sections: Collection,
    collapsed: FlagMap,
    visible: FlagMap,
    theme: Theme,
    listeners: Listeners,
}

impl<B: KeyValueBackend> Dashboard<B> {
    /// Load collection, UI-state maps and theme from `store`
    pub fn open(store: SectionStore<B>) -> Self {
        let sections = store.load();
        let collapsed = store.load_flags(keys::COLLAPSED);
        let visible = store.load_flags(keys::VISIBLE);
        let theme = store.load_theme();
        log::info!("[MODEL] Opened dashboard with {} sections", sections.len());
        Self {
            store,
            sections,
            collapsed,
            visible,
            theme,
            listeners: Listeners::default(),
        }
    }

    pub fn store(&self) -> &SectionStore<B> {
        &self.store
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn collapsed_states(&self) -> &FlagMap {
        &self.collapsed
    }

    pub fn visible_states(&self) -> &FlagMap {
        &self.visible
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Re-read the collection from the store
    pub fn reload(&mut self) {
        self.sections = self.store.load();
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ========================
    // Collection mutations
    // ========================

    fn commit(&mut self, op: impl FnOnce(&mut Collection) -> bool) -> bool {
        let mut candidate = self.sections.clone();
        if !op(&mut candidate) {
            return false;
        }
        match self.store.save(&candidate) {
            Ok(()) => {
                self.sections = candidate;
                true
            }
            Err(e) => {
                log::warn!("[MODEL] Mutation dropped, save failed: {}", e);
                false
            }
        }
    }

    /// Append an empty section. No-op if the title exists.
    pub fn add_section(&mut self, title: &str) -> bool {
        let ok = self.commit(|c| model::insert_section(c, title));
        if ok {
            self.listeners.emit(&DashboardEvent::SectionAdded { title: title.to_string() });
        }
        ok
    }

    pub fn remove_section(&mut self, title: &str) -> bool {
        let ok = self.commit(|c| model::remove_section(c, title));
        if ok {
            self.listeners.emit(&DashboardEvent::SectionRemoved { title: title.to_string() });
        }
        ok
    }

    pub fn add_item(&mut self, section: &str, item: Item) -> bool {
        let name = item.name.clone();
        let ok = self.commit(|c| model::push_item(c, section, item));
        if ok {
            self.listeners.emit(&DashboardEvent::ItemAdded {
                section: section.to_string(),
                name,
            });
        }
        ok
    }

    pub fn remove_item(&mut self, section: &str, name: &str) -> bool {
        let ok = self.commit(|c| model::remove_item(c, section, name));
        if ok {
            self.listeners.emit(&DashboardEvent::ItemRemoved {
                section: section.to_string(),
                name: name.to_string(),
            });
        }
        ok
    }

    pub fn reorder_items(&mut self, section: &str, from: usize, to: usize) -> bool {
        let ok = self.commit(|c| model::move_item(c, section, from, to));
        if ok {
            self.listeners.emit(&DashboardEvent::ItemReordered {
                section: section.to_string(),
                from,
                to,
            });
        }
        ok
    }

    pub fn reorder_sections(&mut self, from: usize, to: usize) -> bool {
        let Some(source) = self.sections.get(from).map(|s| s.title.clone()) else {
            return false;
        };
        // `to` past the end lands after the last section
        let target = self
            .sections
            .get(to.min(self.sections.len() - 1))
            .map(|s| s.title.clone())
            .unwrap_or_default();
        let ok = self.commit(|c| model::move_section(c, from, to));
        if ok {
            self.listeners.emit(&DashboardEvent::SectionReordered { source, target, from, to });
        }
        ok
    }

    /// Apply a reorder intent from the drag machine.
    /// Section intents are resolved from titles to current indices.
    pub fn apply_intent(&mut self, intent: &ReorderIntent) -> bool {
        match intent {
            ReorderIntent::Items { section, from, to } => self.reorder_items(section, *from, *to),
            ReorderIntent::Sections { source, target } => {
                let from = model::position_of(&self.sections, source);
                let to = model::position_of(&self.sections, target);
                match (from, to) {
                    (Some(from), Some(to)) => self.reorder_sections(from, to),
                    _ => {
                        log::debug!("[MODEL] Ignoring section intent {} -> {}", source, target);
                        false
                    }
                }
            }
        }
    }

    // ========================
    // UI state
    // ========================

    fn flags_mut(&mut self, kind: FlagKind) -> &mut FlagMap {
        match kind {
            FlagKind::Collapsed => &mut self.collapsed,
            FlagKind::Visible => &mut self.visible,
        }
    }

    fn commit_flags(&mut self, kind: FlagKind, update: impl FnOnce(&mut FlagMap)) -> bool {
        let mut candidate = self.flags_mut(kind).clone();
        update(&mut candidate);
        match self.store.save_flags(kind.key(), &candidate) {
            Ok(()) => {
                *self.flags_mut(kind) = candidate;
                true
            }
            Err(e) => {
                log::warn!("[MODEL] Failed to save `{}`: {}", kind.key(), e);
                false
            }
        }
    }

    /// Visible unless explicitly hidden
    pub fn is_visible(&self, title: &str) -> bool {
        self.visible.get(title).copied() != Some(false)
    }

    pub fn is_collapsed(&self, title: &str) -> bool {
        self.collapsed.get(title).copied().unwrap_or(false)
    }

    /// Hide a section from rendering. Its data stays in the collection.
    pub fn hide_section(&mut self, title: &str) -> bool {
        if model::position_of(&self.sections, title).is_none() {
            return false;
        }
        let ok = self.commit_flags(FlagKind::Visible, |m| {
            m.insert(title.to_string(), false);
        });
        if ok {
            self.listeners.emit(&DashboardEvent::SectionHidden { title: title.to_string() });
        }
        ok
    }

    /// Flip the collapsed flag. Returns the new state, or None if not saved.
    pub fn toggle_collapsed(&mut self, title: &str) -> Option<bool> {
        let collapsed = !self.is_collapsed(title);
        let ok = self.commit_flags(FlagKind::Collapsed, |m| {
            m.insert(title.to_string(), collapsed);
        });
        if !ok {
            return None;
        }
        self.listeners.emit(&DashboardEvent::SectionCollapseToggled {
            title: title.to_string(),
            collapsed,
        });
        Some(collapsed)
    }

    /// Default sections the user has explicitly hidden
    pub fn hidden_defaults(&self) -> Vec<&Section> {
        self.store
            .defaults()
            .iter()
            .filter(|s| self.visible.get(&s.title).copied() == Some(false))
            .collect()
    }

    /// Re-add (if missing) and un-hide a default section.
    /// Both writes land or neither does.
    pub fn show_default_section(&mut self, title: &str) -> bool {
        let Some(default) = self.store.default_section(title) else {
            return false;
        };
        let mut sections = self.sections.clone();
        let readded = model::insert_section_copy(&mut sections, &default);
        if readded {
            if let Err(e) = self.store.save(&sections) {
                log::warn!("[MODEL] Failed to re-add '{}': {}", title, e);
                return false;
            }
        }

        let mut visible = self.visible.clone();
        visible.insert(title.to_string(), true);
        if let Err(e) = self.store.save_flags(FlagKind::Visible.key(), &visible) {
            log::warn!("[MODEL] Failed to show '{}': {}", title, e);
            if readded {
                if let Err(e) = self.store.save(&self.sections) {
                    log::error!("[MODEL] Could not restore sections after failed show: {}", e);
                }
            }
            return false;
        }

        self.sections = sections;
        self.visible = visible;
        self.reload();
        self.listeners.emit(&DashboardEvent::SectionShown { title: title.to_string() });
        true
    }

    pub fn set_theme(&mut self, theme: Theme) -> bool {
        match self.store.save_theme(theme) {
            Ok(()) => {
                self.theme = theme;
                true
            }
            Err(e) => {
                log::warn!("[MODEL] Failed to save theme: {}", e);
                false
            }
        }
    }

    /// Switch between light and dark, returning the theme now in effect
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        self.theme
    }

    // ========================
    // Queries
    // ========================

    /// Sections not explicitly hidden, in collection order
    pub fn visible_sections(&self) -> Collection {
        self.sections
            .iter()
            .filter(|s| self.is_visible(&s.title))
            .cloned()
            .collect()
    }

    /// Visible sections narrowed by a search query. Read-only.
    ///
    /// Items match on `name + " " + url`; a section is kept if any item
    /// matches or its title does. Empty query returns all visible sections.
    pub fn filter(&self, query: &str) -> Collection {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.visible_sections();
        }
        self.sections
            .iter()
            .filter(|s| self.is_visible(&s.title))
            .filter_map(|s| {
                let items: Vec<Item> = s.items.iter().filter(|i| i.matches(&q)).cloned().collect();
                if items.is_empty() && !s.title.to_lowercase().contains(&q) {
                    None
                } else {
                    Some(Section::with_items(s.title.clone(), items))
                }
            })
            .collect()
    }

    /// Push the current view (filtered by `query`) to a render collaborator
    pub fn render_to(&self, target: &mut impl RenderTarget, query: &str) {
        target.render(&self.filter(query), &self.collapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::store::MemoryBackend;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn defaults() -> Vec<Section> {
        vec![
            Section::with_items(
                "Work",
                vec![
                    Item::new("Mail", "https://mail.example"),
                    Item::new("Docs", "https://docs.example"),
                    Item::new("Chat", "https://chat.example"),
                ],
            ),
            Section::with_items("Home", vec![Item::new("News", "https://news.example")]),
        ]
    }

    fn dashboard() -> Dashboard<MemoryBackend> {
        Dashboard::open(SectionStore::with_defaults(MemoryBackend::new(), defaults()))
    }

    fn record<B: KeyValueBackend>(d: &mut Dashboard<B>) -> Rc<RefCell<Vec<DashboardEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        d.subscribe(Box::new(move |e: &DashboardEvent| sink.borrow_mut().push(e.clone())));
        seen
    }

    #[test]
    fn test_add_section_persists_and_rejects_duplicate() {
        let mut d = dashboard();
        assert!(d.add_section("Later"));
        assert!(!d.add_section("Later"));
        assert_eq!(d.store().load().last().unwrap(), &Section::new("Later"));
    }

    #[test]
    fn test_add_and_remove_item() {
        let mut d = dashboard();
        assert!(d.add_item("Home", Item::new("Maps", "https://maps.example")));
        assert!(!d.add_item("Nope", Item::new("Maps", "https://maps.example")));
        assert!(d.remove_item("Home", "News"));
        assert!(!d.remove_item("Home", "News"));

        let stored = d.store().load();
        assert_eq!(stored[1].items, vec![Item::new("Maps", "https://maps.example")]);
    }

    #[test]
    fn test_remove_section() {
        let mut d = dashboard();
        assert!(d.add_section("Temp"));
        assert!(d.remove_section("Temp"));
        assert!(!d.remove_section("Temp"));
        assert_eq!(d.sections().len(), 2);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut d = dashboard();
        d.store().backend().set_read_only(true);
        let before = d.sections().to_vec();

        assert!(!d.reorder_items("Work", 0, 2));
        assert!(!d.add_section("Blocked"));
        assert!(!d.hide_section("Home"));
        assert_eq!(d.sections(), before.as_slice());
        assert!(d.is_visible("Home"));
    }

    #[test]
    fn test_section_intent_resolves_titles() {
        let mut d = dashboard();
        let seen = record(&mut d);
        let intent = ReorderIntent::Sections {
            source: "Home".to_string(),
            target: "Work".to_string(),
        };
        assert!(d.apply_intent(&intent));
        assert_eq!(d.sections()[0].title, "Home");
        assert_eq!(
            *seen.borrow(),
            vec![DashboardEvent::SectionReordered {
                source: "Home".to_string(),
                target: "Work".to_string(),
                from: 1,
                to: 0
            }]
        );

        let unknown = ReorderIntent::Sections {
            source: "Ghost".to_string(),
            target: "Work".to_string(),
        };
        assert!(!d.apply_intent(&unknown));
    }

    #[test]
    fn test_toggle_collapsed_persists() {
        let mut d = dashboard();
        let seen = record(&mut d);
        assert_eq!(d.toggle_collapsed("Work"), Some(true));
        assert_eq!(d.toggle_collapsed("Work"), Some(false));
        assert_eq!(d.store().load_flags(keys::COLLAPSED).get("Work"), Some(&false));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_hide_and_show_default_section() {
        let mut d = dashboard();
        assert!(d.hidden_defaults().is_empty());
        assert!(d.hide_section("Home"));
        assert!(!d.hide_section("Ghost"));
        assert_eq!(d.hidden_defaults()[0].title, "Home");
        assert_eq!(d.visible_sections().len(), 1);

        assert!(d.show_default_section("Home"));
        assert!(d.is_visible("Home"));
        assert!(d.hidden_defaults().is_empty());
        assert!(!d.show_default_section("Ghost"));
    }

    #[test]
    fn test_show_default_readds_removed_section_as_copy() {
        let mut d = dashboard();
        assert!(d.remove_section("Home"));
        assert!(d.show_default_section("Home"));
        assert_eq!(d.sections().iter().filter(|s| s.title == "Home").count(), 1);

        assert!(d.add_item("Home", Item::new("Extra", "https://extra.example")));
        assert_eq!(d.store().default_section("Home").unwrap().items.len(), 1);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_read_only() {
        let mut d = dashboard();
        let before = d.store().backend().raw(keys::SECTIONS);

        let hits = d.filter("  DOCS ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].items, vec![Item::new("Docs", "https://docs.example")]);

        let by_title = d.filter("home");
        assert_eq!(by_title.len(), 1);
        assert!(by_title[0].items.is_empty());

        assert_eq!(d.filter("").len(), 2);
        assert!(d.filter("zzz").is_empty());

        assert!(d.hide_section("Home"));
        assert!(d.filter("news").is_empty());
        assert_eq!(d.store().load(), defaults());
        assert_eq!(d.store().backend().raw(keys::SECTIONS), before);
    }

    #[test]
    fn test_remove_item_emits_event() {
        let mut d = dashboard();
        let seen = record(&mut d);
        assert!(d.remove_item("Home", "News"));
        assert!(!d.remove_item("Home", "News"));
        assert_eq!(
            *seen.borrow(),
            vec![DashboardEvent::ItemRemoved {
                section: "Home".to_string(),
                name: "News".to_string()
            }]
        );
    }

    /// Memory backend that can refuse writes to one key
    struct RejectingBackend {
        inner: MemoryBackend,
        rejected: Cell<Option<&'static str>>,
    }

    impl KeyValueBackend for RejectingBackend {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.rejected.get() == Some(key) {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "rejected".to_string(),
                });
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_show_default_rolls_back_when_visibility_save_fails() {
        let backend = RejectingBackend {
            inner: MemoryBackend::new(),
            rejected: Cell::new(None),
        };
        let mut d = Dashboard::open(SectionStore::with_defaults(backend, defaults()));
        assert!(d.hide_section("Home"));
        assert!(d.remove_section("Home"));
        let seen = record(&mut d);

        d.store().backend().rejected.set(Some(keys::VISIBLE));
        assert!(!d.show_default_section("Home"));

        assert!(!d.sections().iter().any(|s| s.title == "Home"));
        assert!(!d.is_visible("Home"));
        let stored: Vec<Section> =
            serde_json::from_str(&d.store().backend().inner.raw(keys::SECTIONS).unwrap()).unwrap();
        assert!(!stored.iter().any(|s| s.title == "Home"));
        assert_eq!(d.store().load_flags(keys::VISIBLE).get("Home"), Some(&false));
        assert!(seen.borrow().is_empty());

        d.store().backend().rejected.set(None);
        assert!(d.show_default_section("Home"));
        assert!(d.is_visible("Home"));
    }

    #[test]
    fn test_collapse_and_visibility_are_separate_maps() {
        let mut d = dashboard();
        assert_eq!(d.toggle_collapsed("Home"), Some(true));
        assert!(d.visible_states().is_empty());
        assert!(d.store().load_flags(keys::VISIBLE).is_empty());

        assert!(d.hide_section("Work"));
        assert_eq!(d.collapsed_states().len(), 1);
        assert_eq!(d.store().load_flags(keys::COLLAPSED).get("Work"), None);
    }

    #[test]
    fn test_section_reorder_past_end_names_last_target() {
        let mut d = dashboard();
        let seen = record(&mut d);
        assert!(d.reorder_sections(0, 9));
        assert!(!d.reorder_sections(5, 0));
        assert_eq!(
            *seen.borrow(),
            vec![DashboardEvent::SectionReordered {
                source: "Work".to_string(),
                target: "Home".to_string(),
                from: 0,
                to: 9
            }]
        );
    }

    #[test]
    fn test_theme_toggle() {
        let mut d = dashboard();
        assert_eq!(d.theme(), Theme::Dark);
        assert_eq!(d.toggle_theme(), Theme::Light);
        assert_eq!(d.store().load_theme(), Theme::Light);
    }

    struct Captured(Vec<String>, usize);

    impl RenderTarget for Captured {
        fn render(&mut self, sections: &[Section], collapsed: &FlagMap) {
            self.0 = sections.iter().map(|s| s.title.clone()).collect();
            self.1 = collapsed.len();
        }
    }

    #[test]
    fn test_render_to_excludes_hidden() {
        let mut d = dashboard();
        d.hide_section("Work");
        d.toggle_collapsed("Home");
        let mut target = Captured(Vec::new(), 0);
        d.render_to(&mut target, "");
        assert_eq!(target.0, vec!["Home".to_string()]);
        assert_eq!(target.1, 1);
    }
}
