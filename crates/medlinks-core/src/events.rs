//! Dashboard Events
//!
//! Typed notifications emitted after a mutation has been persisted, plus a
//! small listener registry the controller owns.

/// Outbound notification for UI collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    SectionAdded { title: String },
    SectionRemoved { title: String },
    ItemAdded { section: String, name: String },
    ItemRemoved { section: String, name: String },
    ItemReordered { section: String, from: usize, to: usize },
    /// `source` moved from `from` to `to`, onto `target`
    SectionReordered {
        source: String,
        target: String,
        from: usize,
        to: usize,
    },
    SectionHidden { title: String },
    SectionShown { title: String },
    SectionCollapseToggled { title: String, collapsed: bool },
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&DashboardEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(lid, _)| *lid != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &DashboardEvent) {
        log::debug!("[MODEL] {:?}", event);
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_listeners_until_removed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        let sink = seen.clone();
        let id = listeners.add(Box::new(move |e: &DashboardEvent| sink.borrow_mut().push(e.clone())));

        let event = DashboardEvent::SectionHidden { title: "Home".to_string() };
        listeners.emit(&event);
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.emit(&event);

        assert_eq!(*seen.borrow(), vec![event]);
    }
}
