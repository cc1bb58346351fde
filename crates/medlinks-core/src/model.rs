//! Section/Item Model
//!
//! Persisted data structures and the in-memory mutation rules applied to
//! them. Every function here is pure over `&mut [Section]`; persistence and
//! event emission happen in [`crate::Dashboard`].

use serde::{Deserialize, Serialize};

/// A single shortcut card
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Display name, unique within its section
    pub name: String,
    /// Target URL
    pub url: String,
    /// Background color (hex, e.g. "#2b6cb0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Glyph identifier (e.g. "ph-notebook")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            color: None,
            icon: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Case-insensitive match against `name + " " + url`.
    /// `query` must already be lowercased.
    pub fn matches(&self, query: &str) -> bool {
        format!("{} {}", self.name, self.url)
            .to_lowercase()
            .contains(query)
    }
}

/// A named, ordered group of items
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// Unique key within the collection
    pub title: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Structural deep copy. The result shares nothing with `self`, so the
    /// default collection can hand out sections without being mutated later.
    pub fn deep_copy(&self) -> Self {
        Self {
            title: self.title.clone(),
            items: self.items.iter().cloned().collect(),
        }
    }
}

/// The complete persisted state: an ordered sequence of sections
pub type Collection = Vec<Section>;

// ========================
// Lookup
// ========================

pub fn position_of(sections: &[Section], title: &str) -> Option<usize> {
    sections.iter().position(|s| s.title == title)
}

fn find_mut<'a>(sections: &'a mut [Section], title: &str) -> Option<&'a mut Section> {
    sections.iter_mut().find(|s| s.title == title)
}

// ========================
// Mutations
// ========================

/// Append an empty section. Returns false if the title is already taken.
pub fn insert_section(sections: &mut Collection, title: &str) -> bool {
    if position_of(sections, title).is_some() {
        return false;
    }
    sections.push(Section::new(title));
    true
}

/// Append an existing section unless its title is taken.
pub fn insert_section_copy(sections: &mut Collection, section: &Section) -> bool {
    if position_of(sections, &section.title).is_some() {
        return false;
    }
    sections.push(section.deep_copy());
    true
}

/// Remove the first section with `title`.
pub fn remove_section(sections: &mut Collection, title: &str) -> bool {
    match position_of(sections, title) {
        Some(idx) => {
            sections.remove(idx);
            true
        }
        None => false,
    }
}

/// Append `item` to the named section.
pub fn push_item(sections: &mut [Section], section_title: &str, item: Item) -> bool {
    match find_mut(sections, section_title) {
        Some(sec) => {
            sec.items.push(item);
            true
        }
        None => false,
    }
}

/// Remove the first item named `item_name` from the named section.
pub fn remove_item(sections: &mut [Section], section_title: &str, item_name: &str) -> bool {
    let Some(sec) = find_mut(sections, section_title) else {
        return false;
    };
    match sec.items.iter().position(|i| i.name == item_name) {
        Some(idx) => {
            sec.items.remove(idx);
            true
        }
        None => false,
    }
}

/// Remove the element at `from` and reinsert it at `to`.
/// `to` past the end appends. Returns false if `from` is out of bounds.
pub fn move_within<T>(seq: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= seq.len() {
        return false;
    }
    let elem = seq.remove(from);
    let to = to.min(seq.len());
    seq.insert(to, elem);
    true
}

/// Reorder items inside one section.
pub fn move_item(sections: &mut [Section], section_title: &str, from: usize, to: usize) -> bool {
    match find_mut(sections, section_title) {
        Some(sec) => move_within(&mut sec.items, from, to),
        None => false,
    }
}

/// Reorder sections inside the collection.
pub fn move_section(sections: &mut Collection, from: usize, to: usize) -> bool {
    move_within(sections, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sec: &Section) -> Vec<&str> {
        sec.items.iter().map(|i| i.name.as_str()).collect()
    }

    fn sample() -> Collection {
        vec![
            Section::with_items(
                "Work",
                vec![
                    Item::new("a", "https://a.example"),
                    Item::new("b", "https://b.example"),
                    Item::new("c", "https://c.example"),
                    Item::new("d", "https://d.example"),
                ],
            ),
            Section::with_items("Home", vec![Item::new("h", "https://h.example")]),
        ]
    }

    #[test]
    fn test_insert_section_rejects_duplicate() {
        let mut c = sample();
        assert!(!insert_section(&mut c, "Work"));
        assert_eq!(c.len(), 2);
        assert!(insert_section(&mut c, "New"));
        assert_eq!(c[2], Section::new("New"));
    }

    #[test]
    fn test_remove_section_first_match_only() {
        let mut c = sample();
        assert!(remove_section(&mut c, "Work"));
        assert_eq!(c.len(), 1);
        assert!(!remove_section(&mut c, "Work"));
    }

    #[test]
    fn test_push_and_remove_item() {
        let mut c = sample();
        assert!(push_item(&mut c, "Home", Item::new("x", "https://x.example")));
        assert!(!push_item(&mut c, "Missing", Item::new("y", "https://y.example")));
        assert_eq!(names(&c[1]), vec!["h", "x"]);

        assert!(remove_item(&mut c, "Home", "h"));
        assert!(!remove_item(&mut c, "Home", "h"));
        assert!(!remove_item(&mut c, "Missing", "x"));
        assert_eq!(names(&c[1]), vec!["x"]);
    }

    #[test]
    fn test_move_item_forward_and_backward() {
        let mut c = sample();
        assert!(move_item(&mut c, "Work", 0, 2));
        assert_eq!(names(&c[0]), vec!["b", "c", "a", "d"]);

        assert!(move_item(&mut c, "Work", 3, 0));
        assert_eq!(names(&c[0]), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_item_past_end_appends() {
        let mut c = sample();
        assert!(move_item(&mut c, "Work", 1, 99));
        assert_eq!(names(&c[0]), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_move_out_of_range_is_noop() {
        let mut c = sample();
        let before = c.clone();
        assert!(!move_item(&mut c, "Work", 4, 0));
        assert!(!move_item(&mut c, "Missing", 0, 1));
        assert!(!move_section(&mut c, 2, 0));
        assert_eq!(c, before);
    }

    #[test]
    fn test_move_section() {
        let mut c = sample();
        assert!(move_section(&mut c, 1, 0));
        assert_eq!(c[0].title, "Home");
        assert_eq!(c[1].title, "Work");
    }

    #[test]
    fn test_item_matches_name_or_url() {
        let item = Item::new("PubMed", "https://pubmed.ncbi.nlm.nih.gov/");
        assert!(item.matches("pubmed"));
        assert!(item.matches("ncbi"));
        assert!(!item.matches("osler"));
    }

    #[test]
    fn test_item_serde_omits_empty_optionals() {
        let json = serde_json::to_string(&Item::new("a", "u")).unwrap();
        assert_eq!(json, r#"{"name":"a","url":"u"}"#);

        let parsed: Item = serde_json::from_str(r##"{"name":"a","url":"u","color":"#fff"}"##).unwrap();
        assert_eq!(parsed.color.as_deref(), Some("#fff"));
        assert!(parsed.icon.is_none());
    }
}
