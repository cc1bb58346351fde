//! Default Collection
//!
//! Hardcoded seed used on first run and for re-offering hidden sections.
//! Every accessor returns owned copies so callers can never mutate the seed.

use crate::model::{Item, Section};

fn link(name: &str, url: &str, color: &str, icon: &str) -> Item {
    Item::new(name, url).with_color(color).with_icon(icon)
}

/// Fresh deep copy of the default collection.
pub fn default_sections() -> Vec<Section> {
    vec![
        Section::with_items(
            "University of Calgary",
            vec![
                link("Fresh Sheet", "https://freshsheet.ucalgary.ca/", "#2b6cb0", "ph-newspaper"),
                link("Cards", "https://cards.ucalgary.ca/", "#dd6b20", "ph-cards"),
                link("Osler", "https://osler.ucalgary.ca/", "#2c5282", "ph-stethoscope"),
                link(
                    "One45",
                    "https://calgary.one45.com/index.php?login_message=107",
                    "#805ad5",
                    "ph-calendar-check",
                ),
                link("Blackbook", "https://blackbook.ucalgary.ca/", "#1a202c", "ph-notebook"),
                link("Calgary Guide", "https://calgaryguide.ucalgary.ca/", "#e53e3e", "ph-map-trifold"),
            ],
        ),
        Section::with_items(
            "Resources",
            vec![
                link("UpToDate", "https://www.uptodate.com/contents/search", "#2f855a", "ph-first-aid"),
                link("OpenEvidence", "https://www.openevidence.com/", "#3182ce", "ph-magnifying-glass-plus"),
                link("PubMed", "https://pubmed.ncbi.nlm.nih.gov/", "#2b6cb0", "ph-database"),
                link("StatPearls", "https://www.statpearls.com/", "#38a169", "ph-lightbulb"),
            ],
        ),
        Section::with_items(
            "Alis Linkssss",
            vec![Item::new("Cardiovasc Society", "https://ccs.ca/awards").with_color("#2f855a")],
        ),
    ]
}

/// Deep copy of a single default section.
pub fn default_section(title: &str) -> Option<Section> {
    default_sections().into_iter().find(|s| s.title == title)
}

/// Titles of the default sections, in seed order.
pub fn default_titles() -> Vec<String> {
    default_sections().into_iter().map(|s| s.title).collect()
}
