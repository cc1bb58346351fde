//! Favicon Resolver
//!
//! Plans how each card's icon is drawn: which remote favicon to try, the
//! background used while it loads, and the glyph shown if it fails. The
//! per-card race between the image load and a timer is tracked by
//! [`FaviconResolution`].

mod color;
mod resolution;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::Item;

pub use color::{adjust_color, gradient, hsl_to_hex, string_to_color};
pub use resolution::{FallbackReason, FaviconOutcome, FaviconResolution, FaviconState};

/// Tunables for icon resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    /// Time allowed for the remote icon before falling back
    pub timeout_ms: u32,
    /// Loaded images narrower than this are treated as missing
    pub min_width: u32,
    /// How much darker the second gradient stop is, per channel
    pub darken: i32,
    /// Requested icon size in pixels
    pub size: u32,
    /// Icon service URL; `{domain}` and `{size}` are substituted
    pub service_template: String,
    /// Substrings of a resolved image URL that mark a placeholder icon
    pub placeholder_markers: Vec<String>,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1200,
            min_width: 8,
            darken: 18,
            size: 64,
            service_template: "https://icons.duckduckgo.com/ip3/{domain}.ico".to_string(),
            placeholder_markers: vec!["fallback_opts".to_string(), "faviconv2".to_string()],
        }
    }
}

/// Decides whether a successfully loaded image is a service's
/// "no icon found" placeholder
pub trait PlaceholderPredicate: Send + Sync {
    fn is_placeholder(&self, resolved_src: &str) -> bool;
}

/// Placeholder detection by case-insensitive substring match
#[derive(Debug, Clone)]
pub struct UrlMarkerPredicate {
    markers: Vec<String>,
}

impl UrlMarkerPredicate {
    pub fn new(markers: impl IntoIterator<Item = String>) -> Self {
        Self {
            markers: markers.into_iter().map(|m| m.to_lowercase()).collect(),
        }
    }
}

impl PlaceholderPredicate for UrlMarkerPredicate {
    fn is_placeholder(&self, resolved_src: &str) -> bool {
        let src = resolved_src.to_lowercase();
        self.markers.iter().any(|m| src.contains(m.as_str()))
    }
}

/// Host of `url`, or the raw string when it does not parse or has no host
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// What to draw when the remote icon is unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackGlyph {
    /// Named icon glyph from the item
    Icon(String),
    /// Single uppercase letter
    Initial(char),
}

/// Everything needed to render one card's icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPlan {
    pub domain: String,
    /// Remote icon URL; `None` when there is no domain to ask for
    pub src: Option<String>,
    pub base_color: String,
    /// Gradient used while loading and after fallback
    pub background: String,
    pub glyph: FallbackGlyph,
}

/// Builds icon plans and judges loaded images
#[derive(Clone)]
pub struct FaviconResolver {
    config: FaviconConfig,
    predicate: Arc<dyn PlaceholderPredicate>,
}

impl Default for FaviconResolver {
    fn default() -> Self {
        Self::new(FaviconConfig::default())
    }
}

impl FaviconResolver {
    /// Resolver using the config's placeholder markers
    pub fn new(config: FaviconConfig) -> Self {
        let predicate = Arc::new(UrlMarkerPredicate::new(config.placeholder_markers.clone()));
        Self { config, predicate }
    }

    /// Resolver with a service-specific placeholder check
    pub fn with_predicate(config: FaviconConfig, predicate: Arc<dyn PlaceholderPredicate>) -> Self {
        Self { config, predicate }
    }

    pub fn config(&self) -> &FaviconConfig {
        &self.config
    }

    pub fn favicon_url(&self, domain: &str) -> String {
        self.config
            .service_template
            .replace("{domain}", domain)
            .replace("{size}", &self.config.size.to_string())
    }

    /// True when a loaded image must not be shown
    pub fn is_unusable(&self, natural_width: u32, resolved_src: &str) -> bool {
        natural_width < self.config.min_width || self.predicate.is_placeholder(resolved_src)
    }

    pub fn plan(&self, item: &Item) -> IconPlan {
        let domain = domain_of(&item.url);
        let seed = if !domain.is_empty() {
            domain.as_str()
        } else if !item.name.is_empty() {
            item.name.as_str()
        } else {
            "x"
        };
        let base_color = item.color.clone().unwrap_or_else(|| string_to_color(seed));
        let background = gradient(&base_color, -self.config.darken);
        let src = (!domain.is_empty()).then(|| self.favicon_url(&domain));
        let glyph = fallback_glyph(item, &domain);
        IconPlan {
            domain,
            src,
            base_color,
            background,
            glyph,
        }
    }
}

/// Item icon if set, else the first letter of the domain (without `www.`),
/// else of the name, else `?`
pub fn fallback_glyph(item: &Item, domain: &str) -> FallbackGlyph {
    if let Some(icon) = item.icon.as_ref().filter(|i| !i.is_empty()) {
        return FallbackGlyph::Icon(icon.clone());
    }
    let bare = match domain.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &domain[4..],
        _ => domain,
    };
    let letter = bare
        .chars()
        .next()
        .or_else(|| item.name.chars().next())
        .unwrap_or('?');
    FallbackGlyph::Initial(letter.to_uppercase().next().unwrap_or(letter))
}
