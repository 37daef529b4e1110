//! Event categories and their display metadata.
//!
//! The registry is a plain value handed to whoever needs to style events.
//! Keys that the registry does not know about resolve to a neutral fallback
//! style instead of failing, so events carrying a category the site has not
//! been configured for still render.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Event classification used for color-coding and filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    CommunityMeeting,
    ResourceDistribution,
    Workshop,
    VolunteerOpportunity,
    /// A key outside the known set, kept verbatim.
    Other(String),
}

impl Category {
    /// The four categories the site ships with, in display order.
    pub const KNOWN: [Category; 4] = [
        Category::CommunityMeeting,
        Category::ResourceDistribution,
        Category::Workshop,
        Category::VolunteerOpportunity,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "community-meeting" => Category::CommunityMeeting,
            "resource-distribution" => Category::ResourceDistribution,
            "workshop" => Category::Workshop,
            "volunteer-opportunity" => Category::VolunteerOpportunity,
            other => Category::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Category::CommunityMeeting => "community-meeting",
            Category::ResourceDistribution => "resource-distribution",
            Category::Workshop => "workshop",
            Category::VolunteerOpportunity => "volunteer-opportunity",
            Category::Other(key) => key,
        }
    }

}

impl From<String> for Category {
    fn from(key: String) -> Self {
        Category::from_key(&key)
    }
}

impl From<&str> for Category {
    fn from(key: &str) -> Self {
        Category::from_key(key)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.key().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Icon shown next to a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryIcon {
    Users,
    BoxOpen,
    GraduationCap,
    HandsHelping,
    /// Generic calendar glyph for unrecognized categories.
    Calendar,
}

impl CategoryIcon {
    pub fn name(self) -> &'static str {
        match self {
            CategoryIcon::Users => "users",
            CategoryIcon::BoxOpen => "box-open",
            CategoryIcon::GraduationCap => "graduation-cap",
            CategoryIcon::HandsHelping => "hands-helping",
            CategoryIcon::Calendar => "calendar",
        }
    }
}

/// Display metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub label: String,
    /// `#RRGGBB`
    pub color: String,
    pub icon: CategoryIcon,
}

impl CategoryStyle {
    fn new(label: &str, color: &str, icon: CategoryIcon) -> Self {
        CategoryStyle {
            label: label.to_string(),
            color: color.to_string(),
            icon,
        }
    }

    /// The neutral style used for keys the registry does not know.
    pub fn fallback() -> Self {
        CategoryStyle::new("Event", NEUTRAL_GRAY, CategoryIcon::Calendar)
    }

    /// Parse `color` into RGB components. Returns `None` for anything that is
    /// not a six-digit hex color.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

const NEUTRAL_GRAY: &str = "#6B7280";

/// Label/color replacement for a category, usually read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub label: Option<String>,
    pub color: Option<String>,
}

/// Lookup table from category to display metadata.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    // Insertion order is display order for filter buttons.
    entries: Vec<(Category, CategoryStyle)>,
    fallback: CategoryStyle,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry::builtin()
    }
}

impl CategoryRegistry {
    /// The site's built-in categories.
    pub fn builtin() -> Self {
        let entries = vec![
            (
                Category::CommunityMeeting,
                CategoryStyle::new("Community Meeting", "#2E7D32", CategoryIcon::Users),
            ),
            (
                Category::ResourceDistribution,
                CategoryStyle::new("Resource Distribution", "#F57C00", CategoryIcon::BoxOpen),
            ),
            (
                Category::Workshop,
                CategoryStyle::new("Workshop/Training", "#1565C0", CategoryIcon::GraduationCap),
            ),
            (
                Category::VolunteerOpportunity,
                CategoryStyle::new("Volunteer Opportunity", "#43A047", CategoryIcon::HandsHelping),
            ),
        ];

        CategoryRegistry {
            entries,
            fallback: CategoryStyle::fallback(),
        }
    }

    /// Apply label/color overrides keyed by category key. Keys not yet in the
    /// registry are appended with the generic icon; nothing is ever removed.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, CategoryOverride>) -> Self {
        for (key, over) in overrides {
            let category = Category::from_key(key);
            let index = match self.entries.iter().position(|(c, _)| *c == category) {
                Some(index) => index,
                None => {
                    let mut style = self.fallback.clone();
                    style.label = key.clone();
                    self.entries.push((category, style));
                    self.entries.len() - 1
                }
            };

            let style = &mut self.entries[index].1;
            if let Some(label) = &over.label {
                style.label = label.clone();
            }
            if let Some(color) = &over.color {
                style.color = color.clone();
            }
        }
        self
    }

    pub fn lookup(&self, category: &Category) -> &CategoryStyle {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, style)| style)
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.entries.iter().any(|(c, _)| c == category)
    }

    /// Registered categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryStyle)> {
        self.entries.iter().map(|(c, s)| (c, s))
    }
}
