//! Catalog heading anchors to canonical categories
//!
//! The catalog nests sections irregularly, so not every anchor is listed.
//! An anchor missing from the table leaves the current category in place.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::record::Category;

/// Anchor identifier → canonical category
pub const CATEGORY_TABLE: &[(&str, Category)] = &[
    // Canonical tags map to themselves
    ("productivity", Category::Productivity),
    ("development", Category::Development),
    ("ai", Category::Ai),
    ("data", Category::Data),
    ("finance", Category::Finance),
    ("communication", Category::Communication),
    ("security", Category::Security),
    ("utility", Category::Utility),
    ("integration", Category::Integration),
    // Catalog section anchors
    ("aggregators", Category::Utility),
    ("aerospace-and-astrodynamics", Category::Productivity),
    ("art-and-culture", Category::Productivity),
    ("bio", Category::Data),
    ("browser-automation", Category::Development),
    ("cloud-platforms", Category::Integration),
    ("code-execution", Category::Development),
    ("coding-agents", Category::Development),
    ("command-line", Category::Development),
    ("customer-data-platforms", Category::Data),
    ("databases", Category::Data),
    ("data-platforms", Category::Data),
    ("developer-tools", Category::Development),
    ("delivery", Category::Integration),
    ("data-science-tools", Category::Data),
    ("embedded-system", Category::Development),
    ("file-systems", Category::Utility),
    ("finance--fintech", Category::Finance),
    ("gaming", Category::Productivity),
    ("knowledge--memory", Category::Ai),
    ("location-services", Category::Integration),
    ("marketing", Category::Productivity),
    ("monitoring", Category::Development),
    ("multimedia-process", Category::Productivity),
    ("news--information", Category::Productivity),
    ("productivity-and-organization", Category::Productivity),
    ("project-management", Category::Productivity),
    ("search", Category::Utility),
    ("smart-home", Category::Integration),
    ("security-and-privacy", Category::Security),
    ("social-media", Category::Communication),
    ("sports", Category::Productivity),
    ("testing", Category::Development),
    ("travel", Category::Productivity),
    ("version-control", Category::Development),
    ("web-automation", Category::Development),
    ("web3--blockchain", Category::Integration),
];

static CATEGORY_INDEX: Lazy<HashMap<&'static str, Category>> =
    Lazy::new(|| CATEGORY_TABLE.iter().copied().collect());

/// Look up the canonical category for a heading anchor
pub fn lookup(anchor: &str) -> Option<Category> {
    CATEGORY_INDEX.get(anchor).copied()
}

/// Tracks the category context while scanning a catalog
#[derive(Debug, Clone)]
pub struct CategoryNormalizer {
    current: Category,
}

impl Default for CategoryNormalizer {
    fn default() -> Self {
        Self::new(Category::default())
    }
}

impl CategoryNormalizer {
    pub fn new(initial: Category) -> Self {
        Self { current: initial }
    }

    /// Apply a heading anchor. Returns `true` if the context changed.
    pub fn observe(&mut self, anchor: &str) -> bool {
        match lookup(anchor) {
            Some(category) => {
                self.current = category;
                true
            }
            None => {
                tracing::debug!(
                    "Unmapped heading anchor '{}', keeping {}",
                    anchor,
                    self.current
                );
                false
            }
        }
    }

    pub fn current(&self) -> Category {
        self.current
    }
}
