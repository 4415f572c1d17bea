//! The static option catalog: category trees and flat option lists.

use crate::models::{CategoryTree, Dimension};

const SPONSORS_BY_CATEGORY: &[(&str, &[&str])] = &[
    ("Sportswear", &["Nike", "Adidas", "Puma", "Under Armour"]),
    ("Beverages", &["Coca-Cola", "Pepsi", "Gatorade", "Red Bull"]),
    ("Automotive", &["Toyota", "Ford", "Chevrolet"]),
    ("Financial Services", &["Visa", "Mastercard", "Chase"]),
    ("Technology", &["Microsoft", "Samsung", "Verizon"]),
];

const RIGHTSHOLDERS_BY_LEAGUE: &[(&str, &[&str])] = &[
    ("NBA", &["Lakers", "Celtics", "Warriors", "Knicks"]),
    ("NFL", &["Cowboys", "Chiefs", "Packers", "Eagles"]),
    ("MLB", &["Yankees", "Dodgers", "Cubs"]),
    ("MLS", &["LAFC", "Inter Miami", "Seattle Sounders"]),
];

const PLACEMENT_TYPES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Venue",
        &[
            ("Signage", &["LED Board", "Static Banner", "Scoreboard"]),
            ("Naming Rights", &["Arena Naming", "Section Naming"]),
        ],
    ),
    (
        "Broadcast",
        &[
            ("In-Game", &["Virtual Signage", "Broadcast Overlay"]),
            ("Commercial", &["30s Spot", "15s Spot"]),
        ],
    ),
    (
        "Social",
        &[
            ("Organic", &["Feed Post", "Story"]),
            ("Paid", &["Promoted Post", "Sponsored Video"]),
        ],
    ),
];

const PLACEMENTS: &[&str] = &[
    "Jersey Patch",
    "Court Signage",
    "Field Signage",
    "Scoreboard",
    "Social Post",
    "Broadcast Segment",
    "Naming Rights",
];

const PLATFORMS: &[&str] = &["Instagram", "TikTok", "X", "YouTube", "Facebook", "Broadcast TV"];

const ACCOUNT_TYPES: &[&str] = &["Team", "League", "Athlete", "Sponsor"];

const MEDIA_TYPES: &[&str] = &["Image", "Video", "Carousel", "Story", "Reel"];

/// Every selectable option, grouped per filter dimension.
///
/// Built once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Sponsors grouped by business category
    pub sponsors: CategoryTree,
    /// Rightsholders grouped by league
    pub rightsholders: CategoryTree,
    /// Placement types grouped by venue/broadcast/social, then subcategory
    pub placement_types: CategoryTree,
    /// Flat list of placements
    pub placements: Vec<String>,
    /// Flat list of platforms
    pub platforms: Vec<String>,
    /// Flat list of account types
    pub account_types: Vec<String>,
    /// Flat list of media types
    pub media_types: Vec<String>,
}

impl Catalog {
    /// The built-in sponsorship catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sponsors: CategoryTree::flat("Sponsors", SPONSORS_BY_CATEGORY),
            rightsholders: CategoryTree::flat("Rightsholders", RIGHTSHOLDERS_BY_LEAGUE),
            placement_types: CategoryTree::nested("Placement Types", PLACEMENT_TYPES),
            placements: to_owned(PLACEMENTS),
            platforms: to_owned(PLATFORMS),
            account_types: to_owned(ACCOUNT_TYPES),
            media_types: to_owned(MEDIA_TYPES),
        }
    }

    /// Category tree backing a dimension, if it is hierarchical.
    #[must_use]
    pub fn tree(&self, dimension: Dimension) -> Option<&CategoryTree> {
        match dimension {
            Dimension::Sponsors => Some(&self.sponsors),
            Dimension::Rightsholders => Some(&self.rightsholders),
            Dimension::PlacementTypes => Some(&self.placement_types),
            _ => None,
        }
    }

    /// All options of a dimension in display order.
    ///
    /// Returns `None` for free-form dimensions (collections, hashtags,
    /// handles) which accept any non-empty value.
    #[must_use]
    pub fn options(&self, dimension: Dimension) -> Option<Vec<&str>> {
        if let Some(tree) = self.tree(dimension) {
            return Some(tree.all_leaves());
        }
        let list = match dimension {
            Dimension::Placements => &self.placements,
            Dimension::Platforms => &self.platforms,
            Dimension::AccountTypes => &self.account_types,
            Dimension::MediaTypes => &self.media_types,
            _ => return None,
        };
        Some(list.iter().map(String::as_str).collect())
    }

    /// Returns true if `value` is a valid member of the dimension.
    #[must_use]
    pub fn accepts(&self, dimension: Dimension, value: &str) -> bool {
        match self.options(dimension) {
            Some(options) => options.contains(&value),
            None => !value.trim().is_empty(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shapes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.sponsors.categories().len(), 5);
        assert_eq!(catalog.rightsholders.category_of("Chiefs"), Some("NFL"));
        assert_eq!(
            catalog
                .placement_types
                .group_leaves("Social", Some("Paid"))
                .unwrap(),
            vec!["Promoted Post", "Sponsored Video"]
        );
    }

    #[test]
    fn test_accepts_per_dimension() {
        let catalog = Catalog::standard();
        assert!(catalog.accepts(Dimension::Sponsors, "Nike"));
        assert!(!catalog.accepts(Dimension::Sponsors, "Lakers"));
        assert!(catalog.accepts(Dimension::Placements, "Jersey Patch"));
        assert!(catalog.accepts(Dimension::Platforms, "TikTok"));
        assert!(catalog.accepts(Dimension::Hashtags, "#gameday"));
        assert!(!catalog.accepts(Dimension::Handles, "  "));
    }

    #[test]
    fn test_leaves_are_unique_within_each_tree() {
        let catalog = Catalog::standard();
        for tree in [&catalog.sponsors, &catalog.rightsholders, &catalog.placement_types] {
            let mut leaves = tree.all_leaves();
            let total = leaves.len();
            leaves.sort_unstable();
            leaves.dedup();
            assert_eq!(leaves.len(), total, "duplicate leaf in {}", tree.name);
        }
    }
}
