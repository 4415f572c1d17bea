//! Category trees used by the hierarchical filter dimensions.

use serde::{Deserialize, Serialize};

/// Named group of leaves one level below a top category.
///
/// Only the placement-type tree uses subcategories
/// (e.g., "Venue" → "Signage" → "LED Board").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    /// Display name (e.g., "Signage")
    pub name: String,
    /// Ordered leaves under this subcategory
    pub leaves: Vec<String>,
}

/// Contents of a top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryNode {
    /// Leaves sit directly under the category
    Leaves(Vec<String>),
    /// Leaves are grouped into subcategories
    Subcategories(Vec<Subcategory>),
}

/// Top-level group of a category tree (a league, a sponsor category, a venue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name (e.g., "NBA", "Sportswear")
    pub name: String,
    /// Leaves or subcategories under this group
    pub node: CategoryNode,
}

impl Category {
    /// All leaves under the category in tree order, flattening subcategories.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        match &self.node {
            CategoryNode::Leaves(leaves) => leaves.iter().map(String::as_str).collect(),
            CategoryNode::Subcategories(subs) => subs
                .iter()
                .flat_map(|sub| sub.leaves.iter().map(String::as_str))
                .collect(),
        }
    }

    /// Subcategories, if the category is two levels deep.
    #[must_use]
    pub fn subcategories(&self) -> &[Subcategory] {
        match &self.node {
            CategoryNode::Leaves(_) => &[],
            CategoryNode::Subcategories(subs) => subs,
        }
    }
}

/// Static taxonomy mapping category names to ordered leaves.
///
/// Trees are built once and never mutated at runtime. Category order and
/// leaf order are preserved as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    /// Name of the dimension this tree feeds (e.g., "Sponsors")
    pub name: String,
    categories: Vec<Category>,
}

impl CategoryTree {
    /// Builds a one-level tree (category → leaves).
    #[must_use]
    pub fn flat(name: &str, groups: &[(&str, &[&str])]) -> Self {
        let categories = groups
            .iter()
            .map(|(category, leaves)| Category {
                name: (*category).to_string(),
                node: CategoryNode::Leaves(leaves.iter().map(|l| (*l).to_string()).collect()),
            })
            .collect();

        Self {
            name: name.to_string(),
            categories,
        }
    }

    /// Builds a two-level tree (category → subcategory → leaves).
    #[must_use]
    pub fn nested(name: &str, groups: &[(&str, &[(&str, &[&str])])]) -> Self {
        let categories = groups
            .iter()
            .map(|(category, subs)| Category {
                name: (*category).to_string(),
                node: CategoryNode::Subcategories(
                    subs.iter()
                        .map(|(sub, leaves)| Subcategory {
                            name: (*sub).to_string(),
                            leaves: leaves.iter().map(|l| (*l).to_string()).collect(),
                        })
                        .collect(),
                ),
            })
            .collect();

        Self {
            name: name.to_string(),
            categories,
        }
    }

    /// Top-level categories in declaration order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a top-level category by name (case-insensitive).
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Leaves under `category`, or under `category` → `subcategory` when given.
    ///
    /// Returns `None` if either name is unknown.
    #[must_use]
    pub fn group_leaves(&self, category: &str, subcategory: Option<&str>) -> Option<Vec<&str>> {
        let cat = self.category(category)?;
        match subcategory {
            None => Some(cat.leaves()),
            Some(sub_name) => cat
                .subcategories()
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(sub_name))
                .map(|s| s.leaves.iter().map(String::as_str).collect()),
        }
    }

    /// Every leaf in the tree, in tree order.
    #[must_use]
    pub fn all_leaves(&self) -> Vec<&str> {
        self.categories.iter().flat_map(Category::leaves).collect()
    }

    /// Returns true if `leaf` exists anywhere in the tree.
    #[must_use]
    pub fn contains_leaf(&self, leaf: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.leaves().contains(&leaf))
    }

    /// Name of the top-level category that owns `leaf`.
    #[must_use]
    pub fn category_of(&self, leaf: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.leaves().contains(&leaf))
            .map(|c| c.name.as_str())
    }
}
