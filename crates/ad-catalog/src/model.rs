use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Views allowed per ad when the record does not set its own limit.
pub const DEFAULT_VIEW_LIMIT: u32 = 3;

/// Category and tag names the user has marked as interesting.
pub type UserInterests = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Sports,
    Food,
    Electronics,
    Entertainment,
    Education,
    Fashion,
    Travel,
    Health,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Sports,
        Category::Food,
        Category::Electronics,
        Category::Entertainment,
        Category::Education,
        Category::Fashion,
        Category::Travel,
        Category::Health,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sports => "Sports",
            Category::Food => "Food",
            Category::Electronics => "Electronics",
            Category::Entertainment => "Entertainment",
            Category::Education => "Education",
            Category::Fashion => "Fashion",
            Category::Travel => "Travel",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Category selector for browsing. `All` never hides ads on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All";
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_LABEL {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(c) => fmt::Display::fmt(c, f),
        }
    }
}

/// One advertisable item. Catalog records are never mutated after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub category: Category,
    pub tags: Vec<String>,
    /// Watch time in seconds.
    pub duration: u32,
    pub reward: String,
    pub promo_code: String,
    pub description: String,
    pub thumbnail: String,
    /// 0.0 to 1.0, higher sorts first.
    pub popularity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_limit: Option<u32>,
}

impl AdRecord {
    pub fn effective_view_limit(&self) -> u32 {
        self.view_limit.unwrap_or(DEFAULT_VIEW_LIMIT)
    }

    pub fn duration_label(&self) -> String {
        format!("{}s", self.duration)
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    /// True if the category or any tag is one of the interests.
    pub fn matches_interests(&self, interests: &UserInterests) -> bool {
        interests.contains(self.category.as_str())
            || self.tags.iter().any(|t| interests.contains(t))
    }
}

/// A ranked result: the catalog record plus its display duration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedAd<'a> {
    #[serde(flatten)]
    pub ad: &'a AdRecord,
    pub duration_str: String,
}

impl<'a> ListedAd<'a> {
    pub fn new(ad: &'a AdRecord) -> Self {
        Self {
            duration_str: ad.duration_label(),
            ad,
        }
    }
}

/// Entry of the category picker. Ids are positional, with "All" at "0".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
}
