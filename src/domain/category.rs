use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::NewsdeckError;

/// News categories offered by the category strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    General,
    Sports,
    Entertainment,
    Business,
    Technology,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::General,
        Category::Sports,
        Category::Entertainment,
        Category::Business,
        Category::Technology,
    ];

    /// Search query sent to the news API for this category.
    ///
    /// Changing a query is a configuration-time decision; the table is fixed
    /// at compile time.
    pub fn query(self) -> &'static str {
        match self {
            Category::General => "top headlines",
            Category::Sports => "sports OR football OR basketball",
            Category::Entertainment => "entertainment OR movies OR music",
            Category::Business => "business OR finance OR markets",
            Category::Technology => "technology OR gadgets OR AI",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Business => "Business",
            Category::Technology => "Technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = NewsdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Category::General),
            "sports" => Ok(Category::Sports),
            "entertainment" => Ok(Category::Entertainment),
            "business" => Ok(Category::Business),
            "technology" => Ok(Category::Technology),
            other => Err(NewsdeckError::UnknownCategory(other.to_string())),
        }
    }
}
