//! Input options for scanning and querying path statistics.
//!
//! This module contains the configuration types that control how path keys
//! are built during a scan and which rows a report includes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How attribute path keys are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeKeys {
    /// `path/@name/value`: every distinct (normalized) value gets its own row
    #[default]
    Valued,
    /// `path/@name`: one row per attribute name
    Named,
}

impl FromStr for AttributeKeys {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "valued" | "value" | "values" => Ok(AttributeKeys::Valued),
            "named" | "name" | "names" => Ok(AttributeKeys::Named),
            _ => Err(format!("Unknown attribute key style: {}", s)),
        }
    }
}

/// When a new attribute path gets a corpus-wide entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttributeEntryPolicy {
    /// Create the entry the first time the attribute is seen
    #[default]
    Always,
    /// Only create the entry when the owning element has non-empty text.
    ///
    /// Reproduces reports of the older tool: attributes that first show up
    /// on empty elements are missing until an element with text carries them.
    RequireElementText,
}

/// Which kinds of path rows to include in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathKinds {
    /// Include element paths
    pub elements: bool,
    /// Include attribute paths
    pub attributes: bool,
}

impl Default for PathKinds {
    fn default() -> Self {
        Self::all()
    }
}

impl PathKinds {
    /// Include every kind of path
    pub fn all() -> Self {
        Self {
            elements: true,
            attributes: true,
        }
    }

    /// Include element paths only
    pub fn elements_only() -> Self {
        Self {
            elements: true,
            attributes: false,
        }
    }

    /// Include attribute paths only
    pub fn attributes_only() -> Self {
        Self {
            elements: false,
            attributes: true,
        }
    }
}

impl FromStr for PathKinds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(PathKinds::all()),
            "elements" | "element" => Ok(PathKinds::elements_only()),
            "attributes" | "attribute" | "attrs" => Ok(PathKinds::attributes_only()),
            _ => Err(format!("Unknown path kind: {}", s)),
        }
    }
}

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order in which paths were first encountered during the scan
    #[default]
    FirstSeen,
    /// Order by path key (lexicographical)
    Path,
    /// Order by corpus-wide occurrence count
    Occurrences,
    /// Order by the highest single-document occurrence count
    MaxPerFile,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-seen" | "first_seen" | "seen" | "scan" => Ok(OrderBy::FirstSeen),
            "path" | "label" | "name" => Ok(OrderBy::Path),
            "occurrences" | "count" => Ok(OrderBy::Occurrences),
            "max-per-file" | "max_per_file" | "max" => Ok(OrderBy::MaxPerFile),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

/// Ordering configuration for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Ordering {
    /// Scan order (default)
    pub fn first_seen() -> Self {
        Self::default()
    }

    /// Order by path ascending
    pub fn by_path() -> Self {
        Self {
            by: OrderBy::Path,
            direction: OrderDirection::Ascending,
        }
    }

    /// Order by occurrence count, largest first
    pub fn by_occurrences() -> Self {
        Self {
            by: OrderBy::Occurrences,
            direction: OrderDirection::Descending,
        }
    }

    /// Order by max-per-file count, largest first
    pub fn by_max_per_file() -> Self {
        Self {
            by: OrderBy::MaxPerFile,
            direction: OrderDirection::Descending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}
