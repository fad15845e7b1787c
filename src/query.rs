//! User-controlled parameters driving the filter-sort engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many jurisdictions the tracked bills span.
///
/// Jurisdiction search, the jurisdiction filter, the by-state sort and the
/// jurisdiction badge only exist for [`Coverage::Multi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    Single,
    #[default]
    Multi,
}

impl Coverage {
    pub fn is_multi(&self) -> bool {
        matches!(self, Coverage::Multi)
    }
}

impl FromStr for Coverage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Coverage::Single),
            "multi" => Ok(Coverage::Multi),
            other => Err(Error::Config(format!(
                "Invalid coverage '{}'. Allowed values are: single, multi",
                other
            ))),
        }
    }
}

/// Sort order for the visible bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Recent,
    Oldest,
    State,
    Alphabetical,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Recent => "recent",
            SortOrder::Oldest => "oldest",
            SortOrder::State => "state",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    pub fn all() -> [SortOrder; 4] {
        [
            SortOrder::Recent,
            SortOrder::Oldest,
            SortOrder::State,
            SortOrder::Alphabetical,
        ]
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "recent" => Ok(SortOrder::Recent),
            "oldest" => Ok(SortOrder::Oldest),
            "state" => Ok(SortOrder::State),
            "alphabetical" => Ok(SortOrder::Alphabetical),
            other => Err(Error::Config(format!(
                "Invalid sort value '{}'. Allowed values are: recent, oldest, state, alphabetical",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter: everything, or statuses containing the given text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Containing(String),
}

impl StatusFilter {
    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Containing(text) => text,
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Containing(trimmed.to_lowercase())
        }
    }
}

/// Jurisdiction filter: everything, federal bills, or one named state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JurisdictionFilter {
    #[default]
    All,
    Federal,
    State(String),
}

impl JurisdictionFilter {
    pub fn as_str(&self) -> &str {
        match self {
            JurisdictionFilter::All => "all",
            JurisdictionFilter::Federal => "US",
            JurisdictionFilter::State(name) => name,
        }
    }
}

impl From<&str> for JurisdictionFilter {
    fn from(s: &str) -> Self {
        match s.trim() {
            "" => JurisdictionFilter::All,
            all if all.eq_ignore_ascii_case("all") => JurisdictionFilter::All,
            "US" => JurisdictionFilter::Federal,
            name => JurisdictionFilter::State(name.to_string()),
        }
    }
}

/// The current search, filter and sort selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_term: String,
    pub status_filter: StatusFilter,
    pub jurisdiction_filter: JurisdictionFilter,
    /// `None` keeps the collection order
    pub sort_order: Option<SortOrder>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn status(mut self, filter: impl Into<StatusFilter>) -> Self {
        self.status_filter = filter.into();
        self
    }

    pub fn jurisdiction(mut self, filter: impl Into<JurisdictionFilter>) -> Self {
        self.jurisdiction_filter = filter.into();
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Lowercased search term, or `None` when every bill matches
    pub(crate) fn needle(&self) -> Option<String> {
        if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.to_lowercase())
        }
    }
}
