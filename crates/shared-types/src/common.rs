use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Number of records requested per page of a list view.
pub const PAGE_SIZE: u32 = 5;

/// One-based page number carried in the `page` query parameter.
///
/// Parsing never fails: a missing, non-numeric, zero or negative value
/// resolves to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(u32);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(1);

    /// Build a page index, clamping anything below 1 up to 1.
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    /// Parse a raw query-string value.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| u32::try_from(n).ok())
            .map(Self::new)
            .unwrap_or(Self::FIRST)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_first(self) -> bool {
        self.0 == 1
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The preceding page, saturating at the first page.
    pub fn previous(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    /// The `(skip, limit)` pair the backend expects for this page.
    pub fn window(self, page_size: u32) -> PageWindow {
        PageWindow {
            skip: u64::from(self.0 - 1) * u64::from(page_size),
            limit: page_size,
        }
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageIndex {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Offset/limit pair sent to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u32,
}
