//! One-based page numbers for list views.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A page number, starting at 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(1);

    pub fn new(number: u32) -> DomainResult<Self> {
        if number == 0 {
            return Err(DomainError::validation("page numbers start at 1"));
        }
        Ok(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// Previous page, or `None` on the first page.
    pub fn previous(&self) -> Option<Page> {
        (self.0 > 1).then(|| Page(self.0 - 1))
    }

    /// The server never reports a last page, so there is always a next one.
    pub fn next(&self) -> Page {
        Page(self.0.saturating_add(1))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

impl core::fmt::Display for Page {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
