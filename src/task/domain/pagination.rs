//! Pagination and sorting contracts shared by task and comment
//! listings.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// A 1-based page request with an optional extra skip offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
    offset: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPagination`] when page or size
    /// is zero.
    pub const fn new(page: u32, size: u32) -> Result<Self, TaskDomainError> {
        if page == 0 || size == 0 {
            return Err(TaskDomainError::InvalidPagination);
        }
        Ok(Self {
            page,
            size,
            offset: 0,
        })
    }

    /// Adds an extra skip offset on top of the page boundary.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the number of records to skip:
    /// `(page - 1) * size + offset`.
    #[must_use]
    pub fn skip(self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.size) + u64::from(self.offset)
    }
}

/// Sort order applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Oldest/lowest first.
    Ascending,
    /// Newest/highest first.
    Descending,
}

/// Sortable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation timestamp.
    CreatedAt,
    /// Latest update timestamp.
    UpdatedAt,
}

/// Explicit sort override for a listing.
///
/// When absent, listings default to creation time descending with the
/// record identifier as tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    /// Field to sort by.
    pub field: SortField,
    /// Direction to sort in.
    pub direction: SortDirection,
}

/// One page of a listing with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page; empty when the page is out of range.
    pub items: Vec<T>,
    /// The 1-based page number requested.
    pub page: u32,
    /// The page size requested.
    pub size: u32,
    /// Total matching records across all pages.
    pub total_count: u64,
    /// `ceil(total_count / size)`.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assembles a page from fetched items and the matching total.
    #[must_use]
    pub fn assemble(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_count,
            total_pages: total_count.div_ceil(u64::from(request.size())),
        }
    }
}
