//! Page windows over a built collection
//!
//! Pages are pure slices of the cached `DiffFileCollection`: no cursor is kept
//! between calls, so any page can be requested first and the same window always
//! yields the same files.

use crate::artifacts::diff::diff_file::DiffFileRecord;
use crate::artifacts::diff::file_collection::DiffFileCollection;
use crate::errors::{DiffError, DiffResult};
use std::ops::Range;
use std::sync::Arc;

pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    page: usize,
    per_page: usize,
}

impl PaginationWindow {
    pub fn new(page: usize, per_page: usize) -> DiffResult<Self> {
        if page == 0 || per_page == 0 {
            return Err(DiffError::InvalidWindow { page, per_page });
        }

        Ok(PaginationWindow { page, per_page })
    }

    /// Window from raw request parameters
    ///
    /// Missing, non numeric and non positive values fall back to the first
    /// page and `default_per_page`.
    pub fn from_params(page: Option<&str>, per_page: Option<&str>, default_per_page: usize) -> Self {
        let positive = |value: Option<&str>| {
            value
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|value| *value > 0)
        };

        PaginationWindow {
            page: positive(page).unwrap_or(1),
            per_page: positive(per_page).unwrap_or(default_per_page.max(1)),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMetadata {
    pub current_page: usize,
    pub next_page: Option<usize>,
    pub total_pages: usize,
}

impl PageMetadata {
    pub fn compute(total_items: usize, window: &PaginationWindow) -> Self {
        let total_pages = total_items.div_ceil(window.per_page);
        let current_page = window.page.clamp(1, total_pages.max(1));
        let next_page = (current_page < total_pages).then_some(current_page + 1);

        PageMetadata {
            current_page,
            next_page,
            total_pages,
        }
    }

    fn offsets(&self, total_items: usize, per_page: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * per_page).min(total_items);
        let end = (start + per_page).min(total_items);
        start..end
    }
}

/// One page of files with its metadata
#[derive(Debug, Clone)]
pub struct DiffBatch {
    collection: Arc<DiffFileCollection>,
    range: Range<usize>,
    pub pagination: PageMetadata,
}

impl DiffBatch {
    pub fn files(&self) -> &[DiffFileRecord] {
        &self.collection.files()[self.range.clone()]
    }
}

pub fn page(collection: Arc<DiffFileCollection>, window: PaginationWindow) -> DiffBatch {
    let pagination = PageMetadata::compute(collection.len(), &window);
    let range = pagination.offsets(collection.len(), window.per_page);

    DiffBatch {
        collection,
        range,
        pagination,
    }
}
