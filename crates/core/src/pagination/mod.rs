//! Page-state estimation without total counts.
//!
//! The catalog boundary never reports a total row count, so everything
//! here is derived from a single observation: how many rows the current
//! page returned versus the page size.

/// Default rows per page.
pub const PAGE_SIZE: u32 = 50;

/// One entry in the rendered pagination strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Derived page state for one query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    /// A full page means more rows probably exist past this one.
    pub has_more_pages: bool,
    /// A short non-empty page is definitely the last one.
    pub is_last_page: bool,
    /// Optimistic guess, recomputed from every page observation. Never
    /// clamped: navigating past it just produces a new estimate.
    pub estimated_last_page: u32,
}

impl PageState {
    pub fn from_result_count(page: u32, result_count: usize, page_size: u32) -> Self {
        let has_more_pages = result_count == page_size as usize;
        let is_last_page = !has_more_pages && result_count > 0;
        let estimated_last_page = if has_more_pages {
            (page + 5).max(10)
        } else {
            page
        };
        Self {
            current_page: page,
            has_more_pages,
            is_last_page,
            estimated_last_page,
        }
    }

    /// The pagination strip: a window of two pages around the current one,
    /// plus the first page and the estimated last page with ellipsis gaps
    /// where the window is not adjacent.
    pub fn page_items(&self) -> Vec<PageItem> {
        let last = if self.has_more_pages {
            self.estimated_last_page
        } else {
            self.current_page
        };
        let start = self.current_page.saturating_sub(2).max(1);
        let end = (self.current_page + 2).min(last);

        let mut items = Vec::new();
        if start > 1 {
            items.push(PageItem::Page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        for page in start..=end {
            items.push(PageItem::Page(page));
        }
        if self.has_more_pages && end < self.estimated_last_page {
            if end + 1 < self.estimated_last_page {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(self.estimated_last_page));
        }
        items
    }
}
