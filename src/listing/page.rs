//! Cursor pagination.
//!
//! Providers return a page of items plus a continuation cursor. Pages are
//! fetched one after another until no cursor comes back. A failed page
//! aborts the whole listing; there is no retry.

use crate::error::Result;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` when the listing is complete
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    pub fn with_cursor(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// Something that can be listed page by page.
pub trait PageSource {
    type Item;

    /// Fetch the first page (`cursor == None`) or the page after `cursor`.
    fn fetch(&mut self, cursor: Option<&str>) -> Result<Page<Self::Item>>;
}

/// Fetch every page and concatenate the items in order.
pub fn collect_pages<S: PageSource>(source: &mut S) -> Result<Vec<S::Item>> {
    collect_pages_with(source, |_, _| {})
}

/// Like [`collect_pages`], calling `on_page(pages_so_far, items_so_far)`
/// after each page.
pub fn collect_pages_with<S, F>(source: &mut S, mut on_page: F) -> Result<Vec<S::Item>>
where
    S: PageSource,
    F: FnMut(usize, usize),
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source.fetch(cursor.as_deref())?;
        pages += 1;
        items.extend(page.items);
        on_page(pages, items.len());
        tracing::trace!(pages, items = items.len(), "Fetched page");

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    tracing::debug!(pages, items = items.len(), "Listing complete");
    Ok(items)
}
