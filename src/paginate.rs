//! Fixed-size pagination over a filtered view.
//!
//! Pages are 1-based. An empty view still has one (empty) page so the
//! navigation bar always has a well-defined "Page X of Y".

/// Number of rows shown per page.
pub const ITEMS_PER_PAGE: usize = 20;

/// One page of items plus the total page count of the view it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Total pages for `len` items: `max(1, ceil(len / page_size))`.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice page `page` (1-based) out of `view`.
///
/// Pages beyond `total_pages` (and page 0) yield an empty slice; callers clamp
/// beforehand if they want a non-empty result.
pub fn paginate<T>(view: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(view.len(), page_size);

    let items = match page.checked_sub(1) {
        Some(zero_based) => {
            let start = zero_based.saturating_mul(page_size).min(view.len());
            let end = start.saturating_add(page_size).min(view.len());
            &view[start..end]
        }
        None => &view[..0],
    };

    Page {
        items,
        total_pages: total,
    }
}

/// Page after `page`, stopping at `total_pages`.
pub fn next_page(page: usize, total_pages: usize) -> usize {
    page.saturating_add(1).min(total_pages.max(1))
}

/// Page before `page`, stopping at 1.
pub fn previous_page(page: usize) -> usize {
    page.saturating_sub(1).max(1)
}

/// Clamp `page` into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
