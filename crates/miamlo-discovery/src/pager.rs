//! Pagination display math.
//!
//! The page selector shows a bounded strip regardless of how many pages
//! exist: every page number up to seven pages total, and beyond that the
//! first page, a window around the current page, and the last page, with
//! ellipses marking the gaps.

/// One slot in the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    Page(u32),
    Ellipsis,
}

/// Computes the page strip for `current` of `total` pages.
///
/// For `total <= 7` the strip is simply `1..=total`. Otherwise: page 1, an
/// ellipsis when `current > 3`, the window
/// `max(2, current-1) ..= min(total-1, current+1)`, an ellipsis when
/// `current < total - 2`, and the last page. The result width is bounded
/// (at most 7 entries) for any page count.
///
/// `current` is expected to lie in `1..=total`; `total == 0` yields an
/// empty strip.
#[must_use]
pub fn page_strip(current: u32, total: u32) -> Vec<PageEntry> {
    if total == 0 {
        return Vec::new();
    }

    let mut entries = Vec::new();
    if total <= 7 {
        for page in 1..=total {
            entries.push(PageEntry::Page(page));
        }
        return entries;
    }

    entries.push(PageEntry::Page(1));
    if current > 3 {
        entries.push(PageEntry::Ellipsis);
    }
    let window_start = current.saturating_sub(1).max(2);
    let window_end = current.saturating_add(1).min(total - 1);
    for page in window_start..=window_end {
        entries.push(PageEntry::Page(page));
    }
    if current < total - 2 {
        entries.push(PageEntry::Ellipsis);
    }
    entries.push(PageEntry::Page(total));

    entries
}

/// The `from`/`to` display values for "showing X–Y of N".
///
/// `from = (current-1) * page_size + 1`, `to = min(current * page_size,
/// total_items)`.
#[must_use]
pub fn showing_range(current: u32, page_size: u32, total_items: u64) -> (u64, u64) {
    let from = u64::from(current - 1) * u64::from(page_size) + 1;
    let to = (u64::from(current) * u64::from(page_size)).min(total_items);
    (from, to)
}
