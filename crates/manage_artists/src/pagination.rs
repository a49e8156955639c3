//! Conversion between table paginator events (zero-based row offsets) and
//! the one-based page index the listing endpoint expects.

use shared::domain::FIRST_PAGE;

/// Records shown per page when nothing else is configured.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 3;

/// Paginator event: `first` is the zero-based index of the first row on the
/// requested page, `rows` the page size the paginator rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub first: u64,
    pub rows: u32,
}

impl PageChange {
    pub fn to_page(page: u32, rows: u32) -> Self {
        Self {
            first: first_for_page(page, rows),
            rows,
        }
    }
}

pub fn page_for_first(first: u64, page_size: u32) -> u32 {
    let index = first / u64::from(page_size.max(1));
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_add(FIRST_PAGE)
}

pub fn first_for_page(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(FIRST_PAGE) - FIRST_PAGE) * u64::from(page_size)
}

pub fn page_count(total_records: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    u32::try_from(total_records.div_ceil(page_size)).unwrap_or(u32::MAX)
}
