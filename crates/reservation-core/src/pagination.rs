//! Which page links a listing shows around the current page.

use serde::{Deserialize, Serialize};

/// One entry in a pagination bar. Page indexes are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageItem {
    Page { index: usize, active: bool },
    Ellipsis,
}

/// Build the pagination bar for `current` of `total` pages.
///
/// The first page is always shown, then `neighbors` pages on either side of
/// `current`, then the last page. An ellipsis marks each skipped stretch.
/// `current` past the end is clamped to the last page. Any `neighbors` value
/// is accepted; one wider than the listing shows every page.
pub fn page_items(current: usize, total: usize, neighbors: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.min(total - 1);
    let page = |index: usize| PageItem::Page {
        index,
        active: index == current,
    };

    let mut items = vec![page(0)];

    if current > neighbors.saturating_add(1) {
        items.push(PageItem::Ellipsis);
    }

    let low = current.saturating_sub(neighbors).max(1);
    let high = current.saturating_add(neighbors).min(total.saturating_sub(2));
    items.extend((low..=high).map(page));

    if current.saturating_add(neighbors).saturating_add(2) < total {
        items.push(PageItem::Ellipsis);
    }

    if total > 1 {
        items.push(page(total - 1));
    }

    items
}

pub fn has_previous(current: usize) -> bool {
    current > 0
}

pub fn has_next(current: usize, total: usize) -> bool {
    current.saturating_add(1) < total
}
