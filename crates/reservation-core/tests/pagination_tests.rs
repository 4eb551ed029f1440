//! Tests for the listing pagination bar.

use reservation_core::pagination::{has_next, has_previous};
use reservation_core::{page_items, PageItem};

/// Render items compactly: page numbers are one-based, `*` marks the active
/// page, `..` an ellipsis.
fn render(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page { index, active: true } => format!("*{}", index + 1),
            PageItem::Page { index, .. } => format!("{}", index + 1),
            PageItem::Ellipsis => "..".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn no_pages() {
    assert!(page_items(0, 0, 1).is_empty());
}

#[test]
fn single_page() {
    assert_eq!(render(&page_items(0, 1, 1)), "*1");
}

#[test]
fn two_pages() {
    assert_eq!(render(&page_items(1, 2, 1)), "1 *2");
}

#[test]
fn first_of_many() {
    assert_eq!(render(&page_items(0, 10, 1)), "*1 2 .. 10");
}

#[test]
fn middle_of_many() {
    assert_eq!(render(&page_items(4, 10, 1)), "1 .. 4 *5 6 .. 10");
}

#[test]
fn near_start_has_no_leading_ellipsis() {
    assert_eq!(render(&page_items(2, 10, 1)), "1 2 *3 4 .. 10");
}

#[test]
fn near_end_has_no_trailing_ellipsis() {
    assert_eq!(render(&page_items(7, 10, 1)), "1 .. 7 *8 9 10");
}

#[test]
fn last_of_many() {
    assert_eq!(render(&page_items(9, 10, 1)), "1 .. 9 *10");
}

#[test]
fn wider_neighborhood() {
    assert_eq!(render(&page_items(5, 12, 2)), "1 .. 4 5 *6 7 8 .. 12");
}

#[test]
fn current_past_end_is_clamped() {
    assert_eq!(render(&page_items(42, 3, 1)), "1 2 *3");
}

#[test]
fn prev_next_flags() {
    assert!(!has_previous(0));
    assert!(has_previous(1));
    assert!(has_next(0, 2));
    assert!(!has_next(1, 2));
    assert!(!has_next(0, 0));
}

#[test]
fn items_serialize_with_type_tag() {
    let json = serde_json::to_value(page_items(0, 3, 1)).unwrap();
    assert_eq!(json[0]["type"], "page");
    assert_eq!(json[0]["index"], 0);
    assert_eq!(json[0]["active"], true);
}

#[test]
fn huge_neighbor_count_shows_every_page() {
    assert_eq!(render(&page_items(0, 5, usize::MAX)), "*1 2 3 4 5");
    assert_eq!(render(&page_items(4, 5, usize::MAX)), "1 2 3 4 *5");
    assert!(!has_next(usize::MAX, usize::MAX));
}

#[test]
fn neighbor_count_from_loaded_config() {
    let config = reservation_core::EngineConfig::from_json(r#"{"page_neighbors": 18446744073709551615}"#)
        .unwrap();
    assert_eq!(render(&page_items(2, 5, config.page_neighbors)), "1 2 *3 4 5");
}
