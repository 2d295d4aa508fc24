use opsdesk_table::page::slice;
use opsdesk_table::{PageWindow, TableError};
use proptest::prelude::*;

// ── PageWindow ───────────────────────────────────────────────────

#[test]
fn zero_size_is_rejected() {
    assert!(matches!(
        PageWindow::new(0, 0),
        Err(TableError::InvalidPageSize(0))
    ));
}

#[test]
fn window_start_and_page_count() {
    let window = PageWindow::new(2, 5).unwrap();
    assert_eq!(window.start(), 10);
    assert_eq!(window.page_count(11), 3);
    assert_eq!(window.page_count(10), 2);
    assert_eq!(window.page_count(0), 0);
}

#[test]
fn first_page_is_always_in_range() {
    let window = PageWindow::first(10).unwrap();
    assert!(window.is_in_range(0));
}

#[test]
fn later_page_needs_at_least_one_item() {
    let window = PageWindow::new(1, 10).unwrap();
    assert!(!window.is_in_range(10));
    assert!(window.is_in_range(11));
}

// ── slice ────────────────────────────────────────────────────────

#[test]
fn slice_returns_requested_window() {
    let items: Vec<u32> = (0..12).collect();
    assert_eq!(slice(&items, PageWindow::new(0, 5).unwrap()), &[0, 1, 2, 3, 4]);
    assert_eq!(slice(&items, PageWindow::new(2, 5).unwrap()), &[10, 11]);
}

#[test]
fn slice_past_end_is_empty() {
    let items: Vec<u32> = (0..12).collect();
    assert!(slice(&items, PageWindow::new(3, 5).unwrap()).is_empty());
    assert!(slice(&items, PageWindow::new(usize::MAX, 5).unwrap()).is_empty());
}

#[test]
fn slice_of_empty_sequence() {
    let items: Vec<u32> = Vec::new();
    assert!(slice(&items, PageWindow::first(5).unwrap()).is_empty());
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// Walking every page visits each item exactly once, in order.
    #[test]
    fn pages_partition_the_sequence(len in 0usize..200, size in 1usize..30) {
        let items: Vec<usize> = (0..len).collect();
        let first = PageWindow::first(size).unwrap();
        let mut walked = Vec::new();
        for page in 0..first.page_count(len) {
            let chunk = slice(&items, first.with_page(page));
            prop_assert!(!chunk.is_empty());
            prop_assert!(chunk.len() <= size);
            walked.extend_from_slice(chunk);
        }
        prop_assert_eq!(walked, items);
    }

    #[test]
    fn slice_never_exceeds_size(len in 0usize..100, page in 0usize..50, size in 1usize..20) {
        let items: Vec<usize> = (0..len).collect();
        let window = PageWindow::new(page, size).unwrap();
        let chunk = slice(&items, window);
        prop_assert!(chunk.len() <= size);
        prop_assert_eq!(chunk.is_empty(), !window.is_in_range(len) || len == 0);
    }
}
