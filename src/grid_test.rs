use super::*;

// =============================================================
// Helpers
// =============================================================

fn store_with_cells(count: usize) -> GridStore {
    let mut grid = GridStore::new();
    grid.set_subject_count(count);
    grid
}

fn fill_cell(grid: &mut GridStore, id: &str, tag: &str) {
    assert!(grid.set_category(id, format!("category-{tag}")));
    assert!(grid.set_input_value(id, format!("caption-{tag}")));
    assert!(grid.push_image(id, format!("{tag}.jpg")));
}

// =============================================================
// GridCell
// =============================================================

#[test]
fn empty_cell_has_slot_identity() {
    let cell = GridCell::empty(2);
    assert_eq!(cell.id, "grid-2");
    assert_eq!(cell.index, 2);
    assert!(cell.category.is_empty());
    assert!(cell.images.is_empty());
    assert!(cell.input_value.is_empty());
    assert!(cell.card_type.is_none());
    assert!(!cell.checked);
    assert!(!cell.expanded);
}

#[test]
fn card_type_serde_lowercase() {
    assert_eq!(serde_json::to_string(&CardType::Large).unwrap(), "\"large\"");
    assert_eq!(serde_json::to_string(&CardType::Small).unwrap(), "\"small\"");
}

#[test]
fn grid_cell_serde_roundtrip() {
    let mut cell = GridCell::empty(1);
    cell.category = "sports".to_owned();
    cell.images.push("ball.jpg".to_owned());
    cell.card_type = Some(CardType::Large);
    cell.expanded = true;

    let json = serde_json::to_string(&cell).unwrap();
    let back: GridCell = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cell);
}

// =============================================================
// set_subject_count
// =============================================================

#[test]
fn new_store_has_no_cells() {
    let grid = GridStore::new();
    assert!(grid.is_empty());
}

#[test]
fn subject_count_creates_indexed_cells() {
    let grid = store_with_cells(4);
    assert_eq!(grid.len(), 4);
    let ids: Vec<&str> = grid.cells().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["grid-1", "grid-2", "grid-3", "grid-4"]);
    let indices: Vec<u32> = grid.cells().iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
}

#[test]
fn subject_count_clamps_to_valid_range() {
    let mut grid = GridStore::new();
    grid.set_subject_count(0);
    assert_eq!(grid.len(), 1);
    grid.set_subject_count(99);
    assert_eq!(grid.len(), 4);
}

#[test]
fn growing_preserves_existing_cells_by_index() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");
    fill_cell(&mut grid, "grid-2", "two");

    grid.set_subject_count(4);
    assert_eq!(grid.get("grid-1").unwrap().category, "category-one");
    assert_eq!(grid.get("grid-2").unwrap().category, "category-two");
    assert!(grid.get("grid-3").unwrap().category.is_empty());
    assert!(grid.get("grid-4").unwrap().category.is_empty());
}

#[test]
fn shrinking_truncates_tail_cells() {
    let mut grid = store_with_cells(4);
    fill_cell(&mut grid, "grid-1", "one");
    fill_cell(&mut grid, "grid-4", "four");

    grid.set_subject_count(2);
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.get("grid-1").unwrap().category, "category-one");
    assert!(grid.get("grid-4").is_none());
}

#[test]
fn three_cell_layout_tags_card_types() {
    let grid = store_with_cells(3);
    assert_eq!(grid.get("grid-1").unwrap().card_type, Some(CardType::Large));
    assert_eq!(grid.get("grid-2").unwrap().card_type, Some(CardType::Small));
    assert_eq!(grid.get("grid-3").unwrap().card_type, Some(CardType::Small));
}

#[test]
fn three_cell_layout_expands_index_one() {
    let grid = store_with_cells(3);
    let expanded: Vec<u32> = grid.cells().iter().filter(|c| c.expanded).map(|c| c.index).collect();
    assert_eq!(expanded, vec![1]);
}

#[test]
fn other_counts_clear_card_types_and_expansion() {
    let mut grid = store_with_cells(3);
    grid.swap_content("grid-1", "grid-2");
    grid.set_subject_count(4);
    for cell in grid.cells() {
        assert!(cell.card_type.is_none());
        assert!(!cell.expanded);
    }
}

#[test]
fn returning_to_three_cells_resets_expansion_to_index_one() {
    let mut grid = store_with_cells(3);
    grid.swap_content("grid-1", "grid-3");
    grid.set_subject_count(2);
    grid.set_subject_count(3);
    assert!(grid.get("grid-1").unwrap().expanded);
    assert!(!grid.get("grid-3").unwrap().expanded);
}

// =============================================================
// swap_content
// =============================================================

#[test]
fn swap_exchanges_content_fields() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");
    fill_cell(&mut grid, "grid-2", "two");

    assert!(grid.swap_content("grid-1", "grid-2"));

    let first = grid.get("grid-1").unwrap();
    assert_eq!(first.category, "category-two");
    assert_eq!(first.input_value, "caption-two");
    assert_eq!(first.images, vec!["two.jpg".to_owned()]);

    let second = grid.get("grid-2").unwrap();
    assert_eq!(second.category, "category-one");
    assert_eq!(second.input_value, "caption-one");
    assert_eq!(second.images, vec!["one.jpg".to_owned()]);
}

#[test]
fn swap_keeps_identity_and_shape_in_place() {
    let mut grid = store_with_cells(3);
    fill_cell(&mut grid, "grid-1", "one");
    fill_cell(&mut grid, "grid-2", "two");

    assert!(grid.swap_content("grid-1", "grid-2"));

    let first = grid.get("grid-1").unwrap();
    assert_eq!(first.id, "grid-1");
    assert_eq!(first.index, 1);
    assert_eq!(first.card_type, Some(CardType::Large));

    let second = grid.get("grid-2").unwrap();
    assert_eq!(second.id, "grid-2");
    assert_eq!(second.index, 2);
    assert_eq!(second.card_type, Some(CardType::Small));
}

#[test]
fn swap_moves_expansion_flag_with_content() {
    // Three-cell layout: index 1 starts expanded. Swapping cells 1 and 2
    // leaves the large frame at index 1 but the expansion flag follows the
    // content to index 2.
    let mut grid = store_with_cells(3);
    fill_cell(&mut grid, "grid-1", "hero");

    assert!(grid.swap_content("grid-1", "grid-2"));

    let first = grid.get("grid-1").unwrap();
    assert_eq!(first.card_type, Some(CardType::Large));
    assert!(!first.expanded);
    assert!(first.category.is_empty());

    let second = grid.get("grid-2").unwrap();
    assert_eq!(second.card_type, Some(CardType::Small));
    assert!(second.expanded);
    assert_eq!(second.category, "category-hero");
}

#[test]
fn swap_moves_checked_flag_with_content() {
    let mut grid = store_with_cells(2);
    grid.set_checked("grid-1", true);

    assert!(grid.swap_content("grid-1", "grid-2"));
    assert!(!grid.get("grid-1").unwrap().checked);
    assert!(grid.get("grid-2").unwrap().checked);
}

#[test]
fn swap_is_involutive() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");
    let before = grid.snapshot();

    grid.swap_content("grid-1", "grid-2");
    grid.swap_content("grid-1", "grid-2");
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn swap_same_id_is_noop() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");
    let before = grid.snapshot();

    assert!(!grid.swap_content("grid-1", "grid-1"));
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn swap_unknown_id_is_noop() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");
    let before = grid.snapshot();

    assert!(!grid.swap_content("grid-1", "grid-9"));
    assert!(!grid.swap_content("grid-9", "grid-1"));
    assert_eq!(grid.snapshot(), before);
}

// =============================================================
// Content setters
// =============================================================

#[test]
fn setters_reject_unknown_ids() {
    let mut grid = store_with_cells(1);
    assert!(!grid.set_category("grid-9", "x".to_owned()));
    assert!(!grid.set_input_value("grid-9", "x".to_owned()));
    assert!(!grid.set_checked("grid-9", true));
    assert!(!grid.push_image("grid-9", "x.jpg".to_owned()));
    assert!(!grid.remove_image("grid-9", 0));
    assert!(!grid.clear_content("grid-9"));
}

#[test]
fn push_image_respects_capacity() {
    let mut grid = store_with_cells(1);
    grid.set_image_count(2);
    assert!(grid.push_image("grid-1", "a.jpg".to_owned()));
    assert!(grid.push_image("grid-1", "b.jpg".to_owned()));
    assert!(!grid.push_image("grid-1", "c.jpg".to_owned()));
    assert_eq!(grid.get("grid-1").unwrap().images.len(), 2);
}

#[test]
fn remove_image_shifts_later_slots() {
    let mut grid = store_with_cells(1);
    grid.set_image_count(3);
    grid.push_image("grid-1", "a.jpg".to_owned());
    grid.push_image("grid-1", "b.jpg".to_owned());
    grid.push_image("grid-1", "c.jpg".to_owned());

    assert!(grid.remove_image("grid-1", 1));
    assert_eq!(
        grid.get("grid-1").unwrap().images,
        vec!["a.jpg".to_owned(), "c.jpg".to_owned()]
    );
}

#[test]
fn remove_image_out_of_range_is_noop() {
    let mut grid = store_with_cells(1);
    grid.push_image("grid-1", "a.jpg".to_owned());
    assert!(!grid.remove_image("grid-1", 5));
    assert_eq!(grid.get("grid-1").unwrap().images.len(), 1);
}

#[test]
fn image_count_clamps_and_truncates() {
    let mut grid = store_with_cells(1);
    grid.set_image_count(99);
    assert_eq!(grid.image_count(), 9);

    for i in 0..9 {
        assert!(grid.push_image("grid-1", format!("{i}.jpg")));
    }
    grid.set_image_count(0);
    assert_eq!(grid.image_count(), 1);
    assert_eq!(grid.get("grid-1").unwrap().images.len(), 1);
}

#[test]
fn clear_content_empties_but_keeps_slot() {
    let mut grid = store_with_cells(3);
    fill_cell(&mut grid, "grid-1", "one");
    grid.set_checked("grid-1", true);

    assert!(grid.clear_content("grid-1"));
    let cell = grid.get("grid-1").unwrap();
    assert!(cell.category.is_empty());
    assert!(cell.images.is_empty());
    assert!(cell.input_value.is_empty());
    assert!(!cell.checked);
    // Slot identity and layout flags survive.
    assert_eq!(cell.index, 1);
    assert_eq!(cell.card_type, Some(CardType::Large));
    assert!(cell.expanded);
}

// =============================================================
// Snapshots
// =============================================================

#[test]
fn load_snapshot_replaces_cells() {
    let mut grid = store_with_cells(4);
    let mut replacement = vec![GridCell::empty(1)];
    replacement[0].category = "restored".to_owned();

    grid.load_snapshot(replacement);
    assert_eq!(grid.len(), 1);
    assert_eq!(grid.get("grid-1").unwrap().category, "restored");
}

#[test]
fn snapshot_is_a_clone() {
    let mut grid = store_with_cells(2);
    fill_cell(&mut grid, "grid-1", "one");

    let mut snap = grid.snapshot();
    snap[0].category = "tampered".to_owned();
    assert_eq!(grid.get("grid-1").unwrap().category, "category-one");
}
