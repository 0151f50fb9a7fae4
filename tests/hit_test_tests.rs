//! Hit testing: pointer to cell, cell to rectangle, and their round trip.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

mod common;

use canvasgrid::{CellAddress, CellRect, ColumnDef, RecordRow, RenderOptions};
use common::three_column_grid;
use std::collections::HashMap;
use test_case::test_case;

#[test]
fn pointer_in_first_data_column_hits_its_key() {
    let grid = three_column_grid(10).build();
    assert_eq!(
        grid.get_cell_at(150.0, 60.0),
        Some(CellAddress::new(0, Some("a")))
    );
}

#[test_case(0.0 ; "top edge")]
#[test_case(20.0 ; "middle of header")]
#[test_case(39.999 ; "just above body")]
#[test_case(-5.0 ; "above the canvas")]
fn header_band_never_hits(y: f64) {
    let grid = three_column_grid(10).scroll(0.0, 400.0).build();
    for x in [0.0, 60.0, 150.0, 300.0, 500.0] {
        assert_eq!(grid.get_cell_at(x, y), None);
    }
}

#[test_case(0.0, 0.0 ; "left edge")]
#[test_case(119.0, 0.0 ; "right edge of identity band")]
#[test_case(10.0, 90.0 ; "scrolled into identity band")]
fn identity_band_has_no_column_key(x: f64, scroll_left: f64) {
    let grid = three_column_grid(10).scroll(scroll_left, 0.0).build();
    let hit = grid.get_cell_at(x, 100.0).unwrap();
    assert_eq!(hit.row_index, 1);
    assert_eq!(hit.column_key, None);
}

#[test_case(120.0, "a" ; "left edge of a")]
#[test_case(219.9, "a" ; "right edge of a")]
#[test_case(220.0, "b" ; "left edge of b")]
#[test_case(569.0, "c" ; "right edge of c")]
fn column_bands_are_half_open(x: f64, key: &str) {
    let grid = three_column_grid(10).build();
    assert_eq!(
        grid.get_cell_at(x, 45.0).and_then(|hit| hit.column_key),
        Some(key.to_string())
    );
}

#[test]
fn pointer_past_last_column_is_none() {
    let grid = three_column_grid(10).build();
    assert_eq!(grid.get_cell_at(570.0, 60.0), None);
    assert_eq!(grid.get_cell_at(799.0, 60.0), None);
}

#[test]
fn pointer_below_last_row_is_none() {
    let grid = three_column_grid(5).build();
    assert!(grid.get_cell_at(150.0, 40.0 + 4.5 * 40.0).is_some());
    assert_eq!(grid.get_cell_at(150.0, 40.0 + 5.0 * 40.0), None);
}

#[test]
fn rect_for_identity_and_data_columns() {
    let grid = three_column_grid(10).build();
    assert_eq!(
        grid.get_cell_rect(0, None),
        Some(CellRect::new(0.0, 40.0, 120.0, 40.0))
    );
    assert_eq!(
        grid.get_cell_rect(2, Some("b")),
        Some(CellRect::new(220.0, 120.0, 150.0, 40.0))
    );
}

#[test]
fn rect_is_viewport_relative() {
    let grid = three_column_grid(100).scroll(75.0, 1000.0).build();
    let rect = grid.get_cell_rect(30, Some("c")).unwrap();
    assert_eq!(rect.x, 370.0 - 75.0);
    assert_eq!(rect.y, 40.0 + 30.0 * 40.0 - 1000.0);
}

#[test]
fn rect_out_of_range_is_none() {
    let grid = three_column_grid(3).build();
    assert_eq!(grid.get_cell_rect(3, None), None);
    assert_eq!(grid.get_cell_rect(usize::MAX, Some("a")), None);
    assert_eq!(grid.get_cell_rect(0, Some("nope")), None);
}

#[test_case(0.0, 0.0 ; "unscrolled")]
#[test_case(37.0, 512.0 ; "fractional scroll")]
#[test_case(400.0, 3_000.0 ; "far scroll")]
fn rect_center_round_trips(scroll_left: f64, scroll_top: f64) {
    let grid = three_column_grid(200).scroll(scroll_left, scroll_top).build();
    for row in [0, 1, 17, 80, 199] {
        for key in [None, Some("a"), Some("b"), Some("c")] {
            let rect = grid.get_cell_rect(row, key).unwrap();
            let (cx, cy) = rect.center();
            if cy < 40.0 {
                // Center sits under the header band; not addressable.
                assert_eq!(grid.get_cell_at(cx, cy), None);
                continue;
            }
            assert_eq!(
                grid.get_cell_at(cx, cy),
                Some(CellAddress::new(row, key)),
                "row {row} key {key:?}"
            );
        }
    }
}

#[test]
fn width_overrides_move_hit_bands() {
    let mut grid = three_column_grid(10).build();
    grid.set_column_widths([("a", 300.0)]);
    assert_eq!(
        grid.get_cell_at(400.0, 60.0).and_then(|hit| hit.column_key),
        Some("a".to_string())
    );
    assert_eq!(
        grid.get_cell_rect(0, Some("b")).map(|rect| rect.x),
        Some(420.0)
    );
}

#[test]
fn identity_override_resizes_identity_band() {
    let mut grid = three_column_grid(10).build();
    grid.set_column_widths([("__id__", 60.0)]);
    assert!(grid.get_cell_at(59.0, 60.0).unwrap().is_identity());
    assert_eq!(
        grid.get_cell_at(60.0, 60.0).and_then(|hit| hit.column_key),
        Some("a".to_string())
    );
}

#[test]
fn update_data_refreshes_row_bounds_immediately() {
    let mut grid = three_column_grid(2).build();
    assert_eq!(grid.get_cell_at(150.0, 200.0), None);

    grid.update_data(
        vec![ColumnDef::new("a", "A").with_width(100.0)],
        (0..10_i64).map(RecordRow::new).collect(),
        HashMap::new(),
    );
    grid.render(RenderOptions::default());
    assert_eq!(
        grid.get_cell_at(150.0, 200.0),
        Some(CellAddress::new(4, Some("a")))
    );

    grid.update_data(Vec::new(), Vec::new(), HashMap::new());
    assert_eq!(grid.get_cell_at(10.0, 60.0), None);
}
