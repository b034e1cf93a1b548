// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::Point;

use crate::tests::{cursor_at, editor, layout, loc, TestHost};
use crate::{
    Affinity, CursorAction, Granularity, JumpTarget, MonospaceLayout, MoveCursor, Movement,
};

fn right(action: CursorAction) -> MoveCursor {
    MoveCursor::cardinal(Movement::Right, Granularity::Character, action)
}

fn left(action: CursorAction) -> MoveCursor {
    MoveCursor::cardinal(Movement::Left, Granularity::Character, action)
}

#[test]
fn horizontal_movement_steps_by_grapheme() {
    let mut ed = editor("a👍b");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    assert!(drv.move_cursor(right(CursorAction::MoveCursor)));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 1));

    let mut drv = ed.driver(&layout, &mut host);
    drv.move_cursor(right(CursorAction::MoveCursor));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 5), "the emoji is one step");
}

#[test]
fn movement_flows_across_line_boundaries() {
    let mut ed = editor("ab\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    drv.move_cursor(right(CursorAction::MoveCursor));
    assert_eq!(drv.editor.cursor().location(), loc(1, 0));
    drv.move_cursor(left(CursorAction::MoveCursor));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 2));
}

#[test]
fn movement_at_the_document_edges_stays_put() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    assert!(drv.move_cursor(left(CursorAction::MoveCursor)));
    assert_eq!(drv.editor.cursor().location(), loc(0, 0));
    drv.go_to(loc(0, 2));
    assert!(drv.move_cursor(right(CursorAction::MoveCursor)));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 2));
}

#[test]
fn shift_movement_extends_a_selection() {
    let mut ed = editor("abc");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    drv.move_cursor(right(CursorAction::SelectText));
    drv.move_cursor(right(CursorAction::SelectText));
    drop(drv);
    assert_eq!(ed.selected_text().as_deref(), Some("ab"));
}

#[test]
fn plain_movement_with_a_selection_snaps_to_its_edge() {
    let mut ed = editor("abcdef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    drv.move_cursor(right(CursorAction::SelectText));
    drv.move_cursor(right(CursorAction::SelectText));
    // Selection is 2..4 with the cursor at 4; left snaps to the beginning
    // without moving further.
    drv.move_cursor(left(CursorAction::MoveCursor));
    assert_eq!(drv.editor.cursor().location(), loc(0, 2));
    assert!(!drv.editor.any_text_selected());

    drv.move_cursor(right(CursorAction::SelectText));
    drv.move_cursor(right(CursorAction::SelectText));
    drv.move_cursor(right(CursorAction::MoveCursor));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 4));
}

#[test]
fn word_movement_lands_on_word_starts() {
    let mut ed = editor("one two three");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    drv.move_cursor(MoveCursor::cardinal(
        Movement::Right,
        Granularity::Word,
        CursorAction::MoveCursor,
    ));
    assert_eq!(drv.editor.cursor().location(), loc(0, 4));
    drv.move_cursor(MoveCursor::cardinal(
        Movement::Right,
        Granularity::Word,
        CursorAction::MoveCursor,
    ));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 8));
}

#[test]
fn vertical_movement_keeps_the_preferred_column() {
    let mut ed = editor("abcdef\nab\nabcdef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 5));
    let down = MoveCursor::cardinal(
        Movement::Down,
        Granularity::Character,
        CursorAction::MoveCursor,
    );
    assert!(drv.move_cursor(down));
    assert_eq!(drv.editor.cursor().location(), loc(1, 2));
    assert!(drv.move_cursor(down));
    drop(drv);
    assert_eq!(cursor_at(&ed), (2, 5), "the preferred column is restored");
}

#[test]
fn vertical_movement_is_unhandled_in_single_line_editors() {
    let mut ed = editor("abc");
    let layout = layout();
    let mut host = TestHost::single_line();
    let mut drv = ed.driver(&layout, &mut host);
    assert!(!drv.move_cursor(MoveCursor::cardinal(
        Movement::Down,
        Granularity::Character,
        CursorAction::MoveCursor,
    )));
}

#[test]
fn clicking_positions_the_cursor() {
    let mut ed = editor("abc\ndef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    assert!(drv.move_cursor(MoveCursor::to_point(
        Point::new(22.0, 30.0),
        CursorAction::MoveCursor,
    )));
    drop(drv);
    assert_eq!(cursor_at(&ed), (1, 2));
    assert!(host.cursor_moves > 0);
}

#[test]
fn clicking_the_right_gutter_keeps_the_cursor_on_the_wrapped_line() {
    let mut ed = editor("abcdef");
    let layout = MonospaceLayout::new(10.0, 20.0).with_wrap_column(3);
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.move_cursor(MoveCursor::to_point(
        Point::new(95.0, 5.0),
        CursorAction::MoveCursor,
    ));
    drop(drv);
    // The wrap offset is shared with the next visual line; upstream
    // affinity pins the caret to the end of the first one.
    assert_eq!(cursor_at(&ed), (0, 3));
    assert_eq!(ed.cursor().affinity(), Affinity::Upstream);
    assert_eq!(ed.cursor().literal_location(ed.document()), loc(0, 2));
}

#[test]
fn vertical_movement_through_wrapped_rows() {
    let mut ed = editor("abcdefgh");
    let layout = MonospaceLayout::new(10.0, 20.0).with_wrap_column(4);
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    drv.move_cursor(MoveCursor::cardinal(
        Movement::Down,
        Granularity::Character,
        CursorAction::MoveCursor,
    ));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 6), "down moves one visual row");
}

#[test]
fn jump_to_line_edges() {
    let mut ed = editor("abc\ndef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(1, 1));
    drv.jump_to(JumpTarget::LineStart, CursorAction::MoveCursor);
    assert_eq!(drv.editor.cursor().location(), loc(1, 0));
    drv.jump_to(JumpTarget::LineEnd, CursorAction::MoveCursor);
    drop(drv);
    assert_eq!(cursor_at(&ed), (1, 3));
}

#[test]
fn jump_to_the_end_of_a_wrapped_row_is_upstream() {
    let mut ed = editor("abcdef");
    let layout = MonospaceLayout::new(10.0, 20.0).with_wrap_column(3);
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    drv.jump_to(JumpTarget::LineEnd, CursorAction::MoveCursor);
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 3));
    assert_eq!(ed.cursor().affinity(), Affinity::Upstream);
}

#[test]
fn jump_to_document_edges() {
    let mut ed = editor("abc\ndef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(1, 1));
    drv.jump_to(JumpTarget::DocumentStart, CursorAction::MoveCursor);
    assert_eq!(drv.editor.cursor().location(), loc(0, 0));
    drv.jump_to(JumpTarget::DocumentEnd, CursorAction::SelectText);
    drop(drv);
    assert_eq!(cursor_at(&ed), (1, 3));
    assert_eq!(ed.selected_text().as_deref(), Some("abc\ndef"));
}

#[test]
fn go_to_ignores_out_of_bounds_locations() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    drv.go_to(loc(5, 0));
    drv.go_to(loc(0, 99));
    drop(drv);
    assert_eq!(cursor_at(&ed), (0, 1));
}

#[test]
fn select_all_selects_everything() {
    let mut ed = editor("ab\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    drop(drv);
    assert_eq!(ed.selected_text().as_deref(), Some("ab\ncd"));
    assert_eq!(cursor_at(&ed), (1, 2));
}

#[test]
fn end_of_line_cursor_reports_upstream_affinity() {
    let mut ed = editor("abc\ndef");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 3));
    drop(drv);
    assert_eq!(ed.cursor().affinity(), Affinity::Upstream);
    assert_eq!(ed.cursor().literal_location(ed.document()), loc(0, 2));
}
