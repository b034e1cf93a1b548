// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::tests::{cursor_at, editor, layout, loc, TestHost};
use crate::{Clipboard, CursorAction, InMemoryClipboard, MoveCursor, TextCommitKind};

#[test]
fn typing_inserts_at_the_cursor() {
    let mut ed = editor("ac");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    assert!(drv.type_char('b'));
    drop(drv);
    assert_eq!(ed.text(), "abc");
    assert_eq!(cursor_at(&ed), (0, 2));
    assert_eq!(host.changes, ["abc"]);
}

#[test]
fn typing_replaces_the_selection() {
    let mut ed = editor("hello");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    assert!(drv.type_char('x'));
    drop(drv);
    assert_eq!(ed.text(), "x");
    assert!(!ed.any_text_selected());
}

#[test]
fn control_characters_are_rejected() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    assert!(!drv.type_char('\u{1}'));
    drop(drv);
    assert_eq!(ed.text(), "ab");
    assert!(host.changes.is_empty());
}

#[test]
fn tab_is_a_typeable_character() {
    let mut ed = editor("");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    assert!(drv.type_char('\t'));
    drop(drv);
    assert_eq!(ed.text(), "\t");
}

#[test]
fn handle_character_swallows_tab_and_routes_backspace() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    assert!(drv.handle_character('\u{8}'));
    drop(drv);
    assert_eq!(ed.text(), "a");
}

#[test]
fn backspace_removes_one_grapheme() {
    // "e" plus combining acute is a single grapheme cluster.
    let mut ed = editor("ae\u{301}");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 4));
    assert!(drv.backspace());
    drop(drv);
    assert_eq!(ed.text(), "a");
    assert_eq!(cursor_at(&ed), (0, 1));
}

#[test]
fn backspace_at_line_start_joins_with_the_previous_line() {
    let mut ed = editor("ab\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(1, 0));
    assert!(drv.backspace());
    drop(drv);
    assert_eq!(ed.text(), "abcd");
    assert_eq!(cursor_at(&ed), (0, 2));
}

#[test]
fn backspace_at_document_start_does_nothing_to_the_text() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    drv.backspace();
    drop(drv);
    assert_eq!(ed.text(), "ab");
    assert!(host.changes.is_empty());
}

#[test]
fn delete_removes_the_grapheme_under_the_cursor() {
    let mut ed = editor("abc");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    assert!(drv.delete());
    drop(drv);
    assert_eq!(ed.text(), "ac");
    assert_eq!(cursor_at(&ed), (0, 1));
}

#[test]
fn delete_on_an_empty_line_removes_the_line() {
    let mut ed = editor("ab\n\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(1, 0));
    assert!(drv.delete());
    drop(drv);
    assert_eq!(ed.text(), "ab\ncd");
}

#[test]
fn delete_at_line_end_joins_with_the_next_line() {
    let mut ed = editor("ab\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    assert!(drv.delete());
    drop(drv);
    assert_eq!(ed.text(), "abcd");
    assert_eq!(cursor_at(&ed), (0, 2));
}

#[test]
fn deleting_a_multi_line_selection_joins_the_remnants() {
    let mut ed = editor("one\ntwo\nthree");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    drv.move_cursor(MoveCursor::to_point(
        peniko::kurbo::Point::new(20.0, 50.0),
        CursorAction::SelectText,
    ));
    assert!(drv.delete_selected_text());
    drop(drv);
    assert_eq!(ed.text(), "oree");
    assert_eq!(cursor_at(&ed), (0, 1));
}

#[test]
fn deleting_everything_leaves_one_empty_line() {
    let mut ed = editor("one\ntwo\nthree");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    assert!(drv.delete_selected_text());
    drop(drv);
    assert_eq!(ed.text(), "");
    assert_eq!(ed.document().line_count(), 1);
    assert_eq!(cursor_at(&ed), (0, 0));
}

#[test]
fn carriage_return_splits_the_line() {
    let mut ed = editor("abcd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    assert!(drv.carriage_return());
    drop(drv);
    assert_eq!(ed.text(), "ab\ncd");
    assert_eq!(cursor_at(&ed), (1, 0));
}

#[test]
fn carriage_return_commits_in_a_single_line_editor() {
    let mut ed = editor("done");
    let layout = layout();
    let mut host = TestHost::single_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    assert!(drv.carriage_return());
    drop(drv);
    assert_eq!(ed.text(), "done");
    assert_eq!(
        host.commits,
        [("done".to_owned(), TextCommitKind::OnEnter)]
    );
}

#[test]
fn committing_can_select_all() {
    let mut ed = editor("done");
    let layout = layout();
    let mut host = TestHost::single_line();
    host.select_all_on_commit = true;
    let mut drv = ed.driver(&layout, &mut host);
    drv.carriage_return();
    drop(drv);
    assert_eq!(ed.selected_text().as_deref(), Some("done"));
}

#[test]
fn insert_text_splits_on_line_breaks() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    assert!(drv.insert_text("x\ny"));
    drop(drv);
    assert_eq!(ed.text(), "ax\nyb");
    assert_eq!(cursor_at(&ed), (1, 1));
}

#[test]
fn single_line_editors_strip_line_breaks_from_inserted_text() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::single_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 1));
    drv.insert_text("x\ny");
    drop(drv);
    assert_eq!(ed.text(), "axyb");
}

#[test]
fn inserted_text_is_filtered_for_control_characters() {
    let mut ed = editor("");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.insert_text("a\u{1}b\u{7f}c");
    drop(drv);
    assert_eq!(ed.text(), "ab\u{7f}c");
}

#[test]
fn insert_replaces_the_selection() {
    let mut ed = editor("one two");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_word_at(peniko::kurbo::Point::new(5.0, 10.0));
    drv.insert_text("1");
    drop(drv);
    assert_eq!(ed.text(), "1 two");
}

#[test]
fn backspace_word_removes_back_to_the_word_start() {
    let mut ed = editor("one two");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 7));
    assert!(drv.backspace_word());
    drop(drv);
    assert_eq!(ed.text(), "one ");
    assert_eq!(cursor_at(&ed), (0, 4));
}

#[test]
fn delete_word_removes_forward_to_the_next_word_start() {
    let mut ed = editor("one two");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 0));
    assert!(drv.delete_word());
    drop(drv);
    assert_eq!(ed.text(), "two");
}

#[test]
fn read_only_editors_refuse_edits() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    host.read_only = true;
    let mut drv = ed.driver(&layout, &mut host);
    assert!(!drv.type_char('x'));
    assert!(!drv.backspace());
    assert!(!drv.delete());
    assert!(!drv.carriage_return());
    assert!(!drv.insert_text("y"));
    drop(drv);
    assert_eq!(ed.text(), "ab");
    assert!(host.changes.is_empty());
}

#[test]
fn cut_copy_paste_roundtrip() {
    let mut ed = editor("one two");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut clipboard = InMemoryClipboard::default();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_word_at(peniko::kurbo::Point::new(5.0, 10.0));
    assert!(drv.cut(&mut clipboard));
    assert_eq!(clipboard.text().as_deref(), Some("one"));
    drv.go_to(loc(0, 4));
    assert!(drv.paste(&mut clipboard));
    drop(drv);
    assert_eq!(ed.text(), " twoone");
}

#[test]
fn copy_leaves_the_text_alone() {
    let mut ed = editor("abc");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut clipboard = InMemoryClipboard::default();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    assert!(drv.copy(&mut clipboard));
    drop(drv);
    assert_eq!(ed.text(), "abc");
    assert_eq!(clipboard.text().as_deref(), Some("abc"));
}

#[test]
fn password_fields_block_copy_and_cut() {
    let mut ed = editor("secret");
    let layout = layout();
    let mut host = TestHost::multi_line();
    host.password = true;
    let mut clipboard = InMemoryClipboard::default();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    assert!(!drv.copy(&mut clipboard));
    assert!(!drv.cut(&mut clipboard));
    drop(drv);
    assert_eq!(clipboard.text(), None);
    assert_eq!(ed.text(), "secret");
}

#[test]
fn copying_a_multi_line_selection_joins_with_newlines() {
    let mut ed = editor("ab\ncd");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut clipboard = InMemoryClipboard::default();
    let mut drv = ed.driver(&layout, &mut host);
    drv.select_all();
    drv.copy(&mut clipboard);
    drop(drv);
    assert_eq!(clipboard.text().as_deref(), Some("ab\ncd"));
}

#[test]
fn escape_clears_the_selection_before_reverting() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    host.revert_on_escape = true;
    let mut drv = ed.driver(&layout, &mut host);
    drv.insert_text("xy");
    drv.select_all();
    assert!(drv.handle_escape());
    drop(drv);
    assert!(!ed.any_text_selected());
    assert_eq!(ed.text(), "xyab");
}

#[test]
fn escape_reverts_to_the_original_text() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    host.revert_on_escape = true;
    let mut drv = ed.driver(&layout, &mut host);
    drv.go_to(loc(0, 2));
    drv.insert_text("c");
    assert!(drv.handle_escape());
    drop(drv);
    assert_eq!(ed.text(), "ab");
    assert_eq!(
        host.commits,
        [("ab".to_owned(), TextCommitKind::OnCleared)]
    );
}

#[test]
fn escape_without_anything_to_do_is_unhandled() {
    let mut ed = editor("ab");
    let layout = layout();
    let mut host = TestHost::multi_line();
    let mut drv = ed.driver(&layout, &mut host);
    assert!(!drv.handle_escape());
}
