// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use proptest::prelude::*;

use crate::tests::{editor, layout, TestHost};
use crate::{
    CaretPosition, CursorAction, Granularity, JumpTarget, MoveCursor, Movement,
};

proptest! {
    /// Inserting at any flat position behaves like splicing the flattened
    /// string at that position.
    #[test]
    fn insertion_matches_a_string_splice(
        text in "[a-c\\n]{0,30}",
        insert in "[x-z]{0,6}",
        seed in 0_usize..64,
    ) {
        let mut ed = editor(&text);
        let flat = ed.text();
        let pos = seed % (flat.len() + 1);
        let location = ed.document().offset_locations().offset_to_location(pos);

        let layout = layout();
        let mut host = TestHost::multi_line();
        let mut drv = ed.driver(&layout, &mut host);
        drv.go_to(location);
        drv.insert_text(&insert);
        drop(drv);

        let mut expected = String::with_capacity(flat.len() + insert.len());
        expected.push_str(&flat[..pos]);
        expected.push_str(&insert);
        expected.push_str(&flat[pos..]);
        prop_assert_eq!(ed.text(), expected);
    }

    /// Deleting a selection within one line behaves like splicing the
    /// range out of the string.
    #[test]
    fn deletion_matches_a_string_splice(
        text in "[a-f]{1,30}",
        a in 0_usize..32,
        b in 0_usize..32,
    ) {
        let mut ed = editor(&text);
        let start = a.min(b) % (text.len() + 1);
        let end = a.max(b) % (text.len() + 1);
        prop_assume!(start < end);

        let layout = layout();
        let mut host = TestHost::multi_line();
        let mut drv = ed.driver(&layout, &mut host);
        drv.ime_set_selection(start, end - start, CaretPosition::Ending);
        prop_assert!(drv.delete_selected_text());
        drop(drv);

        let expected = format!("{}{}", &text[..start], &text[end..]);
        prop_assert_eq!(ed.text(), expected);
    }

    /// Every typed character can be undone back to the starting text.
    #[test]
    fn typing_then_undoing_restores_the_text(
        text in "[a-c\\n]{0,20}",
        typed in "[m-p]{1,5}",
    ) {
        let mut ed = editor(&text);
        let layout = layout();
        let mut host = TestHost::multi_line();
        let mut drv = ed.driver(&layout, &mut host);
        drv.jump_to(JumpTarget::DocumentEnd, CursorAction::MoveCursor);
        for ch in typed.chars() {
            prop_assert!(drv.type_char(ch));
        }
        for _ in typed.chars() {
            prop_assert!(drv.undo());
        }
        drop(drv);
        prop_assert_eq!(ed.text(), text);
    }

    /// Cursor movement keeps the location valid and never mutates the
    /// document.
    #[test]
    fn movement_never_mutates_the_text(
        text in "[a-c\\n]{0,20}",
        moves in proptest::collection::vec(0_u8..4, 0..20),
    ) {
        let mut ed = editor(&text);
        let layout = layout();
        let mut host = TestHost::multi_line();
        let mut drv = ed.driver(&layout, &mut host);
        for step in moves {
            let movement = match step {
                0 => Movement::Left,
                1 => Movement::Right,
                2 => Movement::Up,
                _ => Movement::Down,
            };
            drv.move_cursor(MoveCursor::cardinal(
                movement,
                Granularity::Character,
                CursorAction::MoveCursor,
            ));
            let location = drv.editor.cursor().location();
            prop_assert!(drv.editor.document().validate_location(location).is_ok());
        }
        drop(drv);
        prop_assert_eq!(ed.text(), text);
    }
}
