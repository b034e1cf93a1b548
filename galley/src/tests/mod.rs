// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-level tests, driven through the public API with the monospace
//! layout and a recording host.

mod editing;
mod movement;
mod properties;

use text_document::TextLocation;

use crate::{EditorConfig, EditorHost, MonospaceLayout, TextCommitKind, TextEditor};

/// A host that records every notification and exposes its policy knobs as
/// plain fields.
pub(crate) struct TestHost {
    pub(crate) read_only: bool,
    pub(crate) multi_line: bool,
    pub(crate) password: bool,
    pub(crate) focused: bool,
    pub(crate) select_all_on_commit: bool,
    pub(crate) select_all_when_focused: bool,
    pub(crate) jump_to_end_when_focused: bool,
    pub(crate) revert_on_escape: bool,
    pub(crate) changes: Vec<String>,
    pub(crate) commits: Vec<(String, TextCommitKind)>,
    pub(crate) cursor_moves: usize,
}

impl TestHost {
    pub(crate) fn multi_line() -> Self {
        Self {
            read_only: false,
            multi_line: true,
            password: false,
            focused: true,
            select_all_on_commit: false,
            select_all_when_focused: false,
            jump_to_end_when_focused: false,
            revert_on_escape: false,
            changes: Vec::new(),
            commits: Vec::new(),
            cursor_moves: 0,
        }
    }

    pub(crate) fn single_line() -> Self {
        Self {
            multi_line: false,
            ..Self::multi_line()
        }
    }
}

impl EditorHost for TestHost {
    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn is_multi_line(&self) -> bool {
        self.multi_line
    }

    fn is_password(&self) -> bool {
        self.password
    }

    fn should_select_all_on_commit(&self) -> bool {
        self.select_all_on_commit
    }

    fn should_select_all_when_focused(&self) -> bool {
        self.select_all_when_focused
    }

    fn should_jump_to_end_when_focused(&self) -> bool {
        self.jump_to_end_when_focused
    }

    fn should_revert_text_on_escape(&self) -> bool {
        self.revert_on_escape
    }

    fn has_keyboard_focus(&self) -> bool {
        self.focused
    }

    fn on_text_changed(&mut self, text: &str) {
        self.changes.push(text.to_owned());
    }

    fn on_text_committed(&mut self, text: &str, kind: TextCommitKind) {
        self.commits.push((text.to_owned(), kind));
    }

    fn on_cursor_moved(&mut self, _location: TextLocation) {
        self.cursor_moves += 1;
    }
}

pub(crate) fn editor(text: &str) -> TextEditor {
    TextEditor::with_text(text, EditorConfig::default())
}

/// 10pt advance, 20pt line height, no wrapping.
pub(crate) fn layout() -> MonospaceLayout {
    MonospaceLayout::new(10.0, 20.0)
}

pub(crate) fn loc(line: usize, offset: usize) -> TextLocation {
    TextLocation::new(line, offset)
}

pub(crate) fn cursor_at(editor: &TextEditor) -> (usize, usize) {
    let location = editor.cursor().location();
    (location.line(), location.offset())
}
