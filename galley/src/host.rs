// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owner-widget seam: policy queries and change notifications.

use text_document::TextLocation;

/// Why edited text is being committed to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextCommitKind {
    /// Losing focus or another implicit commit.
    Default,
    /// The user pressed enter in a single-line editor.
    OnEnter,
    /// The user moved focus away deliberately (navigation or pointer).
    OnUserMovedFocus,
    /// Focus was cleared out from under the editor.
    OnCleared,
}

/// Why keyboard focus changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusCause {
    /// A pointer press.
    Mouse,
    /// Keyboard or gamepad navigation.
    Navigation,
    /// Focus was assigned programmatically.
    SetDirectly,
    /// Focus was cleared.
    Cleared,
    /// Another widget gave up focus.
    OtherWidgetLostFocus,
    /// The containing window was activated.
    WindowActivate,
}

/// The widget that owns the editor.
///
/// The engine asks the host for policy (read-only, multi-line, character
/// filtering) and reports changes back through the `on_*` callbacks. All
/// policy queries have conservative defaults; only the two that have no
/// sensible default are required.
pub trait EditorHost {
    /// Whether editing is disabled.
    fn is_read_only(&self) -> bool;

    /// Whether the editor holds multiple hard lines.
    fn is_multi_line(&self) -> bool;

    /// Whether the text is displayed obscured. Blocks copy and cut.
    fn is_password(&self) -> bool {
        false
    }

    /// Host-level character filtering, on top of the engine's own
    /// control-character rejection.
    fn can_type_character(&self, _ch: char) -> bool {
        true
    }

    /// Whether enter inserts a line break (multi-line editors only).
    fn can_insert_carriage_return(&self) -> bool {
        self.is_multi_line()
    }

    /// Whether committing with enter should leave all text selected.
    fn should_select_all_on_commit(&self) -> bool {
        false
    }

    /// Whether receiving focus should select all text.
    fn should_select_all_when_focused(&self) -> bool {
        false
    }

    /// Whether receiving focus via keyboard should jump to the document
    /// end.
    fn should_jump_to_end_when_focused(&self) -> bool {
        false
    }

    /// Whether losing focus should clear the selection.
    fn should_clear_selection_on_focus_loss(&self) -> bool {
        true
    }

    /// Whether escape should restore the last committed text.
    fn should_revert_text_on_escape(&self) -> bool {
        false
    }

    /// Whether the editor currently has keyboard focus. Controls caret
    /// and selection highlight styling.
    fn has_keyboard_focus(&self) -> bool {
        true
    }

    /// The edited text changed.
    fn on_text_changed(&mut self, _text: &str) {}

    /// The edited text was committed.
    fn on_text_committed(&mut self, _text: &str, _kind: TextCommitKind) {}

    /// The cursor's interaction location changed.
    fn on_cursor_moved(&mut self, _location: TextLocation) {}
}
