// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editing controller and its driver.
//!
//! [`TextEditor`] owns everything that persists across frames: the
//! document, cursor and selection, undo stack, search and composition
//! state, and the highlight set. It is single-threaded and frame-driven;
//! the only cross-thread input is the virtual-keyboard queue, drained in
//! [`tick`](TextEditorDriver::tick).
//!
//! Operations that need the layout engine or the owning widget go through
//! [`TextEditorDriver`], a short-lived view bundling the editor with those
//! two collaborators.

use crossbeam_channel::Receiver;
use peniko::kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;
use text_document::{
    split_into_lines, Document, Error, TextLocation, TextSelection,
};
use tracing::{debug, trace, warn};

use crate::boundary;
use crate::clipboard::Clipboard;
use crate::commands::{CommandList, EditorCommand};
use crate::cursor::{Affinity, CursorAction, CursorInfo, Granularity, MoveCursor, MoveMethod, Movement};
use crate::highlight::{HighlightKind, LineHighlight};
use crate::host::{EditorHost, FocusCause, TextCommitKind};
use crate::input_method::{CaretPosition, CompositionState, ImeSelection};
use crate::layout::{TextHitPoint, VisualLayout};
use crate::search::{self, SearchCase};
use crate::undo::{UndoStack, UndoState};
use crate::virtual_keyboard::{self, VirtualKeyboardEntry, VirtualKeyboardEvent};

/// A monotonic counter nudged whenever the editor's visible state changes.
///
/// Renderers compare generations across frames to decide whether anything
/// needs repainting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    fn nudge(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Static configuration for a [`TextEditor`].
#[derive(Clone, Debug, Default)]
pub struct EditorConfig {
    /// The case rule applied to searches started without an explicit one.
    pub search_case: SearchCase,
    /// The commands exposed to context menus.
    pub commands: CommandList,
}

/// A jump destination for home/end style navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpTarget {
    /// The start of the cursor's visual line.
    LineStart,
    /// The end of the cursor's visual line.
    LineEnd,
    /// The start of the document.
    DocumentStart,
    /// The end of the document.
    DocumentEnd,
}

#[derive(Clone, Copy, Debug)]
struct ScrollTarget {
    location: TextLocation,
    upstream: bool,
}

/// The editable-text engine.
///
/// Holds all persistent editing state. Anything that needs geometry or
/// host policy is driven through [`driver`](Self::driver).
#[derive(Debug)]
pub struct TextEditor {
    doc: Document,
    cursor: CursorInfo,
    selection_start: Option<TextLocation>,
    /// The x position horizontal movement last placed the cursor at;
    /// vertical movement steers toward it.
    preferred_cursor_x: f64,
    undo: UndoStack,
    state_before_change: Option<UndoState>,
    transaction_depth: u32,
    composition: CompositionState,
    search_text: String,
    search_case: SearchCase,
    highlights: SmallVec<[LineHighlight; 8]>,
    /// The state to revert to when escape is pressed, captured when focus
    /// is received and after commits.
    original: UndoState,
    vk_entry: VirtualKeyboardEntry,
    vk_events: Receiver<VirtualKeyboardEvent>,
    scroll_offset: Vec2,
    scroll_target: Option<ScrollTarget>,
    config: EditorConfig,
    generation: Generation,
}

impl TextEditor {
    /// Creates an empty editor.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self::with_text("", config)
    }

    /// Creates an editor holding `text`.
    #[must_use]
    pub fn with_text(text: &str, config: EditorConfig) -> Self {
        let doc = Document::from_text(text);
        let (vk_entry, vk_events) = virtual_keyboard::channel();
        let mut editor = Self {
            doc,
            cursor: CursorInfo::new(),
            selection_start: None,
            preferred_cursor_x: 0.0,
            undo: UndoStack::default(),
            state_before_change: None,
            transaction_depth: 0,
            composition: CompositionState::default(),
            search_text: String::new(),
            search_case: config.search_case,
            highlights: SmallVec::new(),
            original: UndoState {
                text: String::new(),
                cursor: CursorInfo::new(),
                selection_start: None,
            },
            vk_entry,
            vk_events,
            scroll_offset: Vec2::ZERO,
            scroll_target: None,
            config,
            generation: Generation::default(),
        };
        editor.original = editor.make_undo_state();
        editor
    }

    /// Borrows the editor together with its layout and host collaborators
    /// for a burst of operations.
    pub fn driver<'a, L: VisualLayout, H: EditorHost>(
        &'a mut self,
        layout: &'a L,
        host: &'a mut H,
    ) -> TextEditorDriver<'a, L, H> {
        TextEditorDriver {
            editor: self,
            layout,
            host,
        }
    }

    /// The document being edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The edited text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.doc.to_text()
    }

    /// The cursor.
    #[must_use]
    pub fn cursor(&self) -> CursorInfo {
        self.cursor
    }

    /// The selection, anchored where selecting started with its active
    /// edge at the cursor. `None` when no selection is being tracked.
    #[must_use]
    pub fn selection(&self) -> Option<TextSelection> {
        self.selection_start
            .map(|start| TextSelection::new(start, self.cursor.location()))
    }

    /// Whether a non-empty span of text is selected.
    #[must_use]
    pub fn any_text_selected(&self) -> bool {
        self.selection().is_some_and(|sel| !sel.is_empty())
    }

    /// The selected text, lines joined with `\n`.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.selection().filter(|sel| !sel.is_empty())?;
        self.doc.text_in_range(selection).ok()
    }

    /// The highlight set built by the last state change, sorted by
    /// insertion (underlays first within a kind).
    #[must_use]
    pub fn line_highlights(&self) -> &[LineHighlight] {
        &self.highlights
    }

    /// Whether an IME composition is in progress.
    #[must_use]
    pub fn is_composing(&self) -> bool {
        self.composition.is_active()
    }

    /// The active search text.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// A handle virtual keyboards use to queue text for the next tick.
    #[must_use]
    pub fn virtual_keyboard_entry(&self) -> VirtualKeyboardEntry {
        self.vk_entry.clone()
    }

    /// The current scroll offset, maintained by [`TextEditorDriver::tick`].
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    /// The commands configured for this editor's context menu.
    #[must_use]
    pub fn command_list(&self) -> &CommandList {
        &self.config.commands
    }

    /// The render generation. Changes whenever the visible state does.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the text differs from the last committed value.
    #[must_use]
    pub fn has_text_changed_from_original(&self) -> bool {
        self.doc.to_text() != self.original.text
    }

    /// Forgets the selection anchor. The caller refreshes highlights.
    pub fn clear_selection(&mut self) {
        self.selection_start = None;
    }

    fn make_undo_state(&self) -> UndoState {
        UndoState {
            text: self.doc.to_text(),
            cursor: self.cursor,
            selection_start: self.selection_start,
        }
    }

    /// Replaces the document if `text` differs from the current content.
    ///
    /// Clears the selection and clamps the cursor into the new text.
    /// Returns whether anything changed.
    fn set_editable_text(&mut self, text: &str) -> bool {
        if self.doc.to_text() == text {
            return false;
        }
        self.doc.set_text(text);
        self.selection_start = None;
        let clamped = self.doc.clamp_location(self.cursor.location());
        self.cursor.set_location(&self.doc, clamped);
        self.generation.nudge();
        true
    }
}

/// Characters the engine refuses to type. Tab is text; other C0 controls
/// are not.
fn is_char_allowed(ch: char) -> bool {
    ch == '\t' || ch as u32 > 0x1F
}

fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

fn rejected(err: &Error) -> bool {
    warn!(%err, "edit rejected");
    false
}

/// The editor bundled with its two collaborators: the layout engine
/// (geometry) and the host (policy and notifications).
///
/// Create one with [`TextEditor::driver`], apply a burst of operations,
/// and drop it; the editor keeps all persistent state.
#[derive(Debug)]
pub struct TextEditorDriver<'a, L: VisualLayout, H: EditorHost> {
    /// The editor this driver operates on.
    pub editor: &'a mut TextEditor,
    /// The layout engine used for hit testing and geometry.
    pub layout: &'a L,
    /// The owning widget.
    pub host: &'a mut H,
}

impl<L: VisualLayout, H: EditorHost> TextEditorDriver<'_, L, H> {
    // --- Edit transactions ---

    fn begin_edit_transaction(&mut self) {
        debug_assert!(
            !self.host.is_read_only(),
            "edit transaction opened on a read-only editor"
        );
        if self.editor.transaction_depth == 0 {
            self.editor.state_before_change = Some(self.editor.make_undo_state());
        }
        self.editor.transaction_depth += 1;
    }

    fn end_edit_transaction(&mut self) {
        debug_assert!(
            self.editor.transaction_depth > 0,
            "edit transaction closed without an open one"
        );
        self.editor.transaction_depth = self.editor.transaction_depth.saturating_sub(1);
        if self.editor.transaction_depth > 0 {
            return;
        }
        let Some(before) = self.editor.state_before_change.take() else {
            return;
        };
        let edited = self.editor.doc.to_text();
        if edited != before.text {
            trace!(len = edited.len(), "edit transaction changed text");
            self.editor.undo.push(before);
            self.host.on_text_changed(&edited);
            self.host.on_cursor_moved(self.editor.cursor.location());
            self.update_preferred_cursor_x();
        }
    }

    /// Runs `f` inside an edit transaction, closing it on every exit path.
    /// On close, an undo state is pushed and the host notified only if the
    /// text actually changed.
    fn with_edit_transaction<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.begin_edit_transaction();
        let result = f(self);
        self.end_edit_transaction();
        result
    }

    // --- Edit operations ---

    /// Routes a typed character: tab is swallowed, backspace and line
    /// breaks dispatch to their handlers, everything else is typed.
    pub fn handle_character(&mut self, ch: char) -> bool {
        match ch {
            '\t' => true,
            '\u{8}' => self.backspace(),
            '\r' | '\n' => self.carriage_return(),
            _ => self.type_char(ch),
        }
    }

    /// Types one character at the cursor, replacing any selection.
    pub fn type_char(&mut self, ch: char) -> bool {
        if self.host.is_read_only() || !self.host.can_type_character(ch) {
            return false;
        }
        self.with_edit_transaction(|this| this.type_char_impl(ch))
            .unwrap_or_else(|err| rejected(&err))
    }

    fn type_char_impl(&mut self, ch: char) -> Result<bool, Error> {
        if self.editor.any_text_selected() {
            self.delete_selected_text_impl()?;
        }
        if !is_char_allowed(ch) {
            return Ok(false);
        }
        let position = self.editor.cursor.location();
        self.editor.doc.insert_char_at(position, ch)?;
        self.editor.selection_start = None;
        let advanced = position.with_offset(position.offset() + ch.len_utf8());
        self.editor.cursor.set_location(&self.editor.doc, advanced);
        self.update_cursor_highlight();
        Ok(true)
    }

    /// Deletes the selection, or the grapheme before the cursor, joining
    /// with the previous line at a line start.
    pub fn backspace(&mut self) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        self.with_edit_transaction(|this| this.backspace_impl())
            .unwrap_or_else(|err| rejected(&err))
    }

    fn backspace_impl(&mut self) -> Result<bool, Error> {
        if self.editor.any_text_selected() {
            self.delete_selected_text_impl()?;
            return Ok(true);
        }
        let position = self.editor.cursor.location();
        let mut final_position = position;
        if position.offset() == 0 {
            if position.line() > 0 {
                let previous = position.line() - 1;
                let previous_len = self.editor.doc.line(previous).map_or(0, |line| line.len());
                self.editor.doc.join_line_with_next(previous)?;
                // The cursor lands where the removed line break was.
                final_position = TextLocation::new(previous, previous_len);
            }
        } else {
            let text = self
                .editor
                .doc
                .line_text(position.line())
                .unwrap_or_default();
            let previous_offset =
                boundary::prev_grapheme_boundary(text, position.offset()).unwrap_or_default();
            self.editor.doc.remove_text_at(
                position.with_offset(previous_offset),
                position.offset() - previous_offset,
            )?;
            final_position = position.with_offset(previous_offset);
        }
        self.editor
            .cursor
            .set_location(&self.editor.doc, final_position);
        self.editor.selection_start = None;
        self.update_cursor_highlight();
        Ok(true)
    }

    /// Deletes the selection, or forward from the cursor: an empty line is
    /// removed whole, the end of a line joins with the next, otherwise the
    /// grapheme under the cursor goes.
    pub fn delete(&mut self) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        self.with_edit_transaction(|this| this.delete_impl())
            .unwrap_or_else(|err| rejected(&err))
    }

    fn delete_impl(&mut self) -> Result<bool, Error> {
        if self.editor.any_text_selected() {
            self.delete_selected_text_impl()?;
            return Ok(true);
        }
        let position = self.editor.cursor.location();
        let line_len = self
            .editor
            .doc
            .line(position.line())
            .map_or(0, |line| line.len());
        let has_next_line = position.line() + 1 < self.editor.doc.line_count();
        if line_len == 0 {
            if has_next_line {
                self.editor.doc.remove_line(position.line())?;
            }
        } else if position.offset() >= line_len {
            if has_next_line {
                self.editor.doc.join_line_with_next(position.line())?;
            }
        } else {
            let text = self
                .editor
                .doc
                .line_text(position.line())
                .unwrap_or_default();
            let next_offset =
                boundary::next_grapheme_boundary(text, position.offset()).unwrap_or(line_len);
            self.editor
                .doc
                .remove_text_at(position, next_offset - position.offset())?;
        }
        self.editor.cursor.set_location(&self.editor.doc, position);
        self.editor.selection_start = None;
        self.update_cursor_highlight();
        Ok(true)
    }

    /// Inserts a line break in multi-line editors; commits the text in
    /// single-line ones.
    pub fn carriage_return(&mut self) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        if self.host.is_multi_line() && self.host.can_insert_carriage_return() {
            return self
                .with_edit_transaction(|this| this.insert_newline_impl().map(|()| true))
                .unwrap_or_else(|err| rejected(&err));
        }

        // Committing always severs the local undo chain.
        self.editor.undo.clear();
        let edited = self.editor.doc.to_text();
        self.host.on_text_committed(&edited, TextCommitKind::OnEnter);
        self.editor.original = self.editor.make_undo_state();
        if self.host.should_select_all_on_commit() {
            self.select_all();
        }
        true
    }

    fn insert_newline_impl(&mut self) -> Result<(), Error> {
        debug_assert!(
            self.host.is_multi_line(),
            "line break inserted into a single-line editor"
        );
        if self.editor.any_text_selected() {
            self.delete_selected_text_impl()?;
        }
        let position = self.editor.cursor.location();
        self.editor.doc.split_line_at(position)?;
        self.editor
            .cursor
            .set_location(&self.editor.doc, TextLocation::new(position.line() + 1, 0));
        self.editor.selection_start = None;
        self.update_cursor_highlight();
        Ok(())
    }

    /// Inserts text at the cursor, replacing any selection. Line breaks in
    /// the payload split lines in multi-line editors and are stripped in
    /// single-line ones.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        self.with_edit_transaction(|this| {
            this.delete_selected_text_impl()?;
            if !text.is_empty() {
                this.insert_text_impl(text)?;
            }
            Ok(true)
        })
        .unwrap_or_else(|err: Error| rejected(&err))
    }

    fn insert_text_impl(&mut self, text: &str) -> Result<(), Error> {
        let multi_line = self.host.is_multi_line();
        let sanitized: String = text
            .chars()
            .filter(|&ch| is_char_allowed(ch) || (multi_line && is_line_break(ch)))
            .collect();

        if self.editor.any_text_selected() {
            self.delete_selected_text_impl()?;
        }

        let mut first = true;
        for line_text in split_into_lines(&sanitized) {
            if !first {
                let position = self.editor.cursor.location();
                self.editor.doc.split_line_at(position)?;
                self.editor.cursor.set_location(
                    &self.editor.doc,
                    TextLocation::new(position.line() + 1, 0),
                );
            }
            first = false;

            if line_text.is_empty() {
                continue;
            }
            let position = self.editor.cursor.location();
            self.editor.doc.insert_text_at(position, line_text)?;
            self.editor.cursor.set_location(
                &self.editor.doc,
                position.with_offset(position.offset() + line_text.len()),
            );
        }
        self.update_cursor_highlight();
        Ok(())
    }

    /// Deletes the selected text, if any.
    pub fn delete_selected_text(&mut self) -> bool {
        if self.host.is_read_only() || !self.editor.any_text_selected() {
            return false;
        }
        self.with_edit_transaction(|this| this.delete_selected_text_impl().map(|()| true))
            .unwrap_or_else(|err| rejected(&err))
    }

    fn delete_selected_text_impl(&mut self) -> Result<(), Error> {
        if self.host.is_read_only() || !self.editor.any_text_selected() {
            return Ok(());
        }
        let cursor_position = self.editor.cursor.location();
        let anchor = self.editor.selection_start.unwrap_or(cursor_position);
        let selection = TextSelection::new(anchor, cursor_position);
        let begin = selection.beginning();
        let end = selection.end();

        if begin.line() == end.line() {
            self.editor
                .doc
                .remove_text_at(begin, end.offset() - begin.offset())?;
        } else {
            let end_line_len = self.editor.doc.line(end.line()).map_or(0, |line| line.len());
            if end_line_len == end.offset() {
                self.editor.doc.remove_line(end.line())?;
            } else {
                self.editor
                    .doc
                    .remove_text_at(TextLocation::new(end.line(), 0), end.offset())?;
            }
            for line in (begin.line() + 1..end.line()).rev() {
                self.editor.doc.remove_line(line)?;
            }
            let begin_line_len = self
                .editor
                .doc
                .line(begin.line())
                .map_or(0, |line| line.len());
            self.editor
                .doc
                .remove_text_at(begin, begin_line_len - begin.offset())?;
            if begin.line() + 1 < self.editor.doc.line_count() {
                self.editor.doc.join_line_with_next(begin.line())?;
            }
        }

        self.editor.selection_start = None;
        self.editor.cursor.set_location(&self.editor.doc, begin);
        self.update_cursor_highlight();
        Ok(())
    }

    /// Deletes from the previous word start to the cursor.
    pub fn backspace_word(&mut self) -> bool {
        self.delete_to_word_boundary(-1)
    }

    /// Deletes from the cursor to the next word start.
    pub fn delete_word(&mut self) -> bool {
        self.delete_to_word_boundary(1)
    }

    fn delete_to_word_boundary(&mut self, direction: isize) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        self.with_edit_transaction(|this| {
            if !this.editor.any_text_selected() {
                let position = this.editor.cursor.location();
                let target = this.scan_for_word_boundary(position, direction);
                if target == position {
                    return Ok(false);
                }
                this.editor.selection_start = Some(position);
                this.editor.cursor.set_location(&this.editor.doc, target);
            }
            this.delete_selected_text_impl()?;
            Ok(true)
        })
        .unwrap_or_else(|err| rejected(&err))
    }

    // --- Clipboard ---

    /// Copies the selection. Refused for password fields.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.host.is_password() {
            return false;
        }
        let Some(text) = self.editor.selected_text() else {
            return false;
        };
        clipboard.set_text(&text);
        true
    }

    /// Cuts the selection. Refused for password and read-only fields.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.host.is_read_only() || self.host.is_password() {
            return false;
        }
        let Some(text) = self.editor.selected_text() else {
            return false;
        };
        clipboard.set_text(&text);
        self.with_edit_transaction(|this| this.delete_selected_text_impl().map(|()| true))
            .unwrap_or_else(|err| rejected(&err))
    }

    /// Pastes the clipboard over the selection or at the cursor.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        if self.host.is_read_only() {
            return false;
        }
        let Some(text) = clipboard.text() else {
            return false;
        };
        self.with_edit_transaction(|this| {
            this.delete_selected_text_impl()?;
            if !text.is_empty() {
                this.insert_text_impl(&text)?;
            }
            Ok(true)
        })
        .unwrap_or_else(|err: Error| rejected(&err))
    }

    // --- Selection and movement ---

    /// Selects the whole document, leaving the cursor at the end.
    pub fn select_all(&mut self) {
        self.editor.selection_start = Some(TextLocation::new(0, 0));
        let end = self.editor.doc.end_location();
        self.editor.cursor.set_location(&self.editor.doc, end);
        self.update_cursor_highlight();
    }

    /// Selects the word under `point`.
    pub fn select_word_at(&mut self, point: Point) {
        let (location, _) = self.layout.hit_test(&self.editor.doc, point);
        let Some(text) = self.editor.doc.line_text(location.line()) else {
            return;
        };
        let Some(range) = boundary::word_range_at(text, location.offset()) else {
            return;
        };
        self.editor.selection_start = Some(location.with_offset(range.start));
        self.editor
            .cursor
            .set_location(&self.editor.doc, location.with_offset(range.end));
        self.host.on_cursor_moved(self.editor.cursor.location());
        self.update_cursor_highlight();
    }

    /// Moves the cursor or extends the selection.
    ///
    /// Keyboard movement is suppressed (but reported handled) while an IME
    /// composition is active; pointer movement is allowed and ends the
    /// composition. Returns `false` only for movements the editor does not
    /// handle at all, such as vertical movement in a single-line editor.
    pub fn move_cursor(&mut self, args: MoveCursor) -> bool {
        let is_pointer = matches!(args.method, MoveMethod::Position { .. });
        if self.editor.composition.is_active() && !is_pointer {
            return true;
        }

        let mut allow_move = true;
        let mut cursor_position = self.editor.cursor.location();
        let mut new_position = cursor_position;

        // With a selection, plain cursor movement first snaps to the
        // selection edge matching the direction, regardless of which way
        // the selection was made.
        if args.action == CursorAction::MoveCursor
            && !is_pointer
            && self.editor.any_text_selected()
        {
            if let MoveMethod::Cardinal {
                movement,
                granularity,
            } = args.method
            {
                let horizontal = matches!(movement, Movement::Left | Movement::Right);
                if horizontal {
                    allow_move = false;
                }
                let snap_to_beginning = matches!(movement, Movement::Left | Movement::Up);
                let anchor = self.editor.selection_start.unwrap_or(cursor_position);
                let selection = TextSelection::new(anchor, cursor_position);
                cursor_position = if snap_to_beginning {
                    selection.beginning()
                } else {
                    selection.end()
                };
                new_position = cursor_position;

                // Snapping to a word boundary that is already one should
                // not move any further.
                if granularity == Granularity::Word && self.is_at_word_start(new_position) {
                    allow_move = false;
                }
            }
        }

        let mut explicit_affinity = None;
        let mut update_preferred = false;
        if allow_move {
            match args.method {
                MoveMethod::Cardinal {
                    movement,
                    granularity: Granularity::Character,
                } => match movement {
                    Movement::Left => {
                        new_position = self.translated_location(cursor_position, -1);
                        update_preferred = true;
                    }
                    Movement::Right => {
                        new_position = self.translated_location(cursor_position, 1);
                        update_preferred = true;
                    }
                    Movement::Up | Movement::Down => {
                        if !self.host.is_multi_line() {
                            // Fall back to generic widget navigation.
                            return false;
                        }
                        let direction = if movement == Movement::Up { -1 } else { 1 };
                        let (position, affinity) =
                            self.translate_location_vertical(cursor_position, direction);
                        new_position = position;
                        explicit_affinity = affinity;
                    }
                },
                MoveMethod::Cardinal {
                    movement,
                    granularity: Granularity::Word,
                } => {
                    let direction = if movement == Movement::Left { -1 } else { 1 };
                    new_position = self.scan_for_word_boundary(cursor_position, direction);
                    update_preferred = true;
                }
                MoveMethod::Position { point } => {
                    let (position, hit) = self.layout.hit_test(&self.editor.doc, point);
                    new_position = position;
                    update_preferred = true;
                    // A click in the right gutter of a wrapped line keeps
                    // the cursor on that line rather than the start of the
                    // next one, which shares the same location.
                    if hit == TextHitPoint::RightGutter {
                        explicit_affinity = Some(Affinity::Upstream);
                    }
                }
            }
        }

        if args.action == CursorAction::SelectText {
            if self.editor.selection_start.is_none() {
                self.editor.selection_start = Some(cursor_position);
            }
        } else {
            self.editor.selection_start = None;
        }

        match explicit_affinity {
            Some(affinity) => self
                .editor
                .cursor
                .set_location_with_affinity(new_position, affinity),
            None => self.editor.cursor.set_location(&self.editor.doc, new_position),
        }

        self.host.on_cursor_moved(self.editor.cursor.location());
        if update_preferred {
            self.update_preferred_cursor_x();
        }
        self.update_cursor_highlight();

        // Only pointer movement can get here while composing; it ends the
        // composition session.
        if self.editor.composition.is_active() {
            self.ime_end_composition();
        }
        true
    }

    /// Moves the cursor to `location`, clearing the selection. Out of
    /// bounds locations are ignored.
    pub fn go_to(&mut self, location: TextLocation) {
        if self.editor.doc.validate_location(location).is_err() {
            return;
        }
        self.editor.selection_start = None;
        self.editor.cursor.set_location(&self.editor.doc, location);
        self.host.on_cursor_moved(self.editor.cursor.location());
        self.update_preferred_cursor_x();
        self.update_cursor_highlight();
    }

    /// Home/end style navigation, against visual lines.
    pub fn jump_to(&mut self, target: JumpTarget, action: CursorAction) {
        let old_position = self.editor.cursor.location();
        let upstream = self.editor.cursor.affinity() == Affinity::Upstream;
        let mut explicit_affinity = None;
        let new_position = match target {
            JumpTarget::DocumentStart => TextLocation::new(0, 0),
            JumpTarget::DocumentEnd => self.editor.doc.end_location(),
            JumpTarget::LineStart | JumpTarget::LineEnd => {
                let row =
                    self.layout
                        .visual_line_index(&self.editor.doc, old_position, upstream);
                let y = (row as f64 + 0.5) * self.layout.line_height();
                let x = if target == JumpTarget::LineStart {
                    0.0
                } else {
                    1e9
                };
                let (position, hit) = self.layout.hit_test(&self.editor.doc, Point::new(x, y));
                if hit == TextHitPoint::RightGutter {
                    explicit_affinity = Some(Affinity::Upstream);
                }
                position
            }
        };

        if action == CursorAction::SelectText {
            if self.editor.selection_start.is_none() {
                self.editor.selection_start = Some(old_position);
            }
        } else {
            self.editor.selection_start = None;
        }

        match explicit_affinity {
            Some(affinity) => self
                .editor
                .cursor
                .set_location_with_affinity(new_position, affinity),
            None => self.editor.cursor.set_location(&self.editor.doc, new_position),
        }
        self.host.on_cursor_moved(self.editor.cursor.location());
        self.update_preferred_cursor_x();
        self.update_cursor_highlight();
    }

    /// Escape: clears the search, else the selection, else reverts the
    /// text if the host wants that. Returns whether anything was done.
    pub fn handle_escape(&mut self) -> bool {
        if !self.editor.search_text.is_empty() {
            self.editor.search_text.clear();
            self.update_cursor_highlight();
            return true;
        }
        if self.editor.any_text_selected() {
            self.editor.selection_start = None;
            self.update_cursor_highlight();
            return true;
        }
        if !self.host.is_read_only()
            && self.host.should_revert_text_on_escape()
            && self.editor.has_text_changed_from_original()
        {
            self.restore_original_text();
            return true;
        }
        false
    }

    /// Restores the last committed text, notifying the host.
    pub fn restore_original_text(&mut self) {
        if !self.editor.has_text_changed_from_original() {
            return;
        }
        let original = self.editor.original.text.clone();
        self.editor.set_editable_text(&original);
        self.update_cursor_highlight();
        self.host
            .on_text_committed(&original, TextCommitKind::OnCleared);
    }

    // --- Focus ---

    /// The editor received keyboard focus.
    pub fn handle_focus_received(&mut self, cause: FocusCause) {
        // Remember the state escape reverts to.
        self.editor.original = self.editor.make_undo_state();

        if cause != FocusCause::Mouse
            && cause != FocusCause::OtherWidgetLostFocus
            && self.host.should_jump_to_end_when_focused()
        {
            self.go_to(self.editor.doc.end_location());
        }
        if self.host.should_select_all_when_focused() {
            self.select_all();
        }
        self.update_cursor_highlight();
        // Gaining focus must not make the view jump; a focusing click has
        // already scrolled via its own cursor move.
        self.editor.scroll_target = None;
    }

    /// The editor lost keyboard focus; commits the edited text.
    pub fn handle_focus_lost(&mut self, cause: FocusCause) {
        if self.host.should_clear_selection_on_focus_loss() && cause != FocusCause::WindowActivate {
            self.editor.selection_start = None;
        }

        let kind = match cause {
            FocusCause::Navigation | FocusCause::Mouse => TextCommitKind::OnUserMovedFocus,
            FocusCause::Cleared => TextCommitKind::OnCleared,
            _ => TextCommitKind::Default,
        };

        // Committing always severs the local undo chain.
        self.editor.undo.clear();
        let edited = self.editor.doc.to_text();
        self.host.on_text_committed(&edited, kind);
        self.editor.original = self.editor.make_undo_state();
        self.update_cursor_highlight();
        self.editor.scroll_target = None;
    }

    // --- Undo / redo ---

    /// Whether `command` can currently run.
    #[must_use]
    pub fn can_execute(&self, command: EditorCommand) -> bool {
        let read_only = self.host.is_read_only();
        let composing = self.editor.composition.is_active();
        match command {
            EditorCommand::Undo => !read_only && self.editor.undo.can_undo() && !composing,
            EditorCommand::Redo => {
                !read_only && self.editor.undo.current_level().is_some() && !composing
            }
            EditorCommand::Cut => {
                !read_only && !self.host.is_password() && self.editor.any_text_selected()
            }
            EditorCommand::Copy => !self.host.is_password() && self.editor.any_text_selected(),
            EditorCommand::Paste => !read_only,
            EditorCommand::Delete => !read_only && self.editor.any_text_selected(),
            EditorCommand::SelectAll => true,
        }
    }

    /// Runs `command` if it is currently allowed.
    pub fn execute(&mut self, command: EditorCommand, clipboard: &mut dyn Clipboard) -> bool {
        if !self.can_execute(command) {
            return false;
        }
        match command {
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::Cut => self.cut(clipboard),
            EditorCommand::Copy => self.copy(clipboard),
            EditorCommand::Paste => self.paste(clipboard),
            EditorCommand::Delete => self.delete_selected_text(),
            EditorCommand::SelectAll => {
                self.select_all();
                true
            }
        }
    }

    /// Undoes the most recent edit. Blocked while composing.
    pub fn undo(&mut self) -> bool {
        if !self.can_execute(EditorCommand::Undo) {
            return false;
        }
        let tip = self.editor.make_undo_state();
        let Some(index) = self.editor.undo.start_undo(move || tip) else {
            return false;
        };
        debug!(index, "undo");
        let state = self.editor.undo.state(index).clone();
        self.restore_undo_state(&state, true);
        true
    }

    /// Redoes a previously undone edit. Blocked while composing.
    pub fn redo(&mut self) -> bool {
        if !self.can_execute(EditorCommand::Redo) {
            return false;
        }
        let Some(state) = self.editor.undo.start_redo() else {
            return false;
        };
        debug!("redo");
        self.restore_undo_state(&state, false);
        true
    }

    fn restore_undo_state(&mut self, state: &UndoState, is_undo: bool) {
        if self.editor.set_editable_text(&state.text) {
            self.host.on_text_changed(&state.text);
        }
        self.editor.cursor = if is_undo {
            state.cursor.for_undo()
        } else {
            state.cursor
        };
        self.editor.selection_start = state.selection_start;
        self.host.on_cursor_moved(self.editor.cursor.location());
        self.update_cursor_highlight();
    }

    // --- Search ---

    /// Starts a search and advances to the first match.
    pub fn begin_search(&mut self, text: &str, case: SearchCase, reverse: bool) {
        self.editor.search_text = text.to_owned();
        self.editor.search_case = case;
        self.advance_search(reverse);
    }

    /// Advances to the next match after the selection (or before it when
    /// `reverse`), scanning line by line and wrapping around the document.
    pub fn advance_search(&mut self, reverse: bool) {
        if self.editor.search_text.is_empty() {
            self.update_cursor_highlight();
            return;
        }
        let needle = self.editor.search_text.clone();
        let case = self.editor.search_case;

        let cursor_position = self.editor.cursor.location();
        let anchor = self.editor.selection_start.unwrap_or(cursor_position);
        let selection = TextSelection::new(anchor, cursor_position);
        let start = if reverse {
            selection.beginning()
        } else {
            selection.end()
        };

        let line_count = self.editor.doc.line_count();
        let mut line = start.line();
        let mut offset = Some(start.offset());
        loop {
            let text = self.editor.doc.line_text(line).unwrap_or_default();
            let found = if reverse {
                search::find_backward(text, &needle, offset.unwrap_or(text.len()), case)
            } else {
                search::find_forward(text, &needle, offset.unwrap_or(0), case)
            };
            if let Some(range) = found {
                self.editor.selection_start = Some(TextLocation::new(line, range.start));
                self.editor
                    .cursor
                    .set_location(&self.editor.doc, TextLocation::new(line, range.end));
                break;
            }

            offset = None;
            line = if reverse {
                (line + line_count - 1) % line_count
            } else {
                (line + 1) % line_count
            };
            if line == start.line() {
                // Wrapped all the way around.
                break;
            }
        }
        self.update_cursor_highlight();
    }

    // --- IME surface ---

    /// The byte length of the flattened document, as the IME sees it.
    #[must_use]
    pub fn ime_text_length(&self) -> usize {
        self.editor.doc.offset_locations().text_len()
    }

    /// The selection in flat offsets. A collapsed cursor reports a
    /// zero-length range.
    #[must_use]
    pub fn ime_selection(&self) -> ImeSelection {
        let cursor_position = self.editor.cursor.location();
        let anchor = self.editor.selection_start.unwrap_or(cursor_position);
        let offsets = self.editor.doc.offset_locations();

        if anchor != cursor_position {
            let selection = TextSelection::new(anchor, cursor_position);
            let begin = offsets
                .location_to_offset(selection.beginning())
                .unwrap_or_default();
            let end = offsets
                .location_to_offset(selection.end())
                .unwrap_or_else(|| offsets.text_len());
            let caret = if cursor_position < anchor {
                CaretPosition::Beginning
            } else {
                CaretPosition::Ending
            };
            ImeSelection {
                begin,
                len: end - begin,
                caret,
            }
        } else {
            ImeSelection {
                begin: offsets
                    .location_to_offset(cursor_position)
                    .unwrap_or_default(),
                len: 0,
                caret: CaretPosition::Beginning,
            }
        }
    }

    /// Sets the selection from flat offsets, clamping into the text.
    pub fn ime_set_selection(&mut self, begin: usize, len: usize, caret: CaretPosition) {
        let offsets = self.editor.doc.offset_locations();
        let text_len = offsets.text_len();
        let min_index = begin.min(text_len);
        let max_index = (min_index + len).min(text_len);

        let min_location = self
            .editor
            .doc
            .clamp_location(offsets.offset_to_location(min_index));
        let max_location = self
            .editor
            .doc
            .clamp_location(offsets.offset_to_location(max_index));

        self.editor.selection_start = None;
        match caret {
            CaretPosition::Beginning => {
                self.editor
                    .cursor
                    .set_location(&self.editor.doc, min_location);
                self.editor.selection_start = Some(max_location);
            }
            CaretPosition::Ending => {
                self.editor.selection_start = Some(min_location);
                self.editor
                    .cursor
                    .set_location(&self.editor.doc, max_location);
            }
        }
        self.host.on_cursor_moved(self.editor.cursor.location());
        self.update_cursor_highlight();
    }

    /// The flattened text within a flat byte range, clamped to character
    /// boundaries.
    #[must_use]
    pub fn ime_text_in_range(&self, begin: usize, len: usize) -> String {
        let text = self.editor.doc.to_text();
        let mut start = begin.min(text.len());
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = (begin + len).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[start..end.max(start)].to_owned()
    }

    /// Replaces a flat byte range, as a select + delete + insert.
    ///
    /// Runs outside the undo system: composition edits are not individual
    /// undo steps, the enclosing composition transaction is.
    pub fn ime_set_text_in_range(&mut self, begin: usize, len: usize, text: &str) {
        let before = self.editor.doc.to_text();

        self.ime_set_selection(begin, len, CaretPosition::Beginning);
        let result = self
            .delete_selected_text_impl()
            .and_then(|()| self.insert_text_impl(text));
        if let Err(err) = result {
            rejected(&err);
            return;
        }

        let after = self.editor.doc.to_text();
        if after != before {
            self.host.on_text_changed(&after);
        }
    }

    /// The flat offset of the character under `point`, if the location
    /// maps into the text.
    #[must_use]
    pub fn ime_character_index_at_point(&self, point: Point) -> Option<usize> {
        let (location, _) = self.layout.hit_test(&self.editor.doc, point);
        self.editor
            .doc
            .offset_locations()
            .location_to_offset(location)
    }

    /// The bounds of a flat byte range: a tight rectangle when the range
    /// sits on one visual line, otherwise a full-width band covering it.
    #[must_use]
    pub fn ime_text_bounds(&self, begin: usize, len: usize) -> Rect {
        let offsets = self.editor.doc.offset_locations();
        let begin_location = offsets.offset_to_location(begin);
        let end_location = offsets.offset_to_location(begin + len);

        let begin_point = self
            .layout
            .location_point(&self.editor.doc, begin_location, false);
        let end_point = self
            .layout
            .location_point(&self.editor.doc, end_location, false);
        let line_height = self.layout.line_height();

        if (begin_point.y - end_point.y).abs() < f64::EPSILON {
            Rect::new(
                begin_point.x,
                begin_point.y,
                end_point.x,
                begin_point.y + line_height,
            )
        } else {
            Rect::new(
                0.0,
                begin_point.y,
                self.layout.size(&self.editor.doc).width,
                end_point.y + line_height,
            )
        }
    }

    /// Begins an IME composition session, opening an edit transaction that
    /// spans the whole composition.
    pub fn ime_begin_composition(&mut self) {
        if self.editor.composition.is_active() {
            return;
        }
        debug!("begin composition");
        let selection = self.ime_selection();
        self.editor
            .composition
            .begin(selection.begin..selection.begin + selection.len);
        self.begin_edit_transaction();
        self.update_cursor_highlight();
    }

    /// Updates the flat range the IME is composing over.
    pub fn ime_update_composition_range(&mut self, begin: usize, len: usize) {
        if !self.editor.composition.is_active() {
            return;
        }
        self.editor.composition.set_range(begin..begin + len);
        self.update_cursor_highlight();
    }

    /// Ends the composition session, closing its edit transaction (which
    /// pushes a single undo state if the text changed).
    pub fn ime_end_composition(&mut self) {
        if !self.editor.composition.is_active() {
            return;
        }
        debug!("end composition");
        self.editor.composition.end();
        self.end_edit_transaction();
        self.update_cursor_highlight();
    }

    // --- Frame update ---

    /// Per-frame maintenance: drains the virtual-keyboard queue, scrolls
    /// the cursor into view, and clamps the scroll offset to the content.
    pub fn tick(&mut self, viewport: Size) {
        let mut keyboard_text = None;
        let mut keyboard_commit = None;
        while let Ok(event) = self.editor.vk_events.try_recv() {
            match event {
                VirtualKeyboardEvent::TextChanged(text) => keyboard_text = Some(text),
                VirtualKeyboardEvent::TextCommitted(text, kind) => {
                    keyboard_text = Some(text);
                    keyboard_commit = Some(kind);
                }
            }
        }
        if let Some(text) = keyboard_text {
            trace!(len = text.len(), "applying virtual keyboard text");
            self.editor.set_editable_text(&text);
            self.host.on_text_changed(&self.editor.doc.to_text());
        }
        if let Some(kind) = keyboard_commit {
            self.host
                .on_text_committed(&self.editor.doc.to_text(), kind);
        }

        if let Some(target) = self.editor.scroll_target.take() {
            let caret = self
                .layout
                .location_point(&self.editor.doc, target.location, target.upstream);
            let line_height = self.layout.line_height();

            let local_x = caret.x - self.editor.scroll_offset.x;
            if local_x < 0.0 {
                self.editor.scroll_offset.x += local_x;
            } else if local_x > viewport.width {
                self.editor.scroll_offset.x += local_x - viewport.width;
            }

            let local_y = caret.y - self.editor.scroll_offset.y;
            if local_y < 0.0 {
                self.editor.scroll_offset.y += local_y;
            } else if local_y + line_height > viewport.height {
                self.editor.scroll_offset.y += local_y + line_height - viewport.height;
            }
        }

        let content = self.layout.size(&self.editor.doc);
        self.editor.scroll_offset.x = self
            .editor
            .scroll_offset
            .x
            .clamp(0.0, (content.width - viewport.width).max(0.0));
        self.editor.scroll_offset.y = self
            .editor
            .scroll_offset
            .y
            .clamp(0.0, (content.height - viewport.height).max(0.0));
    }

    /// Replaces the edited text from outside (a data binding update).
    /// Does not touch the undo stack.
    pub fn set_text(&mut self, text: &str) {
        if self.editor.set_editable_text(text) {
            self.update_cursor_highlight();
        }
    }

    /// The size the document wants, from the layout engine.
    #[must_use]
    pub fn desired_size(&self) -> Size {
        self.layout.size(&self.editor.doc)
    }

    // --- Internal geometry and boundary helpers ---

    /// One grapheme left or right, flowing across line boundaries (the
    /// line break counts as one step).
    fn translated_location(&self, location: TextLocation, direction: isize) -> TextLocation {
        debug_assert!(direction != 0, "translation requires a direction");
        let doc = &self.editor.doc;
        let text = doc.line_text(location.line()).unwrap_or_default();
        if direction > 0 {
            match boundary::next_grapheme_boundary(text, location.offset()) {
                Some(offset) => location.with_offset(offset),
                None if location.line() + 1 < doc.line_count() => {
                    TextLocation::new(location.line() + 1, 0)
                }
                None => location,
            }
        } else {
            match boundary::prev_grapheme_boundary(text, location.offset()) {
                Some(offset) => location.with_offset(offset),
                None if location.line() > 0 => {
                    let previous = location.line() - 1;
                    let previous_len = doc.line(previous).map_or(0, |line| line.len());
                    TextLocation::new(previous, previous_len)
                }
                None => location,
            }
        }
    }

    fn is_at_word_start(&self, location: TextLocation) -> bool {
        let text = self
            .editor
            .doc
            .line_text(location.line())
            .unwrap_or_default();
        boundary::is_word_start(text, location.offset())
    }

    /// Steps one grapheme, then keeps going until a word start or a line
    /// or document boundary.
    fn scan_for_word_boundary(&self, start: TextLocation, direction: isize) -> TextLocation {
        let doc = &self.editor.doc;
        let at_document_start = |loc: TextLocation| loc.line() == 0 && loc.offset() == 0;
        let at_document_end = |loc: TextLocation| loc == doc.end_location();
        let at_line_end =
            |loc: TextLocation| doc.line(loc.line()).map_or(0, |line| line.len()) == loc.offset();

        let mut location = self.translated_location(start, direction);
        while !at_document_start(location)
            && location.offset() != 0
            && !at_document_end(location)
            && !at_line_end(location)
            && !self.is_at_word_start(location)
        {
            location = self.translated_location(location, direction);
        }
        location
    }

    /// Moves between visual lines, steering toward the preferred x
    /// position. Hitting the right gutter of a wrapped line keeps the
    /// cursor on that line via upstream affinity.
    fn translate_location_vertical(
        &self,
        location: TextLocation,
        direction: isize,
    ) -> (TextLocation, Option<Affinity>) {
        let doc = &self.editor.doc;
        let upstream = self.editor.cursor.affinity() == Affinity::Upstream;
        let row = self.layout.visual_line_index(doc, location, upstream);
        let row_count = self.layout.visual_line_count(doc);
        let new_row = row
            .saturating_add_signed(direction)
            .min(row_count.saturating_sub(1));
        let y = (new_row as f64 + 0.5) * self.layout.line_height();
        let (position, hit) = self
            .layout
            .hit_test(doc, Point::new(self.editor.preferred_cursor_x, y));
        let affinity = (hit == TextHitPoint::RightGutter).then_some(Affinity::Upstream);
        (position, affinity)
    }

    fn update_preferred_cursor_x(&mut self) {
        let upstream = self.editor.cursor.affinity() == Affinity::Upstream;
        self.editor.preferred_cursor_x = self
            .layout
            .location_point(&self.editor.doc, self.editor.cursor.location(), upstream)
            .x;
    }

    // --- Highlight compositing ---

    /// Rebuilds the highlight set from the current state: search matches,
    /// then composition underline or selection, then the caret. Also
    /// queues a scroll toward the cursor for the next tick.
    fn update_cursor_highlight(&mut self) {
        let cursor_position = self.editor.cursor.location();
        self.editor.scroll_target = Some(ScrollTarget {
            location: cursor_position,
            upstream: self.editor.cursor.affinity() == Affinity::Upstream,
        });

        self.editor.highlights.clear();
        self.editor.generation.nudge();

        let anchor = self.editor.selection_start.unwrap_or(cursor_position);
        let focused = self.host.has_keyboard_focus();
        let composing = self.editor.composition.is_active();
        let has_selection = anchor != cursor_position;
        let read_only = self.host.is_read_only();

        if !self.editor.search_text.is_empty() {
            let needle = &self.editor.search_text;
            let case = self.editor.search_case;
            let selection = TextSelection::new(anchor, cursor_position);
            for (line_index, line) in self.editor.doc.lines().enumerate() {
                let mut from = 0;
                while let Some(range) = search::find_forward(line.text(), needle, from, case) {
                    from = range.end;
                    let is_current = has_selection
                        && selection.beginning() == TextLocation::new(line_index, range.start)
                        && selection.end() == TextLocation::new(line_index, range.end);
                    self.editor.highlights.push(LineHighlight {
                        line: line_index,
                        range,
                        kind: HighlightKind::SearchMatch {
                            focused: is_current,
                        },
                    });
                }
            }
        }

        if composing {
            let offsets = self.editor.doc.offset_locations();
            let range = self.editor.composition.range();
            let begin = offsets.offset_to_location(range.start);
            let end = offsets.offset_to_location(range.end);

            // A composition never spans hard lines; if the offsets say
            // otherwise the underline is suppressed. It is also only drawn
            // while the cursor is inside the composed range.
            if begin.line() == end.line() {
                let line_range = begin.offset()..end.offset();
                let cursor_in_range = begin.line() == cursor_position.line()
                    && line_range.start <= cursor_position.offset()
                    && cursor_position.offset() <= line_range.end;
                if !line_range.is_empty() && cursor_in_range {
                    self.editor.highlights.push(LineHighlight {
                        line: begin.line(),
                        range: line_range,
                        kind: HighlightKind::Composition,
                    });
                }
            }
        } else if has_selection {
            let selection = TextSelection::new(anchor, cursor_position);
            let begin = selection.beginning();
            let end = selection.end();
            for line_index in begin.line()..=end.line() {
                let line_len = self
                    .editor
                    .doc
                    .line(line_index)
                    .map_or(0, |line| line.len());
                let range = if begin.line() == end.line() {
                    begin.offset()..end.offset()
                } else if line_index == begin.line() {
                    begin.offset()..line_len
                } else if line_index == end.line() {
                    0..end.offset()
                } else {
                    0..line_len
                };
                self.editor.highlights.push(LineHighlight {
                    line: line_index,
                    range,
                    kind: HighlightKind::Selection { focused },
                });
            }
        }

        if focused && !read_only {
            // The caret is placed from the literal position, not the
            // interaction position.
            let literal = self.editor.cursor.literal_location(&self.editor.doc);
            if let Some(line) = self.editor.doc.line(literal.line()) {
                let range = if line.is_empty() {
                    0..0
                } else if literal.offset() >= line.len() {
                    let start = boundary::prev_grapheme_boundary(line.text(), line.len())
                        .unwrap_or_default();
                    start..line.len()
                } else {
                    let end = boundary::next_grapheme_boundary(line.text(), literal.offset())
                        .unwrap_or(line.len());
                    literal.offset()..end
                };
                self.editor.highlights.push(LineHighlight {
                    line: literal.line(),
                    range,
                    kind: HighlightKind::Cursor,
                });
            }
        }
    }
}
