// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor state and movement requests.

use peniko::kurbo::Point;
use text_document::{Document, TextLocation};

use crate::boundary;

/// Whether the cursor associates with the text before or after it.
///
/// A cursor at the boundary between two visual lines (the end of a wrapped
/// segment and the start of the next) is ambiguous: `Upstream` keeps it
/// with the preceding text, `Downstream` with the following text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Affinity {
    /// The cursor sits before the character at its location.
    #[default]
    Downstream,
    /// The cursor sits after the character preceding its location.
    Upstream,
}

/// The cursor: an interaction location plus its visual affinity.
///
/// The interaction location is where editing happens (insertions land
/// there, backspace removes the grapheme before it). The literal location,
/// used for caret placement, steps one grapheme back when the affinity is
/// `Upstream`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorInfo {
    location: TextLocation,
    affinity: Affinity,
}

impl CursorInfo {
    /// A cursor at the start of the document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The location edits interact with.
    #[must_use]
    #[inline]
    pub fn location(&self) -> TextLocation {
        self.location
    }

    /// The cursor's visual affinity.
    #[must_use]
    #[inline]
    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    /// The location the caret is drawn from.
    ///
    /// For an upstream cursor this is the start of the grapheme preceding
    /// the interaction location.
    #[must_use]
    pub fn literal_location(&self, document: &Document) -> TextLocation {
        match self.affinity {
            Affinity::Downstream => self.location,
            Affinity::Upstream => {
                let text = document
                    .line_text(self.location.line())
                    .unwrap_or_default();
                let offset = boundary::prev_grapheme_boundary(text, self.location.offset())
                    .unwrap_or_default();
                self.location.with_offset(offset)
            }
        }
    }

    /// Places the cursor at `location`, inferring the affinity.
    ///
    /// A location at the end of a non-empty line becomes upstream so the
    /// caret is drawn at the end of that line rather than the start of the
    /// next visual line.
    pub fn set_location(&mut self, document: &Document, location: TextLocation) {
        let location = document.clamp_location(location);
        let line_len = document
            .line_text(location.line())
            .map_or(0, str::len);
        self.affinity = if location.offset() > 0 && location.offset() == line_len {
            Affinity::Upstream
        } else {
            Affinity::Downstream
        };
        self.location = location;
    }

    /// Places the cursor at `location` with an explicit affinity.
    pub fn set_location_with_affinity(&mut self, location: TextLocation, affinity: Affinity) {
        self.location = location;
        self.affinity = affinity;
    }

    /// The cursor as captured in an undo state: same interaction location,
    /// affinity reset to downstream.
    #[must_use]
    pub fn for_undo(&self) -> Self {
        Self {
            location: self.location,
            affinity: Affinity::Downstream,
        }
    }
}

/// A cardinal movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Toward the start of the line.
    Left,
    /// Toward the end of the line.
    Right,
    /// To the previous visual line.
    Up,
    /// To the next visual line.
    Down,
}

/// How far a horizontal movement travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    /// One grapheme cluster.
    Character,
    /// To the next word start.
    Word,
}

/// Whether a movement relocates the cursor or extends the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorAction {
    /// Move the cursor, discarding any selection.
    MoveCursor,
    /// Keep (or start) a selection anchored at the pre-move cursor.
    SelectText,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MoveMethod {
    Cardinal {
        movement: Movement,
        granularity: Granularity,
    },
    Position {
        point: Point,
    },
}

/// A cursor movement request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveCursor {
    pub(crate) method: MoveMethod,
    pub(crate) action: CursorAction,
}

impl MoveCursor {
    /// A movement in a cardinal direction.
    #[must_use]
    pub fn cardinal(movement: Movement, granularity: Granularity, action: CursorAction) -> Self {
        Self {
            method: MoveMethod::Cardinal {
                movement,
                granularity,
            },
            action,
        }
    }

    /// A movement to the location under a point, as from a pointer event.
    #[must_use]
    pub fn to_point(point: Point, action: CursorAction) -> Self {
        Self {
            method: MoveMethod::Position { point },
            action,
        }
    }

    /// Whether this request extends the selection.
    #[must_use]
    pub fn is_selecting(&self) -> bool {
        self.action == CursorAction::SelectText
    }
}
