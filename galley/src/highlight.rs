// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The highlight set the renderer draws each frame.
//!
//! Highlights are flat data: a hard line index, a byte range within that
//! line, and a kind that fixes the z-order. Underlay kinds (negative z)
//! paint behind the text, overlay kinds (positive z) in front of it.

use core::ops::Range;

/// What a highlight represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightKind {
    /// Selected text. `focused` dims the selection when the owning widget
    /// does not have keyboard focus.
    Selection {
        /// Whether the owning widget has keyboard focus.
        focused: bool,
    },
    /// A search match. `focused` marks the match the cursor sits in.
    SearchMatch {
        /// Whether this is the match the selection currently covers.
        focused: bool,
    },
    /// The in-progress IME composition underline.
    Composition,
    /// The caret cell.
    Cursor,
}

impl HighlightKind {
    /// The paint order of this kind. Negative values underlay the text,
    /// positive values overlay it.
    #[must_use]
    pub fn z_order(self) -> i32 {
        match self {
            Self::Selection { .. } => -10,
            Self::SearchMatch { .. } => -9,
            Self::Composition => 10,
            Self::Cursor => 11,
        }
    }
}

/// One highlight on one hard line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineHighlight {
    /// The hard line the highlight sits on.
    pub line: usize,
    /// The byte range covered within the line. An empty range at offset 0
    /// marks a zero-width highlight on an empty line.
    pub range: Range<usize>,
    /// What the highlight represents.
    pub kind: HighlightKind,
}

impl LineHighlight {
    /// The paint order, from [`HighlightKind::z_order`].
    #[must_use]
    pub fn z_order(&self) -> i32 {
        self.kind.z_order()
    }
}
