// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A position within a [`Document`](crate::Document).
///
/// The `offset` is a byte offset into the text of line `line`, in
/// `0..=line_len`. An offset equal to the line length addresses the gap
/// after the last character (where the line terminator would sit).
///
/// Locations order by line first, then by offset, which matches document
/// order for locations within the same document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextLocation {
    line: usize,
    offset: usize,
}

impl TextLocation {
    /// Creates a location at the given line index and byte offset.
    #[must_use]
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// The line index.
    #[must_use]
    #[inline]
    pub const fn line(self) -> usize {
        self.line
    }

    /// The byte offset within the line.
    #[must_use]
    #[inline]
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Returns this location with a different offset on the same line.
    #[must_use]
    pub const fn with_offset(self, offset: usize) -> Self {
        Self {
            line: self.line,
            offset,
        }
    }
}

/// A directed span of document text between two locations.
///
/// `anchor` is where the selection started and `active` is the edge that
/// moves as the selection is extended; either may come first in document
/// order. The selection is empty when they coincide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextSelection {
    anchor: TextLocation,
    active: TextLocation,
}

impl TextSelection {
    /// Creates a selection from its anchor and active edges.
    #[must_use]
    pub const fn new(anchor: TextLocation, active: TextLocation) -> Self {
        Self { anchor, active }
    }

    /// The edge the selection was started from.
    #[must_use]
    #[inline]
    pub const fn anchor(self) -> TextLocation {
        self.anchor
    }

    /// The moving edge of the selection.
    #[must_use]
    #[inline]
    pub const fn active(self) -> TextLocation {
        self.active
    }

    /// The edge that comes first in document order.
    #[must_use]
    pub fn beginning(self) -> TextLocation {
        self.anchor.min(self.active)
    }

    /// The edge that comes last in document order.
    #[must_use]
    pub fn end(self) -> TextLocation {
        self.anchor.max(self.active)
    }

    /// Whether the two edges coincide.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.anchor == self.active
    }
}
