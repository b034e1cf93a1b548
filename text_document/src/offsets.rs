// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{Document, TextLocation};

/// The byte length of the `\n` terminator inserted between hard lines in
/// the flattened view of a document.
const LINE_TERMINATOR_LEN: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OffsetEntry {
    /// Byte offset of the line's first character in the flattened text.
    flat_offset: usize,
    /// Byte length of the line, without its terminator.
    line_len: usize,
}

/// A prefix-sum table translating between (line, offset) locations and byte
/// offsets into the flattened document text.
///
/// The table is a snapshot: it is only valid for the document state it was
/// built from and must be rebuilt after any edit.
///
/// The offset at the very end of a line (where the terminator sits) belongs
/// to that line, so [`offset_to_location`](Self::offset_to_location) maps a
/// terminator's offset to the end of the line it terminates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetLocations {
    entries: Vec<OffsetEntry>,
}

impl OffsetLocations {
    /// Builds the table for the current state of `document`.
    #[must_use]
    pub fn new(document: &Document) -> Self {
        let mut entries = Vec::with_capacity(document.line_count());
        let mut flat_offset = 0;
        for line in document.lines() {
            entries.push(OffsetEntry {
                flat_offset,
                line_len: line.len(),
            });
            flat_offset += line.len() + LINE_TERMINATOR_LEN;
        }
        Self { entries }
    }

    /// Translates a document location to a flat byte offset.
    ///
    /// Returns `None` when the location is out of bounds for the document
    /// the table was built from.
    #[must_use]
    pub fn location_to_offset(&self, location: TextLocation) -> Option<usize> {
        let entry = self.entries.get(location.line())?;
        if location.offset() > entry.line_len {
            return None;
        }
        Some(entry.flat_offset + location.offset())
    }

    /// Translates a flat byte offset back to a document location.
    ///
    /// An offset addressing a line terminator maps to the end of the line
    /// it terminates. Offsets past the end of the text clamp to the end of
    /// the last line.
    #[must_use]
    pub fn offset_to_location(&self, offset: usize) -> TextLocation {
        for (line, entry) in self.entries.iter().enumerate() {
            if offset >= entry.flat_offset && offset <= entry.flat_offset + entry.line_len {
                return TextLocation::new(line, offset - entry.flat_offset);
            }
        }
        let line = self.entries.len() - 1;
        TextLocation::new(line, self.entries[line].line_len)
    }

    /// The byte length of the flattened text.
    #[must_use]
    pub fn text_len(&self) -> usize {
        match self.entries.last() {
            Some(entry) => entry.flat_offset + entry.line_len,
            None => 0,
        }
    }
}

impl Document {
    /// Builds an [`OffsetLocations`] table for the document's current
    /// state.
    #[must_use]
    pub fn offset_locations(&self) -> OffsetLocations {
        OffsetLocations::new(self)
    }
}
