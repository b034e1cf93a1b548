// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Types for the input-method surface.
//!
//! IME systems address the document as one flat string (hard lines joined
//! with `\n`); everything here is in flat byte offsets. The methods
//! themselves live on [`TextEditorDriver`](crate::TextEditorDriver), which
//! has the layout and host at hand.

use core::ops::Range;

/// Which end of the selection the IME considers the caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaretPosition {
    /// The caret is at the beginning of the selection.
    Beginning,
    /// The caret is at the end of the selection.
    Ending,
}

/// The selection as reported to the IME, in flat byte offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImeSelection {
    /// Flat byte offset of the selection start.
    pub begin: usize,
    /// Byte length of the selection.
    pub len: usize,
    /// Which end holds the caret.
    pub caret: CaretPosition,
}

/// The active composition, tracked in flat byte offsets so the IME's view
/// of the document and ours stay aligned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CompositionState {
    active: bool,
    range: Range<usize>,
}

impl CompositionState {
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub(crate) fn begin(&mut self, range: Range<usize>) {
        self.active = true;
        self.range = range;
    }

    pub(crate) fn set_range(&mut self, range: Range<usize>) {
        debug_assert!(self.active, "composition range set while inactive");
        self.range = range;
    }

    pub(crate) fn end(&mut self) {
        self.active = false;
        self.range = 0..0;
    }
}
