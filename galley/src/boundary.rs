// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grapheme-cluster and word-boundary helpers over a single line of text.

use core::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// The grapheme boundary preceding `offset`, if any.
///
/// `offset` itself need not be a boundary; the result is always the start
/// of the grapheme containing (or preceding) it.
pub(crate) fn prev_grapheme_boundary(text: &str, offset: usize) -> Option<usize> {
    let mut prev = None;
    for (start, _) in text.grapheme_indices(true) {
        if start >= offset {
            break;
        }
        prev = Some(start);
    }
    prev
}

/// The grapheme boundary following `offset`, if any.
pub(crate) fn next_grapheme_boundary(text: &str, offset: usize) -> Option<usize> {
    if offset >= text.len() {
        return None;
    }
    for (start, grapheme) in text.grapheme_indices(true) {
        let end = start + grapheme.len();
        if end > offset {
            return Some(end);
        }
    }
    None
}

/// The number of grapheme clusters in `text`.
pub(crate) fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// The byte offset of the `index`-th grapheme boundary, clamped to the end
/// of the text.
pub(crate) fn byte_of_grapheme(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map_or(text.len(), |(start, _)| start)
}

/// The grapheme index of the boundary at byte `offset`.
///
/// Counts the boundaries at or before `offset`, so an offset inside a
/// grapheme maps to that grapheme's index.
pub(crate) fn grapheme_index_of_byte(text: &str, offset: usize) -> usize {
    text.grapheme_indices(true)
        .take_while(|(start, _)| *start < offset)
        .count()
}

/// Whether `offset` is the start of a word.
///
/// Word starts are boundaries reported by Unicode word segmentation whose
/// following segment is not whitespace.
pub(crate) fn is_word_start(text: &str, offset: usize) -> bool {
    for (start, word) in text.split_word_bound_indices() {
        if start == offset {
            return !word.chars().next().is_none_or(char::is_whitespace);
        }
        if start > offset {
            break;
        }
    }
    false
}

/// The word-segment range containing `offset`.
///
/// An offset at the end of the text maps to the last segment. Returns
/// `None` only for empty text.
pub(crate) fn word_range_at(text: &str, offset: usize) -> Option<Range<usize>> {
    let mut last = None;
    for (start, word) in text.split_word_bound_indices() {
        let range = start..start + word.len();
        if range.contains(&offset) {
            return Some(range);
        }
        last = Some(range);
    }
    last
}
