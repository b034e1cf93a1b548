// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Substring matching for the editor's search operations.
//!
//! Matching is char-wise so that case-insensitive comparison can use full
//! Unicode lowercasing without building lowercased copies of the document
//! (whose byte offsets would no longer line up with the original text).

use core::ops::Range;

/// How search compares characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchCase {
    /// Characters must match exactly.
    #[default]
    Sensitive,
    /// Characters match if their Unicode lowercase forms match.
    Ignore,
}

fn chars_match(a: char, b: char, case: SearchCase) -> bool {
    match case {
        SearchCase::Sensitive => a == b,
        SearchCase::Ignore => a == b || a.to_lowercase().eq(b.to_lowercase()),
    }
}

/// If `needle` matches `haystack` starting at byte `start`, the byte offset
/// just past the match.
fn match_at(haystack: &str, start: usize, needle: &str, case: SearchCase) -> Option<usize> {
    let mut haystack_chars = haystack[start..].chars();
    let mut end = start;
    for needle_char in needle.chars() {
        let haystack_char = haystack_chars.next()?;
        if !chars_match(haystack_char, needle_char, case) {
            return None;
        }
        end += haystack_char.len_utf8();
    }
    Some(end)
}

/// The first match starting at or after byte `from`.
pub(crate) fn find_forward(
    haystack: &str,
    needle: &str,
    from: usize,
    case: SearchCase,
) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    for (start, _) in haystack.char_indices() {
        if start < from {
            continue;
        }
        if let Some(end) = match_at(haystack, start, needle, case) {
            return Some(start..end);
        }
    }
    None
}

/// The last match ending at or before byte `before`.
pub(crate) fn find_backward(
    haystack: &str,
    needle: &str,
    before: usize,
    case: SearchCase,
) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let mut found = None;
    for (start, _) in haystack.char_indices() {
        if start >= before {
            break;
        }
        if let Some(end) = match_at(haystack, start, needle, case) {
            if end <= before {
                found = Some(start..end);
            }
        }
    }
    found
}
