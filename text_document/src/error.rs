// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// The error type for document mutation and lookup operations.
///
/// Carries the location that was rejected together with enough context to
/// produce a useful message without another document lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    line: usize,
    start: usize,
    end: usize,
    line_count: usize,
    line_len: usize,
}

impl Error {
    pub(crate) fn invalid_line(line: usize, line_count: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidLine,
            line,
            start: 0,
            end: 0,
            line_count,
            line_len: 0,
        }
    }

    pub(crate) fn invalid_offset(line: usize, offset: usize, line_len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidOffset,
            line,
            start: offset,
            end: offset,
            line_count: 0,
            line_len,
        }
    }

    pub(crate) fn invalid_range(line: usize, start: usize, end: usize, line_len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            line,
            start,
            end,
            line_count: 0,
            line_len,
        }
    }

    pub(crate) fn not_on_char_boundary(line: usize, offset: usize, line_len: usize) -> Self {
        Self {
            kind: ErrorKind::NotOnCharBoundary,
            line,
            start: offset,
            end: offset,
            line_count: 0,
            line_len,
        }
    }

    /// The kind of failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The line index the operation targeted.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The start byte offset the operation targeted.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte offset the operation targeted.
    ///
    /// Equal to [`start`](Self::start) for point lookups.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number of lines in the document, for [`ErrorKind::InvalidLine`].
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The byte length of the targeted line, for offset and range failures.
    #[must_use]
    pub fn line_len(&self) -> usize {
        self.line_len
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidLine => write!(
                f,
                "line index {} is out of bounds for a document with {} line(s)",
                self.line, self.line_count
            ),
            ErrorKind::InvalidOffset => write!(
                f,
                "offset {} is out of bounds for line {} of length {}",
                self.start, self.line, self.line_len
            ),
            ErrorKind::InvalidRange => write!(
                f,
                "range {}..{} is not a valid range within line {} of length {}",
                self.start, self.end, self.line, self.line_len
            ),
            ErrorKind::NotOnCharBoundary => write!(
                f,
                "offset {} in line {} is not on a UTF-8 character boundary",
                self.start, self.line
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The kinds of failure reported by [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The line index was beyond the last line of the document.
    InvalidLine,
    /// The byte offset was beyond the end of the line.
    InvalidOffset,
    /// The range was reversed or extended beyond the end of the line.
    InvalidRange,
    /// The byte offset landed inside a multi-byte UTF-8 sequence.
    NotOnCharBoundary,
}
