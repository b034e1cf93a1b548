// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use smallvec::{smallvec, SmallVec};

use crate::{Error, TextLocation, TextSelection};

/// An opaque identifier for the style attached to a [`Run`].
///
/// The document does not interpret styles; it only keeps run boundaries
/// consistent as text is edited. Callers map identifiers to whatever style
/// representation they use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleId(u32);

impl StyleId {
    /// Creates a style identifier from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A maximal span of uniformly styled text within a [`Line`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    style: StyleId,
    range: Range<usize>,
}

impl Run {
    /// The style applied to this run.
    #[must_use]
    pub fn style(&self) -> StyleId {
        self.style
    }

    /// The byte range this run covers within its line's text.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn is_empty(&self) -> bool {
        self.range.start == self.range.end
    }
}

/// One hard line of the document: its text plus the runs covering it.
///
/// Invariant: the runs are contiguous, ascending, and cover every byte of
/// the text. An empty line carries exactly one empty run so that style
/// survives the line being emptied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    text: String,
    runs: SmallVec<[Run; 1]>,
}

impl Line {
    /// Creates a line covered by a single run of the given style.
    #[must_use]
    pub fn new(text: impl Into<String>, style: StyleId) -> Self {
        let text = text.into();
        let len = text.len();
        Self {
            text,
            runs: smallvec![Run {
                style,
                range: 0..len
            }],
        }
    }

    /// The line's text, without any line terminator.
    #[must_use]
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The byte length of the line's text.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the line has no text.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The runs covering this line, in ascending order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Drops empty runs, keeping one (with the style of the first run) when
    /// the line itself is empty.
    fn normalize_runs(&mut self) {
        let fallback_style = self.runs.first().map(Run::style).unwrap_or_default();
        self.runs.retain(|run| !run.is_empty());
        if self.runs.is_empty() {
            self.runs.push(Run {
                style: fallback_style,
                range: 0..0,
            });
        }
    }
}

/// An editable multi-line text buffer with styled runs.
///
/// A document always contains at least one line; a freshly created document
/// holds a single empty line. All offsets are byte offsets and all mutation
/// points must lie on UTF-8 character boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    lines: Vec<Line>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: alloc::vec![Line::new("", StyleId::default())],
        }
    }

    /// Creates a document from text, splitting it into hard lines.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc
    }

    /// The number of hard lines. Always at least one.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line at `index`, if in bounds.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// The text of the line at `index`, if in bounds.
    #[must_use]
    pub fn line_text(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(Line::text)
    }

    /// Iterates over the document's lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Whether the document consists of a single empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// The location just past the last character of the document.
    #[must_use]
    pub fn end_location(&self) -> TextLocation {
        let line = self.lines.len() - 1;
        TextLocation::new(line, self.lines[line].len())
    }

    /// Replaces the whole document with `text` split into hard lines.
    ///
    /// Both `\n` and `\r\n` terminate a line. All lines get the default
    /// style.
    pub fn set_text(&mut self, text: &str) {
        self.lines.clear();
        self.lines.extend(
            split_into_lines(text).map(|line_text| Line::new(line_text, StyleId::default())),
        );
        if self.lines.is_empty() {
            self.lines.push(Line::new("", StyleId::default()));
        }
    }

    /// The whole document as a single string, lines joined with `\n`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.text_len());
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }

    /// The byte length of [`to_text`](Self::to_text), without building it.
    #[must_use]
    pub fn text_len(&self) -> usize {
        let terminators = self.lines.len() - 1;
        self.lines.iter().map(Line::len).sum::<usize>() + terminators
    }

    /// Appends a line of uniformly styled text.
    pub fn add_line(&mut self, text: impl Into<String>, style: StyleId) {
        self.lines.push(Line::new(text, style));
    }

    /// Inserts a single character at `location`.
    ///
    /// The character must not be a line break; use
    /// [`split_line_at`](Self::split_line_at) for those.
    pub fn insert_char_at(&mut self, location: TextLocation, ch: char) -> Result<(), Error> {
        let mut buf = [0_u8; 4];
        self.insert_text_at(location, ch.encode_utf8(&mut buf))
    }

    /// Inserts single-line text at `location`, growing the run under it.
    ///
    /// The text must not contain line breaks; split the payload into lines
    /// first and use [`split_line_at`](Self::split_line_at) between them.
    pub fn insert_text_at(&mut self, location: TextLocation, text: &str) -> Result<(), Error> {
        debug_assert!(
            !text.contains(['\n', '\r']),
            "single-line insert must not contain line breaks"
        );
        let offset = self.validate_location(location)?;
        let line = &mut self.lines[location.line()];
        line.text.insert_str(offset, text);

        // Grow the run containing the insertion point. On an exact run
        // boundary, prefer the run that starts there.
        let inserted = text.len();
        let mut target = 0;
        for (index, run) in line.runs.iter().enumerate() {
            if run.range.start <= offset && offset <= run.range.end {
                target = index;
                if offset < run.range.end {
                    break;
                }
            }
        }
        line.runs[target].range.end += inserted;
        for run in &mut line.runs[target + 1..] {
            run.range.start += inserted;
            run.range.end += inserted;
        }
        Ok(())
    }

    /// Removes `len` bytes starting at `location`, within a single line.
    ///
    /// Runs overlapping the removed span shrink; runs emptied by the
    /// removal are dropped (one empty run remains if the line is emptied).
    pub fn remove_text_at(&mut self, location: TextLocation, len: usize) -> Result<(), Error> {
        let start = self.validate_location(location)?;
        let end = start + len;
        let line = &mut self.lines[location.line()];
        if end > line.text.len() {
            return Err(Error::invalid_range(
                location.line(),
                start,
                end,
                line.text.len(),
            ));
        }
        if !line.text.is_char_boundary(end) {
            return Err(Error::not_on_char_boundary(
                location.line(),
                end,
                line.text.len(),
            ));
        }
        line.text.replace_range(start..end, "");

        let map = |bound: usize| {
            if bound <= start {
                bound
            } else if bound >= end {
                bound - len
            } else {
                start
            }
        };
        for run in &mut line.runs {
            run.range = map(run.range.start)..map(run.range.end);
        }
        line.normalize_runs();
        Ok(())
    }

    /// Removes the line at `index`.
    ///
    /// Removing the only line clears it instead, so the document never
    /// drops to zero lines.
    pub fn remove_line(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.lines.len() {
            return Err(Error::invalid_line(index, self.lines.len()));
        }
        if self.lines.len() == 1 {
            let style = self.lines[0].runs[0].style;
            self.lines[0] = Line::new("", style);
        } else {
            self.lines.remove(index);
        }
        Ok(())
    }

    /// Splits the line at `location` into two, partitioning its runs.
    ///
    /// A run spanning the split point becomes one run on each side. Each
    /// side keeps at least one run, inheriting the style at the split.
    pub fn split_line_at(&mut self, location: TextLocation) -> Result<(), Error> {
        let offset = self.validate_location(location)?;
        let line = &mut self.lines[location.line()];
        let remainder_text = line.text.split_off(offset);

        let mut remainder_runs: SmallVec<[Run; 1]> = SmallVec::new();
        let mut kept_runs: SmallVec<[Run; 1]> = SmallVec::new();
        for run in line.runs.drain(..) {
            if run.range.end <= offset {
                kept_runs.push(run);
            } else if run.range.start >= offset {
                remainder_runs.push(Run {
                    style: run.style,
                    range: run.range.start - offset..run.range.end - offset,
                });
            } else {
                kept_runs.push(Run {
                    style: run.style,
                    range: run.range.start..offset,
                });
                remainder_runs.push(Run {
                    style: run.style,
                    range: 0..run.range.end - offset,
                });
            }
        }
        let boundary_style = kept_runs
            .last()
            .or_else(|| remainder_runs.first())
            .map(Run::style)
            .unwrap_or_default();
        if kept_runs.is_empty() {
            kept_runs.push(Run {
                style: boundary_style,
                range: 0..0,
            });
        }
        if remainder_runs.is_empty() {
            remainder_runs.push(Run {
                style: boundary_style,
                range: 0..0,
            });
        }

        line.runs = kept_runs;
        self.lines.insert(
            location.line() + 1,
            Line {
                text: remainder_text,
                runs: remainder_runs,
            },
        );
        Ok(())
    }

    /// Joins the line at `index` with the line after it.
    ///
    /// An empty next line is simply dropped, leaving the current line's
    /// runs untouched. Otherwise the next line's text is appended and its
    /// runs are re-based onto the combined line.
    pub fn join_line_with_next(&mut self, index: usize) -> Result<(), Error> {
        if index + 1 >= self.lines.len() {
            return Err(Error::invalid_line(index + 1, self.lines.len()));
        }
        if self.lines[index + 1].is_empty() {
            self.lines.remove(index + 1);
            return Ok(());
        }
        let next = self.lines.remove(index + 1);
        let line = &mut self.lines[index];
        let base = line.text.len();
        line.text.push_str(&next.text);
        for run in next.runs {
            if !run.is_empty() {
                line.runs.push(Run {
                    style: run.style,
                    range: base + run.range.start..base + run.range.end,
                });
            }
        }
        line.normalize_runs();
        Ok(())
    }

    /// The text covered by `selection`, lines joined with `\n`.
    pub fn text_in_range(&self, selection: TextSelection) -> Result<String, Error> {
        let begin = selection.beginning();
        let end = selection.end();
        self.validate_location(begin)?;
        self.validate_location(end)?;

        if begin.line() == end.line() {
            return Ok(String::from(
                &self.lines[begin.line()].text[begin.offset()..end.offset()],
            ));
        }
        let mut out = String::new();
        out.push_str(&self.lines[begin.line()].text[begin.offset()..]);
        for line in &self.lines[begin.line() + 1..end.line()] {
            out.push('\n');
            out.push_str(&line.text);
        }
        out.push('\n');
        out.push_str(&self.lines[end.line()].text[..end.offset()]);
        Ok(out)
    }

    /// Checks that `location` addresses a valid mutation point and returns
    /// its byte offset.
    pub fn validate_location(&self, location: TextLocation) -> Result<usize, Error> {
        let line = self
            .lines
            .get(location.line())
            .ok_or_else(|| Error::invalid_line(location.line(), self.lines.len()))?;
        let offset = location.offset();
        if offset > line.text.len() {
            return Err(Error::invalid_offset(
                location.line(),
                offset,
                line.text.len(),
            ));
        }
        if !line.text.is_char_boundary(offset) {
            return Err(Error::not_on_char_boundary(
                location.line(),
                offset,
                line.text.len(),
            ));
        }
        Ok(offset)
    }

    /// Clamps an arbitrary location to the nearest valid one.
    ///
    /// The line index clamps to the last line, the offset to the line
    /// length, snapping backwards onto a character boundary if needed.
    #[must_use]
    pub fn clamp_location(&self, location: TextLocation) -> TextLocation {
        let line_index = location.line().min(self.lines.len() - 1);
        let text = &self.lines[line_index].text;
        let mut offset = location.offset().min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        TextLocation::new(line_index, offset)
    }
}

/// Splits text into hard lines, treating both `\n` and `\r\n` (and a lone
/// `\r`) as terminators. An empty input yields a single empty line.
pub fn split_into_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
