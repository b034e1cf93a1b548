// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam to the visual layout engine.
//!
//! The editor never wraps, shapes or measures text itself; everything
//! geometric goes through [`VisualLayout`]. [`MonospaceLayout`] is a
//! deterministic fixed-grid implementation used by the tests and as a
//! reference for integrators.

use core::ops::Range;

use peniko::kurbo::{Point, Size};
use text_document::{Document, TextLocation};

use crate::boundary;

/// What a hit test landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextHitPoint {
    /// A character cell, or the trailing edge of an unwrapped line.
    WithinText,
    /// The empty area right of a wrapped visual line. The reported
    /// location is the wrap offset, which doubles as the start of the next
    /// visual line; callers give the cursor upstream affinity to keep it
    /// on the earlier line.
    RightGutter,
}

/// Geometry provider for a laid-out document.
///
/// A visual line is one row of the layout: a hard document line, or one
/// wrapped segment of it. Implementations are queried against the same
/// document state the editor holds; coordinates are in layout-local space
/// before scrolling.
pub trait VisualLayout {
    /// The height of one visual line.
    fn line_height(&self) -> f64;

    /// The number of visual lines in the layout.
    fn visual_line_count(&self, document: &Document) -> usize;

    /// The index of the visual line containing `location`.
    ///
    /// At a wrap boundary the location belongs to the later visual line
    /// unless `upstream` is set.
    fn visual_line_index(
        &self,
        document: &Document,
        location: TextLocation,
        upstream: bool,
    ) -> usize;

    /// The document location under `point`, clamped into the text.
    fn hit_test(&self, document: &Document, point: Point) -> (TextLocation, TextHitPoint);

    /// The top-left corner of the caret cell for `location`.
    ///
    /// At a wrap boundary, `upstream` selects the trailing edge of the
    /// earlier visual line over the leading edge of the later one.
    fn location_point(&self, document: &Document, location: TextLocation, upstream: bool) -> Point;

    /// The size of the laid-out document.
    fn size(&self, document: &Document) -> Size;
}

/// A fixed-advance, fixed-line-height layout with optional wrapping at a
/// grapheme column.
///
/// Every grapheme cluster occupies one cell. This is not a substitute for
/// a shaping text engine, but it makes geometry assertions exact.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceLayout {
    advance: f64,
    line_height: f64,
    wrap_column: Option<usize>,
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self::new(10.0, 20.0)
    }
}

impl MonospaceLayout {
    /// Creates an unwrapped monospace layout.
    #[must_use]
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
            wrap_column: None,
        }
    }

    /// Wraps lines after `column` grapheme clusters.
    #[must_use]
    pub fn with_wrap_column(mut self, column: usize) -> Self {
        debug_assert!(column > 0, "wrap column must be positive");
        self.wrap_column = Some(column);
        self
    }

    /// The byte ranges of the visual segments of one line of text.
    ///
    /// Always yields at least one segment; an empty line is one empty
    /// segment.
    fn segments(&self, text: &str) -> Vec<Range<usize>> {
        let Some(column) = self.wrap_column else {
            return vec![0..text.len()];
        };
        let mut segments = Vec::new();
        let mut start = 0;
        loop {
            let rest = &text[start..];
            if boundary::grapheme_count(rest) <= column {
                segments.push(start..text.len());
                return segments;
            }
            let end = start + boundary::byte_of_grapheme(rest, column);
            segments.push(start..end);
            start = end;
        }
    }

    /// Flattens the document into (hard line index, segment range,
    /// is last segment of its line) rows.
    fn rows(&self, document: &Document) -> Vec<(usize, Range<usize>, bool)> {
        let mut rows = Vec::new();
        for (line_index, line) in document.lines().enumerate() {
            let segments = self.segments(line.text());
            let last = segments.len() - 1;
            for (segment_index, segment) in segments.into_iter().enumerate() {
                rows.push((line_index, segment, segment_index == last));
            }
        }
        rows
    }

    fn row_of_location(
        &self,
        document: &Document,
        location: TextLocation,
        upstream: bool,
    ) -> usize {
        let rows = self.rows(document);
        let mut fallback = rows.len() - 1;
        for (row, (line, segment, is_last)) in rows.iter().enumerate() {
            if *line != location.line() {
                continue;
            }
            fallback = row;
            let offset = location.offset();
            if offset < segment.end
                || (offset == segment.end && (*is_last || upstream))
            {
                return row;
            }
        }
        fallback
    }
}

impl VisualLayout for MonospaceLayout {
    fn line_height(&self) -> f64 {
        self.line_height
    }

    fn visual_line_count(&self, document: &Document) -> usize {
        self.rows(document).len()
    }

    fn visual_line_index(
        &self,
        document: &Document,
        location: TextLocation,
        upstream: bool,
    ) -> usize {
        self.row_of_location(document, location, upstream)
    }

    fn hit_test(&self, document: &Document, point: Point) -> (TextLocation, TextHitPoint) {
        let rows = self.rows(document);
        let row_index = if point.y < 0.0 {
            0
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "row index is clamped to the row count"
            )]
            let raw = (point.y / self.line_height) as usize;
            raw.min(rows.len() - 1)
        };
        let (line, segment, is_last) = rows[row_index].clone();
        let text = document.line_text(line).unwrap_or_default();
        let segment_text = &text[segment.clone()];

        #[expect(
            clippy::cast_possible_truncation,
            reason = "column is clamped to the segment's grapheme count"
        )]
        let column = (point.x.max(0.0) / self.advance).round() as usize;
        let cells = boundary::grapheme_count(segment_text);
        if column >= cells {
            let hit = if is_last {
                TextHitPoint::WithinText
            } else {
                TextHitPoint::RightGutter
            };
            return (TextLocation::new(line, segment.end), hit);
        }
        let offset = segment.start + boundary::byte_of_grapheme(segment_text, column);
        (TextLocation::new(line, offset), TextHitPoint::WithinText)
    }

    fn location_point(&self, document: &Document, location: TextLocation, upstream: bool) -> Point {
        let row_index = self.row_of_location(document, location, upstream);
        let (line, segment, _) = self.rows(document)[row_index].clone();
        let text = document.line_text(line).unwrap_or_default();
        let offset = location.offset().clamp(segment.start, segment.end);
        let column = boundary::grapheme_index_of_byte(&text[segment.clone()], offset - segment.start);
        Point::new(
            column as f64 * self.advance,
            row_index as f64 * self.line_height,
        )
    }

    fn size(&self, document: &Document) -> Size {
        let rows = self.rows(document);
        let mut max_cells = 0;
        for (line, segment, _) in &rows {
            let text = document.line_text(*line).unwrap_or_default();
            max_cells = max_cells.max(boundary::grapheme_count(&text[segment.clone()]));
        }
        Size::new(
            max_cells as f64 * self.advance,
            rows.len() as f64 * self.line_height,
        )
    }
}
