// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A line and run based document model for editable text.
//!
//! A [`Document`] is a sequence of hard [`Line`]s, each covered by styled
//! [`Run`]s. Mutations keep run coverage contiguous as text is inserted,
//! removed, split across lines, or joined. [`OffsetLocations`] translates
//! between (line, offset) locations and byte offsets into the flattened
//! text, which input-method integrations work in.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` derives on the document types.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![no_std]

extern crate alloc;

mod document;
mod error;
mod location;
mod offsets;

pub use crate::document::{split_into_lines, Document, Line, Run, StyleId};
pub use crate::error::{Error, ErrorKind};
pub use crate::location::{TextLocation, TextSelection};
pub use crate::offsets::OffsetLocations;
