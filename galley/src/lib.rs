// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An editing engine for line-based rich text.
//!
//! Galley owns the state of an editable text widget: the document, the
//! cursor and selection, undo and redo, search, IME composition, and the
//! per-line highlight set a renderer paints each frame. It does not
//! measure, wrap, or draw text; geometry comes from a [`VisualLayout`]
//! implementation and widget policy from an [`EditorHost`].
//!
//! The entry point is [`TextEditor`]. Operations that need geometry or
//! host callbacks run through a short-lived [`TextEditorDriver`]:
//!
//! ```
//! use galley::{EditorConfig, EditorHost, MonospaceLayout, TextEditor};
//!
//! struct Host;
//! impl EditorHost for Host {
//!     fn is_read_only(&self) -> bool {
//!         false
//!     }
//!     fn is_multi_line(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let mut editor = TextEditor::with_text("hello", EditorConfig::default());
//! let layout = MonospaceLayout::default();
//! let mut host = Host;
//! let mut driver = editor.driver(&layout, &mut host);
//! driver.jump_to(galley::JumpTarget::DocumentEnd, galley::CursorAction::MoveCursor);
//! driver.insert_text(", world");
//! assert_eq!(editor.text(), "hello, world");
//! ```
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

mod boundary;
mod clipboard;
mod commands;
mod cursor;
mod editor;
mod highlight;
mod host;
mod input_method;
mod layout;
mod search;
mod undo;
mod virtual_keyboard;

#[cfg(test)]
mod tests;

pub use text_document;
pub use text_document::{Document, TextLocation, TextSelection};

pub use crate::clipboard::{Clipboard, InMemoryClipboard};
pub use crate::commands::{CommandList, EditorCommand};
pub use crate::cursor::{Affinity, CursorAction, CursorInfo, Granularity, MoveCursor, Movement};
pub use crate::editor::{EditorConfig, Generation, JumpTarget, TextEditor, TextEditorDriver};
pub use crate::highlight::{HighlightKind, LineHighlight};
pub use crate::host::{EditorHost, FocusCause, TextCommitKind};
pub use crate::input_method::{CaretPosition, ImeSelection};
pub use crate::layout::{MonospaceLayout, TextHitPoint, VisualLayout};
pub use crate::search::SearchCase;
pub use crate::undo::MAX_UNDO_LEVELS;
pub use crate::virtual_keyboard::{VirtualKeyboardEntry, VirtualKeyboardEvent};
