// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor's command table, as surfaced to context menus.

/// A command the editor can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    /// Undo the last edit.
    Undo,
    /// Redo a previously undone edit.
    Redo,
    /// Cut the selection to the clipboard.
    Cut,
    /// Copy the selection to the clipboard.
    Copy,
    /// Paste the clipboard over the selection or at the cursor.
    Paste,
    /// Delete the selection.
    Delete,
    /// Select the whole document.
    SelectAll,
}

/// The ordered set of commands a host exposes, for example in a context
/// menu. Availability is queried per command via
/// [`can_execute`](crate::TextEditorDriver::can_execute).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandList {
    commands: Vec<EditorCommand>,
}

impl Default for CommandList {
    /// The standard menu: undo, cut, copy, paste, delete, select all.
    fn default() -> Self {
        Self {
            commands: vec![
                EditorCommand::Undo,
                EditorCommand::Cut,
                EditorCommand::Copy,
                EditorCommand::Paste,
                EditorCommand::Delete,
                EditorCommand::SelectAll,
            ],
        }
    }
}

impl CommandList {
    /// A list with exactly the given commands, in order.
    #[must_use]
    pub fn new(commands: Vec<EditorCommand>) -> Self {
        Self { commands }
    }

    /// The commands, in menu order.
    #[must_use]
    pub fn commands(&self) -> &[EditorCommand] {
        &self.commands
    }
}
