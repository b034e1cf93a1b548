// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The bounded undo/redo ring.
//!
//! States snapshot the whole document text plus cursor and selection. The
//! stack holds at most [`MAX_UNDO_LEVELS`] states, evicting the oldest.
//! `current_level` tracks how far back an undo run has walked; pushing a
//! new state while it is set discards the redo branch.

use text_document::TextLocation;
use tracing::trace;

use crate::cursor::CursorInfo;

/// The maximum number of undo states kept before the oldest is evicted.
pub const MAX_UNDO_LEVELS: usize = 99;

/// A restorable snapshot of editor state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UndoState {
    pub(crate) text: String,
    pub(crate) cursor: CursorInfo,
    pub(crate) selection_start: Option<TextLocation>,
}

#[derive(Debug, Default)]
pub(crate) struct UndoStack {
    states: Vec<UndoState>,
    /// The index of the state most recently restored by undo, or `None`
    /// when no undo has happened since the last push.
    current_level: Option<usize>,
}

impl UndoStack {
    pub(crate) fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    /// Whether an undo walk can begin or continue.
    pub(crate) fn can_undo(&self) -> bool {
        match self.current_level {
            None => !self.states.is_empty(),
            Some(level) => level > 0,
        }
    }

    pub(crate) fn state(&self, index: usize) -> &UndoState {
        &self.states[index]
    }

    /// Pushes a new state, discarding any redo branch and evicting the
    /// oldest state once the cap is reached.
    pub(crate) fn push(&mut self, state: UndoState) {
        if let Some(level) = self.current_level.take() {
            self.states.truncate(level);
        }
        self.states.push(state);
        if self.states.len() > MAX_UNDO_LEVELS {
            self.states.remove(0);
        }
        trace!(depth = self.states.len(), "pushed undo state");
    }

    pub(crate) fn clear(&mut self) {
        self.current_level = None;
        self.states.clear();
    }

    /// Begins or continues an undo walk, returning the index to restore.
    ///
    /// On the first undo of a run, `tip` supplies a snapshot of the
    /// current (not yet undone) state; it is pushed so a later redo can
    /// return to it.
    pub(crate) fn start_undo(&mut self, tip: impl FnOnce() -> UndoState) -> Option<usize> {
        let index = match self.current_level {
            None => {
                let index = self.states.len().checked_sub(1)?;
                self.push(tip());
                index
            }
            Some(level) => level.checked_sub(1)?,
        };
        self.current_level = Some(index);
        Some(index)
    }

    /// Continues a redo walk, returning the state to restore.
    ///
    /// When the walk reaches the synthetic tip pushed by the first undo,
    /// the tip comes off the stack with this restore and the walk ends.
    pub(crate) fn start_redo(&mut self) -> Option<UndoState> {
        let next = self.current_level? + 1;
        if next >= self.states.len() {
            self.current_level = None;
            return None;
        }
        if next + 1 == self.states.len() {
            self.current_level = None;
            return self.states.pop();
        }
        self.current_level = Some(next);
        Some(self.states[next].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str) -> UndoState {
        UndoState {
            text: text.into(),
            cursor: CursorInfo::new(),
            selection_start: None,
        }
    }

    #[test]
    fn undo_pushes_a_tip_and_walks_back() {
        let mut stack = UndoStack::default();
        stack.push(state("a"));
        stack.push(state("ab"));

        let index = stack.start_undo(|| state("abc")).unwrap();
        assert_eq!(stack.state(index).text, "ab");
        // The tip snapshot went on top for redo.
        assert_eq!(stack.states.len(), 3);

        let index = stack.start_undo(|| unreachable!()).unwrap();
        assert_eq!(stack.state(index).text, "a");

        assert_eq!(stack.start_undo(|| unreachable!()), None);
    }

    #[test]
    fn redo_walks_forward_and_pops_the_tip() {
        let mut stack = UndoStack::default();
        stack.push(state("a"));
        stack.push(state("ab"));
        stack.start_undo(|| state("abc"));
        stack.start_undo(|| unreachable!());

        let restored = stack.start_redo().unwrap();
        assert_eq!(restored.text, "ab");
        let restored = stack.start_redo().unwrap();
        assert_eq!(restored.text, "abc");
        // The tip was consumed and the walk ended.
        assert_eq!(stack.current_level(), None);
        assert_eq!(stack.states.len(), 2);
        assert_eq!(stack.start_redo(), None);
    }

    #[test]
    fn undo_is_exhausted_at_the_bottom_of_the_stack() {
        let mut stack = UndoStack::default();
        assert!(!stack.can_undo());
        stack.push(state("a"));
        assert!(stack.can_undo());

        stack.start_undo(|| state("ab"));
        assert!(!stack.can_undo());

        // Redoing back to the tip re-arms undo.
        let restored = stack.start_redo().unwrap();
        assert_eq!(restored.text, "ab");
        assert!(stack.can_undo());
    }

    #[test]
    fn push_discards_the_redo_branch() {
        let mut stack = UndoStack::default();
        stack.push(state("a"));
        stack.push(state("ab"));
        stack.start_undo(|| state("abc"));
        assert_eq!(stack.current_level(), Some(1));

        stack.push(state("aX"));
        assert_eq!(stack.current_level(), None);
        assert_eq!(stack.states.len(), 2);
        assert_eq!(stack.states[1].text, "aX");
    }

    #[test]
    fn stack_is_bounded() {
        let mut stack = UndoStack::default();
        for i in 0..MAX_UNDO_LEVELS + 10 {
            stack.push(state(&i.to_string()));
        }
        assert_eq!(stack.states.len(), MAX_UNDO_LEVELS);
        assert_eq!(stack.states[0].text, "10");
    }
}
