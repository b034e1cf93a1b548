// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtual-keyboard adapter.
//!
//! On-screen keyboards deliver text from outside the frame loop. The
//! producing side holds a [`VirtualKeyboardEntry`] and may send from any
//! thread; the editor drains the queue at the start of each
//! [`tick`](crate::TextEditorDriver::tick), so keyboard input lands with
//! at most one frame of latency and never mutates the document mid-frame.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use tracing::debug;

use crate::host::TextCommitKind;

/// Queue capacity. A virtual keyboard replaces the whole text on every
/// event, so within one frame only the last `TextChanged` matters; a small
/// buffer keeps commits that arrive in the same frame.
const QUEUE_CAPACITY: usize = 8;

/// An event sent by a virtual keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VirtualKeyboardEvent {
    /// The keyboard's text buffer changed; `text` replaces the document.
    TextChanged(String),
    /// The keyboard committed its text (for example, its enter key).
    TextCommitted(String, TextCommitKind),
}

/// The producing end of the virtual-keyboard queue.
///
/// Cloneable and sendable to whatever thread the platform delivers
/// keyboard events on.
#[derive(Clone, Debug)]
pub struct VirtualKeyboardEntry {
    sender: Sender<VirtualKeyboardEvent>,
}

impl VirtualKeyboardEntry {
    /// Enqueues an event for the next editor tick.
    ///
    /// Never blocks. If the editor has not ticked for `QUEUE_CAPACITY`
    /// events, or has been dropped, the event is discarded.
    pub fn send(&self, event: VirtualKeyboardEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(?event, "virtual keyboard queue full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

pub(crate) fn channel() -> (VirtualKeyboardEntry, Receiver<VirtualKeyboardEvent>) {
    let (sender, receiver) = crossbeam_channel::bounded(QUEUE_CAPACITY);
    (VirtualKeyboardEntry { sender }, receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (entry, receiver) = channel();
        entry.send(VirtualKeyboardEvent::TextChanged("a".into()));
        entry.send(VirtualKeyboardEvent::TextCommitted(
            "a".into(),
            TextCommitKind::OnEnter,
        ));
        assert_eq!(
            receiver.try_recv().unwrap(),
            VirtualKeyboardEvent::TextChanged("a".into())
        );
        assert_eq!(
            receiver.try_recv().unwrap(),
            VirtualKeyboardEvent::TextCommitted("a".into(), TextCommitKind::OnEnter)
        );
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn overflow_does_not_block() {
        let (entry, receiver) = channel();
        for i in 0..QUEUE_CAPACITY + 4 {
            entry.send(VirtualKeyboardEvent::TextChanged(i.to_string()));
        }
        // The queue kept the first events and discarded the overflow.
        let mut count = 0;
        while receiver.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, QUEUE_CAPACITY);
    }
}
