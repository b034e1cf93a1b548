// Copyright 2026 the Galley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clipboard seam.

/// Plain-text clipboard access.
///
/// The editor only moves plain text through the clipboard; rich formats
/// are the integrator's concern.
pub trait Clipboard {
    /// Replaces the clipboard contents.
    fn set_text(&mut self, text: &str);

    /// The current clipboard contents, if any.
    fn text(&self) -> Option<String>;
}

/// A process-local clipboard, for tests and headless hosts.
#[derive(Clone, Debug, Default)]
pub struct InMemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for InMemoryClipboard {
    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_owned());
    }

    fn text(&self) -> Option<String> {
        self.contents.clone()
    }
}
