//! Decode state machine for Q9-style numeric-keypad Chinese input.
//!
//! `DecodeSession` turns digit keystrokes and command keys into candidate
//! pages and commit strings. It is pure logic: every operation is
//! synchronous and side-effect-free beyond the session state and the
//! single pending-commit slot. The host drains commits with
//! [`DecodeSession::take_commit`] and re-renders whenever an operation
//! reports a change.

mod commands;
mod digits;
mod select;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use q9_core::LookupStore;

pub use types::{Command, Commit, Mode};

use types::{IMAGE_BASE, PAGE_SIZE};

/// One decode session per active input context.
pub struct DecodeSession {
    store: Arc<dyn LookupStore>,

    /// Accumulated decimal digits, length 0–3.
    input_code: String,
    mode: Mode,
    /// Full candidate list; may span several pages.
    candidates: Vec<String>,
    page: usize,
    total_pages: usize,
    /// Last committed single character, seed for the relate query.
    last_word: String,
    /// Related words shown over the base imagery after a commit.
    related_words: Vec<String>,
    status_prefix: String,
    /// Presentation hint: 0 base, 1–9 second digit, 10 third digit,
    /// -1 candidate text.
    image_type: i32,
    pending_commit: Option<Commit>,
}

impl DecodeSession {
    pub fn new(store: Arc<dyn LookupStore>) -> Self {
        Self {
            store,
            input_code: String::new(),
            mode: Mode::Idle,
            candidates: Vec::new(),
            page: 0,
            total_pages: 0,
            last_word: String::new(),
            related_words: Vec::new(),
            status_prefix: String::new(),
            image_type: IMAGE_BASE,
            pending_commit: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input_code(&self) -> &str {
        &self.input_code
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The ≤9 candidates of the current page. Derived from
    /// `candidates` and `page`, never stored.
    pub fn page_candidates(&self) -> &[String] {
        let start = self.page * PAGE_SIZE;
        if start >= self.candidates.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.candidates.len());
        &self.candidates[start..end]
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn last_word(&self) -> &str {
        &self.last_word
    }

    pub fn related_words(&self) -> &[String] {
        &self.related_words
    }

    pub fn status_prefix(&self) -> &str {
        &self.status_prefix
    }

    pub fn image_type(&self) -> i32 {
        self.image_type
    }

    /// A candidate list is on screen and digits select rather than
    /// accumulate.
    pub fn in_selection(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Nothing composing, nothing overlaid: the presentation side can
    /// show its default appearance.
    pub fn is_base(&self) -> bool {
        self.mode == Mode::Idle
            && self.input_code.is_empty()
            && self.candidates.is_empty()
            && self.related_words.is_empty()
            && self.status_prefix.is_empty()
            && self.image_type == IMAGE_BASE
    }

    pub fn has_commit(&self) -> bool {
        self.pending_commit.is_some()
    }

    /// Drain the pending commit.
    pub fn take_commit(&mut self) -> Option<Commit> {
        self.pending_commit.take()
    }

    /// Return to Idle, dropping any undrained commit. `clear_related`
    /// false preserves the post-commit related row.
    pub fn reset(&mut self, clear_related: bool) {
        self.cancel(clear_related);
        self.pending_commit = None;
    }

    /// Clear accumulation and selection state. Does not touch
    /// `last_word` or the pending commit; `related_words` only when
    /// asked.
    pub(crate) fn cancel(&mut self, clear_related: bool) {
        self.mode = Mode::Idle;
        self.input_code.clear();
        self.candidates.clear();
        self.page = 0;
        self.total_pages = 0;
        self.status_prefix.clear();
        self.image_type = IMAGE_BASE;
        if clear_related {
            self.related_words.clear();
        }
    }

    /// Install `words` as the current candidate list on page 0.
    /// The caller decides the mode; empty lists are never installed.
    pub(crate) fn start_selection(&mut self, words: Vec<String>) {
        debug_assert!(!words.is_empty());
        self.total_pages = words.len().div_ceil(PAGE_SIZE);
        self.candidates = words;
        self.input_code.clear();
        self.image_type = types::IMAGE_CANDIDATES;
        self.page = 0;
    }

    /// At most one commit may be pending between transitions; producing
    /// a second before the first is drained is a contract violation.
    pub(crate) fn set_commit(&mut self, text: String, move_cursor_left: bool) {
        debug_assert!(self.pending_commit.is_none(), "undrained pending commit");
        self.pending_commit = Some(Commit {
            text,
            move_cursor_left,
        });
    }
}
