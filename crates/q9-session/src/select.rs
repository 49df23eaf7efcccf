//! Candidate selection and the commit paths.

use q9_core::unicode;

use super::types::{Mode, MAX_REVERSE_CODES};
use super::DecodeSession;

impl DecodeSession {
    /// Resolve the candidate at `index` on the current page and act on
    /// the active sub-mode. Returns false (no change, no commit) when
    /// the slot is empty.
    pub(crate) fn select_candidate(&mut self, index: usize) -> bool {
        let Some(word) = self.page_candidates().get(index).cloned() else {
            return false;
        };

        match self.mode {
            // Redirect into a homophone query; nothing commits yet. An
            // empty homophone result keeps the current list on screen,
            // so the next selection commits with reverse-code status.
            Mode::Homophone => {
                self.mode = Mode::PostHomophone;
                self.status_prefix = format!("同音[{word}]");
                let homophones = self.store.homophones(&word);
                if !homophones.is_empty() {
                    self.start_selection(homophones);
                }
                true
            }

            // Commit the pair and ask the host to step the cursor back
            // between the brackets.
            Mode::Bracket => {
                self.set_commit(word, true);
                self.cancel(true);
                true
            }

            Mode::Candidate | Mode::PostHomophone | Mode::Shortcut => self.commit_selection(word),

            // Unreachable while a list is showing; selection is only
            // dispatched from process_digit under in_selection().
            Mode::Idle => false,
        }
    }

    fn commit_selection(&mut self, word: String) -> bool {
        let show_codes = self.mode == Mode::PostHomophone;

        self.set_commit(word.clone(), false);

        // Only single characters seed the relate query.
        self.last_word = if unicode::is_single_scalar(&word) {
            word.clone()
        } else {
            String::new()
        };

        let relates = if self.last_word.is_empty() {
            Vec::new()
        } else {
            self.store.related(&self.last_word)
        };

        if relates.is_empty() {
            self.cancel(true);
        } else {
            self.cancel(false);
            self.related_words = relates;
        }

        // Applied after the reset so the status survives until the next
        // transition.
        if show_codes {
            let codes = self.store.codes(&word);
            if !codes.is_empty() {
                let joined = codes
                    .iter()
                    .take(MAX_REVERSE_CODES)
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                self.status_prefix = format!("{word}key:{joined}");
            }
        }
        true
    }
}
