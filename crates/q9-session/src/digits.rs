//! Digit handling: selection dispatch and code accumulation.

use tracing::debug_span;

use super::types::{wrap_page, Mode, IMAGE_THIRD_LEVEL, MAX_CODE_LEN};
use super::DecodeSession;

impl DecodeSession {
    /// Process a digit key. Returns true if the session state changed
    /// and the presentation needs a refresh.
    ///
    /// In a selection mode, `0` pages forward and `1`–`9` select the
    /// candidate at that slot (a no-op when the slot is empty).
    /// Otherwise the digit joins the accumulated code: `0` terminates
    /// and queries immediately, a third digit queries, and one or two
    /// digits only advance the imagery hint.
    pub fn process_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let _span = debug_span!("process_digit", digit).entered();

        if self.in_selection() {
            if digit == 0 {
                self.add_page(1);
                true
            } else {
                self.select_candidate(usize::from(digit - 1))
            }
        } else {
            self.accumulate(digit)
        }
    }

    fn accumulate(&mut self, digit: u8) -> bool {
        self.input_code.push(char::from(b'0' + digit));
        self.status_prefix = self.input_code.clone();

        // 0 terminates early; note the 0 itself is part of the queried
        // code, so 1,2,0 looks up 120.
        if digit == 0 || self.input_code.len() >= MAX_CODE_LEN {
            self.query_accumulated();
        } else if self.input_code.len() == 1 {
            self.image_type = i32::from(digit);
        } else {
            self.image_type = IMAGE_THIRD_LEVEL;
        }
        true
    }

    /// Parse the accumulated code and query it. Parse failures and
    /// empty results both degrade to a silent cancel, never an error.
    fn query_accumulated(&mut self) {
        let Ok(code) = self.input_code.parse::<u32>() else {
            self.cancel(true);
            return;
        };

        let words = self.store.words(code);
        if words.is_empty() {
            self.cancel(true);
        } else {
            // A pending homophone redirect survives into the selection.
            if self.mode != Mode::Homophone {
                self.mode = Mode::Candidate;
            }
            self.start_selection(words);
        }
    }

    /// Move `delta` pages with wraparound at the page-count boundary.
    pub(crate) fn add_page(&mut self, delta: i32) {
        if self.candidates.is_empty() {
            return;
        }
        self.page = wrap_page(self.page, delta, self.total_pages);
    }
}
