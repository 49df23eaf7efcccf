//! Command-key handling: cancel, relate, homophone toggle, brackets,
//! shortcuts, and paging.

use q9_core::store::{BRACKET_CODE, SHORTCUT_BASE};
use q9_core::unicode;
use tracing::debug_span;

use super::types::{Command, Mode};
use super::DecodeSession;

impl DecodeSession {
    /// Process a command key. Returns true if the session state changed.
    pub fn process_command(&mut self, cmd: Command) -> bool {
        let _span = debug_span!("process_command", ?cmd).entered();

        match cmd {
            Command::Cancel => {
                self.cancel(true);
                true
            }

            // One-shot toggle: the next selection queries homophones
            // instead of committing.
            Command::Homophone => {
                self.mode = if self.mode == Mode::Homophone {
                    self.unarmed_mode()
                } else {
                    Mode::Homophone
                };
                true
            }

            Command::Relate => self.relate(),

            Command::OpenClose => self.open_close(),

            Command::Shortcut => self.shortcut(),

            Command::NextPage => self.page_command(1),
            Command::PrevPage => self.page_command(-1),
        }
    }

    /// Mode to fall back to when the homophone redirect is disarmed.
    fn unarmed_mode(&self) -> Mode {
        if self.in_selection() {
            Mode::Candidate
        } else {
            Mode::Idle
        }
    }

    fn relate(&mut self) -> bool {
        if self.last_word.is_empty() {
            return false;
        }
        // Relate disarms a pending homophone redirect.
        if self.mode == Mode::Homophone {
            self.mode = self.unarmed_mode();
        }
        self.status_prefix = format!("[{}]關聯", self.last_word);

        let relates = self.store.related(&self.last_word);
        if !relates.is_empty() {
            self.mode = Mode::Candidate;
            self.start_selection(relates);
        }
        true
    }

    /// Bracket pairs: the glyphs behind the fixed bracket code, paired
    /// two scalars at a time.
    fn open_close(&mut self) -> bool {
        self.mode = Mode::Bracket;
        self.status_prefix = "「」".to_string();

        let pairs = unicode::pair_up(&self.store.words(BRACKET_CODE));
        if !pairs.is_empty() {
            self.start_selection(pairs);
        }
        true
    }

    /// Shortcut sets: code 1000 from an empty accumulation, 1000+d after
    /// a single digit. No effect during selection or past one digit.
    fn shortcut(&mut self) -> bool {
        if self.in_selection() {
            return false;
        }
        let code = match self.input_code.len() {
            0 => SHORTCUT_BASE,
            1 => SHORTCUT_BASE + u32::from(self.input_code.as_bytes()[0] - b'0'),
            _ => return false,
        };
        self.status_prefix = format!("速選{}", self.input_code);

        let words = self.store.words(code);
        if !words.is_empty() {
            self.mode = Mode::Shortcut;
            self.start_selection(words);
        }
        true
    }

    fn page_command(&mut self, delta: i32) -> bool {
        if !self.in_selection() {
            return false;
        }
        self.add_page(delta);
        true
    }
}
