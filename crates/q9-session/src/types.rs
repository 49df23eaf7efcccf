//! Session-level types and constants.

/// Candidates shown per page (buttons 1–9).
pub(crate) const PAGE_SIZE: usize = 9;

/// Accumulated codes are at most three digits.
pub(crate) const MAX_CODE_LEN: usize = 3;

/// Reverse codes shown in the post-homophone status line.
pub(crate) const MAX_REVERSE_CODES: usize = 5;

/// `image_type` values understood by the presentation side.
pub(crate) const IMAGE_BASE: i32 = 0;
pub(crate) const IMAGE_THIRD_LEVEL: i32 = 10;
pub(crate) const IMAGE_CANDIDATES: i32 = -1;

/// Session mode. Exactly one is active at a time; the homophone,
/// post-homophone, bracket, and shortcut states are a single tagged enum
/// so invalid combinations cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No candidate list; digits accumulate into a code.
    Idle,
    /// Selecting from a plain candidate list.
    Candidate,
    /// Homophone redirect armed: the next selection queries homophones
    /// of the selected character instead of committing it. Entered by
    /// the toggle whether or not a list is showing.
    Homophone,
    /// Selecting among homophones; the next selection commits and shows
    /// the reverse codes of the committed character.
    PostHomophone,
    /// Selecting a bracket pair; committing also moves the cursor left.
    Bracket,
    /// Selecting from a shortcut set (codes 1000 / 1000+n).
    Shortcut,
}

/// Non-digit command keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Cancel,
    Relate,
    Homophone,
    OpenClose,
    Shortcut,
    NextPage,
    PrevPage,
}

/// A committed unit together with its post-commit cursor adjustment.
/// Bracket pairs commit with `move_cursor_left` so the host can place
/// the caret between the brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub text: String,
    pub move_cursor_left: bool,
}

/// Wrap `current + delta` into `[0, count)`.
pub(crate) fn wrap_page(current: usize, delta: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let c = current as i32;
    let n = count as i32;
    ((c + delta).rem_euclid(n)) as usize
}
