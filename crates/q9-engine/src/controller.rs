//! Engine controller: key events in, commits and presentation updates
//! out.
//!
//! The controller glues the decode session to two host-provided seams:
//! [`Host`] (text commit, cursor movement, the one-shot hide timer) and
//! [`Transport`] (the presentation process). Hiding on deactivation is
//! debounced through a focus probe so that focus bouncing to the
//! presentation window and straight back never hides it: the `HIDE` is
//! only sent for a `FOCUS_FALSE` that answers a probe which is still
//! outstanding.

use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use q9_core::{AppConfig, LookupStore};
use q9_session::{Command, DecodeSession};

use crate::channel::{ChannelError, UiChannel};
use crate::keymap::{self, KeyAction};
use crate::protocol::{UiCommand, UiReply};
use crate::render::render;

/// Deactivation → focus-probe delay, in milliseconds.
pub const HIDE_DEBOUNCE_MS: u64 = 100;

/// Click id of the cancel element; 1–9 are the candidate buttons and 0
/// is the page key.
const CLICK_CANCEL: u8 = 10;

/// Engine-side integration points the embedding host provides.
pub trait Host {
    fn commit_text(&mut self, text: &str);
    fn forward_cursor_left(&mut self);
    /// Arm (or re-arm) the single hide timer; when it fires the host
    /// calls [`EngineController::hide_timer_fired`].
    fn arm_hide_timer(&mut self, after_ms: u64);
    fn cancel_hide_timer(&mut self);
}

/// The presentation-process pipe, abstracted for testing.
pub trait Transport {
    fn ensure_spawned(&mut self) -> Result<(), ChannelError>;
    fn send(&mut self, cmd: &UiCommand);
    fn drain_lines(&mut self) -> Vec<String>;
    fn is_running(&self) -> bool;
    fn shutdown(&mut self);
}

impl Transport for UiChannel {
    fn ensure_spawned(&mut self) -> Result<(), ChannelError> {
        self.spawn()
    }

    fn send(&mut self, cmd: &UiCommand) {
        UiChannel::send(self, cmd);
    }

    fn drain_lines(&mut self) -> Vec<String> {
        self.on_readable()
    }

    fn is_running(&self) -> bool {
        UiChannel::is_running(self)
    }

    fn shutdown(&mut self) {
        UiChannel::shutdown(self);
    }
}

pub struct EngineController<H: Host, T: Transport> {
    session: DecodeSession,
    store: Arc<dyn LookupStore>,
    config: AppConfig,
    host: H,
    transport: T,

    /// A `CHECK_FOCUS` is in flight and its `FOCUS_FALSE` may hide.
    pending_focus_probe: bool,
    /// The last pushed presentation state was the base state, so a
    /// repeat `RESET` would be redundant.
    last_state_was_base: bool,
}

impl<H: Host, T: Transport> EngineController<H, T> {
    pub fn new(store: Arc<dyn LookupStore>, config: AppConfig, host: H, transport: T) -> Self {
        Self {
            session: DecodeSession::new(Arc::clone(&store)),
            store,
            config,
            host,
            transport,
            pending_focus_probe: false,
            last_state_was_base: false,
        }
    }

    pub fn session(&self) -> &DecodeSession {
        &self.session
    }

    /// Handle one key press. Returns whether the key was consumed;
    /// unresolved keys pass through to the host application.
    pub fn handle_key(&mut self, sym: u32) -> bool {
        let Some(action) = keymap::resolve(sym, &self.config) else {
            return false;
        };
        let _span = debug_span!("handle_key", sym, ?action).entered();

        let changed = match action {
            KeyAction::Digit(d) => self.session.process_digit(d),
            KeyAction::Command(cmd) => self.session.process_command(cmd),
            KeyAction::Swallow => false,
        };
        self.after_transition(changed);
        true
    }

    /// Drain and act on everything the presentation process has sent.
    pub fn on_ui_readable(&mut self) {
        for line in self.transport.drain_lines() {
            match UiReply::parse(&line) {
                Some(UiReply::Click(id)) => self.on_click(id),
                Some(UiReply::FocusTrue) => {
                    debug!("focus probe answered: presentation side has focus");
                    self.pending_focus_probe = false;
                }
                Some(UiReply::FocusFalse) => {
                    if self.pending_focus_probe {
                        self.pending_focus_probe = false;
                        self.transport.send(&UiCommand::Hide);
                    }
                    // A stale answer (probe already cancelled by a
                    // re-activation) must not hide.
                }
                None => warn!(%line, "unrecognized presentation reply"),
            }
        }
    }

    /// Input context gained focus: show the window and push a full
    /// re-render. Any in-flight hide is cancelled.
    pub fn activate(&mut self) {
        self.host.cancel_hide_timer();
        self.pending_focus_probe = false;

        if let Err(err) = self.transport.ensure_spawned() {
            warn!(%err, "presentation process unavailable");
            return;
        }
        self.transport.send(&UiCommand::Show);
        // Force the state push even when nothing changed since the last
        // activation.
        self.last_state_was_base = false;
        self.update_ui();
    }

    /// Input context lost focus. Hiding is deferred: the timer fires a
    /// focus probe, and only an answer of "not focused" hides: clicking
    /// a candidate button steals focus briefly and must not close the
    /// window mid-selection.
    pub fn deactivate(&mut self) {
        self.host.arm_hide_timer(HIDE_DEBOUNCE_MS);
    }

    /// The hide timer armed by [`deactivate`](Self::deactivate) fired.
    pub fn hide_timer_fired(&mut self) {
        if !self.transport.is_running() {
            return;
        }
        self.pending_focus_probe = true;
        self.transport.send(&UiCommand::CheckFocus);
    }

    /// Discard any composition in progress, e.g. on an external reset
    /// of the input context.
    pub fn reset(&mut self) {
        self.session.reset(true);
        self.update_ui();
    }

    pub fn shutdown(&mut self) {
        self.transport.shutdown();
    }

    fn on_click(&mut self, id: u8) {
        let changed = match id {
            0..=9 => self.session.process_digit(id),
            CLICK_CANCEL => self.session.process_command(Command::Cancel),
            _ => {
                warn!(id, "click on unknown element");
                false
            }
        };
        self.after_transition(changed);
    }

    /// Deliver any commit the transition produced, then push the new
    /// presentation state.
    fn after_transition(&mut self, changed: bool) {
        if let Some(commit) = self.session.take_commit() {
            let text = if self.config.system.sc_output {
                self.store.to_simplified(&commit.text)
            } else {
                commit.text
            };
            debug!(%text, commit.move_cursor_left, "committing");
            self.host.commit_text(&text);
            if commit.move_cursor_left {
                self.host.forward_cursor_left();
            }
        }
        if changed {
            self.update_ui();
        }
    }

    fn update_ui(&mut self) {
        if self.session.is_base() {
            // Consecutive base states collapse into one RESET.
            if !self.last_state_was_base {
                self.last_state_was_base = true;
                self.transport.send(&UiCommand::Reset);
            }
            return;
        }
        self.last_state_was_base = false;
        for cmd in render(&self.session) {
            self.transport.send(&cmd);
        }
    }
}
