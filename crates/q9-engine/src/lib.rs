//! Host-facing engine layer for the Q9 numeric-keypad input method.
//!
//! [`EngineController`] owns a [`q9_session::DecodeSession`] and the
//! presentation subprocess ([`channel::UiChannel`]), translating key
//! events into commits and [`protocol::UiCommand`] pushes. The
//! embedding input-method host wires in text commit, cursor movement,
//! and a one-shot timer through the [`controller::Host`] trait.

pub mod channel;
pub mod controller;
pub mod keymap;
pub mod protocol;
mod render;
mod trace_init;

pub use controller::{EngineController, Host, Transport, HIDE_DEBOUNCE_MS};
pub use trace_init::init_tracing;
