//! Managed presentation subprocess with a duplex line pipe.
//!
//! The channel owns the child's lifecycle: NotStarted → Running on
//! spawn, Running → Terminated on read-EOF or shutdown. A terminated
//! channel is never resurrected; the next `spawn` starts a fresh
//! process. Reads accumulate partial trailing bytes across calls before
//! splitting on `\n`, so a line fragmented over two reads is
//! reassembled instead of dropped.

use std::io::{Read, Write};
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::protocol::UiCommand;

const READ_CHUNK: usize = 4096;
const SHUTDOWN_WAIT: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to spawn presentation process: {0}")]
    Spawn(std::io::Error),

    #[error("child stdio was not piped")]
    MissingStdio,
}

struct Running {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
    /// Partial trailing bytes carried between reads.
    buffer: Vec<u8>,
}

enum ChannelState {
    NotStarted,
    Running(Running),
    Terminated,
}

pub struct UiChannel {
    ui_binary: PathBuf,
    config_path: PathBuf,
    state: ChannelState,
}

impl UiChannel {
    pub fn new(ui_binary: PathBuf, config_path: PathBuf) -> Self {
        Self {
            ui_binary,
            config_path,
            state: ChannelState::NotStarted,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ChannelState::Running(_))
    }

    /// Spawn the presentation process and send `INIT`. Idempotent: a
    /// running channel is left alone. A terminated channel gets a fresh
    /// process with a fresh line buffer.
    pub fn spawn(&mut self) -> Result<(), ChannelError> {
        if self.is_running() {
            return Ok(());
        }

        let mut child = Command::new(&self.ui_binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(ChannelError::Spawn)?;
        let stdin = child.stdin.take().ok_or(ChannelError::MissingStdio)?;
        let stdout = child.stdout.take().ok_or(ChannelError::MissingStdio)?;

        debug!(pid = child.id(), "presentation process spawned");
        self.state = ChannelState::Running(Running {
            child,
            stdin,
            stdout,
            buffer: Vec::new(),
        });

        self.send(&UiCommand::Init(self.config_path.clone()));
        Ok(())
    }

    /// Write one command line. Silently dropped unless Running; a write
    /// failure means the child is gone and terminates the channel.
    pub fn send(&mut self, cmd: &UiCommand) {
        let ChannelState::Running(ref mut running) = self.state else {
            return;
        };
        let line = cmd.to_string();
        if let Err(err) = writeln!(running.stdin, "{line}").and_then(|()| running.stdin.flush()) {
            warn!(%err, "write to presentation process failed");
            self.terminate();
        }
    }

    /// One bounded read, invoked when the host reports the read end
    /// readable. Returns the complete lines received so far; a zero
    /// length read is end-of-stream and terminates the channel.
    pub fn on_readable(&mut self) -> Vec<String> {
        let ChannelState::Running(ref mut running) = self.state else {
            return Vec::new();
        };

        let mut chunk = [0u8; READ_CHUNK];
        match running.stdout.read(&mut chunk) {
            Ok(0) => {
                debug!("presentation process closed its output");
                self.terminate();
                Vec::new()
            }
            Ok(n) => {
                running.buffer.extend_from_slice(&chunk[..n]);
                split_complete_lines(&mut running.buffer)
            }
            Err(err) => {
                warn!(%err, "read from presentation process failed");
                self.terminate();
                Vec::new()
            }
        }
    }

    /// Raw read-end descriptor for the host's readiness registration.
    #[cfg(unix)]
    pub fn read_fd(&self) -> Option<RawFd> {
        match self.state {
            ChannelState::Running(ref running) => Some(running.stdout.as_raw_fd()),
            _ => None,
        }
    }

    /// Graceful teardown: `QUIT`, close both pipe ends, and a bounded
    /// wait for the child to exit. Only used at engine destruction.
    pub fn shutdown(&mut self) {
        if !self.is_running() {
            return;
        }
        self.send(&UiCommand::Quit);

        // send() may have terminated the channel on a write failure.
        let ChannelState::Running(running) =
            std::mem::replace(&mut self.state, ChannelState::Terminated)
        else {
            return;
        };
        let Running {
            mut child,
            stdin,
            stdout,
            ..
        } = running;
        drop(stdin);
        drop(stdout);

        let deadline = Instant::now() + SHUTDOWN_WAIT;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(?status, "presentation process exited");
                    return;
                }
                Ok(None) if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                _ => {
                    warn!("presentation process did not exit, killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    return;
                }
            }
        }
    }

    fn terminate(&mut self) {
        if let ChannelState::Running(mut running) =
            std::mem::replace(&mut self.state, ChannelState::Terminated)
        {
            let _ = running.child.try_wait();
        }
    }
}

/// Split off every complete `\n`-terminated line, leaving trailing
/// partial bytes in `buffer` for the next read.
fn split_complete_lines(buffer: &mut Vec<u8>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
        let rest = buffer.split_off(pos + 1);
        let mut line = std::mem::replace(buffer, rest);
        line.pop(); // the newline
        lines.push(String::from_utf8_lossy(&line).into_owned());
    }
    lines
}
