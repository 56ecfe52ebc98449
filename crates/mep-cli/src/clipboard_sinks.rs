//! System clipboard sinks for `--copy-diagram-definition`.

use std::io::Write;
use std::process::{Command, Stdio};

use mep_dashboard::{ClipboardSink, CopyError};

/// Pipes the payload into an external clipboard program's stdin.
#[derive(Debug, Clone, Copy)]
pub struct CommandClipboardSink {
    name: &'static str,
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboardSink {
    pub const fn new(
        name: &'static str,
        program: &'static str,
        args: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            program,
            args,
        }
    }

    fn failed(&self, reason: impl Into<String>) -> CopyError {
        CopyError::SinkFailed {
            sink: self.name,
            reason: reason.into(),
        }
    }
}

impl ClipboardSink for CommandClipboardSink {
    fn name(&self) -> &'static str {
        self.name
    }

    fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|error| self.failed(format!("failed to spawn {}: {error}", self.program)))?;
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin
                .write_all(text.as_bytes())
                .map_err(|error| format!("failed to write payload: {error}")),
            None => Err("stdin was not captured".to_string()),
        };
        if let Err(reason) = written {
            // The child may already have exited; either way it must be reaped.
            let _ = child.kill();
            let _ = child.wait();
            return Err(self.failed(reason));
        }
        let status = child
            .wait()
            .map_err(|error| self.failed(format!("failed to wait for {}: {error}", self.program)))?;
        if !status.success() {
            return Err(self.failed(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

/// Last resort: print the payload so the user can copy it by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboardSink;

impl ClipboardSink for StdoutClipboardSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")
            .and_then(|()| stdout.flush())
            .map_err(|error| CopyError::SinkFailed {
                sink: "stdout",
                reason: error.to_string(),
            })
    }
}

pub static SYSTEM_CLIPBOARD_SINKS: [CommandClipboardSink; 4] = [
    CommandClipboardSink::new("wl-copy", "wl-copy", &[]),
    CommandClipboardSink::new("xclip", "xclip", &["-selection", "clipboard"]),
    CommandClipboardSink::new("pbcopy", "pbcopy", &[]),
    CommandClipboardSink::new("clip", "clip", &[]),
];

/// Copies `text` to the first working system clipboard, falling back to stdout.
pub fn copy_to_system_clipboard(text: &str) -> Result<&'static str, CopyError> {
    let stdout = StdoutClipboardSink;
    let mut sinks = SYSTEM_CLIPBOARD_SINKS
        .iter()
        .map(|sink| sink as &dyn ClipboardSink)
        .collect::<Vec<_>>();
    sinks.push(&stdout);
    mep_dashboard::copy_with_fallback(&sinks, text)
}
