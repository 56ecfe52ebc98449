//! Copy-to-clipboard action: best-effort sink chain plus the self-expiring
//! "copied" indicator shown next to the share modal's copy button.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

pub const COPY_FEEDBACK_RESET_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("clipboard sink '{sink}' failed: {reason}")]
    SinkFailed { sink: &'static str, reason: String },
    #[error("no clipboard sink accepted the payload ({attempted} attempted)")]
    AllSinksFailed { attempted: usize },
}

/// Destination for the copied diagram definition.
pub trait ClipboardSink {
    fn name(&self) -> &'static str;
    fn write_text(&self, text: &str) -> Result<(), CopyError>;
}

/// Tries each sink in order and returns the name of the first one that accepted
/// the payload. Individual failures are swallowed.
pub fn copy_with_fallback(
    sinks: &[&dyn ClipboardSink],
    text: &str,
) -> Result<&'static str, CopyError> {
    for sink in sinks {
        match sink.write_text(text) {
            Ok(()) => {
                tracing::debug!(sink = sink.name(), bytes = text.len(), "clipboard copy succeeded");
                return Ok(sink.name());
            }
            Err(error) => {
                tracing::debug!(sink = sink.name(), %error, "clipboard sink failed; trying next");
            }
        }
    }
    Err(CopyError::AllSinksFailed {
        attempted: sinks.len(),
    })
}

#[derive(Debug, Default)]
struct CopyFeedbackInner {
    copied: bool,
    generation: u64,
    reset_task: Option<JoinHandle<()>>,
}

#[derive(Debug)]
/// Transient "copied" flag that reverts to false after a fixed delay.
///
/// Re-marking while the flag is active cancels the pending reset and starts a
/// new window; at most one reset task is alive at a time.
pub struct CopyFeedback {
    reset_after: Duration,
    inner: Arc<Mutex<CopyFeedbackInner>>,
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(Duration::from_millis(COPY_FEEDBACK_RESET_MS))
    }
}

impl CopyFeedback {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            reset_after,
            inner: Arc::new(Mutex::new(CopyFeedbackInner::default())),
        }
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    pub fn is_copied(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.copied)
            .unwrap_or(false)
    }

    /// Sets the flag and (re)schedules its reset. Must run inside a tokio runtime.
    pub fn mark_copied(&self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.generation = inner.generation.wrapping_add(1);
        inner.copied = true;
        if let Some(previous) = inner.reset_task.take() {
            previous.abort();
        }
        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let reset_after = self.reset_after;
        inner.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(reset_after).await;
            if let Ok(mut inner) = shared.lock() {
                // A newer copy owns the flag now.
                if inner.generation == generation {
                    inner.copied = false;
                    inner.reset_task = None;
                }
            }
        }));
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(task) = inner.reset_task.take() {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::{copy_with_fallback, ClipboardSink, CopyError, CopyFeedback};

    struct FailingSink;

    impl ClipboardSink for FailingSink {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn write_text(&self, _text: &str) -> Result<(), CopyError> {
            Err(CopyError::SinkFailed {
                sink: "failing",
                reason: "permission denied".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MemorySink {
        written: Mutex<Vec<String>>,
    }

    impl ClipboardSink for MemorySink {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn write_text(&self, text: &str) -> Result<(), CopyError> {
            self.written
                .lock()
                .expect("lock memory sink")
                .push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn functional_copy_with_fallback_uses_next_sink_after_failure() {
        let memory = MemorySink::default();
        let used = copy_with_fallback(&[&FailingSink, &memory], "flowchart LR")
            .expect("fallback sink should accept payload");
        assert_eq!(used, "memory");
        assert_eq!(
            memory.written.lock().expect("lock").as_slice(),
            ["flowchart LR".to_string()]
        );
    }

    #[test]
    fn regression_copy_with_fallback_reports_when_every_sink_fails() {
        let error = copy_with_fallback(&[&FailingSink, &FailingSink], "payload")
            .expect_err("all sinks fail");
        assert_eq!(error, CopyError::AllSinksFailed { attempted: 2 });
    }

    #[tokio::test]
    async fn functional_copy_feedback_is_true_immediately_and_expires() {
        let feedback = CopyFeedback::new(Duration::from_millis(60));
        assert!(!feedback.is_copied());
        feedback.mark_copied();
        assert!(feedback.is_copied());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!feedback.is_copied());
    }

    #[tokio::test]
    async fn functional_copy_feedback_recopy_restarts_window() {
        let feedback = CopyFeedback::new(Duration::from_millis(150));
        feedback.mark_copied();
        tokio::time::sleep(Duration::from_millis(100)).await;
        feedback.mark_copied();
        tokio::time::sleep(Duration::from_millis(100)).await;
        // 200ms after the first copy but only 100ms after the second.
        assert!(feedback.is_copied());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!feedback.is_copied());
    }

    #[test]
    fn unit_copy_feedback_default_window_is_two_seconds() {
        assert_eq!(
            CopyFeedback::default().reset_after(),
            Duration::from_millis(2_000)
        );
    }
}
