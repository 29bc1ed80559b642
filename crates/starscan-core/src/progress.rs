//! Progress events for the two pipeline stages.
//!
//! Stages send events over an unbounded mpsc channel; the CLI consumes them
//! and drives its progress bars. Events are fire-and-forget: a stage never
//! blocks on (or fails because of) a missing consumer.

use tokio::sync::mpsc::UnboundedSender;

/// Which pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Download,
    Analyze,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Download => "Downloading",
            Stage::Analyze => "Analyzing",
        }
    }
}

/// One progress notification.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A stage is starting with `total` units of work.
    StageStart { stage: Stage, total: usize },
    /// One unit of work finished successfully.
    UnitDone { stage: Stage, filename: String },
}

/// Sender half used by the stages. `None` disables reporting (tests, `fetch`).
pub type ProgressSender = Option<UnboundedSender<ProgressEvent>>;

/// Sends an event if a consumer is attached, ignoring a closed channel.
pub fn emit(tx: &ProgressSender, event: ProgressEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}
