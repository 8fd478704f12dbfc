use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Visual tone of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTone {
    Progress,
    Neutral,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub text: String,
}

impl StatusLine {
    #[must_use]
    pub fn new(tone: StatusTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Sink for user-visible status messages.
///
/// Implementations only display; the controller decides what to say.
pub trait StatusReporter {
    fn report_progress(&mut self, message: &str);
    fn report_success(&mut self, message: &str);
    fn report_error(&mut self, message: &str);
}

impl<T: StatusReporter + ?Sized> StatusReporter for &mut T {
    fn report_progress(&mut self, message: &str) {
        (**self).report_progress(message);
    }

    fn report_success(&mut self, message: &str) {
        (**self).report_success(message);
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message);
    }
}

impl<T: StatusReporter + ?Sized> StatusReporter for Box<T> {
    fn report_progress(&mut self, message: &str) {
        (**self).report_progress(message);
    }

    fn report_success(&mut self, message: &str) {
        (**self).report_success(message);
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message);
    }
}

/// In-memory status channel used by tests and headless hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingStatusReporter {
    history: Vec<StatusLine>,
}

impl RecordingStatusReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line currently shown, if anything was reported.
    #[must_use]
    pub fn current(&self) -> Option<&StatusLine> {
        self.history.last()
    }

    #[must_use]
    pub fn history(&self) -> &[StatusLine] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    fn push(&mut self, tone: StatusTone, message: &str) {
        self.history.push(StatusLine::new(tone, message));
    }
}

impl StatusReporter for RecordingStatusReporter {
    fn report_progress(&mut self, message: &str) {
        self.push(StatusTone::Progress, message);
    }

    fn report_success(&mut self, message: &str) {
        self.push(StatusTone::Neutral, message);
    }

    fn report_error(&mut self, message: &str) {
        self.push(StatusTone::Alert, message);
    }
}

/// Status channel that forwards every line to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStatusReporter;

impl StatusReporter for TracingStatusReporter {
    fn report_progress(&mut self, message: &str) {
        info!(tone = "progress", "{message}");
    }

    fn report_success(&mut self, message: &str) {
        info!(tone = "neutral", "{message}");
    }

    fn report_error(&mut self, message: &str) {
        warn!(tone = "alert", "{message}");
    }
}
