//! Reporter adapter that records notices instead of printing them.

use std::sync::Mutex;

use cc_init_core::application::ports::Reporter;

/// Severity of a recorded notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Keeps every notice in order. Used when embedding the engine and in tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Messages of one level, in emission order.
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }

    pub fn contains(&self, level: NoticeLevel, message: &str) -> bool {
        self.notices()
            .iter()
            .any(|n| n.level == level && n.message == message)
    }

    fn push(&self, level: NoticeLevel, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl Reporter for RecordingReporter {
    fn success(&self, msg: &str) {
        self.push(NoticeLevel::Success, msg);
    }

    fn info(&self, msg: &str) {
        self.push(NoticeLevel::Info, msg);
    }

    fn warning(&self, msg: &str) {
        self.push(NoticeLevel::Warning, msg);
    }

    fn error(&self, msg: &str) {
        self.push(NoticeLevel::Error, msg);
    }

    fn debug(&self, msg: &str) {
        self.push(NoticeLevel::Debug, msg);
    }
}
