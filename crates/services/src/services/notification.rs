//! User-facing success / error notices raised after writes.

use std::sync::{Arc, Mutex};

use tracing::{error, info};
use utils::logging::NOTICE_TARGET;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

pub trait Notifier: Send + Sync {
    fn success(&self, text: &str);
    fn error(&self, text: &str);
}

/// Routes notices into the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, text: &str) {
        info!(target: NOTICE_TARGET, notice = "success", "{}", text);
    }

    fn error(&self, text: &str) {
        error!(target: NOTICE_TARGET, notice = "error", "{}", text);
    }
}

/// Keeps every notice in memory, in the order raised.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Drain recorded notices.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }

    fn push(&self, level: NoticeLevel, text: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                text: text.to_string(),
            });
        }
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, text: &str) {
        self.push(NoticeLevel::Success, text);
    }

    fn error(&self, text: &str) {
        self.push(NoticeLevel::Error, text);
    }
}
