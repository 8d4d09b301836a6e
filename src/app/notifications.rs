//! Transient success/error notices shown to the operator.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Notices auto-dismiss once they are older than `ttl`.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    notices: VecDeque<Notice>,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: VecDeque::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NoticeKind::Success, message, Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NoticeKind::Error, message, Instant::now());
    }

    pub fn push_at(&mut self, kind: NoticeKind, message: impl Into<String>, raised_at: Instant) {
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
            raised_at,
        });
    }

    /// Drops expired notices and returns the ones still visible at `now`, oldest first.
    pub fn active_at(&mut self, now: Instant) -> Vec<&Notice> {
        let ttl = self.ttl;
        self.notices.retain(|n| !n.is_expired(now, ttl));
        self.notices.iter().collect()
    }

    pub fn active(&mut self) -> Vec<&Notice> {
        self.active_at(Instant::now())
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Hands every pending notice to the caller (used by one-shot front ends that print them).
    pub fn drain(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
