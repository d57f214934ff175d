//! Transient notifications

use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(6);

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// Notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Kind
    pub kind: NotificationKind,
    /// Text shown to the user
    pub message: String,
    /// When it was raised
    pub created_at: Instant,
    /// Time to live
    pub ttl: Duration,
}

impl Notification {
    fn new(kind: NotificationKind, message: String) -> Self {
        Self {
            kind,
            message,
            created_at: Instant::now(),
            ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    /// Success notification
    pub fn success<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(NotificationKind::Success, message.into())
    }

    /// Error notification
    pub fn error<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(NotificationKind::Error, message.into())
    }

    /// Override the time to live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Whether the notification should be gone at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }

    /// Whether the notification should be gone already
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
