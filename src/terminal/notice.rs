use std::time::Duration;
use tokio::time::{self, Instant};

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

/// Holds at most one transient message for the player.
///
/// Posting replaces whatever is showing and restarts the countdown.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    duration: Duration,
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn post(&mut self, text: impl Into<String>) {
        self.post_at(text, Instant::now());
    }

    fn post_at(&mut self, text: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            expires_at: now + self.duration,
        });
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|notice| notice.text.as_str())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|notice| notice.expires_at)
    }

    /// Drop the notice if its time is up. Returns true if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notice) if notice.expires_at <= now => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// Resolve when the notice showing at `deadline` should disappear; never
/// resolves when nothing is showing.
pub async fn wait_for_expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
