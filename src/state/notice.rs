//! Self-expiring status banners

use std::time::{Duration, Instant};

/// How long an extraction success banner stays up
pub const EXTRACT_SUCCESS_DURATION: Duration = Duration::from_millis(4000);
/// How long other success banners stay up
pub const SUCCESS_DURATION: Duration = Duration::from_millis(3000);
/// How long error banners stay up
pub const ERROR_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Identifies one posted notice; a token from a replaced notice never
/// matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub token: NoticeToken,
    pub expires_at: Instant,
}

/// The success and error banner slots.
///
/// Each slot holds at most one notice. Posting replaces the previous notice
/// of that kind together with its deadline.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    success: Option<Notice>,
    error: Option<Notice>,
    next_token: u64,
}

impl Notices {
    pub fn post(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        duration: Duration,
        now: Instant,
    ) -> NoticeToken {
        self.next_token += 1;
        let token = NoticeToken(self.next_token);
        *self.slot_mut(kind) = Some(Notice {
            kind,
            message: message.into(),
            token,
            expires_at: now + duration,
        });
        token
    }

    pub fn success(&self) -> Option<&Notice> {
        self.success.as_ref()
    }

    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    pub fn clear(&mut self, kind: NoticeKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn clear_all(&mut self) {
        self.success = None;
        self.error = None;
    }

    /// Clear the notice identified by `token`. Returns false when that notice
    /// was already replaced or cleared.
    pub fn expire(&mut self, token: NoticeToken) -> bool {
        for slot in [&mut self.success, &mut self.error] {
            if slot.as_ref().is_some_and(|n| n.token == token) {
                *slot = None;
                return true;
            }
        }
        false
    }

    /// Clear every notice whose deadline has passed
    pub fn expire_due(&mut self, now: Instant) {
        let due: Vec<NoticeToken> = [&self.success, &self.error]
            .into_iter()
            .flatten()
            .filter(|n| n.expires_at <= now)
            .map(|n| n.token)
            .collect();
        for token in due {
            self.expire(token);
        }
    }

    fn slot_mut(&mut self, kind: NoticeKind) -> &mut Option<Notice> {
        match kind {
            NoticeKind::Success => &mut self.success,
            NoticeKind::Error => &mut self.error,
        }
    }
}
