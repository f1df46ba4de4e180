// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Non-fatal user notices (load diagnostics, copy results) with TTL + dedupe.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational note.
    Info,
    /// Something was recovered with a fallback.
    Warn,
    /// Something failed; the session continues.
    Error,
}

/// Identifier for a notice entry.
pub type NoticeId = u64;

/// A queued notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Stable identifier.
    pub id: NoticeId,
    /// Severity.
    pub kind: NoticeKind,
    /// Short title line.
    pub title: String,
    /// Optional detail text.
    pub body: Option<String>,
    /// Time-to-live.
    pub ttl: Duration,
    /// Creation (or last refresh) time.
    pub created: Instant,
}

impl Notice {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) < self.ttl
    }
}

/// Bounded notice queue; identical notices inside the dedupe window refresh
/// the existing entry instead of stacking.
#[derive(Debug)]
pub struct NoticeService {
    queue: VecDeque<Notice>,
    max: usize,
    dedupe_window: Duration,
    default_ttl: Duration,
    next_id: NoticeId,
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new(8)
    }
}

impl NoticeService {
    /// Create a queue holding at most `max` notices.
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window: Duration::from_millis(500),
            default_ttl: Duration::from_secs(6),
            next_id: 1,
        }
    }

    /// Push a notice with the default TTL.
    pub fn notify<S, B>(&mut self, kind: NoticeKind, title: S, body: B, now: Instant) -> NoticeId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let ttl = self.default_ttl;
        self.push(kind, title, body, ttl, now)
    }

    /// Push a notice, deduping identical recent entries.
    pub fn push<S, B>(
        &mut self,
        kind: NoticeKind,
        title: S,
        body: B,
        ttl: Duration,
        now: Instant,
    ) -> NoticeId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body = body.into();

        let window = self.dedupe_window;
        if let Some(existing) = self.queue.iter_mut().find(|n| {
            n.kind == kind
                && n.title == title
                && n.body == body
                && now.saturating_duration_since(n.created) <= window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            id,
            kind,
            title,
            body,
            ttl,
            created: now,
        });
        id
    }

    /// Drop expired notices.
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue.retain(|n| n.is_live(now));
    }

    /// Notices still alive at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<&Notice> {
        self.queue.iter().filter(|n| n.is_live(now)).collect()
    }

    /// Take every queued notice (headless front-ends print and forget).
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    /// Number of queued notices, expired or not.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_inside_window() {
        let mut svc = NoticeService::new(4);
        let t0 = Instant::now();
        let a = svc.notify(NoticeKind::Error, "load failed", None, t0);
        let b = svc.notify(NoticeKind::Error, "load failed", None, t0 + Duration::from_millis(100));
        assert_eq!(a, b);
        assert_eq!(svc.len(), 1);
        let c = svc.notify(NoticeKind::Error, "load failed", None, t0 + Duration::from_secs(2));
        assert_ne!(a, c);
    }

    #[test]
    fn bounded_queue_drops_oldest() {
        let mut svc = NoticeService::new(2);
        let now = Instant::now();
        svc.notify(NoticeKind::Info, "one", None, now);
        svc.notify(NoticeKind::Info, "two", None, now);
        svc.notify(NoticeKind::Info, "three", None, now);
        let titles: Vec<_> = svc.visible(now).iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, ["two", "three"]);
    }

    #[test]
    fn expiry_and_drain() {
        let mut svc = NoticeService::default();
        let now = Instant::now();
        svc.push(NoticeKind::Warn, "short", Some("x".to_owned()), Duration::from_millis(10), now);
        svc.notify(NoticeKind::Info, "long", None, now);
        let later = now + Duration::from_secs(1);
        assert_eq!(svc.visible(later).len(), 1);
        svc.retain_visible(later);
        assert_eq!(svc.len(), 1);
        assert_eq!(svc.drain()[0].title, "long");
        assert!(svc.is_empty());
    }
}
