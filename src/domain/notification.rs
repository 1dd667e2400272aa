// src/domain/notification.rs

use std::collections::BTreeMap;

pub const KIND_WELCOME: &str = "welcome";
pub const KIND_NEW_REVIEW: &str = "new_review";

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub created_at: i64,
    pub read: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum KindFilter {
    #[default]
    All,
    Unread,
    Kind(String),
}

impl KindFilter {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "all" => KindFilter::All,
            "unread" => KindFilter::Unread,
            other => KindFilter::Kind(other.to_string()),
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            KindFilter::All => "all",
            KindFilter::Unread => "unread",
            KindFilter::Kind(k) => k,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub kind: KindFilter,
    /// Case-insensitive substring of title or message. Blank = any.
    pub query: String,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification) -> bool {
        let kind_ok = match &self.kind {
            KindFilter::All => true,
            KindFilter::Unread => !n.read,
            KindFilter::Kind(k) => n.kind == *k,
        };

        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || n.title.to_lowercase().contains(&query)
            || n.message.to_lowercase().contains(&query);

        kind_ok && query_ok
    }
}

pub fn filter_notifications<'a>(
    notifications: &'a [Notification],
    filter: &NotificationFilter,
) -> Vec<&'a Notification> {
    notifications.iter().filter(|n| filter.matches(n)).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCounts {
    pub all: usize,
    pub unread: usize,
    pub by_kind: BTreeMap<String, usize>,
}

impl NotificationCounts {
    pub fn tally(notifications: &[Notification]) -> Self {
        let mut counts = NotificationCounts {
            all: notifications.len(),
            ..Default::default()
        };
        for n in notifications {
            if !n.read {
                counts.unread += 1;
            }
            *counts.by_kind.entry(n.kind.clone()).or_default() += 1;
        }
        counts
    }
}
