//! Upload notification fan-out.

use std::path::Path;

use serde::{Deserialize, Serialize};

use uploadwatch_core::{Config, OwnerId, Recipient};

use crate::delta::Delta;

/// A message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Who receives the message.
    pub recipient: Recipient,
    /// Human-readable text.
    pub message: String,
}

/// Destination for notifications.
pub trait NotificationSink {
    /// Deliver one notification. Delivery is fire-and-forget.
    fn deliver(&mut self, notification: &Notification);
}

/// Sink that writes each notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&mut self, notification: &Notification) {
        let recipient = &notification.recipient;
        tracing::info!(
            target: "uploadwatch::notify",
            email = %recipient.email,
            "Notifying {}: {:?}",
            recipient.name,
            notification.message
        );
    }
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Delivered notifications, in delivery order.
    pub delivered: Vec<Notification>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications delivered to `name`.
    pub fn to(&self, name: &str) -> Vec<&Notification> {
        self.delivered
            .iter()
            .filter(|n| n.recipient.name == name)
            .collect()
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&mut self, notification: &Notification) {
        self.delivered.push(notification.clone());
    }
}

impl<K: NotificationSink + ?Sized> NotificationSink for &mut K {
    fn deliver(&mut self, notification: &Notification) {
        (**self).deliver(notification);
    }
}

/// Text announcing `count` new files by `owner` under `root`.
pub fn upload_message(owner: &OwnerId, count: u64, root: &Path) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("{owner} uploaded {count} new {noun} to {}", root.display())
}

/// Notifications owed for `delta`, in recipient order.
///
/// The uploading owner is never among the recipients.
pub fn plan(owner: &OwnerId, delta: Delta, config: &Config) -> Vec<Notification> {
    let Delta::Added(count) = delta else {
        return Vec::new();
    };

    let message = upload_message(owner, count, &config.root_path);
    config
        .recipients
        .iter()
        .filter(|recipient| *owner != recipient.name.as_str())
        .map(|recipient| Notification {
            recipient: recipient.clone(),
            message: message.clone(),
        })
        .collect()
}

/// Delivers upload notifications to a sink.
#[derive(Debug, Default)]
pub struct Notifier<K> {
    sink: K,
}

impl<K: NotificationSink> Notifier<K> {
    /// Create a notifier over a sink.
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// The underlying sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Consume the notifier, returning its sink.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Notify every recipient except `owner` about `delta`.
    ///
    /// Returns the number of notifications delivered.
    pub fn notify(&mut self, owner: &OwnerId, delta: Delta, config: &Config) -> usize {
        if delta == Delta::NoNewFiles {
            tracing::info!(owner = %owner, "No new uploads by {owner}");
            return 0;
        }

        let notifications = plan(owner, delta, config);
        for notification in &notifications {
            self.sink.deliver(notification);
        }
        notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(names: &[&str]) -> Config {
        Config::new(
            "/test/photos",
            names
                .iter()
                .map(|n| Recipient::new(*n, format!("{n}@example.com")))
                .collect(),
        )
    }

    fn owner(name: &str) -> OwnerId {
        OwnerId::new(name).unwrap()
    }

    #[test]
    fn test_skips_self_notification() {
        let mut notifier = Notifier::new(MemorySink::new());
        let sent = notifier.notify(&owner("alice"), Delta::Added(5), &config(&["alice", "bob"]));

        assert_eq!(sent, 1);
        assert_eq!(notifier.sink().to("bob").len(), 1);
        assert!(notifier.sink().to("alice").is_empty());
    }

    #[test]
    fn test_notifies_all_other_users_in_order() {
        let mut notifier = Notifier::new(MemorySink::new());
        notifier.notify(
            &owner("alice"),
            Delta::Added(3),
            &config(&["alice", "bob", "charlie"]),
        );

        let names: Vec<_> = notifier
            .sink()
            .delivered
            .iter()
            .map(|n| n.recipient.name.as_str())
            .collect();
        assert_eq!(names, vec!["bob", "charlie"]);
        assert_eq!(
            notifier.sink().delivered[0].message,
            "alice uploaded 3 new files to /test/photos"
        );
    }

    #[test]
    fn test_no_new_files_sends_nothing() {
        let mut notifier = Notifier::new(MemorySink::new());
        let sent = notifier.notify(&owner("alice"), Delta::NoNewFiles, &config(&["alice", "bob"]));

        assert_eq!(sent, 0);
        assert!(notifier.sink().delivered.is_empty());
    }

    #[test]
    fn test_unknown_owner_notifies_everyone() {
        let mut notifier = Notifier::new(MemorySink::new());
        let sent = notifier.notify(&owner("charlie"), Delta::Added(2), &config(&["alice", "bob"]));

        assert_eq!(sent, 2);
        assert_eq!(notifier.sink().to("alice").len(), 1);
        assert_eq!(notifier.sink().to("bob").len(), 1);
    }

    #[test]
    fn test_numeric_owner_notifies_everyone() {
        let plan = plan(&OwnerId::from_uid(999), Delta::Added(1), &config(&["alice", "bob"]));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].message, "999 uploaded 1 new file to /test/photos");
    }

    #[test]
    fn test_empty_recipient_list() {
        assert!(plan(&owner("alice"), Delta::Added(4), &config(&[])).is_empty());
    }
}
