//! In-memory notification working set: filter projections, derived counts
//! and the optimistic transitions applied after a successful store write.
//! Counts are always recomputed from the set, never stored, so they cannot
//! diverge from it.

use serde::Deserialize;
use uuid::Uuid;

use super::notification_models::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCounts {
    pub total: usize,
    pub unread: usize,
    pub read: usize,
}

pub fn counts(items: &[Notification]) -> FeedCounts {
    let total = items.len();
    let unread = items.iter().filter(|n| !n.read).count();
    FeedCounts {
        total,
        unread,
        read: total - unread,
    }
}

/// Pure predicate projection over the working set.
pub fn project(items: Vec<Notification>, filter: NotificationFilter) -> Vec<Notification> {
    match filter {
        NotificationFilter::All => items,
        NotificationFilter::Unread => items.into_iter().filter(|n| !n.read).collect(),
        NotificationFilter::Read => items.into_iter().filter(|n| n.read).collect(),
    }
}

/// unread -> read for one record; a no-op when it is already read or absent.
pub fn mark_read(items: &mut [Notification], id: Uuid) {
    for item in items.iter_mut() {
        if item.id == id {
            item.read = true;
        }
    }
}

/// unread -> read for every record; idempotent.
pub fn mark_all_read(items: &mut [Notification]) {
    for item in items.iter_mut() {
        item.read = true;
    }
}

/// Removes a record from the working set regardless of its read state.
pub fn remove(items: &mut Vec<Notification>, id: Uuid) {
    items.retain(|n| n.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn notification(read: bool) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Reminder: write tests".to_string(),
            message: "You have a task due soon!".to_string(),
            notification_type: "reminder".to_string(),
            read,
            scheduled_for: None,
            sent_at: None,
            todo_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts_example_scenario() {
        let mut items = vec![notification(false), notification(true), notification(false)];
        assert_eq!(counts(&items).unread, 2);

        mark_all_read(&mut items);
        let after = counts(&items);
        assert_eq!(after.unread, 0);
        assert_eq!(after.read, 3);
        assert!(items.iter().all(|n| n.read));
    }

    #[test]
    fn test_mark_all_read_is_idempotent() {
        let mut items = vec![notification(false), notification(false)];
        mark_all_read(&mut items);
        let first = items.clone();
        mark_all_read(&mut items);
        assert_eq!(
            items.iter().map(|n| n.read).collect::<Vec<_>>(),
            first.iter().map(|n| n.read).collect::<Vec<_>>()
        );
        assert_eq!(counts(&items).unread, 0);
    }

    #[test]
    fn test_mark_read_targets_one_record() {
        let mut items = vec![notification(false), notification(false)];
        let target = items[0].id;
        mark_read(&mut items, target);
        assert!(items[0].read);
        assert!(!items[1].read);

        // Already-read records are left as-is.
        mark_read(&mut items, target);
        assert!(items[0].read);
    }

    #[test]
    fn test_projections() {
        let items = vec![notification(false), notification(true), notification(false)];
        assert_eq!(project(items.clone(), NotificationFilter::All).len(), 3);
        assert_eq!(project(items.clone(), NotificationFilter::Unread).len(), 2);
        assert_eq!(project(items, NotificationFilter::Read).len(), 1);
    }

    #[test]
    fn test_counts_never_diverge() {
        let mut items = vec![notification(false), notification(true)];
        let id = items[0].id;
        remove(&mut items, id);
        let c = counts(&items);
        assert_eq!(c.total, 1);
        assert_eq!(c.unread + c.read, c.total);
    }

    #[test]
    fn test_remove_ignores_read_state() {
        let mut items = vec![notification(true), notification(false)];
        let read_id = items[0].id;
        let unread_id = items[1].id;
        remove(&mut items, read_id);
        remove(&mut items, unread_id);
        assert!(items.is_empty());
    }
}
