// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Change notification for document stores.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use photopdf_core::types::DocumentId;
use tracing::debug;

/// What changed in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Saved(DocumentId),
    Deleted(DocumentId),
    /// Every record was removed.
    Cleared,
}

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type ChangeCallback = Arc<dyn Fn(&StoreChange) + Send + Sync>;

/// Subscriber list shared by the store implementations.
///
/// Callbacks run synchronously on the mutating thread, after the mutation
/// has been committed. The list is copied before callbacks run, so a callback
/// may read the store or (un)subscribe without deadlocking.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, ChangeCallback)>>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, callback));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn notify(&self, change: StoreChange) {
        let snapshot: Vec<ChangeCallback> = self.lock().iter().map(|(_, cb)| Arc::clone(cb)).collect();
        debug!(?change, subscribers = snapshot.len(), "Notifying store subscribers");
        for callback in snapshot {
            callback(&change);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, ChangeCallback)>> {
        // A panicking subscriber must not take notifications down with it.
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<StoreChange>>>, ChangeCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ChangeCallback = Arc::new(move |change: &StoreChange| {
            sink.lock().unwrap().push(*change);
        });
        (seen, callback)
    }

    #[test]
    fn subscribers_receive_changes_in_order() {
        let notifier = ChangeNotifier::new();
        let (seen, callback) = recorder();
        notifier.subscribe(callback);

        let id = DocumentId::new();
        notifier.notify(StoreChange::Saved(id));
        notifier.notify(StoreChange::Cleared);

        assert_eq!(*seen.lock().unwrap(), vec![StoreChange::Saved(id), StoreChange::Cleared]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let notifier = ChangeNotifier::new();
        let (seen, callback) = recorder();
        let sub = notifier.subscribe(callback);
        assert!(notifier.unsubscribe(sub));
        assert!(!notifier.unsubscribe(sub));

        notifier.notify(StoreChange::Cleared);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn callback_may_unsubscribe_itself() {
        let notifier = Arc::new(ChangeNotifier::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let inner_notifier = Arc::clone(&notifier);
        let inner_slot = Arc::clone(&slot);
        let id = notifier.subscribe(Arc::new(move |_change: &StoreChange| {
            if let Some(id) = *inner_slot.lock().unwrap() {
                inner_notifier.unsubscribe(id);
            }
        }));
        *slot.lock().unwrap() = Some(id);

        notifier.notify(StoreChange::Cleared);
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
