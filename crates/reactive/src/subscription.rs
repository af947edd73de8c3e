//! Subscription management for queries.
//!
//! This module provides subscription IDs, the per-query listener list, and
//! the `Subscription` token handed back to callers so they can cancel.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use log::debug;

/// Unique identifier for a subscription within one query.
pub type SubscriptionId = u64;

/// Callback invoked with each new query value.
pub type Listener<V> = Rc<dyn Fn(&V)>;

/// Manages the listeners of a single query, in subscription order.
pub struct SubscriptionManager<V> {
    /// Active listeners, oldest first.
    listeners: Vec<(SubscriptionId, Listener<V>)>,
    /// Next subscription ID to assign
    next_id: SubscriptionId,
}

impl<V> Default for SubscriptionManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SubscriptionManager<V> {
    /// Creates an empty subscription manager.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a listener.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&V) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        self.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Checks whether `id` is still subscribed.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.listeners.iter().any(|(sid, _)| *sid == id)
    }

    /// Returns the current listeners in subscription order.
    ///
    /// Notifying from a snapshot lets listeners subscribe or unsubscribe
    /// while a notification is running.
    pub fn snapshot(&self) -> Vec<Listener<V>> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }

    /// Returns the number of active subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if there are no subscriptions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns all subscription IDs, oldest first.
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.listeners.iter().map(|(id, _)| *id).collect()
    }
}

impl<V> fmt::Debug for SubscriptionManager<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionManager")
            .field("ids", &self.subscription_ids())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// A cancellable subscription to a query.
///
/// Dropping a `Subscription` does not unsubscribe; call `unsubscribe`.
/// The token does not keep the query alive.
pub struct Subscription<V> {
    id: SubscriptionId,
    manager: Weak<RefCell<SubscriptionManager<V>>>,
}

impl<V> Subscription<V> {
    pub(crate) fn new(id: SubscriptionId, manager: &Rc<RefCell<SubscriptionManager<V>>>) -> Self {
        Self {
            id,
            manager: Rc::downgrade(manager),
        }
    }

    /// Returns the subscription ID.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns true while the listener is still subscribed to a live query.
    pub fn is_active(&self) -> bool {
        self.manager
            .upgrade()
            .map(|m| m.borrow().contains(self.id))
            .unwrap_or(false)
    }

    /// Removes the listener from its query.
    ///
    /// Safe to call more than once, and after the query is gone. Returns true
    /// only for the call that actually removed the listener.
    pub fn unsubscribe(&self) -> bool {
        let Some(manager) = self.manager.upgrade() else {
            return false;
        };
        let removed = manager.borrow_mut().unsubscribe(self.id);
        if removed {
            debug!("unsubscribed listener {}", self.id);
        }
        removed
    }
}

impl<V> fmt::Debug for Subscription<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
