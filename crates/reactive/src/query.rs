//! Memoized queries over an externally-owned model.
//!
//! A `Query` caches the last value its evaluator produced and pushes each new
//! value to its subscribers. The driver decides when the model may have
//! changed and calls `evaluate`; the evaluator decides whether anything did.
//!
//! Evaluation is skipped entirely while nobody is subscribed.

use crate::subscription::{Subscription, SubscriptionManager};
use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use log::{debug, trace};

/// Computes a query value from the model and the previous value.
///
/// Returns `Some` with the new value, or `None` if nothing changed.
pub type Evaluator<M, V> = Box<dyn FnMut(&M, Option<&V>) -> Option<V>>;

/// A lazily evaluated value derived from a model of type `M`.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use verdant_reactive::Query;
///
/// let mut query = Query::new(|model: &Vec<i32>, previous: Option<&usize>| {
///     let len = model.len();
///     (previous != Some(&len)).then_some(len)
/// });
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
/// let subscription = query.subscribe(move |len: &usize| sink.borrow_mut().push(*len));
///
/// query.evaluate(&vec![1, 2]);
/// query.evaluate(&vec![3, 4]); // same length, no notification
/// query.evaluate(&vec![5]);
///
/// assert_eq!(*seen.borrow(), vec![2, 1]);
/// subscription.unsubscribe();
/// ```
pub struct Query<M, V> {
    evaluator: Evaluator<M, V>,
    value: Option<V>,
    subscriptions: Rc<RefCell<SubscriptionManager<V>>>,
}

impl<M, V> Query<M, V> {
    /// Creates a query with no value until it is first evaluated.
    pub fn new<F>(evaluator: F) -> Self
    where
        F: FnMut(&M, Option<&V>) -> Option<V> + 'static,
    {
        Self {
            evaluator: Box::new(evaluator),
            value: None,
            subscriptions: Rc::new(RefCell::new(SubscriptionManager::new())),
        }
    }

    /// Creates a query whose current value starts as `initial`.
    pub fn with_value<F>(evaluator: F, initial: V) -> Self
    where
        F: FnMut(&M, Option<&V>) -> Option<V> + 'static,
    {
        let mut query = Self::new(evaluator);
        query.value = Some(initial);
        query
    }

    /// Returns the current value, or `None` before the first change.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Returns the number of active subscriptions.
    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Returns true if anyone is subscribed.
    #[inline]
    pub fn has_subscribers(&self) -> bool {
        !self.subscriptions.borrow().is_empty()
    }

    /// Subscribes `listener` to future values.
    ///
    /// The listener is not called with the current value; delivering it is
    /// up to the caller.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<V>
    where
        F: Fn(&V) + 'static,
    {
        let id = self.subscriptions.borrow_mut().subscribe(listener);
        debug!("subscribed listener {}", id);
        Subscription::new(id, &self.subscriptions)
    }

    /// Re-evaluates the query against `model`.
    ///
    /// Does nothing while there are no subscribers. Otherwise runs the
    /// evaluator and, if it reports a new value, stores it and notifies every
    /// subscriber in subscription order. Returns true if the value changed.
    pub fn evaluate(&mut self, model: &M) -> bool {
        if !self.has_subscribers() {
            return false;
        }

        let Some(next) = (self.evaluator)(model, self.value.as_ref()) else {
            return false;
        };
        let value = self.value.insert(next);

        let listeners = self.subscriptions.borrow().snapshot();
        trace!("query changed; notifying {} listeners", listeners.len());
        for listener in listeners {
            listener(value);
        }
        true
    }
}

impl<M, V: fmt::Debug> fmt::Debug for Query<M, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("value", &self.value)
            .field("subscriptions", &self.subscriptions.borrow())
            .finish_non_exhaustive()
    }
}
