//! Verdant Reactive - Memoized queries with change notification.
//!
//! This crate implements a small push-based primitive for deriving values from
//! a changing model. A driver calls `Query::evaluate` whenever the model may
//! have changed; subscribers hear about the result only when the evaluator
//! reports an actual change.
//!
//! # Core Concepts
//!
//! - `Query`: Caches a derived value and notifies subscribers on change
//! - `Subscription`: Token used to cancel a subscription
//! - `SubscriptionManager`: The ordered listener list behind a query
//!
//! Binding a query to a UI component's lifecycle is left to the caller:
//! subscribe on mount, deliver `Query::value` to the new listener, and call
//! `Subscription::unsubscribe` on teardown.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use verdant_reactive::Query;
//!
//! let mut total = Query::new(|model: &Vec<u32>, previous: Option<&u32>| {
//!     let sum: u32 = model.iter().sum();
//!     (previous != Some(&sum)).then_some(sum)
//! });
//!
//! let latest = Rc::new(Cell::new(0));
//! let sink = latest.clone();
//! let subscription = total.subscribe(move |sum: &u32| sink.set(*sum));
//!
//! total.evaluate(&vec![1, 2, 3]);
//! assert_eq!(latest.get(), 6);
//! assert_eq!(total.value(), Some(&6));
//!
//! subscription.unsubscribe();
//! ```

#![no_std]

extern crate alloc;

pub mod query;
pub mod subscription;

pub use query::{Evaluator, Query};
pub use subscription::{Listener, Subscription, SubscriptionId, SubscriptionManager};
