//! Verdant Core - Shared types for Verdant tables and indexes.
//!
//! This crate provides the small vocabulary shared by the other Verdant crates:
//!
//! - `WriteKind`: The three kinds of write a table drives through its indexes
//! - `Error`: Reason codes for rejected writes
//!
//! # Example
//!
//! ```rust
//! use verdant_core::{Error, WriteKind};
//!
//! let err = Error::rejected(0, WriteKind::Insertion);
//! assert!(err.is_rejection());
//! assert_eq!(WriteKind::Update.name(), "update");
//! ```

#![no_std]

extern crate alloc;

mod error;
mod write;

pub use error::{Error, Result};
pub use write::WriteKind;
