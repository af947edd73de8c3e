//! Pending-change state machine shared by all index implementations.
//!
//! An index is told about a write twice: once to propose it (`will_*`) and
//! once to finalize it (`commit_pending_change` / `abandon_pending_change`).
//! `Pending` holds whatever the index staged between those two calls.
//!
//! The staged payload is whatever the index needs at commit time. A unique
//! index stages the derived unique key rather than the full value, so the
//! value it commits is always the one it validated.

use core::mem;
use verdant_core::WriteKind;

/// Scratch state for a single in-flight write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pending<K, P> {
    /// Nothing staged.
    Idle,
    /// A write has been accepted and is waiting for commit or abandon.
    Proposed {
        /// The kind of write.
        kind: WriteKind,
        /// Primary key being written.
        key: K,
        /// Index-specific payload staged for commit.
        payload: P,
    },
}

impl<K, P> Default for Pending<K, P> {
    fn default() -> Self {
        Pending::Idle
    }
}

impl<K: Clone, P> Pending<K, P> {
    /// Creates an idle state.
    pub fn new() -> Self {
        Pending::Idle
    }

    /// Stages a change and accepts it.
    ///
    /// Always returns `true`; the return value is the accept flag that
    /// `Index::will_*` hands back to the table.
    pub fn stage(&mut self, kind: WriteKind, key: &K, payload: P) -> bool {
        debug_assert!(self.is_idle(), "staged a {} over an uncommitted change", kind);
        *self = Pending::Proposed {
            kind,
            key: key.clone(),
            payload,
        };
        true
    }

    /// Stages an insertion.
    #[inline]
    pub fn will_insert(&mut self, key: &K, payload: P) -> bool {
        self.stage(WriteKind::Insertion, key, payload)
    }

    /// Stages an update.
    #[inline]
    pub fn will_update(&mut self, key: &K, payload: P) -> bool {
        self.stage(WriteKind::Update, key, payload)
    }

    /// Stages a removal.
    #[inline]
    pub fn will_remove(&mut self, key: &K, payload: P) -> bool {
        self.stage(WriteKind::Removal, key, payload)
    }
}

impl<K, P> Pending<K, P> {
    /// Returns true if nothing is staged.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Pending::Idle)
    }

    /// Returns the kind of the staged write, if any.
    pub fn kind(&self) -> Option<WriteKind> {
        match self {
            Pending::Idle => None,
            Pending::Proposed { kind, .. } => Some(*kind),
        }
    }

    /// Returns the staged primary key, if any.
    pub fn key(&self) -> Option<&K> {
        match self {
            Pending::Idle => None,
            Pending::Proposed { key, .. } => Some(key),
        }
    }

    /// Takes the staged change for commit, leaving the state idle.
    ///
    /// # Panics
    ///
    /// Panics if nothing is staged. Committing without an accepted
    /// proposal is a protocol violation.
    pub fn take(&mut self) -> (WriteKind, K, P) {
        match mem::replace(self, Pending::Idle) {
            Pending::Proposed { kind, key, payload } => (kind, key, payload),
            Pending::Idle => panic!("commit_pending_change called with no pending change"),
        }
    }

    /// Discards any staged change.
    ///
    /// Clearing an idle state is allowed: the index that rejects a write is
    /// abandoned along with the ones that accepted it, and it never staged.
    #[inline]
    pub fn clear(&mut self) {
        *self = Pending::Idle;
    }
}
