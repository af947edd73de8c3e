//! Write kinds driven through the index protocol.

use core::fmt;

/// The kind of write a table is proposing to its indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteKind {
    /// A new key is being added.
    Insertion,
    /// An existing key is being given a new value.
    Update,
    /// An existing key is being deleted.
    Removal,
}

impl WriteKind {
    /// Returns a lowercase name suitable for log output.
    pub fn name(&self) -> &'static str {
        match self {
            WriteKind::Insertion => "insertion",
            WriteKind::Update => "update",
            WriteKind::Removal => "removal",
        }
    }
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
