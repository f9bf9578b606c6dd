use crate::Generator;
use slink_core::LinkId;
use std::sync::atomic::{AtomicU64, Ordering};

/// A sequential id generator.
///
/// This generator produces codes like "sl000000", "sl000001", etc.
/// Ids are predictable, so it suits tests and single-node setups that
/// do not mind enumerable links.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must itself be a valid id fragment (`[A-Za-z0-9_-]`).
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = LinkId;

    fn generate(&self) -> LinkId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        LinkId::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
