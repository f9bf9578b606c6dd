//! Link id generators.
//!
//! Generators are pure: they never consult storage. Uniqueness against
//! what is already stored is enforced by the link service, which retries
//! with a fresh id when an insert conflicts.

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use slink_core::LinkId;

/// Trait for generating link ids.
///
/// Implementations can vary from random tokens to sequential counters.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<LinkId>;

    /// Draws the next candidate id.
    fn generate(&self) -> Self::Output;
}
