//! Storage backends for slink.
//!
//! Two [`Repository`] implementations are provided: an in-process ordered
//! map and a Redis-backed indexed store.

pub mod memory;
pub mod redis;

pub use crate::memory::InMemoryRepository;
pub use crate::redis::RedisRepository;
pub use slink_core::repository::{Inserted, ReadRepository, Repository, Result};
pub use slink_core::StorageError;
