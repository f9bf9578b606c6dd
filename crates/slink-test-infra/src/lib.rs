//! Disposable backing services for slink integration tests.

pub mod error;
pub mod redis;

pub use error::{Result, TestInfraError};
