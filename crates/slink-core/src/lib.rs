//! Core types and traits for the slink URL shortener.
//!
//! This crate holds the link entity, the error taxonomy and the storage
//! contracts shared by the backends, the link service and the HTTP gateway.

pub mod error;
pub mod link;
pub mod link_id;
pub mod repository;
pub mod store;

pub use error::{ErrorKind, LinkError, StorageError};
pub use link::{Link, NewLink, TargetUrl};
pub use link_id::LinkId;
pub use repository::{Inserted, ReadRepository, Repository};
pub use store::{Created, LinkStore};
