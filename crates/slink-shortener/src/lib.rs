//! Link service: the [`LinkStore`][slink_core::LinkStore] implementation
//! that combines a storage backend with an id generator.

pub mod service;

pub use service::{AllocationPolicy, LinkService};
