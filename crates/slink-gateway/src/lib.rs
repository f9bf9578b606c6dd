//! HTTP gateway for slink.
//!
//! Binds create requests, renders links and errors in the format the client
//! accepts, and resolves link ids to redirects. Storage is reached only
//! through the [`LinkStore`][slink_core::LinkStore] held in [`AppState`].

pub mod app;
pub mod backend;
pub mod binder;
pub mod error;
pub mod handlers;
pub mod model;
pub mod render;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
