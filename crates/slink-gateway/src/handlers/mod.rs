mod health;
mod link;
mod root;

pub use health::health_handler;
pub use link::{create_link_handler, redirect_handler};
pub use root::{fallback_handler, reject_root_handler};
