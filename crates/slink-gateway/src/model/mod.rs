mod error;
mod health;
mod link;

pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use link::LinkResponse;
