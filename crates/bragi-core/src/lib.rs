pub mod api;
pub mod error;
pub mod scenario;

// Re-export common error type
pub use error::BragiError;
