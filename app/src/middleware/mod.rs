//! Application middleware
//!
//! Each middleware has its own dedicated file.

mod logging;

pub use logging::LoggingMiddleware;
