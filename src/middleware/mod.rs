mod error_logger;
mod json_body;
mod logging;

pub use error_logger::ErrorLogger;
pub use json_body::JsonBodyMiddleware;
pub use logging::LoggingMiddleware;
