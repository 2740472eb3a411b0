pub mod error;
pub mod error_log;
pub mod logger;
pub mod validation;
