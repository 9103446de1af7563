//! API middleware components

pub mod logging;
pub mod metrics;
pub mod security;
pub mod session;

pub use logging::logging_middleware;
pub use self::metrics::metrics_middleware;
pub use security::security_headers_middleware;
pub use session::{SessionKey, SESSION_HEADER};
