//! Infrastructure layer - Stores, exporters and runtime plumbing

pub mod export;
pub mod logging;
pub mod observability;
pub mod session;
