//! Application Services
//!
//! Use case orchestration over the repository ports.

mod beer;

pub use beer::*;

/// Service context for request handling
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }

    /// Context for work that did not originate from a request
    pub fn internal() -> Self {
        Self::new(format!("internal-{}", uuid::Uuid::new_v4()))
    }
}
