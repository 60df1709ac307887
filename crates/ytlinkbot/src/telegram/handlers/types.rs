//! Handler types and dependencies

use std::sync::Arc;

use ytlinkcore::Resolver;

use crate::telegram::pending::PendingLinks;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub resolver: Arc<Resolver>,
    pub pending: Arc<PendingLinks>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(resolver: Arc<Resolver>, pending: Arc<PendingLinks>) -> Self {
        Self { resolver, pending }
    }
}
