//! Shared context for the API layer.

use std::sync::Arc;

use crate::engine::Engine;

/// Shared state for all API routes: one engine instance per server.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<Engine>,
}

impl ApiContext {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}
