use axum::{routing::post, Router};
use std::sync::Arc;

use crate::exchange::Exchange;
use crate::relay::SubmissionGate;

use super::handlers;

/// Shared handler state: the exchange client and the process-wide submission
/// gate, both constructed at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<dyn Exchange>,
    pub gate: Arc<SubmissionGate>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/http_bnb_limit_order",
            post(handlers::place_limit_order),
        )
        .with_state(state)
}
