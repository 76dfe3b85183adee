//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::engine::Engine;

/// Build the API router over one engine instance.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(engine: Arc<Engine>) -> Router {
    let ctx = ApiContext::new(engine);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/facilities",
            get(endpoints::facilities::list).post(endpoints::facilities::create),
        )
        .route(
            "/facilities/:id",
            get(endpoints::facilities::detail)
                .put(endpoints::facilities::update)
                .delete(endpoints::facilities::remove),
        )
        .route(
            "/facilities/:id/utilization",
            get(endpoints::facilities::utilization),
        )
        .route(
            "/facilities/:id/tickets",
            get(endpoints::tickets::for_facility),
        )
        .route(
            "/tickets",
            get(endpoints::tickets::list).post(endpoints::tickets::create),
        )
        .route("/tickets/:id", get(endpoints::tickets::detail))
        .route("/tickets/:id/status", post(endpoints::tickets::update_status))
        .route("/tickets/:id/reassign", post(endpoints::tickets::reassign))
        .route("/triage/sessions", post(endpoints::triage::start))
        .route("/triage/sessions/:id/input", post(endpoints::triage::add_input))
        .route("/triage/sessions/:id/answer", post(endpoints::triage::answer))
        .route("/triage/sessions/:id/report", get(endpoints::triage::report))
        .route("/triage/sessions/:id", delete(endpoints::triage::end))
        .with_state(ctx);

    Router::new().nest("/api", routes)
}
