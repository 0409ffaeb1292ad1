use crate::error::*;
use crate::initializer::AppContext;
use crate::web::handlers;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use hyper::Request;
use std::time::Instant;

/// Request bodies beyond this are rejected with 400 before they are buffered.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::pages::home).fallback(method_not_allowed))
        .route(
            "/tweets/:id",
            get(handlers::pages::tweet).fallback(method_not_allowed),
        )
        // Tweets API
        .route(
            "/api/tweets",
            post(handlers::tweets::create).fallback(method_not_allowed),
        )
        .route(
            "/api/tweets/:id",
            get(handlers::tweets::detail).fallback(method_not_allowed),
        )
        .route(
            "/api/tweets/:id/replies",
            get(handlers::tweets::replies).fallback(method_not_allowed),
        )
        // Likes API
        .route(
            "/api/likes",
            post(handlers::likes::create).fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(log_request))
        .with_state(ctx)
}

async fn route_not_found() -> ServiceError {
    ServiceError::only(GeneralError::RouteNotFound)
}

async fn method_not_allowed() -> ServiceError {
    ServiceError::only(GeneralError::MethodNotAllowed)
}

/// Access log line per request, tagged with a fresh request id.
async fn log_request<B>(req: Request<B>, next: Next<B>) -> Response {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = next.run(req).await;

    log::info!(
        "[{}] {} {} {} {}ms",
        request_id,
        method,
        path,
        resp.status().as_u16(),
        started.elapsed().as_millis()
    );
    resp
}
