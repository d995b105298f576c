use axum::{Router, middleware, routing::get, routing::post};
use tower_http::request_id::PropagateRequestIdLayer;

use devenv_core::health::ping;
use devenv_core::middleware::{request_id_layer, request_timeout};
use devenv_core::tracing::trace_layer;

use crate::config::REQUEST_TIMEOUT;
use crate::domain::repository::UserRepository;
use crate::handlers::user::{
    create_user, delete_user, partial_update_user, read_user, update_user,
};
use crate::metrics::{self, Metrics, track_metrics};
use crate::state::AppState;

pub fn build_router<R>(state: AppState<R>, metrics: Metrics) -> Router
where
    R: UserRepository + Clone + 'static,
{
    let users = Router::new()
        .route("/users", post(create_user::<R>))
        .route(
            "/users/{id}",
            get(read_user::<R>)
                .put(update_user::<R>)
                .patch(partial_update_user::<R>)
                .delete(delete_user::<R>),
        )
        .layer(middleware::from_fn_with_state(REQUEST_TIMEOUT, request_timeout))
        .with_state(state);

    let metrics_path = metrics.path().to_owned();
    Router::new()
        // Health
        .route("/ping", get(ping))
        // Metrics
        .route(&metrics_path, get(metrics::render))
        .with_state(metrics.clone())
        // Users
        .merge(users)
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
        .layer(trace_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(request_id_layer())
}
