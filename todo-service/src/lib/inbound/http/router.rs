use std::sync::Arc;
use std::time::Duration;

use auth::CredentialIssuer;
use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::delete_me;
use super::handlers::account::get_me;
use super::handlers::account::update_me;
use super::handlers::auth::login;
use super::handlers::auth::logout;
use super::handlers::auth::refresh;
use super::handlers::auth::register;
use super::handlers::root::root;
use super::handlers::todos::create_todo;
use super::handlers::todos::delete_todo;
use super::handlers::todos::get_todo;
use super::handlers::todos::list_todos;
use super::handlers::todos::update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::todo::ports::TodoServicePort;

/// Shared state for every handler.
///
/// Services sit behind their ports so the same router runs on either storage
/// backend.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub issuer: Arc<CredentialIssuer>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    issuer: Arc<CredentialIssuer>,
    cors_origins: &[String],
) -> Router {
    let state = AppState {
        account_service,
        todo_service,
        issuer,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/api/todos", post(create_todo).get(list_todos))
        .route(
            "/api/todos/:todo_id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Allow-list CORS for the configured origins, permissive when none are set.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
