// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{analytics, attempts, auth, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quiz, attempts, analytics).
/// * Applies global middleware (Trace, CORS, body limit).
/// * Injects global state (stores, completion client, config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let require_auth = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let quiz_routes = Router::new()
        .route("/bank", get(quiz::list_bank))
        // Protected quiz routes
        .merge(
            Router::new()
                .route("/submit", post(quiz::submit_quiz))
                .route("/generate", post(quiz::generate_quiz))
                .layer(require_auth.clone()),
        );

    let attempt_routes = Router::new()
        .route(
            "/",
            get(attempts::list_attempts).post(attempts::create_attempt),
        )
        .layer(require_auth.clone());

    let analytics_routes = Router::new()
        .route("/", get(analytics::get_analytics))
        .layer(require_auth);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/attempts", attempt_routes)
        .nest("/api/analytics", analytics_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(state.config.max_syllabus_bytes)),
        )
        .with_state(state)
}
