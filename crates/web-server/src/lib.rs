use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
};
use database::DbRepository;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod cors;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;

/// Request bodies above this size are rejected before deserialization.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: DbRepository,
}

impl AppState {
    pub fn new(repo: DbRepository) -> Arc<Self> {
        Arc::new(Self { repo })
    }
}

/// The two HTTP surfaces. Each listens on its own port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Audit,
    Reservations,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Audit => f.write_str("audit"),
            Service::Reservations => f.write_str("reservations"),
        }
    }
}

impl Service {
    pub fn router(self, state: Arc<AppState>) -> Router {
        match self {
            Service::Audit => audit_router(state),
            Service::Reservations => reservations_router(state),
        }
    }
}

/// Routes of the audit service.
pub fn audit_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/auditoria",
            get(handlers::audit::list_audit_records).options(cors::preflight),
        )
        .route("/health", get(handlers::health).options(cors::preflight))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(middleware::from_fn(cors::allow_any_origin))
        .layer(TraceLayer::new_for_http())
}

/// Routes of the reservations service.
///
/// The plain-text home route sits outside the CORS middleware; every JSON
/// route is wrapped by it and answers `OPTIONS` with the preflight.
pub fn reservations_router(state: Arc<AppState>) -> Router {
    use handlers::reservations as r;

    let api = Router::new()
        .route(
            "/reservas",
            get(r::list_reservations).options(cors::preflight),
        )
        .route(
            "/create_reserva",
            post(r::create_reservation).options(cors::preflight),
        )
        .route(
            "/update_reserva/:id",
            put(r::update_reservation).options(cors::preflight),
        )
        .route(
            "/delete_reserva/:id",
            delete(r::delete_reservation).options(cors::preflight),
        )
        .route("/health", get(handlers::health).options(cors::preflight))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(cors::allow_any_origin));

    Router::new()
        .route("/", get(r::home))
        .merge(api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves `service` until ctrl-c.
pub async fn run_server(
    service: Service,
    addr: SocketAddr,
    state: Arc<AppState>,
) -> anyhow::Result<()> {
    let app = service.router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%service, "Web server started and listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(%service, "Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
}
