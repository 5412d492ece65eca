use crate::application_ports::Locator;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

pub mod applications;
pub mod error;
pub mod guard;
pub mod identity;
pub mod session;

pub fn create_router<L: Locator + Send + Sync + Clone + 'static>(locator: L) -> Router {
    let protected = Router::new()
        .route(
            "/student/applications",
            axum::routing::post(applications::submit_handler::<L>),
        )
        .route(
            "/admin/applications",
            get(applications::list_handler::<L>),
        )
        .route(
            "/admin/applications/{tracking_code}",
            get(applications::find_handler::<L>),
        )
        .route_layer(from_fn_with_state(locator.clone(), guard::route_guard::<L>));

    let public = Router::new()
        .route("/health", get(health_handler))
        .route("/session", get(session::session_handler::<L>));

    protected
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(locator)
}

#[instrument(level = "info", skip(locator))]
pub async fn run_api<L: Locator + Send + Sync + Clone + 'static>(
    locator: L,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let router = create_router(locator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!(port, "API listening");

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}
