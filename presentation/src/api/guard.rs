use crate::api::identity::identity_from_headers;
use crate::application_ports::Locator;
use application_ports::access::AccessPort;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use domain_shared::authentication::Identity;
use tracing::{instrument, warn};

#[instrument(level = "debug", skip_all, fields(path = %request.uri().path()))]
pub async fn route_guard<L: Locator>(
    State(locator): State<L>,
    request: Request,
    next: Next,
) -> Response {
    let identity = identity_from_headers(request.headers());
    let access_port = locator.get_access_port();

    match authorize(access_port.as_ref(), identity.as_ref(), request.uri().path()) {
        Ok(()) => next.run(request).await,
        Err(status) => {
            warn!(status = status.as_u16(), "Request rejected by route guard");
            status.into_response()
        }
    }
}

pub fn authorize(
    access_port: &(dyn AccessPort + Send + Sync),
    identity: Option<&Identity>,
    path: &str,
) -> Result<(), StatusCode> {
    if access_port.can_access(identity, path) {
        return Ok(());
    }

    match identity.and_then(Identity::email) {
        None => Err(StatusCode::UNAUTHORIZED),
        Some(_) => Err(StatusCode::FORBIDDEN),
    }
}
