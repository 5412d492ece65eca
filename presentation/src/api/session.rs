use crate::api::identity::identity_from_headers;
use crate::application_ports::Locator;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use domain_shared::authentication::Role;
use serde::Serialize;

#[derive(Serialize)]
pub struct SessionResponse {
    pub role: Option<Role>,
}

pub async fn session_handler<L: Locator>(
    State(locator): State<L>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let identity = identity_from_headers(&headers);
    let role = locator.get_access_port().role_of(identity.as_ref());

    Json(SessionResponse { role })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_exposes_only_the_role() {
        let body = serde_json::to_value(SessionResponse {
            role: Some(Role::Student),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "role": "student" }));

        let anonymous = serde_json::to_value(SessionResponse { role: None }).unwrap();
        assert_eq!(anonymous, serde_json::json!({ "role": null }));
    }
}
