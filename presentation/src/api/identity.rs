use axum::http::HeaderMap;
use domain_shared::authentication::Identity;

/// Set by the authentication gateway in front of this service.
pub const AUTHENTICATED_EMAIL_HEADER: &str = "x-authenticated-email";

/// Reads the identity from the gateway header. A header that is present but
/// blank or not valid UTF-8 still yields an identity, just one without an
/// email, which the role rules treat as unauthorized.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    let value = headers.get(AUTHENTICATED_EMAIL_HEADER)?;
    let email = value
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string);

    Some(Identity { email })
}
