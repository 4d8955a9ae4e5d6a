use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Literal, case-sensitive scheme prefix expected in `Authorization`.
pub const AUTH_SCHEME_PREFIX: &str = "jwt ";

/// Returns the token after the `jwt ` prefix, or `None` if the header is
/// absent, not valid UTF-8, or uses another scheme.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(AUTH_SCHEME_PREFIX)
}

/// Request gate applied to every route.
///
/// Missing credential and invalid credential both end in 403 but with
/// distinct messages. Only a verified request reaches the handler.
pub async fn require_jwt(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    {
        let token = extract_token(req.headers()).ok_or_else(|| {
            debug!(path = %req.uri().path(), "request without jwt credential");
            AppError::CredentialMissing
        })?;

        if let Err(e) = state.verifier.verify(token) {
            warn!(path = %req.uri().path(), error = %e, "rejected jwt credential");
            return Err(AppError::CredentialInvalid);
        }
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_strips_prefix() {
        assert_eq!(extract_token(&headers_with("jwt abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_missing_header() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_token_wrong_scheme() {
        assert_eq!(extract_token(&headers_with("Bearer abc")), None);
        assert_eq!(extract_token(&headers_with("JWT abc")), None);
        assert_eq!(extract_token(&headers_with("jwtabc")), None);
    }

    #[test]
    fn test_extract_token_empty_after_prefix() {
        // Present but empty; the verifier decides it is invalid.
        assert_eq!(extract_token(&headers_with("jwt ")), Some(""));
    }
}
