//! Uniform translation of HTTP failures into `HubError`.
//!
//! Every wrapper goes through these helpers so that non-2xx responses produce
//! the same message shape: the server's `detail` when present, otherwise
//! `"Error <status>: <reason>"`.

use guildhall_core::HubError;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Passes 2xx responses through and converts everything else to an error.
pub async fn ensure_success(response: Response) -> Result<Response, HubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_status(status, &body))
}

/// Maps a status and raw body to the matching error variant.
pub fn error_from_status(status: StatusCode, body: &str) -> HubError {
    let message = extract_detail(body).unwrap_or_else(|| fallback_message(status));

    match status {
        StatusCode::UNAUTHORIZED => HubError::Unauthenticated,
        StatusCode::FORBIDDEN => HubError::Forbidden(message),
        _ => HubError::api(status.as_u16(), message),
    }
}

/// `"Error 503: Service Unavailable"`
pub fn fallback_message(status: StatusCode) -> String {
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

/// Pulls a human-readable message out of a structured error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}, ...]}` and `{"detail": {"message": "..."}}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Object(object) => object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Converts a transport-level failure.
pub fn transport_error(err: reqwest::Error) -> HubError {
    HubError::network(err.to_string(), err.is_timeout())
}

/// Debug-only endpoints answer 403/404 when disabled; report that distinctly.
pub fn debug_endpoint_error(err: HubError, feature: &'static str) -> HubError {
    match err {
        HubError::Forbidden(_) => HubError::FeatureUnavailable { feature },
        HubError::Api { status: 404, .. } => HubError::FeatureUnavailable { feature },
        other => other,
    }
}

/// Rewrites a bare 404 into a typed `NotFound` for the given resource.
pub fn not_found_as(err: HubError, entity_type: &'static str, id: &str) -> HubError {
    match err {
        HubError::Api { status: 404, .. } => HubError::not_found(entity_type, id),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let err = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Insufficient balance"}"#,
        );
        assert_eq!(err, HubError::api(400, "Insufficient balance"));
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "name"], "msg": "field required"},
            {"loc": ["body", "price"], "msg": "must be positive"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("field required; must be positive")
        );
    }

    #[test]
    fn test_fallback_when_body_unstructured() {
        let err = error_from_status(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Error 502: Bad Gateway");
        assert!(err.is_transient());
    }

    #[test]
    fn test_fallback_when_detail_empty() {
        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail": ""}"#);
        assert_eq!(err.to_string(), "Error 500: Internal Server Error");
    }

    #[test]
    fn test_auth_statuses() {
        assert_eq!(
            error_from_status(StatusCode::UNAUTHORIZED, ""),
            HubError::Unauthenticated
        );
        assert_eq!(
            error_from_status(StatusCode::FORBIDDEN, r#"{"detail": "Admins only"}"#),
            HubError::Forbidden("Admins only".into())
        );
    }

    #[test]
    fn test_debug_endpoint_mapping() {
        let feature = "XP award";
        assert!(
            debug_endpoint_error(HubError::Forbidden("nope".into()), feature)
                .is_feature_unavailable()
        );
        assert!(
            debug_endpoint_error(HubError::api(404, "Not Found"), feature)
                .is_feature_unavailable()
        );
        assert_eq!(
            debug_endpoint_error(HubError::api(500, "boom"), feature),
            HubError::api(500, "boom")
        );
    }

    #[test]
    fn test_not_found_as() {
        let err = not_found_as(HubError::api(404, "Not Found"), "User", "ghost");
        assert_eq!(err.to_string(), "User not found: 'ghost'");
        assert_eq!(
            not_found_as(HubError::Unauthenticated, "User", "ghost"),
            HubError::Unauthenticated
        );
    }
}
