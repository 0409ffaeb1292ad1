use crate::error::{INTERNAL_ERROR_MESSAGE, INTERNAL_ERROR_TYPE};
use axum::response::{IntoResponse, Response};
use http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, LOCATION};
use serde::Serialize;

pub fn json<T: Serialize>(status: http::StatusCode, body: &T) -> Response {
    let (status, body) = match serde_json::to_string(body) {
        Ok(body) => (status, body),
        Err(err) => {
            log::error!("failed to serialize response body: {}", err);
            (
                http::StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "errorType": INTERNAL_ERROR_TYPE,
                    "error": INTERNAL_ERROR_MESSAGE,
                })
                .to_string(),
            )
        }
    };

    (
        status,
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        ],
        body,
    )
        .into_response()
}

/// 307 to `location`. Falls back to `/` when `location` is not a valid header value.
pub fn redirect(location: &str) -> Response {
    let value =
        HeaderValue::from_str(location).unwrap_or_else(|_| HeaderValue::from_static("/"));
    (http::StatusCode::TEMPORARY_REDIRECT, [(LOCATION, value)]).into_response()
}
