//! Response envelope shared by the demo routes and the extractor rejections

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON envelope around every demo response.
///
/// `{"success": true, "data": {...}}` for a payload and
/// `{"success": false, "data": null, "error": "..."}` for a failure. The
/// envelope answers `200 OK` on its own; pair it with a `StatusCode` to send
/// anything else.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_null_data_and_message() {
        let body = serde_json::to_value(ApiResponse::failure("boom")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "data": null, "error": "boom"}));
    }

    #[test]
    fn ok_omits_error() {
        let body = serde_json::to_value(ApiResponse::ok(3)).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": 3}));
    }
}
