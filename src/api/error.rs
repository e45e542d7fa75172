//! API error types shared by the patient handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors a patient endpoint surfaces to callers. Not-found is the only
/// failure class here: filters are lenient and the dataset is already
/// resident in memory, so nothing else can go wrong mid-request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Patient with ID {0} not found")]
    PatientNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::PatientNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_renders_detail_body() {
        let response = ApiError::PatientNotFound("P042".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["detail"], "Patient with ID P042 not found");
    }
}
