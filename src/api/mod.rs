//! API Layer - REST endpoints, documentation, and middleware
//!
//! Provides HTTP access to the patient dataset

pub mod docs_api;
pub mod error;
pub mod middleware;
pub mod rest;

use std::sync::Arc;
use axum::{Router, routing::get, Extension, Json};
use serde_json::{json, Value};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use crate::store::PatientStore;

/// Create the main API router
pub fn router(store: Arc<PatientStore>) -> Router {
    Router::new()
        // API information and health check (Public)
        .route("/", get(root))
        .route("/health", get(health_check))

        // REST API
        .nest("/api", rest::routes())

        // Documentation
        .route("/api/docs/openapi.json", get(docs_api::openapi_json))
        .route("/api/docs", get(docs_api::swagger_ui))

        // Request ID tracking (for debugging and audit)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))

        // Global Extensions
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
}

/// Root endpoint with API information
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Patient Data API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "all_patients": "/api/patients",
            "patient_by_id": "/api/patients/{patientId}",
            "search_patients": "/api/patients/search/name",
            "appointments": "/api/patients/{patientId}/appointments",
            "test_results": "/api/patients/{patientId}/test-results",
            "medical_history": "/api/patients/{patientId}/medical-history",
            "insurance": "/api/patients/{patientId}/insurance",
            "care_providers": "/api/patients/{patientId}/care-providers",
            "procedures": "/api/patients/{patientId}/procedures"
        }
    }))
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Patient API is running"
    }))
}
