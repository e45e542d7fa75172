//! REST API - Patient resource endpoints
//!
//! Every handler resolves the patient with the same lookup step and maps a
//! miss to the shared 404 contract; filters are optional query parameters
//! and invalid filter values mean "no filter".

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::error::ApiError;
use crate::store::{self, AppointmentBucket, PatientStore};

pub fn routes() -> Router {
    Router::new()
        .route("/patients", get(list_patients))
        .route("/patients/search/name", get(search_patients_by_name))
        .route("/patients/:patient_id", get(get_patient_by_id))
        .route("/patients/:patient_id/appointments", get(get_patient_appointments))
        .route("/patients/:patient_id/test-results", get(get_patient_test_results))
        .route("/patients/:patient_id/medical-history", get(get_patient_medical_history))
        .route("/patients/:patient_id/insurance", get(get_patient_insurance))
        .route("/patients/:patient_id/care-providers", get(get_patient_care_providers))
        .route("/patients/:patient_id/procedures", get(get_patient_procedures))
}

#[derive(Serialize)]
pub struct PatientListResponse {
    pub success: bool,
    pub count: usize,
    pub patients: Vec<Value>,
}

#[derive(Serialize)]
pub struct PatientResponse {
    pub success: bool,
    pub patient: Value,
}

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub success: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<&'static str>,
    pub appointments: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultsResponse {
    pub success: bool,
    pub count: usize,
    pub test_results: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryResponse {
    pub success: bool,
    pub medical_history: Value,
}

#[derive(Serialize)]
pub struct InsuranceResponse {
    pub success: bool,
    pub insurance: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareProvidersResponse {
    pub success: bool,
    pub care_providers: Value,
}

#[derive(Serialize)]
pub struct ProceduresResponse {
    pub success: bool,
    pub procedures: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSearchParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct AppointmentParams {
    #[serde(rename = "type")]
    pub appointment_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultParams {
    pub test_type: Option<String>,
}

/// The find-then-404 step shared by every per-patient endpoint.
fn find_patient<'a>(store: &'a PatientStore, patient_id: &str) -> Result<&'a Value, ApiError> {
    store
        .find_by_id(patient_id)
        .ok_or_else(|| ApiError::PatientNotFound(patient_id.to_string()))
}

/// A filter parameter counts as given only when it is non-empty.
fn filter_param(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Get all patients
async fn list_patients(
    Extension(store): Extension<Arc<PatientStore>>,
) -> Json<PatientListResponse> {
    let patients = store.all().to_vec();
    Json(PatientListResponse {
        success: true,
        count: patients.len(),
        patients,
    })
}

/// Get patient by ID
async fn get_patient_by_id(
    Path(patient_id): Path<String>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<PatientResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    Ok(Json(PatientResponse {
        success: true,
        patient: patient.clone(),
    }))
}

/// Search patients by name
async fn search_patients_by_name(
    Query(params): Query<NameSearchParams>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Json<PatientListResponse> {
    let first = filter_param(&params.first_name);
    let last = filter_param(&params.last_name);

    let patients: Vec<Value> = store
        .search_by_name(first, last)
        .into_iter()
        .cloned()
        .collect();

    Json(PatientListResponse {
        success: true,
        count: patients.len(),
        patients,
    })
}

/// Get patient appointments
async fn get_patient_appointments(
    Path(patient_id): Path<String>,
    Query(params): Query<AppointmentParams>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;

    let bucket = params
        .appointment_type
        .as_deref()
        .and_then(AppointmentBucket::parse);

    let response = match bucket {
        Some(bucket) => AppointmentsResponse {
            success: true,
            appointment_type: Some(bucket.as_str()),
            appointments: store::appointment_bucket(patient, bucket),
        },
        None => AppointmentsResponse {
            success: true,
            appointment_type: None,
            appointments: store::object_field(patient, "appointments"),
        },
    };

    Ok(Json(response))
}

/// Get patient test results
async fn get_patient_test_results(
    Path(patient_id): Path<String>,
    Query(params): Query<TestResultParams>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<TestResultsResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    let test_results = store::test_results(patient, filter_param(&params.test_type));

    Ok(Json(TestResultsResponse {
        success: true,
        count: test_results.len(),
        test_results,
    }))
}

/// Get patient medical history
async fn get_patient_medical_history(
    Path(patient_id): Path<String>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<MedicalHistoryResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    Ok(Json(MedicalHistoryResponse {
        success: true,
        medical_history: store::object_field(patient, "medicalHistory"),
    }))
}

/// Get patient insurance information
async fn get_patient_insurance(
    Path(patient_id): Path<String>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<InsuranceResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    Ok(Json(InsuranceResponse {
        success: true,
        insurance: store::object_field(patient, "insurance"),
    }))
}

/// Get patient care providers
async fn get_patient_care_providers(
    Path(patient_id): Path<String>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<CareProvidersResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    Ok(Json(CareProvidersResponse {
        success: true,
        care_providers: store::list_field(patient, "careProviders"),
    }))
}

/// Get patient procedures
async fn get_patient_procedures(
    Path(patient_id): Path<String>,
    Extension(store): Extension<Arc<PatientStore>>,
) -> Result<Json<ProceduresResponse>, ApiError> {
    let patient = find_patient(&store, &patient_id)?;
    Ok(Json(ProceduresResponse {
        success: true,
        procedures: store::list_field(patient, "procedures"),
    }))
}
