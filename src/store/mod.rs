//! Store Module - In-memory patient dataset and query operations
//!
//! The dataset is loaded once at process start and shared read-only across
//! requests. Records are kept as the raw JSON objects they were parsed from,
//! so serving a patient returns exactly what was loaded.

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{error, info};

/// One of the three appointment categories a patient record carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppointmentBucket {
    Upcoming,
    Recent,
    Past,
}

impl AppointmentBucket {
    /// Parse a query-string value. Unrecognized values yield `None` and are
    /// treated as "no filter" by callers, never rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upcoming" => Some(Self::Upcoming),
            "recent" => Some(Self::Recent),
            "past" => Some(Self::Past),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Recent => "recent",
            Self::Past => "past",
        }
    }
}

/// The in-memory patient dataset.
///
/// Populated once from the data file and never mutated, so concurrent reads
/// need no coordination.
pub struct PatientStore {
    patients: Vec<Value>,
}

impl PatientStore {
    /// An empty store, used as the fallback when the data file is missing or
    /// malformed.
    pub fn empty() -> Self {
        Self { patients: Vec::new() }
    }

    /// Build a store from an already-parsed document. The document's
    /// `patients` array becomes the store contents; a document without one
    /// yields an empty store.
    pub fn from_document(document: Value) -> Self {
        let patients = match document.get("patients").and_then(Value::as_array) {
            Some(list) => list.clone(),
            None => Vec::new(),
        };
        Self { patients }
    }

    /// Read and parse the data file. Any failure degrades to an empty store
    /// with a diagnostic, so startup always succeeds.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Could not read {}: {}", path.display(), e);
                return Self::empty();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(document) => {
                let store = Self::from_document(document);
                info!("Loaded {} patient records from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                error!("Invalid JSON in {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// All records in load order.
    pub fn all(&self) -> &[Value] {
        &self.patients
    }

    /// Linear scan for the first record whose `patientId` equals `id`
    /// exactly (case-sensitive). IDs are expected unique but not enforced;
    /// the first match wins.
    pub fn find_by_id(&self, id: &str) -> Option<&Value> {
        self.patients.iter().find(|p| patient_id(p) == Some(id))
    }

    /// Case-insensitive substring search over `personalInformation`
    /// first/last names. Both filters must match when both are given; an
    /// absent filter passes every record. A record missing a name field is
    /// matched as if the field were empty.
    pub fn search_by_name(&self, first_name: Option<&str>, last_name: Option<&str>) -> Vec<&Value> {
        let first = first_name.map(str::to_lowercase);
        let last = last_name.map(str::to_lowercase);

        self.patients
            .iter()
            .filter(|p| name_contains(p, "firstName", first.as_deref()))
            .filter(|p| name_contains(p, "lastName", last.as_deref()))
            .collect()
    }

    /// Summary counts for the `check` subcommand.
    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            patients: self.patients.len(),
            ..DatasetStats::default()
        };

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for patient in &self.patients {
            match patient_id(patient) {
                Some(id) => {
                    if !seen.insert(id) && reported.insert(id) {
                        stats.duplicate_ids.push(id.to_string());
                    }
                }
                None => stats.missing_ids += 1,
            }

            stats.test_results += patient
                .get("testResults")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
        }

        stats
    }
}

/// Dataset statistics reported by the `check` subcommand. Duplicate IDs are
/// surfaced here for operators but never rejected at load time.
#[derive(Clone, Debug, Default)]
pub struct DatasetStats {
    pub patients: usize,
    pub test_results: usize,
    pub missing_ids: usize,
    pub duplicate_ids: Vec<String>,
}

/// The record's `patientId`, when present and a string.
pub fn patient_id(patient: &Value) -> Option<&str> {
    patient.get("patientId").and_then(Value::as_str)
}

fn name_contains(patient: &Value, field: &str, needle: Option<&str>) -> bool {
    let Some(needle) = needle else { return true };
    patient
        .get("personalInformation")
        .and_then(|info| info.get(field))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase()
        .contains(needle)
}

/// An object-valued field of the record, or `{}` when absent.
pub fn object_field(patient: &Value, key: &str) -> Value {
    match patient.get(key) {
        Some(value) => value.clone(),
        None => Value::Object(Map::new()),
    }
}

/// A list-valued field of the record, or `[]` when absent.
pub fn list_field(patient: &Value, key: &str) -> Value {
    match patient.get(key) {
        Some(value) => value.clone(),
        None => Value::Array(Vec::new()),
    }
}

/// One appointment bucket of the record, or `[]` when the bucket (or the
/// whole `appointments` mapping) is absent.
pub fn appointment_bucket(patient: &Value, bucket: AppointmentBucket) -> Value {
    patient
        .get("appointments")
        .and_then(|appointments| appointments.get(bucket.as_str()))
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

/// The record's test result entries, optionally narrowed to an exact
/// (case-sensitive) `testType` match.
pub fn test_results(patient: &Value, test_type: Option<&str>) -> Vec<Value> {
    let Some(results) = patient.get("testResults").and_then(Value::as_array) else {
        return Vec::new();
    };

    match test_type {
        Some(wanted) => results
            .iter()
            .filter(|entry| entry.get("testType").and_then(Value::as_str) == Some(wanted))
            .cloned()
            .collect(),
        None => results.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_store() -> PatientStore {
        PatientStore::from_document(json!({
            "patients": [
                {
                    "patientId": "P001",
                    "personalInformation": { "firstName": "Anna", "lastName": "Lee" },
                    "appointments": {
                        "upcoming": [{ "appointmentId": "A1" }],
                        "recent": [],
                        "past": [{ "appointmentId": "A0" }]
                    },
                    "testResults": [
                        { "testType": "Laboratory", "name": "CBC" },
                        { "testType": "Radiology", "name": "Chest X-Ray" }
                    ]
                },
                {
                    "patientId": "P002",
                    "personalInformation": { "firstName": "Diana", "lastName": "Reyes" }
                },
                {
                    "patientId": "P003",
                    "personalInformation": { "firstName": "Bob", "lastName": "Anderson" }
                }
            ]
        }))
    }

    #[test]
    fn test_find_by_id_returns_record() {
        let store = sample_store();
        let patient = store.find_by_id("P002").unwrap();
        assert_eq!(patient_id(patient), Some("P002"));
    }

    #[test]
    fn test_find_by_id_is_case_sensitive() {
        let store = sample_store();
        assert!(store.find_by_id("p001").is_none());
        assert!(store.find_by_id("P999").is_none());
    }

    #[test]
    fn test_find_by_id_first_match_wins() {
        let store = PatientStore::from_document(json!({
            "patients": [
                { "patientId": "DUP", "marker": 1 },
                { "patientId": "DUP", "marker": 2 }
            ]
        }));
        let patient = store.find_by_id("DUP").unwrap();
        assert_eq!(patient.get("marker"), Some(&json!(1)));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = sample_store();
        // "an" appears in Anna and Diana.
        let hits = store.search_by_name(Some("an"), None);
        assert_eq!(hits.len(), 2);
        assert_eq!(patient_id(hits[0]), Some("P001"));
        assert_eq!(patient_id(hits[1]), Some("P002"));
    }

    #[test]
    fn test_search_combines_filters_with_and() {
        let store = sample_store();
        let hits = store.search_by_name(Some("an"), Some("lee"));
        assert_eq!(hits.len(), 1);
        assert_eq!(patient_id(hits[0]), Some("P001"));
    }

    #[test]
    fn test_search_without_filters_returns_everything() {
        let store = sample_store();
        assert_eq!(store.search_by_name(None, None).len(), store.len());
    }

    #[test]
    fn test_search_treats_missing_name_as_empty() {
        let store = PatientStore::from_document(json!({
            "patients": [{ "patientId": "P010" }]
        }));
        assert!(store.search_by_name(Some("an"), None).is_empty());
        // No filter still matches the nameless record.
        assert_eq!(store.search_by_name(None, None).len(), 1);
    }

    #[test]
    fn test_bucket_parse_rejects_unknown_values() {
        assert_eq!(AppointmentBucket::parse("upcoming"), Some(AppointmentBucket::Upcoming));
        assert_eq!(AppointmentBucket::parse("recent"), Some(AppointmentBucket::Recent));
        assert_eq!(AppointmentBucket::parse("past"), Some(AppointmentBucket::Past));
        assert_eq!(AppointmentBucket::parse("bogus"), None);
        assert_eq!(AppointmentBucket::parse("Upcoming"), None);
        assert_eq!(AppointmentBucket::parse(""), None);
    }

    #[test]
    fn test_appointment_bucket_defaults_to_empty_list() {
        let store = sample_store();
        let patient = store.find_by_id("P001").unwrap();
        let upcoming = appointment_bucket(patient, AppointmentBucket::Upcoming);
        assert_eq!(upcoming.as_array().unwrap().len(), 1);

        // P002 has no appointments mapping at all.
        let patient = store.find_by_id("P002").unwrap();
        let past = appointment_bucket(patient, AppointmentBucket::Past);
        assert_eq!(past, json!([]));
    }

    #[test]
    fn test_test_results_filter_is_exact() {
        let store = sample_store();
        let patient = store.find_by_id("P001").unwrap();

        assert_eq!(test_results(patient, None).len(), 2);

        let labs = test_results(patient, Some("Laboratory"));
        assert_eq!(labs.len(), 1);
        assert_eq!(labs[0].get("name"), Some(&json!("CBC")));

        // Case-sensitive: no match for lowercase.
        assert!(test_results(patient, Some("laboratory")).is_empty());
    }

    #[test]
    fn test_test_results_absent_field_yields_empty() {
        let store = sample_store();
        let patient = store.find_by_id("P002").unwrap();
        assert!(test_results(patient, None).is_empty());
        assert!(test_results(patient, Some("Laboratory")).is_empty());
    }

    #[test]
    fn test_field_defaults() {
        let patient = json!({ "patientId": "P050" });
        assert_eq!(object_field(&patient, "medicalHistory"), json!({}));
        assert_eq!(object_field(&patient, "insurance"), json!({}));
        assert_eq!(list_field(&patient, "careProviders"), json!([]));
        assert_eq!(list_field(&patient, "procedures"), json!([]));
    }

    #[test]
    fn test_field_passthrough_when_present() {
        let patient = json!({
            "patientId": "P051",
            "insurance": { "provider": "Acme Health" },
            "procedures": [{ "name": "Appendectomy" }]
        });
        assert_eq!(object_field(&patient, "insurance"), json!({ "provider": "Acme Health" }));
        assert_eq!(list_field(&patient, "procedures"), json!([{ "name": "Appendectomy" }]));
    }

    #[test]
    fn test_document_without_patients_is_empty() {
        let store = PatientStore::from_document(json!({ "hospital": "General" }));
        assert!(store.is_empty());

        let store = PatientStore::from_document(json!({ "patients": "not-a-list" }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatientStore::load(&dir.path().join("no_such_file.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let store = PatientStore::load(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        std::fs::write(
            &path,
            r#"{ "patients": [{ "patientId": "P001" }, { "patientId": "P002" }] }"#,
        )
        .unwrap();
        let store = PatientStore::load(&path);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_stats_reports_duplicates_and_missing_ids() {
        let store = PatientStore::from_document(json!({
            "patients": [
                { "patientId": "P001", "testResults": [{ "testType": "Laboratory" }] },
                { "patientId": "P001" },
                { "patientId": "P001" },
                { "name": "no id" }
            ]
        }));
        let stats = store.stats();
        assert_eq!(stats.patients, 4);
        assert_eq!(stats.test_results, 1);
        assert_eq!(stats.missing_ids, 1);
        assert_eq!(stats.duplicate_ids, vec!["P001".to_string()]);
    }
}
