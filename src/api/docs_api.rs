use axum::{
    response::{Html, IntoResponse},
    Json,
};
use serde_json::Value;
use crate::docs::{
    DocGenerator, ApiInfo, EndpointDoc, ParameterDoc, ParameterLocation,
    ResponseDoc,
};

fn patient_id_param() -> ParameterDoc {
    ParameterDoc {
        name: "patient_id".to_string(),
        location: ParameterLocation::Path,
        description: "Patient identifier".to_string(),
        required: true,
        param_type: "string".to_string(),
    }
}

fn ok_response(description: &str) -> ResponseDoc {
    ResponseDoc {
        status_code: 200,
        description: description.to_string(),
    }
}

fn not_found_response() -> ResponseDoc {
    ResponseDoc {
        status_code: 404,
        description: "Patient not found".to_string(),
    }
}

fn build_docs() -> DocGenerator {
    let mut gen = DocGenerator::new(ApiInfo {
        title: "Patient Data API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "REST API for patient data to be used with AI agents".to_string(),
    });

    // --- Add Endpoints ---

    // 1. API Root
    gen.add_endpoint(EndpointDoc {
        path: "/".to_string(),
        method: "GET".to_string(),
        summary: "API Information".to_string(),
        description: "Returns the API name, version and a map of available endpoints.".to_string(),
        parameters: vec![],
        responses: vec![ok_response("API information")],
        tags: vec!["System".to_string()],
        deprecated: false,
    });

    // 2. Health Check
    gen.add_endpoint(EndpointDoc {
        path: "/health".to_string(),
        method: "GET".to_string(),
        summary: "Health Check".to_string(),
        description: "Returns 200 OK if the server is running accessible.".to_string(),
        parameters: vec![],
        responses: vec![ok_response("Server is healthy")],
        tags: vec!["System".to_string()],
        deprecated: false,
    });

    // 3. List Patients
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients".to_string(),
        method: "GET".to_string(),
        summary: "Get All Patients".to_string(),
        description: "Returns every patient record in the dataset.".to_string(),
        parameters: vec![],
        responses: vec![ok_response("Patient list with count")],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 4. Name Search
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/search/name".to_string(),
        method: "GET".to_string(),
        summary: "Search Patients By Name".to_string(),
        description: "Case-insensitive substring search over first and last name. Both filters are optional and combine as AND.".to_string(),
        parameters: vec![
            ParameterDoc { name: "firstName".to_string(), location: ParameterLocation::Query, description: "First name fragment".to_string(), required: false, param_type: "string".to_string() },
            ParameterDoc { name: "lastName".to_string(), location: ParameterLocation::Query, description: "Last name fragment".to_string(), required: false, param_type: "string".to_string() },
        ],
        responses: vec![ok_response("Matching patients with count")],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 5. Patient By ID
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient By ID".to_string(),
        description: "Returns the complete record for one patient.".to_string(),
        parameters: vec![patient_id_param()],
        responses: vec![ok_response("The patient record"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 6. Appointments
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/appointments".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Appointments".to_string(),
        description: "Returns the appointment groups for a patient, or a single group when a valid type is given. Unknown types are ignored.".to_string(),
        parameters: vec![
            patient_id_param(),
            ParameterDoc { name: "type".to_string(), location: ParameterLocation::Query, description: "Appointment group: upcoming, recent or past".to_string(), required: false, param_type: "string".to_string() },
        ],
        responses: vec![ok_response("Appointments"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 7. Test Results
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/test-results".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Test Results".to_string(),
        description: "Returns a patient's test results, optionally filtered by exact test type.".to_string(),
        parameters: vec![
            patient_id_param(),
            ParameterDoc { name: "testType".to_string(), location: ParameterLocation::Query, description: "Exact test type to match".to_string(), required: false, param_type: "string".to_string() },
        ],
        responses: vec![ok_response("Test results with count"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 8. Medical History
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/medical-history".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Medical History".to_string(),
        description: "Returns the medical history section of a patient record.".to_string(),
        parameters: vec![patient_id_param()],
        responses: vec![ok_response("Medical history"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 9. Insurance
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/insurance".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Insurance".to_string(),
        description: "Returns the insurance section of a patient record.".to_string(),
        parameters: vec![patient_id_param()],
        responses: vec![ok_response("Insurance information"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 10. Care Providers
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/care-providers".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Care Providers".to_string(),
        description: "Returns the care providers attached to a patient record.".to_string(),
        parameters: vec![patient_id_param()],
        responses: vec![ok_response("Care providers"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    // 11. Procedures
    gen.add_endpoint(EndpointDoc {
        path: "/api/patients/{patient_id}/procedures".to_string(),
        method: "GET".to_string(),
        summary: "Get Patient Procedures".to_string(),
        description: "Returns the procedures recorded for a patient.".to_string(),
        parameters: vec![patient_id_param()],
        responses: vec![ok_response("Procedures"), not_found_response()],
        tags: vec!["Patients".to_string()],
        deprecated: false,
    });

    gen
}

/// Serves the OpenAPI 3.0 JSON spec
pub async fn openapi_json() -> Json<Value> {
    Json(build_docs().to_openapi())
}

/// Markdown rendering of the endpoint reference, for the CLI.
pub fn markdown_reference() -> String {
    build_docs().to_markdown()
}

/// Serves the Swagger UI HTML
pub async fn swagger_ui() -> impl IntoResponse {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>Patient Data API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/5.11.0/swagger-ui.css" />
    <style>
      html
      {
        box-sizing: border-box;
        overflow: -moz-scrollbars-vertical;
        overflow-y: scroll;
      }

      *,
      *:before,
      *:after
      {
        box-sizing: inherit;
      }

      body
      {
        margin:0;
        background: #fafafa;
      }
    </style>
  </head>

  <body>
    <div id="swagger-ui"></div>

    <script src="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/5.11.0/swagger-ui-bundle.js" charset="UTF-8"> </script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/5.11.0/swagger-ui-standalone-preset.js" charset="UTF-8"> </script>
    <script>
    window.onload = function() {
      // Begin Swagger UI call region
      const ui = SwaggerUIBundle({
        url: "/api/docs/openapi.json",
        dom_id: '#swagger-ui',
        deepLinking: true,
        presets: [
          SwaggerUIBundle.presets.apis,
          SwaggerUIStandalonePreset
        ],
        plugins: [
          SwaggerUIBundle.plugins.DownloadUrl
        ],
        layout: "StandaloneLayout"
      });
      // End Swagger UI call region

      window.ui = ui;
    };
  </script>
  </body>
</html>
"#)
}
