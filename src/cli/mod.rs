//! CLI Module - Operator commands that run without the server
//!
//! Everything here talks to stdout; the server process itself logs through
//! tracing instead.

use std::path::Path;

use crate::api::docs_api;
use crate::store::PatientStore;

/// Load a dataset and report what the server would see at startup.
pub async fn run_check(data_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking dataset at {}...", data_path.display());

    let store = PatientStore::load(data_path);
    let stats = store.stats();

    println!("Patients:     {}", stats.patients);
    println!("Test results: {}", stats.test_results);

    if stats.missing_ids > 0 {
        println!("WARNING: {} record(s) have no patientId and cannot be fetched by ID.", stats.missing_ids);
    }
    for id in &stats.duplicate_ids {
        println!("WARNING: duplicate patientId '{}'; only the first record is reachable.", id);
    }

    if store.is_empty() {
        println!("WARNING: Dataset is empty. The server would start and serve empty results.");
    } else if stats.missing_ids == 0 && stats.duplicate_ids.is_empty() {
        println!("SUCCESS: Dataset looks good.");
    }
    Ok(())
}

pub async fn run_init(output: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("Initializing configuration file at {}...", output);
    let default_config = r#"# Patient API Configuration
[server]
host = "0.0.0.0"
port = 8000

[data]
path = "dummy_patient_data.json"

[logging]
level = "info"
"#;
    use std::fs::File;
    use std::io::Write;
    let mut file = File::create(&output)?;
    file.write_all(default_config.as_bytes())?;
    println!("Configuration file created successfully.");
    Ok(())
}

pub async fn run_status(host: String) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = if host.starts_with("http") { host.clone() } else { format!("http://{}", host) };
    println!("Checking status of {}...", base_url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()?;

    match client.get(format!("{}/health", base_url)).send().await {
        Ok(res) => {
            if res.status().is_success() {
                println!("SUCCESS: Server is UP and responding.");
                println!("Status: {}", res.status());
                if let Ok(body) = res.json::<serde_json::Value>().await {
                    if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
                        println!("Message: {}", message);
                    }
                }
            } else {
                println!("WARNING: Server responded with error status: {}", res.status());
            }
        }
        Err(e) => {
            println!("ERROR: Could not connect to server: {}", e);
            println!("Is the server running?");
        }
    }
    Ok(())
}

/// Print the endpoint reference as Markdown.
pub async fn run_docs() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", docs_api::markdown_reference());
    Ok(())
}
