#[tokio::main]
async fn main() {
    if let Err(e) = patient_api::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
