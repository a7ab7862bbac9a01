/*
[INPUT]:  VERIFALIA_USERNAME / VERIFALIA_PASSWORD environment variables
[OUTPUT]: Validation results for a couple of addresses
[POS]:    Examples - submit and wait for a validation job
[UPDATE]: When changing submission or waiting APIs
*/

use std::sync::Arc;
use std::time::Duration;

use verifalia_client::*;

/// Example: validate a few addresses and wait for the results
#[tokio::main]
async fn main() {
    println!("=== Verifalia Validation Example ===\n");

    let (Ok(username), Ok(password)) = (
        std::env::var("VERIFALIA_USERNAME"),
        std::env::var("VERIFALIA_PASSWORD"),
    ) else {
        eprintln!("Set VERIFALIA_USERNAME and VERIFALIA_PASSWORD first");
        return;
    };

    let client = match VerifaliaClient::new(AuthProvider::basic(username, password)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created\n");

    let entries = [
        ValidationRequestEntry::with_custom("batman@gmail.com", "hero"),
        ValidationRequestEntry::new("samantha42@yahoo.de"),
    ];
    let options = SubmissionOptions {
        name: Some("rust example".to_string()),
        quality: Some(Quality::High),
        ..Default::default()
    };
    let waiting = WaitingOptions {
        wait_strategy: Arc::new(FixedInterval(Duration::from_secs(2))),
        ..Default::default()
    };

    println!("Submitting {} entries...", entries.len());
    match client.run_entries(&entries, &options, &waiting).await {
        Ok(job) => {
            println!("✓ Job {} finished with status {:?}", job.id(), job.status());
            for entry in &job.entries {
                println!(
                    "  {} => {:?} ({:?})",
                    entry.input_data, entry.classification, entry.status
                );
            }
        }
        Err(e) => println!("✗ Error: {}", e),
    }
}
