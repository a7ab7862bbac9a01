/*
[INPUT]:  VERIFALIA_APP_KEY environment variable
[OUTPUT]: The most recent validation jobs of the account
[POS]:    Examples - lazy job listing
[UPDATE]: When changing listing APIs
*/

use futures_util::StreamExt;
use verifalia_client::*;

/// Example: print the ten most recent jobs, newest first
#[tokio::main]
async fn main() {
    println!("=== Verifalia Listing Example ===\n");

    let Ok(app_key) = std::env::var("VERIFALIA_APP_KEY") else {
        eprintln!("Set VERIFALIA_APP_KEY first");
        return;
    };

    let client = match VerifaliaClient::new(AuthProvider::app_key(app_key)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let options = ListingOptions {
        direction: ListingDirection::Backward,
        ..Default::default()
    };
    let mut jobs = Box::pin(client.list_jobs(options).take(10));
    while let Some(item) = jobs.next().await {
        match item {
            Ok(overview) => println!(
                "✓ {} {} {:?} ({} entries)",
                overview.created_on, overview.id, overview.status, overview.no_of_entries
            ),
            Err(e) => println!("✗ Error: {}", e),
        }
    }

    println!("\n✓ Listing example complete");
}
