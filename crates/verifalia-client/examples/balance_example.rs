/*
[INPUT]:  VERIFALIA_USERNAME / VERIFALIA_PASSWORD environment variables
[OUTPUT]: Current credit balance
[POS]:    Examples - credit balance query
[UPDATE]: When changing credit APIs
*/

use verifalia_client::*;

#[tokio::main]
async fn main() {
    println!("=== Verifalia Balance Example ===\n");

    let username = std::env::var("VERIFALIA_USERNAME").unwrap_or_default();
    let password = std::env::var("VERIFALIA_PASSWORD").unwrap_or_default();

    let client = match VerifaliaClient::new(AuthProvider::basic(username, password)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    match client.get_balance(None).await {
        Ok(balance) => {
            println!("✓ Credit packs: {}", balance.credit_packs);
            if let Some(free) = balance.free_credits {
                println!("✓ Free credits: {}", free);
            }
            if let Some(reset_in) = balance.free_credits_reset_in {
                println!("✓ Free credits reset in: {}", format_time_span(reset_in));
            }
        }
        Err(e) if e.is_auth_error() => println!("✗ Invalid credentials: {}", e),
        Err(e) => println!("✗ Error: {}", e),
    }
}
