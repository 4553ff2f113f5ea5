//! Mints a bearer token for local editing sessions.
//!
//! Usage: issue-token <EMAIL> [ROLE] [MINUTES]

use cms_backend::auth::{create_access_token, ACCESS_TOKEN_EXPIRY_MINUTES};
use std::env;

fn main() {
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let email = args.next().unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin issue-token <EMAIL> [ROLE] [MINUTES]");
        std::process::exit(1);
    });
    let role = args.next().unwrap_or_else(|| "editor".to_string());
    let minutes = match args.next() {
        Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
            eprintln!("MINUTES must be a whole number, got '{}'", raw);
            std::process::exit(1);
        }),
        None => ACCESS_TOKEN_EXPIRY_MINUTES,
    };

    match create_access_token(&email, &email, &role, minutes) {
        Ok(token) => {
            println!("\nEmail   : {}", email);
            println!("Role    : {}", role);
            println!("Expires : {} minutes\n", minutes);
            println!("# Use as a bearer token:");
            println!("Authorization: Bearer {}", token);
        }
        Err(e) => {
            eprintln!("Error creating token: {}", e);
            std::process::exit(1);
        }
    }
}
