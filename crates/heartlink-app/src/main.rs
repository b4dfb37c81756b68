#![warn(missing_docs)]
//! # heartlink-app binary
//!
//! Command-line entry point for crafting and inspecting share links.

use heartlink_app::{app_version, evasion_enabled_from_env, share_link};
use heartlink_core::{CardPayload, decode_token, encode_token};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            println!("heartlink-app {}", app_version());
            println!(
                "evasion_enabled={} (HEARTLINK_EVASION_ENABLED)",
                evasion_enabled_from_env()
            );
            print_usage();
        }
        [command, image_url, sender] if command == "encode" => {
            let payload = CardPayload::new(image_url.trim(), sender.trim());
            match encode_token(&payload) {
                Ok(token) => {
                    let origin = std::env::var("HEARTLINK_ORIGIN")
                        .unwrap_or_else(|_| "https://heartlink.example".to_string());
                    println!("token={token}");
                    println!("link={}", share_link(&origin, "/", &token));
                }
                Err(error) => {
                    eprintln!("failed to encode payload: {error}");
                    std::process::exit(1);
                }
            }
        }
        [command, token] if command == "decode" => {
            let payload = decode_token(token);
            println!("valid={}", payload.is_valid());
            println!("image_url={}", payload.image_url);
            println!("sender_name={}", payload.sender_name);
        }
        _ => {
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("usage:");
    println!("  heartlink-app encode <image-url> <sender-name>");
    println!("  heartlink-app decode <token>");
}
