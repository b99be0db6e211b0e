//! # Cart Inspector
//!
//! Prints or wipes the persisted cart for development.
//!
//! ## Usage
//! ```bash
//! # Print the stored cart as JSON
//! cargo run -p rxcart-store --bin cart-inspect
//!
//! # Use a specific config file
//! cargo run -p rxcart-store --bin cart-inspect -- --config ./cart.toml
//!
//! # Delete the stored cart
//! cargo run -p rxcart-store --bin cart-inspect -- --clear
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use rxcart_core::{CartLine, Money};
use rxcart_store::{init_tracing, CartConfig, CartState, SilentNotifier};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    key: &'a str,
    lines: Vec<CartLine>,
    selected_count: usize,
    selected_subtotal: Money,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut clear = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--clear" => clear = true,
            "--help" | "-h" => {
                println!("rxcart cart inspector");
                println!();
                println!("Usage: cart-inspect [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --clear          Delete the stored cart");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    init_tracing();

    let config = CartConfig::load(config_path)?;
    let state = CartState::from_config(&config, Arc::new(SilentNotifier))?;

    if clear {
        state.with_store_mut(|s| s.clear());
        println!("Cleared cart '{}'", config.storage.cart_key);
        return Ok(());
    }

    let json = state.with_store(|s| {
        serde_json::to_string_pretty(&Report {
            key: s.key(),
            lines: s.snapshot(),
            selected_count: s.selected_count(),
            selected_subtotal: s.selected_subtotal(),
        })
    })?;
    println!("{}", json);

    Ok(())
}
