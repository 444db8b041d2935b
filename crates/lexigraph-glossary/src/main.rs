//! Lexigraph Glossary Service CLI
//!
//! Starts the gRPC server that owns the glossary of terms.

use lexigraph_glossary::{config::GlossaryConfig, start_server, GlossaryError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), GlossaryError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        GlossaryConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: lexigraph-glossary --config <path-to-config.toml>");
        eprintln!();
        GlossaryConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Lexigraph Glossary Service - Term Authority");
    println!();
    println!("USAGE:");
    println!("    lexigraph-glossary --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    lexigraph-glossary --config config/glossary.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 50051)");
    println!("    - database_path: SQLite database file for terms");
    println!();
}
