//! Lexigraph Graph Service CLI
//!
//! Starts the gRPC server that owns the relationship graph.

use lexigraph_graph::{config::GraphConfig, start_server, GraphError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), GraphError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        GraphConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: lexigraph-graph --config <path-to-config.toml>");
        eprintln!();
        GraphConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Lexigraph Graph Service - Relationship Authority");
    println!();
    println!("USAGE:");
    println!("    lexigraph-graph --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    lexigraph-graph --config config/graph.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 50052)");
    println!("    - database_path: SQLite database file for relationships");
    println!();
}
