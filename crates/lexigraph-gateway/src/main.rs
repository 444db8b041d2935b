//! Lexigraph Gateway CLI
//!
//! Starts the composing gRPC server that fronts the glossary and graph
//! authorities.

use lexigraph_gateway::{config::GatewayConfig, start_server};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        let config_path = &args[2];
        GatewayConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: lexigraph-gateway --config <path-to-config.toml>");
        eprintln!();
        GatewayConfig::default_test_config()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Lexigraph Gateway - Composing Front Door");
    println!();
    println!("USAGE:");
    println!("    lexigraph-gateway --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    lexigraph-gateway --config config/gateway.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 50050)");
    println!("    - glossary_endpoint: Glossary authority URL (e.g., 'http://localhost:50051')");
    println!("    - graph_endpoint: Graph authority URL (e.g., 'http://localhost:50052')");
    println!("    - fan_out: Concurrent neighbor lookups per request (optional, default 8)");
    println!("    - seed_on_startup: Install the demo glossary on boot (optional, default false)");
    println!();
}
