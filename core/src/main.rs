use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use vast_client::{ClientConfig, Headers, VastClient};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let endpoint = env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let client = VastClient::from_config(&config);
    match client.get(&endpoint, &Headers::new()) {
        Ok(body) => {
            println!("GET Response: {body}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
