//! vanity_grind - vanity keypair search orchestrator.
//!
//! Validates the pattern, runs the generator and collects its keypair files,
//! exiting with a stable code for every outcome.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match vanity_grind::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
