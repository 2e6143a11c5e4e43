/*
GEMINI_API_KEY=... cargo run --release -- \
    --model gemini-2.5-flash \
    --max-attempts 3 \
    --on-check-error reprompt
*/

use std::{env, io};

use anyhow::Result;
use clap::Parser;

use city_query::config::{Cli, API_KEY_VAR};
use city_query::{logging, run_app};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.no_log {
        logging::init(&cli.log_dir, cli.log_level)?;
    }
    log::info!("Program started");

    let stdin = io::stdin();
    run_app(
        &cli,
        env::var(API_KEY_VAR).ok(),
        stdin.lock(),
        io::stdout(),
        io::stderr(),
    )
    .await
}
