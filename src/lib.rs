//! Interactive Gemini client: confirm a city exists, then ask the model about
//! its weather, local time or population.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod logging;
pub mod prompt;
pub mod transport;
pub mod validator;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::client::GeminiClient;
use crate::config::{Cli, Config, MISSING_KEY_HINT};
use crate::controller::{Outcome, Session};
use crate::error::ConfigError;

/// Resolve configuration and drive one session over the given console streams.
///
/// A missing credential is reported on `err` and returns `Ok` before any
/// request is made.
pub async fn run_app<R, W, E>(
    cli: &Cli,
    env_key: Option<String>,
    input: R,
    out: W,
    mut err: E,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let config = match Config::resolve(cli, env_key) {
        Ok(config) => config,
        Err(e @ ConfigError::MissingCredential) => {
            log::error!("no API key configured");
            writeln!(err, "{e}")?;
            writeln!(err, "{MISSING_KEY_HINT}")?;
            return Ok(());
        }
    };

    let client = GeminiClient::new(&config).context("failed to build HTTP client")?;
    log::info!("session started against {}", config.generate_url());

    let outcome = Session::new(&client, config.on_check_error, input, out, err)
        .run()
        .await
        .context("session ended early")?;

    match outcome {
        Outcome::Answered(_) => log::info!("session finished"),
        Outcome::Failed(e) => log::info!("session finished without an answer: {e}"),
    }
    Ok(())
}
