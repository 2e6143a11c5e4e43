use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::error::ConfigError;
use crate::prompt::DEFAULT_MODEL;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Second line printed when no credential is available.
pub const MISSING_KEY_HINT: &str =
    "Please set the GEMINI_API_KEY by using: export GEMINI_API_KEY=\"YOUR_GEMINI_API_KEY\"";

#[derive(Parser, Debug, Clone)]
#[command(version, author, about = "Ask Gemini about the weather, time or population of a city")]
pub struct Cli {
    // Gemini API key; overrides $GEMINI_API_KEY
    #[arg(long = "api-key", value_name = "KEY")]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    // Base URL of the generative language API
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    // Whole-request timeout; the HTTP client default applies when unset
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    #[arg(long = "max-attempts", default_value_t = 1)]
    pub max_attempts: u8,

    // Base delay between attempts, multiplied by the attempt number
    #[arg(long = "retry-delay-ms", default_value_t = 500)]
    pub retry_delay_ms: u64,

    // What to do when the city check itself fails (network, HTTP, bad JSON)
    #[arg(long = "on-check-error", value_enum, default_value_t = CheckFailurePolicy::Reprompt)]
    pub on_check_error: CheckFailurePolicy,

    #[arg(long = "log-dir", default_value = "logs")]
    pub log_dir: PathBuf,

    #[arg(long = "log-level", default_value = "info")]
    pub log_level: LevelFilter,

    #[arg(long = "no-log")]
    pub no_log: bool,
}

/// How a failed city check (as opposed to a "NO" answer) is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckFailurePolicy {
    /// Report the failure and ask for the city again.
    Reprompt,
    /// Report the failure and end the session.
    Abort,
    /// Treat the failure as "city does not exist".
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u8,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Linear backoff: the n-th retry waits `backoff * n`.
    pub fn delay_after(&self, attempt: u8) -> Duration {
        self.backoff * u32::from(attempt)
    }
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
    pub on_check_error: CheckFailurePolicy,
}

impl Config {
    /// `env_key` is the value of `$GEMINI_API_KEY`, if set. The `--api-key`
    /// flag wins over it; blank values from either source are ignored.
    pub fn resolve(cli: &Cli, env_key: Option<String>) -> Result<Self, ConfigError> {
        let nonblank = |k: &String| !k.trim().is_empty();
        let api_key = cli
            .api_key
            .clone()
            .filter(nonblank)
            .or(env_key.filter(nonblank))
            .ok_or(ConfigError::MissingCredential)?;

        Ok(Self {
            api_key,
            endpoint: cli.endpoint.trim_end_matches('/').to_string(),
            model: cli.model.clone(),
            timeout: cli.timeout_secs.map(Duration::from_secs),
            retry: RetryPolicy {
                max_attempts: cli.max_attempts.max(1),
                backoff: Duration::from_millis(cli.retry_delay_ms),
            },
            on_check_error: cli.on_check_error,
        })
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{endpoint}/models/{model}:generateContent",
            endpoint = self.endpoint,
            model = self.model
        )
    }
}
