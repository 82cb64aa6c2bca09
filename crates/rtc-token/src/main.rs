//! Issue one token from the command line.
//!
//! ```text
//! APP_ID=... APP_CERTIFICATE=... rtc-token <channel_name> <uid>
//! ```
//!
//! Settings may also come from a `.env` file in the working directory;
//! variables already in the environment take precedence.
//!
//! Prints `{"token": "..."}` on success.

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use rtc_token::{IssuerConfig, TokenIssuer, TokenRequest};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let env_file = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &env_file {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = IssuerConfig::from_env().context("loading issuer configuration")?;
    tracing::info!(
        app_id = config.credential.app_id(),
        role = %config.role,
        ttl_secs = config.token_ttl.as_secs(),
        "issuer configured"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [channel_name, uid] = args.as_slice() else {
        bail!("usage: rtc-token <channel_name> <uid>");
    };

    let request = TokenRequest::from_path(channel_name, uid)?;
    let response = TokenIssuer::new().issue_for_request(&config, &request)?;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
