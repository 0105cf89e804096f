//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Reads `CommandEnvelope` messages as newline-delimited JSON from stdin and
//! writes one `ResponseEnvelope` per command to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.
//!
//! Configuration is read from `$MOODWELL_CONFIG` when set, otherwise from the
//! default config path if that file exists.

use moodwell::MoodwellConfig;
use moodwell::host::handler::CompanionHandler;
use moodwell::host::stdio::run_stdio_bridge;
use std::path::PathBuf;

fn load_config() -> anyhow::Result<MoodwellConfig> {
    let path = std::env::var_os("MOODWELL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(MoodwellConfig::default_config_path);
    if path.is_file() {
        tracing::info!(path = %path.display(), "loading config");
        MoodwellConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))
    } else {
        tracing::info!(path = %path.display(), "no config file; using defaults");
        Ok(MoodwellConfig::default())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout is reserved for the JSON protocol.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("moodwell=info,moodwell_host=info")),
        )
        .init();

    tracing::info!("moodwell-host starting");

    let config = load_config()?;
    if config.classifier.enabled {
        tracing::info!(
            endpoint = config.classifier.endpoint_url.as_deref().unwrap_or_default(),
            timeout_ms = config.classifier.timeout_ms,
            "remote classifier enabled"
        );
    }

    run_stdio_bridge(CompanionHandler::from_config(&config))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "moodwell-host exited with error");
            anyhow::anyhow!("moodwell-host failed: {e}")
        })?;

    tracing::info!("moodwell-host shut down cleanly");
    Ok(())
}
