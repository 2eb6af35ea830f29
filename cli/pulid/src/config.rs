//! Environment configuration.

/// Log level used when `RUST_LOG` is not set.
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
}

impl Config {
    /// Reads `PULID_LOG_LEVEL`, defaulting to `warn` so stderr stays quiet.
    pub fn from_env() -> Self {
        let log_level = std::env::var("PULID_LOG_LEVEL")
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self { log_level }
    }
}
