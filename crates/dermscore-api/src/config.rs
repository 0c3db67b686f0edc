use std::env;
use std::path::PathBuf;

use jiff::SignedDuration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_AGGREGATE_OFFSET_MINUTES: i64 = 5;

/// Start-up configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    /// JSON snapshot backing the store. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub jwt_secret: String,
    pub seed_templates: bool,
    /// Delay after 00:00 UTC before the daily aggregation runs.
    pub aggregate_offset: SignedDuration,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("DERMSCORE_JWT_SECRET")
            .ok_or_else(|| eyre::eyre!("DERMSCORE_JWT_SECRET must be set"))?;

        let seed_templates = match var("DERMSCORE_SEED_TEMPLATES") {
            None => true,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => eyre::bail!("DERMSCORE_SEED_TEMPLATES: expected a boolean, got {other:?}"),
            },
        };

        let offset_minutes = match var("DERMSCORE_AGGREGATE_OFFSET_MINUTES") {
            None => DEFAULT_AGGREGATE_OFFSET_MINUTES,
            Some(v) => v.trim().parse::<i64>().map_err(|e| {
                eyre::eyre!("DERMSCORE_AGGREGATE_OFFSET_MINUTES: {e}")
            })?,
        };
        if !(0..24 * 60).contains(&offset_minutes) {
            eyre::bail!("DERMSCORE_AGGREGATE_OFFSET_MINUTES must be within one day");
        }

        Ok(Self {
            bind: var("DERMSCORE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            data_file: var("DERMSCORE_DATA_FILE").map(PathBuf::from),
            jwt_secret,
            seed_templates,
            aggregate_offset: SignedDuration::from_mins(offset_minutes),
        })
    }
}
