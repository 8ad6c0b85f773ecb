use std::time::Duration;

use serde::Deserialize;

use crate::error::{PipelineError, Result};
use crate::utils::constants::{
    DEFAULT_BATCH_DELAY_SECONDS, DEFAULT_BUCKET_NAME, DEFAULT_REGION, DEFAULT_STREAM_NAME,
};

/// Runtime configuration, environment-driven with built-in defaults.
///
/// Recognized variables: `WQP_STREAM_NAME`, `WQP_REGION`, `WQP_BUCKET_NAME`,
/// `WQP_BATCH_DELAY_SECONDS`. CLI flags override whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    pub stream_name: String,
    pub region: String,
    pub bucket_name: String,
    pub batch_delay_seconds: u64,
}

impl PipelineConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(config::Environment::with_prefix("WQP"))
    }

    fn load_from(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("stream_name", DEFAULT_STREAM_NAME)
            .and_then(|b| b.set_default("region", DEFAULT_REGION))
            .and_then(|b| b.set_default("bucket_name", DEFAULT_BUCKET_NAME))
            .and_then(|b| b.set_default("batch_delay_seconds", DEFAULT_BATCH_DELAY_SECONDS))
            .map_err(|e| PipelineError::Config(e.to_string()))?
            .add_source(env)
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.batch_delay_seconds)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stream_name: DEFAULT_STREAM_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            batch_delay_seconds: DEFAULT_BATCH_DELAY_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("WQP").source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::load_from(env_with(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.batch_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_environment_overrides() {
        let config = PipelineConfig::load_from(env_with(&[
            ("WQP_STREAM_NAME", "lakes-prod"),
            ("WQP_BATCH_DELAY_SECONDS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.stream_name, "lakes-prod");
        assert_eq!(config.batch_delay_seconds, 0);
        assert_eq!(config.bucket_name, DEFAULT_BUCKET_NAME);
    }

    #[test]
    fn test_malformed_delay_is_a_config_error() {
        let result =
            PipelineConfig::load_from(env_with(&[("WQP_BATCH_DELAY_SECONDS", "soon")]));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
