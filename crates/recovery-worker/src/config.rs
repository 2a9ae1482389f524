//! Worker configuration

use recovery_sdk::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Job the worker runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Fit and publish a bundle from sourced records
    #[default]
    Train,
    /// Score feature maps against the published bundle
    Score,
}

impl std::str::FromStr for JobKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "train" => Ok(JobKind::Train),
            "score" => Ok(JobKind::Score),
            other => Err(anyhow::anyhow!(
                "Unknown job '{}', expected 'train' or 'score'",
                other
            )),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub job: JobKind,

    /// JSON-lines input: sourced records for `train`, feature maps for `score`
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Where `score` writes decisions; stdout when unset
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Engine, store and training settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("data/records.jsonl")
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            job: JobKind::default(),
            input: default_input(),
            output: None,
            engine: EngineConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/worker").required(false))
            .add_source(config::Environment::with_prefix("RECOVERY").separator("__"))
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_config_default() {
        let config = WorkerConfig::default();

        assert_eq!(config.job, JobKind::Train);
        assert_eq!(config.input, PathBuf::from("data/records.jsonl"));
        assert!(config.output.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_job_kind_from_str() {
        assert_eq!("train".parse::<JobKind>().unwrap(), JobKind::Train);
        assert_eq!("score".parse::<JobKind>().unwrap(), JobKind::Score);
        assert!("serve".parse::<JobKind>().is_err());
    }

    #[test]
    fn test_worker_config_from_json() {
        let config: WorkerConfig = serde_json::from_str(
            r#"{
                "job": "score",
                "input": "cases.jsonl",
                "engine": {"store": {"backend": "file_system", "base_path": "/srv/models"}}
            }"#,
        )
        .unwrap();

        assert_eq!(config.job, JobKind::Score);
        assert_eq!(config.input, PathBuf::from("cases.jsonl"));
        assert_eq!(config.engine.training.test_size, 0.2);
        assert_eq!(
            config.engine.store.base_path.as_deref(),
            Some("/srv/models")
        );
    }
}
