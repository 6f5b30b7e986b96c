use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::adapter::{ModelServiceConfig, RetrievalServiceConfig};
use crate::error::ServiceError;

/// Config file used when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "configs/predict_docker.json";
/// Listening port used when `HTTP_PORT` is not set.
pub const DEFAULT_HTTP_PORT: u16 = 5000;

fn default_retrieval_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_inference_url() -> String {
    "http://127.0.0.1:8002".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_batch_concurrency() -> usize {
    1
}

fn default_http_port() -> u16 {
    DEFAULT_HTTP_PORT
}

/// Startup configuration, read once from the JSON config file.
///
/// Unknown keys are ignored so the same file can carry settings for the
/// retrieval and model services.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Location of the document database.
    pub database: String,
    /// Location of the document retrieval index.
    pub index: String,
    /// Documents retrieved per claim.
    pub n_docs: usize,
    /// Sentences kept per claim.
    pub n_sents: usize,
    /// Location of the serialized model archive.
    pub model: String,
    /// Compute device for the model, `-1` for CPU.
    pub cuda_device: i32,

    #[serde(default = "default_retrieval_url")]
    pub retrieval_url: String,
    #[serde(default = "default_inference_url")]
    pub inference_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    /// HTTP listening port. Taken from `HTTP_PORT`, never from the file.
    #[serde(skip, default = "default_http_port")]
    pub http_port: u16,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_location("database", &self.database)?;
        validate_location("index", &self.index)?;
        validate_location("model", &self.model)?;
        validate_positive("n_docs", self.n_docs)?;
        validate_positive("n_sents", self.n_sents)?;
        validate_positive("batch_concurrency", self.batch_concurrency)?;
        validate_cuda_device(self.cuda_device)?;
        validate_url("retrieval_url", &self.retrieval_url)?;
        validate_url("inference_url", &self.inference_url)?;
        if self.request_timeout_ms == 0 {
            return Err(ServiceError::Config(
                "request_timeout_ms must be at least 1".into(),
            ));
        }
        validate_port(self.http_port)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retrieval_service(&self) -> RetrievalServiceConfig {
        RetrievalServiceConfig {
            base_url: self.retrieval_url.clone(),
            database: self.database.clone(),
            index: self.index.clone(),
            n_docs: self.n_docs,
            n_sents: self.n_sents,
            timeout: self.request_timeout(),
        }
    }

    pub fn model_service(&self) -> ModelServiceConfig {
        ModelServiceConfig {
            base_url: self.inference_url.clone(),
            archive: self.model.clone(),
            cuda_device: self.cuda_device,
            database: self.database.clone(),
            timeout: self.request_timeout(),
        }
    }

    /// Parse the JSON config file at `path`, apply the `HTTP_PORT` value if
    /// one was given, and validate the result.
    pub fn load(path: impl AsRef<Path>, http_port: Option<&str>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let mut settings = Self::from_json(&raw)?;

        if let Some(port) = http_port {
            settings.http_port = port
                .parse::<u16>()
                .map_err(|e| ServiceError::Config(format!("Invalid HTTP_PORT {port}: {e}")))?;
        }

        // Validate settings before returning
        settings.validate()?;
        Ok(settings)
    }

    fn from_json(raw: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(raw).map_err(|e| ServiceError::Config(format!("Invalid config: {e}")))
    }
}

/// Validates that a location (path or URI) is not empty or whitespace-only.
fn validate_location(name: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Config(format!("{name} cannot be empty")));
    }
    Ok(())
}

fn validate_positive(name: &str, value: usize) -> Result<(), ServiceError> {
    if value == 0 {
        return Err(ServiceError::Config(format!("{name} must be at least 1")));
    }
    Ok(())
}

/// `-1` selects the CPU; anything lower is a typo.
fn validate_cuda_device(device: i32) -> Result<(), ServiceError> {
    if device < -1 {
        return Err(ServiceError::Config(format!(
            "cuda_device must be -1 (CPU) or a device ordinal, got {device}"
        )));
    }
    Ok(())
}

fn validate_url(name: &str, value: &str) -> Result<(), ServiceError> {
    let url =
        Url::parse(value).map_err(|e| ServiceError::Config(format!("{name} is invalid: {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ServiceError::Config(format!(
            "{name} must use http or https, got {}",
            url.scheme()
        )));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ServiceError> {
    if port == 0 {
        return Err(ServiceError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Load settings from `$CONFIG_PATH` (default [`DEFAULT_CONFIG_PATH`]) with the
/// listening port from `$HTTP_PORT`.
pub fn get_configuration() -> Result<Settings, ServiceError> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let http_port = env::var("HTTP_PORT").ok();
    Settings::load(path, http_port.as_deref())
}
