use dashgate_core::{OutputFormat, ProfileOverrides};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Extra or replacement quality profiles, per output format
    #[serde(default)]
    pub profiles: ProfileOverrides,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Require a bearer token on the encode API
    #[serde(default)]
    pub enabled: bool,

    /// Token expected in `Authorization: Bearer <api_key>`
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Identifier of the pre-provisioned transcoding pipeline (required)
    #[serde(default)]
    pub id: String,

    /// Base URL of the pipeline API, e.g. `https://transcoder.example.com` (required)
    #[serde(default)]
    pub endpoint: String,

    /// Bearer token sent with every pipeline request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout towards the pipeline (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Format used when a request does not name one (default: dash)
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_timeout() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            endpoint: String::new(),
            api_key: None,
            timeout_secs: default_timeout(),
            default_format: OutputFormat::default(),
        }
    }
}
