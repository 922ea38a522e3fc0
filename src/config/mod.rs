mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file (or JSON, by `.json` extension)
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: Config = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Load config from the given path or the first default location that exists
pub fn load_config_or_search(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./dashgate.toml",
        "~/.config/dashgate/config.toml",
        "/etc/dashgate/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    anyhow::bail!(
        "No config file found (searched {}); pass one with --config",
        default_paths.join(", ")
    )
}

/// Validate configuration once, at startup
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.pipeline.id.trim().is_empty() {
        anyhow::bail!("pipeline.id is required");
    }

    let endpoint = config.pipeline.endpoint.trim();
    if endpoint.is_empty() {
        anyhow::bail!("pipeline.endpoint is required");
    }
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        anyhow::bail!("pipeline.endpoint must be an http(s) URL, got '{}'", endpoint);
    }

    if config.pipeline.timeout_secs == 0 {
        anyhow::bail!("pipeline.timeout_secs must be greater than 0");
    }

    if config.auth.enabled && config.auth.api_key.as_deref().unwrap_or("").is_empty() {
        anyhow::bail!("auth is enabled but auth.api_key is not set");
    }

    let overrides = config
        .profiles
        .dash
        .iter()
        .map(|entry| ("dash", entry))
        .chain(config.profiles.hls.iter().map(|entry| ("hls", entry)));
    for (format, (label, preset)) in overrides {
        if label.trim().is_empty() {
            anyhow::bail!("profiles.{} contains an empty label", format);
        }
        if preset.trim().is_empty() {
            anyhow::bail!("profiles.{}.{} has an empty preset id", format, label);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashgate_core::OutputFormat;

    fn valid() -> Config {
        let mut config = Config::default();
        config.pipeline.id = "1111111111111-abcdef".into();
        config.pipeline.endpoint = "http://localhost:9000".into();
        config
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pipeline.timeout_secs, 30);
        assert_eq!(config.pipeline.default_format, OutputFormat::Dash);
        assert!(!config.auth.enabled);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn missing_pipeline_id_fails() {
        let mut config = valid();
        config.pipeline.id = "  ".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("pipeline.id"));
    }

    #[test]
    fn missing_or_bad_endpoint_fails() {
        let mut config = valid();
        config.pipeline.endpoint = String::new();
        assert!(validate_config(&config).is_err());

        config.pipeline.endpoint = "ftp://example.com".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn auth_without_key_fails() {
        let mut config = valid();
        config.auth.enabled = true;
        assert!(validate_config(&config).is_err());

        config.auth.api_key = Some("secret".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_override_preset_fails() {
        let mut config = valid();
        config.profiles.hls.insert("1080p".into(), "".into());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("profiles.hls.1080p"));
    }

    #[test]
    fn parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8081

            [pipeline]
            id = "pipe-1"
            endpoint = "https://transcoder.example.com"
            default_format = "hls"

            [profiles.dash]
            "2160p" = "custom-2160"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pipeline.default_format, OutputFormat::Hls);
        assert_eq!(
            config.profiles.dash.get("2160p").map(String::as_str),
            Some("custom-2160")
        );
        assert!(validate_config(&config).is_ok());
    }
}
