use crate::config::CatalogConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

impl CatalogConfig {
    /// Parses and validates a configuration file such as:
    ///
    /// ```toml
    /// [store]
    /// bucket = "photo-site-photos"
    /// region = "eu-west-2"
    ///
    /// [server]
    /// bind_address = "127.0.0.1:3000"
    ///
    /// [resolver]
    /// marker_policy = "explicit"
    /// malformed_key_policy = "skip"
    /// ```
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::utils::error::CatalogError::ConfigError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{MalformedKeyPolicy, MarkerPolicy};
    use crate::utils::error::CatalogError;

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config = CatalogConfig::from_toml_str(
            r#"
[store]
bucket = "photo-site-photos"
"#,
        )
        .unwrap();

        assert_eq!(config, CatalogConfig::new("photo-site-photos"));
    }

    #[test]
    fn test_full_file() {
        let config = CatalogConfig::from_toml_str(
            r#"
[store]
bucket = "photo-site-photos"
region = "us-west-2"
endpoint_url = "http://localhost:9000"

[server]
bind_address = "127.0.0.1:8080"
public_base_url = "https://cdn.example.com"

[resolver]
list_timeout_secs = 5
marker_policy = "skip_first"
marker_names = ["_marker", ".keep"]
malformed_key_policy = "fail"
"#,
        )
        .unwrap();

        assert_eq!(config.store.region, "us-west-2");
        assert_eq!(config.server.bind_address, "127.0.0.1:8080");
        assert_eq!(config.resolver.list_timeout_secs, 5);
        assert_eq!(config.resolver.marker_policy, MarkerPolicy::SkipFirst);
        assert_eq!(config.resolver.malformed_key_policy, MalformedKeyPolicy::Fail);
    }

    #[test]
    fn test_unknown_keys_and_invalid_values_are_rejected() {
        let err = CatalogConfig::from_toml_str(
            r#"
[store]
bucket = "photo-site-photos"
bucket_region = "eu-west-2"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::TomlError(_)));

        let err = CatalogConfig::from_toml_str(
            r#"
[store]
bucket = "Photo_Site"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = CatalogConfig::new("photo-site-photos");
        config.server.public_base_url = Some("https://cdn.example.com".to_string());
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(CatalogConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
