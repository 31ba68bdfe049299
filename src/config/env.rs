use crate::config::{CatalogConfig, DEFAULT_BIND_ADDRESS, DEFAULT_REGION};
use crate::core::catalog::{MalformedKeyPolicy, MarkerPolicy};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_required_field;
use std::env;

pub const BUCKET_VAR: &str = "PHOTO_BUCKET_NAME";
pub const REGION_VAR: &str = "AWS_REGION";
pub const ENDPOINT_VAR: &str = "PHOTO_STORE_ENDPOINT";
pub const BIND_ADDRESS_VAR: &str = "BIND_ADDRESS";
pub const PUBLIC_BASE_URL_VAR: &str = "PUBLIC_BASE_URL";
pub const LIST_TIMEOUT_VAR: &str = "LIST_TIMEOUT_SECS";
pub const MARKER_POLICY_VAR: &str = "MARKER_POLICY";
pub const MARKER_NAMES_VAR: &str = "MARKER_NAMES";
pub const MALFORMED_KEY_POLICY_VAR: &str = "MALFORMED_KEY_POLICY";

impl CatalogConfig {
    /// Reads the process environment once; nothing downstream looks at it again.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bucket = lookup(BUCKET_VAR).filter(|value| !value.trim().is_empty());
        let mut config = CatalogConfig::new(validate_required_field(BUCKET_VAR, &bucket)?.clone());

        config.store.region = lookup(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string());
        config.store.endpoint_url = lookup(ENDPOINT_VAR);
        config.server.bind_address =
            lookup(BIND_ADDRESS_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        config.server.public_base_url = lookup(PUBLIC_BASE_URL_VAR);

        if let Some(raw) = lookup(LIST_TIMEOUT_VAR) {
            config.resolver.list_timeout_secs =
                raw.parse().map_err(|_| CatalogError::InvalidConfigValueError {
                    field: LIST_TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                    reason: "Expected a whole number of seconds".to_string(),
                })?;
        }
        if let Some(raw) = lookup(MARKER_POLICY_VAR) {
            config.resolver.marker_policy = parse_marker_policy(&raw)?;
        }
        if let Some(raw) = lookup(MARKER_NAMES_VAR) {
            config.resolver.marker_names = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(raw) = lookup(MALFORMED_KEY_POLICY_VAR) {
            config.resolver.malformed_key_policy = parse_malformed_key_policy(&raw)?;
        }

        Ok(config)
    }
}

fn parse_marker_policy(raw: &str) -> Result<MarkerPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "explicit" => Ok(MarkerPolicy::Explicit),
        "skip_first" | "skip-first" => Ok(MarkerPolicy::SkipFirst),
        _ => Err(CatalogError::InvalidConfigValueError {
            field: MARKER_POLICY_VAR.to_string(),
            value: raw.to_string(),
            reason: "Expected 'explicit' or 'skip_first'".to_string(),
        }),
    }
}

fn parse_malformed_key_policy(raw: &str) -> Result<MalformedKeyPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "skip" => Ok(MalformedKeyPolicy::Skip),
        "fail" => Ok(MalformedKeyPolicy::Fail),
        _ => Err(CatalogError::InvalidConfigValueError {
            field: MALFORMED_KEY_POLICY_VAR.to_string(),
            value: raw.to_string(),
            reason: "Expected 'skip' or 'fail'".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_bucket_is_required() {
        let err = CatalogConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CatalogError::MissingConfigError { field } if field == BUCKET_VAR));

        let err = CatalogConfig::from_lookup(lookup(&[(BUCKET_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, CatalogError::MissingConfigError { .. }));
    }

    #[test]
    fn test_defaults_apply() {
        let config = CatalogConfig::from_lookup(lookup(&[(BUCKET_VAR, "photos-bucket")])).unwrap();
        assert_eq!(config.store.bucket, "photos-bucket");
        assert_eq!(config.store.region, "eu-west-2");
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
        assert_eq!(config.resolver.marker_policy, MarkerPolicy::Explicit);
        assert_eq!(config.resolver.marker_names, vec!["_marker".to_string()]);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = CatalogConfig::from_lookup(lookup(&[
            (BUCKET_VAR, "photos-bucket"),
            (REGION_VAR, "us-east-1"),
            (ENDPOINT_VAR, "http://localhost:4566"),
            (LIST_TIMEOUT_VAR, "3"),
            (MARKER_POLICY_VAR, "skip-first"),
            (MARKER_NAMES_VAR, "_marker, .keep"),
            (MALFORMED_KEY_POLICY_VAR, "FAIL"),
        ]))
        .unwrap();

        assert_eq!(config.store.region, "us-east-1");
        assert_eq!(config.store.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.resolver.list_timeout_secs, 3);
        assert_eq!(config.resolver.marker_policy, MarkerPolicy::SkipFirst);
        assert_eq!(config.resolver.marker_names, vec!["_marker", ".keep"]);
        assert_eq!(config.resolver.malformed_key_policy, MalformedKeyPolicy::Fail);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let err = CatalogConfig::from_lookup(lookup(&[
            (BUCKET_VAR, "photos-bucket"),
            (LIST_TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfigValueError { .. }));

        let err = CatalogConfig::from_lookup(lookup(&[
            (BUCKET_VAR, "photos-bucket"),
            (MARKER_POLICY_VAR, "guess"),
        ]))
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfigValueError { .. }));
    }
}
