#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::catalog::ResolverConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Where the photos live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// S3-compatible endpoint; implies path-style addressing.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl ServerConfig {
    pub fn public_base_url(&self) -> Result<Option<Url>> {
        self.public_base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| CatalogError::InvalidConfigValueError {
                    field: "server.public_base_url".to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            public_base_url: None,
        }
    }
}

/// Everything the catalog needs, resolved once at startup and passed down
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl CatalogConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            store: StoreConfig {
                bucket: bucket.into(),
                region: default_region(),
                endpoint_url: None,
            },
            server: ServerConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ConfigProvider for CatalogConfig {
    fn bucket(&self) -> &str {
        &self.store.bucket
    }

    fn region(&self) -> &str {
        &self.store.region
    }

    fn endpoint_url(&self) -> Option<&str> {
        self.store.endpoint_url.as_deref()
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_s3_bucket_name("store.bucket", &self.store.bucket)?;
        validation::validate_aws_region("store.region", &self.store.region)?;
        if let Some(endpoint_url) = &self.store.endpoint_url {
            validation::validate_url("store.endpoint_url", endpoint_url)?;
        }

        validation::validate_socket_address("server.bind_address", &self.server.bind_address)?;
        if let Some(public_base_url) = &self.server.public_base_url {
            validation::validate_url("server.public_base_url", public_base_url)?;
        }

        validation::validate_range(
            "resolver.list_timeout_secs",
            self.resolver.list_timeout_secs,
            1,
            300,
        )?;
        for name in &self.resolver.marker_names {
            validation::validate_non_empty_string("resolver.marker_names", name)?;
        }

        tracing::debug!("✅ Catalog configuration validation passed");
        Ok(())
    }
}
