use crate::config::env::BUCKET_VAR;
use crate::config::CatalogConfig;
use crate::core::catalog::{MalformedKeyPolicy, MarkerPolicy};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "photo-catalog")]
#[command(about = "Browse a photo bucket as portfolios, albums and photos")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file (environment variables are used when omitted)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Bucket holding the portfolios/ tree")]
    pub bucket: Option<String>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long, help = "S3-compatible endpoint, e.g. http://localhost:4566")]
    pub endpoint_url: Option<String>,

    #[arg(long)]
    pub list_timeout_secs: Option<u64>,

    #[arg(long, value_enum)]
    pub marker_policy: Option<MarkerPolicy>,

    #[arg(long, value_enum)]
    pub malformed_key_policy: Option<MalformedKeyPolicy>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the catalog over HTTP
    Serve {
        #[arg(long)]
        bind_address: Option<String>,

        #[arg(long, help = "Base URL thumbnails are publicly served from")]
        public_base_url: Option<String>,
    },
    /// Print all portfolios
    Portfolios,
    /// Print the albums of a portfolio
    Albums { portfolio_id: String },
    /// Print the photos of an album
    Photos {
        portfolio_id: String,
        album_id: String,
    },
}

impl CliConfig {
    /// Layers command-line flags over the file (or environment) configuration.
    pub fn load(&self) -> Result<CatalogConfig> {
        let mut config = match &self.config {
            Some(path) => CatalogConfig::from_toml_file(path)?,
            None => CatalogConfig::from_lookup(|name| match (name, &self.bucket) {
                (BUCKET_VAR, Some(bucket)) => Some(bucket.clone()),
                _ => std::env::var(name).ok(),
            })?,
        };

        if let Some(bucket) = &self.bucket {
            config.store.bucket = bucket.clone();
        }
        if let Some(region) = &self.region {
            config.store.region = region.clone();
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.store.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(timeout) = self.list_timeout_secs {
            config.resolver.list_timeout_secs = timeout;
        }
        if let Some(policy) = self.marker_policy {
            config.resolver.marker_policy = policy;
        }
        if let Some(policy) = self.malformed_key_policy {
            config.resolver.malformed_key_policy = policy;
        }
        if let Command::Serve {
            bind_address,
            public_base_url,
        } = &self.command
        {
            if let Some(bind_address) = bind_address {
                config.server.bind_address = bind_address.clone();
            }
            if let Some(public_base_url) = public_base_url {
                config.server.public_base_url = Some(public_base_url.clone());
            }
        }

        config.validate()?;
        Ok(config)
    }
}
