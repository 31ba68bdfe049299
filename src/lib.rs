pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::CatalogConfig;

#[cfg(feature = "s3")]
pub use adapters::storage::{build_s3_client, S3ObjectStore};
pub use adapters::storage::InMemoryObjectStore;

pub use adapters::http::{create_router, AppState};
pub use crate::core::catalog::{CatalogResolver, MalformedKeyPolicy, MarkerPolicy, ResolverConfig};
pub use utils::error::{CatalogError, Result};
pub use domain::model::{Album, AlbumId, Photo, PhotoId, Portfolio, PortfolioId};
