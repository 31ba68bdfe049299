use crate::domain::model::{Album, AlbumId, Photo, PhotoId, Portfolio, PortfolioId};
use crate::domain::ports::{ListRequest, Listing, ObjectStore};
use crate::domain::schema::{self, SEPARATOR};
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DELIMITER: &str = "/";

/// How folder marker objects are told apart from photos in a flat listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// Drop the folder placeholder (key equal to the prefix) and any entry
    /// whose name is listed in `marker_names`, wherever they appear.
    #[default]
    Explicit,
    /// Drop the first entry of the listing unconditionally.
    SkipFirst,
}

/// What to do with a listed key that does not follow the key layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum MalformedKeyPolicy {
    /// Log and leave the entry out of the result.
    #[default]
    Skip,
    /// Fail the whole listing with `MalformedKey`.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,
    #[serde(default)]
    pub marker_policy: MarkerPolicy,
    #[serde(default = "default_marker_names")]
    pub marker_names: Vec<String>,
    #[serde(default)]
    pub malformed_key_policy: MalformedKeyPolicy,
}

pub fn default_list_timeout_secs() -> u64 {
    10
}

pub fn default_marker_names() -> Vec<String> {
    vec!["_marker".to_string()]
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            list_timeout_secs: default_list_timeout_secs(),
            marker_policy: MarkerPolicy::default(),
            marker_names: default_marker_names(),
            malformed_key_policy: MalformedKeyPolicy::default(),
        }
    }
}

impl ResolverConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }
}

/// Resolves the portfolio/album/photo hierarchy from bucket listings.
///
/// Holds no per-request state; every call issues exactly one listing against
/// the store and builds its result from that alone.
#[derive(Debug)]
pub struct CatalogResolver<S: ObjectStore> {
    store: S,
    bucket: String,
    config: ResolverConfig,
}

impl<S: ObjectStore> CatalogResolver<S> {
    pub fn new(store: S, bucket: impl Into<String>, config: ResolverConfig) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            config,
        }
    }

    pub async fn list_portfolios(&self) -> Result<Vec<Portfolio>> {
        let request = ListRequest::delimited(&self.bucket, schema::portfolios_prefix(), DELIMITER);
        let listing = self.list(&request).await?;

        let portfolios = self.parse_all(&listing.common_prefixes, |prefix| {
            schema::parse_portfolio_id(prefix).map(|id| Portfolio { id })
        })?;

        tracing::debug!(count = portfolios.len(), "Resolved portfolios");
        Ok(portfolios)
    }

    /// Albums are the common prefixes one level under the album prefix; the
    /// photos inside them are never enumerated here.
    pub async fn list_albums(&self, portfolio_id: &PortfolioId) -> Result<Vec<Album>> {
        let request = ListRequest::delimited(
            &self.bucket,
            schema::album_key_prefix(portfolio_id),
            DELIMITER,
        );
        let listing = self.list(&request).await?;

        let albums = self.parse_all(&listing.common_prefixes, |prefix| {
            schema::parse_album_id(prefix).map(|id| Album {
                id,
                portfolio_id: portfolio_id.clone(),
            })
        })?;

        tracing::debug!(portfolio = %portfolio_id, count = albums.len(), "Resolved albums");
        Ok(albums)
    }

    pub async fn list_photos(
        &self,
        portfolio_id: &PortfolioId,
        album_id: &AlbumId,
    ) -> Result<Vec<Photo>> {
        let prefix = schema::photo_key_prefix(portfolio_id, album_id);
        let request = ListRequest::flat(&self.bucket, prefix.as_str());
        let listing = self.list(&request).await?;

        let keys = self.without_markers(&prefix, &listing.keys);
        let photos = self.parse_all(&keys, |key| {
            schema::parse_photo_id(key).map(|id| Photo {
                id,
                album_id: album_id.clone(),
                portfolio_id: portfolio_id.clone(),
            })
        })?;

        tracing::debug!(
            portfolio = %portfolio_id,
            album = %album_id,
            count = photos.len(),
            "Resolved photos"
        );
        Ok(photos)
    }

    /// Looks up a single photo by listing its exact key. Marker objects are
    /// never returned as photos.
    pub async fn get_photo(
        &self,
        portfolio_id: &PortfolioId,
        album_id: &AlbumId,
        photo_id: &PhotoId,
    ) -> Result<Option<Photo>> {
        if self.is_marker_name(photo_id.as_str()) {
            return Ok(None);
        }

        let key = schema::photo_key(portfolio_id, album_id, photo_id);
        let request = ListRequest::flat(&self.bucket, key.as_str());
        let listing = self.list(&request).await?;

        let found = listing.keys.iter().any(|listed| *listed == key);
        Ok(found.then(|| Photo {
            id: photo_id.clone(),
            album_id: album_id.clone(),
            portfolio_id: portfolio_id.clone(),
        }))
    }

    async fn list(&self, request: &ListRequest) -> Result<Listing> {
        tracing::debug!(
            bucket = %request.bucket,
            prefix = %request.prefix,
            delimiter = ?request.delimiter,
            "Listing objects"
        );

        let listing = match tokio::time::timeout(
            self.config.list_timeout(),
            self.store.list(request),
        )
        .await
        {
            Ok(Ok(listing)) => listing,
            Ok(Err(e)) => {
                tracing::error!(prefix = %request.prefix, error = %e, "Object listing failed");
                return Err(e);
            }
            Err(_) => {
                tracing::error!(
                    prefix = %request.prefix,
                    timeout_secs = self.config.list_timeout_secs,
                    "Object listing timed out"
                );
                return Err(CatalogError::store_unavailable(format!(
                    "listing '{}' did not complete within {}s",
                    request.prefix, self.config.list_timeout_secs
                )));
            }
        };

        if listing.truncated {
            tracing::warn!(
                prefix = %request.prefix,
                returned = listing.keys.len() + listing.common_prefixes.len(),
                "Listing truncated; only the first page is shown"
            );
        }

        Ok(listing)
    }

    fn without_markers<'a>(&self, prefix: &str, keys: &'a [String]) -> Vec<&'a str> {
        match self.config.marker_policy {
            MarkerPolicy::SkipFirst => keys.iter().skip(1).map(String::as_str).collect(),
            MarkerPolicy::Explicit => keys
                .iter()
                .map(String::as_str)
                .filter(|key| !self.is_marker_key(prefix, key))
                .collect(),
        }
    }

    fn is_marker_key(&self, prefix: &str, key: &str) -> bool {
        if key == prefix {
            return true;
        }
        key.strip_prefix(prefix)
            .is_some_and(|name| !name.contains(SEPARATOR) && self.is_marker_name(name))
    }

    fn is_marker_name(&self, name: &str) -> bool {
        self.config.marker_names.iter().any(|marker| marker == name)
    }

    fn parse_all<R, T, F>(&self, raw: &[R], mut parse: F) -> Result<Vec<T>>
    where
        R: AsRef<str>,
        F: FnMut(&str) -> Result<T>,
    {
        let mut parsed = Vec::with_capacity(raw.len());
        for entry in raw {
            match parse(entry.as_ref()) {
                Ok(value) => parsed.push(value),
                Err(e @ CatalogError::MalformedKey { .. }) => match self.config.malformed_key_policy {
                    MalformedKeyPolicy::Skip => {
                        tracing::warn!(error = %e, "Skipping entry outside the key layout");
                    }
                    MalformedKeyPolicy::Fail => return Err(e),
                },
                Err(e) => return Err(e),
            }
        }
        Ok(parsed)
    }
}
