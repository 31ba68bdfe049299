use crate::domain::ports::{ListRequest, Listing, ObjectStore};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::time::Duration;

/// Same cap S3 applies to a single ListObjectsV2 page.
const DEFAULT_MAX_KEYS: usize = 1000;

/// Bucket held in memory with S3 listing semantics: keys come back in
/// lexicographic order and a delimiter folds deeper keys into common prefixes.
#[derive(Debug, Clone)]
pub struct InMemoryObjectStore {
    bucket: String,
    keys: BTreeSet<String>,
    max_keys: usize,
    latency: Option<Duration>,
    failure: Option<String>,
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            keys: BTreeSet::new(),
            max_keys: DEFAULT_MAX_KEYS,
            latency: None,
            failure: None,
        }
    }

    pub fn from_keys<I, K>(bucket: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut store = Self::new(bucket);
        store.keys.extend(keys.into_iter().map(Into::into));
        store
    }

    pub fn with_object(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Delay every listing, e.g. to exercise listing deadlines.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every listing as an unreachable store would.
    pub fn unavailable(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list(&self, request: &ListRequest) -> Result<Listing> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(message) = &self.failure {
            return Err(CatalogError::store_unavailable(message.clone()));
        }

        if request.bucket != self.bucket {
            return Err(CatalogError::store_unavailable(format!(
                "NoSuchBucket: {}",
                request.bucket
            )));
        }

        let mut listing = Listing::default();
        let mut returned = 0usize;

        let matching = self
            .keys
            .range(request.prefix.clone()..)
            .take_while(|key| key.starts_with(&request.prefix));

        for key in matching {
            let rest = &key[request.prefix.len()..];
            let common_prefix = request
                .delimiter
                .as_deref()
                .filter(|delimiter| !delimiter.is_empty())
                .and_then(|delimiter| {
                    rest.find(delimiter).map(|pos| {
                        format!("{}{}", &key[..request.prefix.len() + pos], delimiter)
                    })
                });

            match common_prefix {
                // keys under one prefix are contiguous in sorted order
                Some(prefix) if listing.common_prefixes.last() == Some(&prefix) => continue,
                _ if returned == self.max_keys => {
                    listing.truncated = true;
                    break;
                }
                Some(prefix) => listing.common_prefixes.push(prefix),
                None => listing.keys.push(key.clone()),
            }
            returned += 1;
        }

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryObjectStore {
        InMemoryObjectStore::from_keys(
            "photos",
            [
                "portfolios/garden/albums/summer/thumbs/b.jpg",
                "portfolios/garden/albums/spring/thumbs/a.jpg",
                "portfolios/garden/albums/spring/thumbs/_marker",
                "portfolios/garden/albums/cover.jpg",
                "portfolios/gardens/albums/x/thumbs/y.jpg",
            ],
        )
    }

    #[tokio::test]
    async fn test_flat_listing_is_sorted_and_prefix_bounded() {
        let listing = store()
            .list(&ListRequest::flat("photos", "portfolios/garden/albums/spring/"))
            .await
            .unwrap();

        assert_eq!(
            listing.keys,
            vec![
                "portfolios/garden/albums/spring/thumbs/_marker",
                "portfolios/garden/albums/spring/thumbs/a.jpg",
            ]
        );
        assert!(listing.common_prefixes.is_empty());
    }

    #[tokio::test]
    async fn test_delimited_listing_groups_common_prefixes() {
        let listing = store()
            .list(&ListRequest::delimited("photos", "portfolios/garden/albums/", "/"))
            .await
            .unwrap();

        assert_eq!(listing.keys, vec!["portfolios/garden/albums/cover.jpg"]);
        assert_eq!(
            listing.common_prefixes,
            vec![
                "portfolios/garden/albums/spring/",
                "portfolios/garden/albums/summer/",
            ]
        );
    }

    #[tokio::test]
    async fn test_max_keys_truncates() {
        let listing = store()
            .with_max_keys(1)
            .list(&ListRequest::delimited("photos", "portfolios/", "/"))
            .await
            .unwrap();

        assert_eq!(listing.common_prefixes, vec!["portfolios/garden/"]);
        assert!(listing.truncated);
    }

    #[tokio::test]
    async fn test_unknown_bucket_and_failure() {
        let err = store()
            .list(&ListRequest::flat("other", ""))
            .await
            .unwrap_err();
        assert!(err.is_transient());

        let err = store()
            .unavailable("throttled")
            .list(&ListRequest::flat("photos", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::StoreUnavailable { .. }));
    }
}
