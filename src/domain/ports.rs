use crate::utils::error::Result;
use async_trait::async_trait;

/// A single prefix-bounded listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: Option<String>,
}

impl ListRequest {
    /// Every key under `prefix`, recursively.
    pub fn flat(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            delimiter: None,
        }
    }

    /// One "directory" level under `prefix`: direct keys plus common prefixes.
    pub fn delimited(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            delimiter: Some(delimiter.into()),
        }
    }
}

/// Result of one listing call, in the store's native order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub keys: Vec<String>,
    pub common_prefixes: Vec<String>,
    /// The store stopped early; callers see only the first page.
    pub truncated: bool,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list(&self, request: &ListRequest) -> Result<Listing>;
}

pub trait ConfigProvider: Send + Sync {
    fn bucket(&self) -> &str;
    fn region(&self) -> &str;
    fn endpoint_url(&self) -> Option<&str>;
}
