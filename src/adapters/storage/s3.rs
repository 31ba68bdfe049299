use crate::domain::ports::{ConfigProvider, ListRequest, Listing, ObjectStore};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;

/// Builds an S3 client for the configured region, optionally pointed at a
/// custom endpoint (LocalStack, MinIO) with path-style addressing.
pub async fn build_s3_client(config: &impl ConfigProvider) -> S3Client {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
        .region(Region::new(config.region().to_string()));

    if let Some(endpoint_url) = config.endpoint_url() {
        builder = builder.endpoint_url(endpoint_url).force_path_style(true);
    }

    S3Client::from_conf(builder.build())
}

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self, request: &ListRequest) -> Result<Listing> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&request.bucket)
            .prefix(&request.prefix)
            .set_delimiter(request.delimiter.clone())
            .send()
            .await
            .map_err(|e| {
                CatalogError::store_unavailable(format!(
                    "ListObjectsV2 on s3://{}/{} failed: {}",
                    request.bucket,
                    request.prefix,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(Listing {
            keys: resp
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect(),
            common_prefixes: resp
                .common_prefixes()
                .iter()
                .filter_map(|prefix| prefix.prefix().map(str::to_string))
                .collect(),
            truncated: resp.is_truncated().unwrap_or(false),
        })
    }
}
