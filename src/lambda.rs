#[cfg(feature = "lambda")]
use lambda_runtime::Error;
#[cfg(feature = "lambda")]
use photo_catalog::core::ConfigProvider;
#[cfg(feature = "lambda")]
use photo_catalog::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use photo_catalog::{
    build_s3_client, create_router, AppState, CatalogConfig, CatalogResolver, S3ObjectStore,
};

/// Serves the same routes as `photo-catalog serve`, fronted by API Gateway.
#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // Configuration is read once per cold start and shared across invocations.
    let config = CatalogConfig::from_env()?;
    config.validate()?;

    let client = build_s3_client(&config).await;
    let resolver = CatalogResolver::new(
        S3ObjectStore::new(client),
        config.bucket(),
        config.resolver.clone(),
    );
    let state = AppState::new(resolver, config.server.public_base_url()?);

    tracing::info!(bucket = config.bucket(), "Photo catalog Lambda ready");
    lambda_http::run(create_router(state)).await
}
