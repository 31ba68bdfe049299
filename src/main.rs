use clap::Parser;
use photo_catalog::adapters::http;
use photo_catalog::core::ConfigProvider;
use photo_catalog::utils::logger;
use photo_catalog::{
    build_s3_client, AppState, CatalogConfig, CatalogResolver, CliConfig, Command, S3ObjectStore,
};
use photo_catalog::{AlbumId, PortfolioId};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting photo-catalog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("❌ {} (transient: {})", e, e.is_transient());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(if e.is_transient() { 2 } else { 1 });
    }

    Ok(())
}

async fn run(command: Command, config: CatalogConfig) -> photo_catalog::Result<()> {
    let client = build_s3_client(&config).await;
    let resolver = CatalogResolver::new(
        S3ObjectStore::new(client),
        config.bucket(),
        config.resolver.clone(),
    );

    match command {
        Command::Serve { .. } => {
            let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
            let state = AppState::new(resolver, config.server.public_base_url()?);
            http::serve(listener, state).await?;
        }
        Command::Portfolios => {
            for portfolio in resolver.list_portfolios().await? {
                println!("{}", portfolio.id);
            }
        }
        Command::Albums { portfolio_id } => {
            let portfolio_id = PortfolioId::parse(portfolio_id)?;
            let albums = resolver.list_albums(&portfolio_id).await?;
            if albums.is_empty() {
                println!("No albums in portfolio '{}'", portfolio_id);
            }
            for album in albums {
                println!("{}", album.id);
            }
        }
        Command::Photos {
            portfolio_id,
            album_id,
        } => {
            let portfolio_id = PortfolioId::parse(portfolio_id)?;
            let album_id = AlbumId::parse(album_id)?;
            let photos = resolver.list_photos(&portfolio_id, &album_id).await?;
            if photos.is_empty() {
                println!("No photos in album '{}'", album_id);
            }
            for photo in photos {
                println!("{}\t{}", photo.id, photo.key());
            }
        }
    }

    Ok(())
}
