use crate::adapters::http::error::{AppError, AppResult};
use crate::adapters::http::AppState;
use crate::domain::model::{Album, AlbumId, Photo, PhotoId, Portfolio, PortfolioId};
use crate::domain::ports::ObjectStore;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Serialize)]
pub struct PortfoliosView {
    pub portfolios: Vec<Portfolio>,
}

#[derive(Debug, Serialize)]
pub struct AlbumsView {
    pub portfolio_id: PortfolioId,
    pub albums: Vec<Album>,
}

#[derive(Debug, Serialize)]
pub struct PhotoView {
    #[serde(flatten)]
    pub photo: Photo,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PhotoView {
    fn new(photo: Photo, public_base_url: Option<&Url>) -> Self {
        let key = photo.key();
        let thumbnail_url = public_base_url.map(|base| encode_thumbnail_url(base, &key));
        Self {
            photo,
            key,
            thumbnail_url,
        }
    }
}

/// Appends each key segment to the base path, percent-encoding as it goes.
fn encode_thumbnail_url(base: &Url, key: &str) -> String {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(key.split('/'));
    }
    url.to_string()
}

#[derive(Debug, Serialize)]
pub struct PhotosView {
    pub portfolio_id: PortfolioId,
    pub album_id: AlbumId,
    pub photos: Vec<PhotoView>,
}

pub async fn list_portfolios<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<PortfoliosView>> {
    let portfolios = state.resolver.list_portfolios().await?;
    Ok(Json(PortfoliosView { portfolios }))
}

pub async fn list_albums<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
    Path(portfolio_id): Path<String>,
) -> AppResult<Json<AlbumsView>> {
    let portfolio_id = PortfolioId::parse(portfolio_id)?;
    let albums = state.resolver.list_albums(&portfolio_id).await?;
    Ok(Json(AlbumsView {
        portfolio_id,
        albums,
    }))
}

pub async fn list_photos<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
    Path((portfolio_id, album_id)): Path<(String, String)>,
) -> AppResult<Json<PhotosView>> {
    let portfolio_id = PortfolioId::parse(portfolio_id)?;
    let album_id = AlbumId::parse(album_id)?;

    let photos = state
        .resolver
        .list_photos(&portfolio_id, &album_id)
        .await?
        .into_iter()
        .map(|photo| PhotoView::new(photo, state.public_base_url.as_ref()))
        .collect();

    Ok(Json(PhotosView {
        portfolio_id,
        album_id,
        photos,
    }))
}

pub async fn get_photo<S: ObjectStore + 'static>(
    State(state): State<AppState<S>>,
    Path((portfolio_id, album_id, photo_id)): Path<(String, String, String)>,
) -> AppResult<Json<PhotoView>> {
    let portfolio_id = PortfolioId::parse(portfolio_id)?;
    let album_id = AlbumId::parse(album_id)?;
    let photo_id = PhotoId::parse(photo_id)?;

    match state
        .resolver
        .get_photo(&portfolio_id, &album_id, &photo_id)
        .await?
    {
        Some(photo) => Ok(Json(PhotoView::new(
            photo,
            state.public_base_url.as_ref(),
        ))),
        None => {
            info!(portfolio = %portfolio_id, album = %album_id, photo = %photo_id, "Photo not found");
            Err(AppError::not_found(format!(
                "No photo '{}' in album '{}'",
                photo_id, album_id
            )))
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found(uri: Uri) -> (StatusCode, String) {
    warn!("No route for {}", uri);
    (StatusCode::NOT_FOUND, format!("Not found: [{}]", uri))
}
