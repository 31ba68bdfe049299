pub mod catalog;

pub use crate::domain::model::{Album, AlbumId, Photo, PhotoId, Portfolio, PortfolioId};
pub use crate::domain::ports::{ConfigProvider, ListRequest, Listing, ObjectStore};
pub use crate::utils::error::Result;
