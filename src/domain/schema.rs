//! Object key layout for the photo bucket.
//!
//! ```text
//! portfolios/{portfolio}/albums/{album}/thumbs/{photo}
//! ```
//!
//! Identifiers are recovered by position in the `/`-split key. Parsers check
//! the literal segments as well as the segment count, so a key that has drifted
//! from the layout is reported instead of yielding the wrong segment.

use crate::domain::model::{AlbumId, PhotoId, PortfolioId};
use crate::utils::error::{CatalogError, Result};

pub const SEPARATOR: char = '/';

const PORTFOLIOS: &str = "portfolios";
const ALBUMS: &str = "albums";
const THUMBS: &str = "thumbs";

/// Identifiers carried by a full thumbnail key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoKey {
    pub portfolio_id: PortfolioId,
    pub album_id: AlbumId,
    pub photo_id: PhotoId,
}

pub fn portfolios_prefix() -> String {
    format!("{PORTFOLIOS}/")
}

pub fn album_key_prefix(portfolio_id: &PortfolioId) -> String {
    format!("{PORTFOLIOS}/{portfolio_id}/{ALBUMS}/")
}

pub fn photo_key_prefix(portfolio_id: &PortfolioId, album_id: &AlbumId) -> String {
    format!("{PORTFOLIOS}/{portfolio_id}/{ALBUMS}/{album_id}/{THUMBS}/")
}

pub fn photo_key(portfolio_id: &PortfolioId, album_id: &AlbumId, photo_id: &PhotoId) -> String {
    format!("{}{}", photo_key_prefix(portfolio_id, album_id), photo_id)
}

/// `portfolios/{p}/` -> `p`
pub fn parse_portfolio_id(common_prefix: &str) -> Result<PortfolioId> {
    let segments = split_exact(common_prefix, &[Some(PORTFOLIOS), None, Some("")])?;
    segment(common_prefix, segments[1], |v| PortfolioId::parse(v))
}

/// `portfolios/{p}/albums/{a}/` -> `a`
pub fn parse_album_id(common_prefix: &str) -> Result<AlbumId> {
    let segments = split_exact(
        common_prefix,
        &[Some(PORTFOLIOS), None, Some(ALBUMS), None, Some("")],
    )?;
    segment(common_prefix, segments[3], |v| AlbumId::parse(v))
}

/// `portfolios/{p}/albums/{a}/thumbs/{x}` -> `x`
pub fn parse_photo_id(key: &str) -> Result<PhotoId> {
    parse_photo_key(key).map(|parsed| parsed.photo_id)
}

pub fn parse_photo_key(key: &str) -> Result<PhotoKey> {
    let segments = split_exact(
        key,
        &[Some(PORTFOLIOS), None, Some(ALBUMS), None, Some(THUMBS), None],
    )?;
    Ok(PhotoKey {
        portfolio_id: segment(key, segments[1], |v| PortfolioId::parse(v))?,
        album_id: segment(key, segments[3], |v| AlbumId::parse(v))?,
        photo_id: segment(key, segments[5], |v| PhotoId::parse(v))?,
    })
}

/// Splits `raw` on the separator and checks it against `shape`, where `Some`
/// marks a literal segment and `None` a variable one.
fn split_exact<'a>(raw: &'a str, shape: &[Option<&str>]) -> Result<Vec<&'a str>> {
    let segments: Vec<&str> = raw.split(SEPARATOR).collect();

    if segments.len() != shape.len() {
        return Err(CatalogError::malformed_key(
            raw,
            format!(
                "expected {} path segments, found {}",
                shape.len(),
                segments.len()
            ),
        ));
    }

    for (index, (actual, expected)) in segments.iter().zip(shape).enumerate() {
        if let Some(expected) = expected {
            if actual != expected {
                return Err(CatalogError::malformed_key(
                    raw,
                    format!("segment {index} is '{actual}', expected '{expected}'"),
                ));
            }
        }
    }

    Ok(segments)
}

fn segment<T>(raw: &str, value: &str, parse: impl FnOnce(String) -> Result<T>) -> Result<T> {
    parse(value.to_string()).map_err(|e| match e {
        CatalogError::InvalidIdentifier { field, reason, .. } => {
            CatalogError::malformed_key(raw, format!("{field} {reason}"))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio(id: &str) -> PortfolioId {
        PortfolioId::parse(id).unwrap()
    }

    fn album(id: &str) -> AlbumId {
        AlbumId::parse(id).unwrap()
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(portfolios_prefix(), "portfolios/");
        assert_eq!(album_key_prefix(&portfolio("garden")), "portfolios/garden/albums/");
        assert_eq!(
            photo_key_prefix(&portfolio("garden"), &album("spring")),
            "portfolios/garden/albums/spring/thumbs/"
        );
    }

    #[test]
    fn test_parse_album_id_round_trip() {
        for (p, a) in [("garden", "spring"), ("cats", "2021-03"), ("doors", "old town")] {
            let common_prefix = format!("{}{}/", album_key_prefix(&portfolio(p)), a);
            assert_eq!(parse_album_id(&common_prefix).unwrap().as_str(), a);
        }
    }

    #[test]
    fn test_parse_photo_id_round_trip() {
        for (p, a, x) in [
            ("garden", "spring", "img1.jpg"),
            ("cats", "tabby", "DSC_0042.JPG"),
            ("doors", "london", "door.webp"),
        ] {
            let key = format!("portfolios/{p}/albums/{a}/thumbs/{x}");
            assert_eq!(parse_photo_id(&key).unwrap().as_str(), x);
        }
    }

    #[test]
    fn test_parse_photo_key_returns_all_ids() {
        let parsed = parse_photo_key("portfolios/garden/albums/spring/thumbs/img1.jpg").unwrap();
        assert_eq!(parsed.portfolio_id.as_str(), "garden");
        assert_eq!(parsed.album_id.as_str(), "spring");
        assert_eq!(parsed.photo_id.as_str(), "img1.jpg");
    }

    #[test]
    fn test_parse_portfolio_id() {
        assert_eq!(parse_portfolio_id("portfolios/garden/").unwrap().as_str(), "garden");
        assert!(parse_portfolio_id("portfolios/").is_err());
    }

    #[test]
    fn test_short_keys_are_malformed() {
        for raw in ["portfolios/garden/albums/", "portfolios", "", "random-upload.jpg"] {
            assert!(
                matches!(parse_album_id(raw), Err(CatalogError::MalformedKey { .. })),
                "{raw} should be malformed"
            );
        }
        assert!(matches!(
            parse_photo_id("portfolios/garden/albums/spring/thumbs"),
            Err(CatalogError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_nested_segments_are_not_misparsed() {
        // a portfolio id of "a/b" shifts every later segment by one
        let key = "portfolios/a/b/albums/spring/thumbs/img1.jpg";
        assert!(matches!(parse_photo_id(key), Err(CatalogError::MalformedKey { .. })));

        let common_prefix = "portfolios/a/b/albums/spring/";
        assert!(matches!(
            parse_album_id(common_prefix),
            Err(CatalogError::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_wrong_literal_segments_are_malformed() {
        assert!(parse_album_id("portfolio/garden/albums/spring/").is_err());
        assert!(parse_photo_id("portfolios/garden/albums/spring/full/img1.jpg").is_err());
    }

    #[test]
    fn test_folder_placeholder_is_not_a_photo() {
        let err = parse_photo_id("portfolios/garden/albums/spring/thumbs/").unwrap_err();
        match err {
            CatalogError::MalformedKey { reason, .. } => assert!(reason.contains("photo_id")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
