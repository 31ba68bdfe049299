use crate::domain::schema::{self, SEPARATOR};
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a validated path-segment identifier.
///
/// Values are non-empty and never contain the key separator, so they can be
/// spliced into object keys and recovered by position.
macro_rules! segment_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const FIELD: &'static str = $field;

            pub fn parse(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                validate_segment($field, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CatalogError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

fn validate_segment(field: &str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(SEPARATOR) {
        "must not contain '/'"
    } else if value == "." || value == ".." {
        "must not be a relative path segment"
    } else {
        return Ok(());
    };

    Err(CatalogError::InvalidIdentifier {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

segment_id!(
    /// Top-level grouping in the bucket, `portfolios/{id}/`.
    PortfolioId,
    "portfolio_id"
);
segment_id!(
    /// Unique only within its portfolio.
    AlbumId,
    "album_id"
);
segment_id!(
    /// File name of a thumbnail object, e.g. `img1.jpg`.
    PhotoId,
    "photo_id"
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: PortfolioId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub portfolio_id: PortfolioId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: PhotoId,
    pub album_id: AlbumId,
    pub portfolio_id: PortfolioId,
}

impl Photo {
    /// Object key of the thumbnail this photo was resolved from.
    pub fn key(&self) -> String {
        schema::photo_key(&self.portfolio_id, &self.album_id, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_ids_accept_plain_segments() {
        assert_eq!(PortfolioId::parse("garden").unwrap().as_str(), "garden");
        assert_eq!(PhotoId::parse("img 1.jpg").unwrap().to_string(), "img 1.jpg");
    }

    #[test]
    fn test_segment_ids_reject_separator_and_empty() {
        for bad in ["", "a/b", "/", "trailing/", ".", ".."] {
            let err = PortfolioId::parse(bad).unwrap_err();
            match err {
                CatalogError::InvalidIdentifier { field, value, .. } => {
                    assert_eq!(field, "portfolio_id");
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let album = Album {
            id: AlbumId::parse("spring").unwrap(),
            portfolio_id: PortfolioId::parse("garden").unwrap(),
        };
        let json = serde_json::to_value(&album).unwrap();
        assert_eq!(json, serde_json::json!({"id": "spring", "portfolio_id": "garden"}));

        let bad: std::result::Result<Album, _> =
            serde_json::from_value(serde_json::json!({"id": "a/b", "portfolio_id": "garden"}));
        assert!(bad.is_err());
    }

    #[test]
    fn test_photo_key() {
        let photo = Photo {
            id: PhotoId::parse("img1.jpg").unwrap(),
            album_id: AlbumId::parse("spring").unwrap(),
            portfolio_id: PortfolioId::parse("garden").unwrap(),
        };
        assert_eq!(photo.key(), "portfolios/garden/albums/spring/thumbs/img1.jpg");
    }
}
