use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Object store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Malformed key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidIdentifier {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CatalogError {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn malformed_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StoreUnavailable { .. } => {
                "The photo catalog is temporarily unavailable".to_string()
            }
            Self::MalformedKey { .. } => {
                "The photo catalog contains an entry it cannot read".to_string()
            }
            Self::InvalidIdentifier { field, value, .. } => {
                format!("'{}' is not a valid {}", value, field)
            }
            Self::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::StoreUnavailable { .. } => {
                "Check network access and credentials for the bucket, then retry"
            }
            Self::MalformedKey { .. } => {
                "Remove objects that do not follow portfolios/{portfolio}/albums/{album}/thumbs/{photo}"
            }
            Self::InvalidIdentifier { .. } => "Identifiers must be non-empty and must not contain '/'",
            Self::MissingConfigError { .. } | Self::ConfigError { .. } => {
                "Set PHOTO_BUCKET_NAME or pass --bucket / --config"
            }
            Self::InvalidConfigValueError { .. } => "Fix the reported setting and restart",
            Self::IoError(_) | Self::TomlError(_) => {
                "Check that the configuration file exists and is well formed"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
