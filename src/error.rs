use std::path::PathBuf;
use thiserror::Error;

/// Translation loading error types
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Magento root not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("File system error on {path}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache backend failed for entry {key}")]
    Cache {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize translation data")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid XML: {path}")]
    InvalidXml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Area code is not set")]
    AreaNotSet,

    #[error("Theme not found: {area}/{theme}")]
    ThemeNotFound { area: String, theme: String },

    #[error("Circular inheritance in language pack {pack}")]
    CircularPackInheritance { pack: String },
}

impl TranslateError {
    pub(crate) fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TranslateError::FileSystem {
            path: path.into(),
            source,
        }
    }
}
