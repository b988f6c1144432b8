use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading, converting or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The engine rejected the markup.
    #[error("conversion failed: {0}")]
    Convert(String),

    #[error("invalid document header: {reason}")]
    Header { reason: String },

    #[error("invalid attribute: {0:?}")]
    InvalidAttribute(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the source could not be read or the destination written.
    ///
    /// Every other variant is a conversion error.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::Fetch { .. } | Error::Client(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
