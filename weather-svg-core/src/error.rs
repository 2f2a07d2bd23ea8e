//! Error type shared by every stage of the render pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Every failure is fatal to the run; the binary maps all variants to exit code 1.
#[derive(Debug, Error)]
pub enum Error {
    /// A request could not be sent, its body could not be read, or the status was not success.
    #[error("Error fetching weather data: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The provider answered, but the body lacks the fields we need.
    #[error("Unexpected weather data: {message}")]
    Data { message: String },

    /// Template missing or output path unwritable.
    #[error("File error ({}): {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A setting or a recognized-value invariant is violated.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    pub fn network<S: Into<String>>(message: S, source: reqwest::Error) -> Self {
        Self::Network { message: message.into(), source: Some(source) }
    }

    pub fn status<S: Into<String>>(message: S) -> Self {
        Self::Network { message: message.into(), source: None }
    }

    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data { message: message.into() }
    }

    pub fn file(path: &Path, source: std::io::Error) -> Self {
        Self::File { path: path.to_path_buf(), source }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
