//! Error types for snag.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown protocol in url {url}, expected one of \"http\" or \"https\"")]
    UnsupportedScheme { url: String },

    #[error("request to {url} returned with status code: {status}")]
    BadStatus { url: String, status: u16 },

    #[error("request to {url} failed with error: {message}")]
    Transport { url: String, message: String },

    #[error(transparent)]
    UnsupportedEncoding(#[from] ParseEncodingError),

    #[error("request to {url} returned invalid JSON: {source}")]
    Json {
        url:    String,
        #[source]
        source: serde_json::Error,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[error("unknown encoding {0}")]
pub struct ParseEncodingError(pub String);
