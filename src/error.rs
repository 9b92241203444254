//! Error type shared by the pager and the photo fetcher.
//!
//! Every failure is returned through [`Error`]; nothing in the library
//! aborts the process. The binary decides to stop on the first error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("compile first url {url}: {source}")]
    Config {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cannot send request to {url}: {message}")]
    Transport { url: String, message: String },

    #[error("got non-200 response ({status}) from {url}")]
    Protocol { url: String, status: u16 },

    #[error("cannot decode page from {url}: {source}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("write file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
