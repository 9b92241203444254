mod fetcher;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};
use url::Url;

use crate::error::Error;
use crate::model::{Page, Photo};

pub use fetcher::UReqFetcher;

/// First page of every search; only `query` is appended per run.
const SEARCH_URL: &str = "https://api.pexels.com/v1/search?per_page=80&page=1";

#[derive(Debug)]
pub enum Response {
    Ok(Vec<u8>),
    InvalidBody(String),
    Status(u16),
    NetworkError(String),
}

impl Response {
    pub fn ok(body: Vec<u8>) -> Self {
        Self::Ok(body)
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    pub fn status(code: u16) -> Self {
        Self::Status(code)
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError(message.into())
    }
}

/// Issues a single GET and buffers the whole body.
pub trait FileDownloader {
    fn fetch(&self, url: &str, headers: &[(&str, &str)]) -> Response;
}

/// Anything that can turn a cursor into a decoded page.
pub trait PageSource {
    fn fetch_page(&self, uri: &str) -> Result<Page, Error>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: usize,
    pub photos: usize,
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file: PathBuf,
    pub size: usize,
}

impl Download {
    pub fn new(source: String, file: PathBuf, size: usize) -> Self {
        Self { source, file, size }
    }
}

pub struct Downloader<T: FileDownloader> {
    fetcher: T,
    path: PathBuf,
    key: String,
}

pub fn build_initial_request(query: &str) -> Result<Url, Error> {
    let mut url = Url::parse(SEARCH_URL).map_err(|source| Error::Config {
        url: SEARCH_URL.to_string(),
        source,
    })?;

    url.query_pairs_mut().append_pair("query", query);

    Ok(url)
}

/// Requests pages starting at `first`, following each page's cursor verbatim
/// until the server sends a terminal one. Every photo is handed to `on_photo`
/// in page order before the next page is requested.
///
/// There is no page cap: a server that never ends its cursor chain keeps this
/// loop running.
pub fn paginate<S, F>(source: &S, first: &str, mut on_photo: F) -> Result<RunSummary, Error>
where
    S: PageSource + ?Sized,
    F: FnMut(&Photo) -> Result<(), Error>,
{
    let mut summary = RunSummary::default();
    let mut next = first.to_string();

    loop {
        let page = source.fetch_page(&next)?;

        summary.pages += 1;
        summary.photos += page.photos.len();

        for photo in &page.photos {
            on_photo(photo)?;
        }

        info!("processed: {}", summary.photos);

        match page.next_cursor() {
            Some(cursor) => next = cursor.to_string(),
            None => break,
        }
    }

    Ok(summary)
}

/// File name for a variant URL: the last path segment once the query
/// string is cut off.
pub fn derive_filename(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);

    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Writes `bytes` to `dir/filename`, replacing any existing file. `dir` must
/// already exist.
pub fn persist(bytes: &[u8], dir: &Path, filename: &str) -> Result<PathBuf, Error> {
    let file_path = dir.join(filename);

    fs::write(&file_path, bytes).map_err(|source| Error::io(&file_path, source))?;

    debug!(path = %file_path.display(), size = bytes.len(), "wrote file");

    Ok(file_path)
}

/// Resolves `path` against the working directory and creates it. Only the
/// last component is created; an existing directory is fine.
pub fn create_destination(path: &Path) -> io::Result<PathBuf> {
    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    match fs::create_dir(&absolute_path) {
        Err(err) if err.kind() != io::ErrorKind::AlreadyExists => Err(err),
        _ => Ok(absolute_path),
    }
}

impl<T> Downloader<T>
where
    T: FileDownloader,
{
    pub fn with_fetcher(path: impl Into<PathBuf>, key: impl Into<String>, fetcher: T) -> Self {
        Downloader {
            fetcher,
            path: path.into(),
            key: key.into(),
        }
    }

    /// Searches for `query` and downloads every result until the last page.
    pub fn run(&self, query: &str) -> Result<RunSummary, Error> {
        let first = build_initial_request(query)?;

        paginate(self, first.as_str(), |photo| {
            self.download_photo(photo).map(|_| ())
        })
    }

    /// Downloads the `large2x` variant of `photo` into the destination.
    pub fn download_photo(&self, photo: &Photo) -> Result<Download, Error> {
        let url = photo.src.large2x.as_str();

        let body = self.fetch_image_bytes(url)?;
        let file_path = persist(&body, &self.path, &derive_filename(url))?;

        debug!(id = photo.id, path = %file_path.display(), "saved photo");

        Ok(Download::new(url.to_string(), file_path, body.len()))
    }

    /// Image hosting is a separate origin, so no Authorization is sent.
    pub fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.get(url, &[])
    }

    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
        debug!(url, "GET");

        match self.fetcher.fetch(url, headers) {
            Response::Ok(body) => Ok(body),

            Response::Status(status) => Err(Error::Protocol {
                url: url.to_string(),
                status,
            }),

            Response::NetworkError(message) | Response::InvalidBody(message) => {
                Err(Error::Transport {
                    url: url.to_string(),
                    message,
                })
            }
        }
    }
}

impl<T> PageSource for Downloader<T>
where
    T: FileDownloader,
{
    fn fetch_page(&self, uri: &str) -> Result<Page, Error> {
        let body = self.get(uri, &[("Authorization", self.key.as_str())])?;

        serde_json::from_slice(&body).map_err(|source| {
            let body = String::from_utf8_lossy(&body).into_owned();

            error!(url = uri, body = %body, "cannot unmarshal json: {source}");

            Error::Decode {
                url: uri.to_string(),
                body,
                source,
            }
        })
    }
}

impl Downloader<UReqFetcher> {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        let fetcher = UReqFetcher::new();
        Downloader::with_fetcher(path, key, fetcher)
    }
}

#[cfg(test)]
use fetcher::{MockFetcher, Request};
