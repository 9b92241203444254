//! Downloads the `large2x` variant of every photo a Pexels search returns.
//!
//! [`Downloader::run`] requests the first search page, then follows the
//! server's `next_page` cursor until it is empty, writing each photo into the
//! destination directory as it goes. The first error stops the run.

mod downloader;
pub mod error;
pub mod model;

pub use downloader::{
    build_initial_request, create_destination, derive_filename, paginate, persist, Download,
    Downloader, FileDownloader, PageSource, Response, RunSummary, UReqFetcher,
};
pub use error::Error;
