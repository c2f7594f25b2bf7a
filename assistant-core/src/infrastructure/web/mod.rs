//! Web page loading for the document tools.

mod fetcher;
mod html;

pub use fetcher::{FetchError, FetchedPage, HttpPageFetcher, PageFetcher};
pub use html::{extract_title, html_to_text};
