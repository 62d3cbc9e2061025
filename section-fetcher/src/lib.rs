//! Downloads the daily print sections of a periodical, one PDF per page.
//!
//! Pages are probed in order (`A001`, `A002`, ...) until one comes back empty,
//! and land in `{output}/{MM-DD-YY}/{section}/{page:03}.pdf`.

pub mod config;
pub mod dates;
pub mod download;
mod error;
pub mod fetcher;
pub mod io;

#[cfg(test)]
pub mod tests;

pub use crate::config::{
    default_output_folder, FetcherConfig, Sections, DEFAULT_SECTIONS, DEFAULT_URL_PREFIX,
};
pub use crate::dates::{parse_date, DateIter, DateModes, DateRange, INCOMING_DATE_FORMAT};
pub use crate::download::{
    download_file, DownloadResult, FetchResult, HttpTransport, Transport, TransportError,
};
pub use crate::error::{Error, Result};
pub use crate::fetcher::{
    page_path, page_url, DateReport, FetchRequest, PageProbe, SectionFetcher, SectionReport,
};
