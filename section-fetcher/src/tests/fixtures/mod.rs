use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::download::{FetchResult, Transport, TransportError};
use crate::fetcher::page_url;

pub const TEST_PREFIX: &str = "http://example.test/print/WSJ_-";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Body served for a page, distinct per URL so overwrites can be checked.
pub fn page_body(url: &str) -> Vec<u8> {
    format!("%PDF-1.4 {}", url).into_bytes()
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Body(Vec<u8>),
    Status(u16),
    /// Writes the bytes, then fails as if the connection dropped.
    Truncated(Vec<u8>),
}

/// In-memory transport. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, MockResponse>,
    requests: RefCell<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves pages `1..=pages` of `section` on `date`.
    pub fn with_section(mut self, section: char, date: NaiveDate, pages: u32) -> Self {
        for page in 1..=pages {
            let url = page_url(TEST_PREFIX, section, page, date);
            let body = page_body(&url);
            self.responses.insert(url, MockResponse::Body(body));
        }
        self
    }

    pub fn with_response(mut self, url: String, response: MockResponse) -> Self {
        self.responses.insert(url, response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MockTransport {
    fn fetch_into(&self, url: &str, sink: &mut dyn Write) -> FetchResult {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => {
                sink.write_all(body)?;
                Ok(body.len() as u64)
            }
            Some(MockResponse::Status(code)) => Err(TransportError::Status(*code)),
            Some(MockResponse::Truncated(body)) => {
                sink.write_all(body)?;
                sink.flush()?;
                Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset",
                )))
            }
            None => Err(TransportError::Status(404)),
        }
    }
}
