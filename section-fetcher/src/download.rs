use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;
use reqwest::blocking::Client;
use thiserror::Error;

use crate::io::{ensure_parent_dir, remove_file_quietly};
use crate::{Error, Result};

/// Why a single fetch produced nothing. Callers only ever see this folded into
/// a zero-byte [`DownloadResult`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FetchResult = core::result::Result<u64, TransportError>;

/// Something that can stream the body behind a URL into a writer.
pub trait Transport {
    /// Writes the whole body to `sink` and returns the number of bytes written.
    fn fetch_into(&self, url: &str, sink: &mut dyn Write) -> FetchResult;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch_into(&self, url: &str, sink: &mut dyn Write) -> FetchResult {
        (**self).fetch_into(url, sink)
    }
}

/// Blocking HTTP GET with the client library's default timeouts and redirects.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    fn fetch_into(&self, url: &str, sink: &mut dyn Write) -> FetchResult {
        let mut response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.copy_to(sink)?)
    }
}

/// Outcome of one download attempt.
///
/// A failed fetch and an empty body look the same: zero bytes. The failure
/// text is kept so the two can be told apart later without touching callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    byte_count: u64,
    failure: Option<String>,
}

impl DownloadResult {
    pub fn fetched(byte_count: u64) -> Self {
        DownloadResult {
            byte_count,
            failure: None,
        }
    }

    pub fn missing(failure: Option<String>) -> Self {
        DownloadResult {
            byte_count: 0,
            failure,
        }
    }

    pub fn byte_count(&self) -> u64 {
        self.byte_count
    }

    pub fn success(&self) -> bool {
        self.byte_count > 0
    }

    /// Zero bytes means the page does not exist and the section is over.
    pub fn is_end_of_section(&self) -> bool {
        self.byte_count == 0
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Remembers the first error the wrapped writer returns, so a local write
/// failure can be told apart from the transport giving up.
struct SinkGuard<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> Write for SinkGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).map_err(|e| self.record(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().map_err(|e| self.record(e))
    }
}

impl<W> SinkGuard<W> {
    fn record(&mut self, e: io::Error) -> io::Error {
        let copy = io::Error::new(e.kind(), e.to_string());
        if self.error.is_none() {
            self.error = Some(e);
        }
        copy
    }
}

/// Streams `url` into `sink` and flushes it.
///
/// The outer `Err` is a failure of `sink` itself; the inner one is the
/// transport's.
pub(crate) fn stream_body<T, W>(transport: &T, url: &str, sink: W) -> io::Result<FetchResult>
where
    T: Transport + ?Sized,
    W: Write,
{
    let mut guard = SinkGuard {
        inner: sink,
        error: None,
    };
    let fetched = transport.fetch_into(url, &mut guard);
    if let Some(e) = guard.error.take() {
        return Err(e);
    }
    if fetched.is_ok() {
        guard.inner.flush()?;
    }
    Ok(fetched)
}

/// Downloads `url` to `output_file`, creating parent directories as needed.
///
/// Transport failures are not errors here: they come back as a zero-byte
/// result and no file is left behind. Only local filesystem failures are
/// returned as `Err`.
pub fn download_file<T, P>(transport: &T, url: &str, output_file: P) -> Result<DownloadResult>
where
    T: Transport + ?Sized,
    P: AsRef<Path>,
{
    let output_file = output_file.as_ref();
    ensure_parent_dir(output_file)?;

    let file = File::create(output_file).map_err(|e| Error::filesystem(output_file, e))?;
    let mut writer = BufWriter::new(file);
    let streamed = stream_body(transport, url, &mut writer);
    drop(writer);

    match streamed {
        Ok(Ok(bytes)) if bytes > 0 => Ok(DownloadResult::fetched(bytes)),
        Ok(Ok(_)) => {
            debug!("Empty response from {}", url);
            remove_file_quietly(output_file);
            Ok(DownloadResult::missing(None))
        }
        Ok(Err(e)) => {
            debug!("No content from {}: {}", url, e);
            remove_file_quietly(output_file);
            Ok(DownloadResult::missing(Some(e.to_string())))
        }
        Err(e) => {
            remove_file_quietly(output_file);
            Err(Error::filesystem(output_file, e))
        }
    }
}
