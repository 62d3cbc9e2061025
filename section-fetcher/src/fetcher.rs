use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::{FetcherConfig, Sections};
use crate::download::{download_file, DownloadResult, Transport};
use crate::io::remove_empty_dir;
use crate::Result;

/// Date format of the URL component, e.g. `20161230`.
pub const URL_DATE_FORMAT: &str = "%Y%m%d";
/// Date format of the per-day folder, e.g. `12-30-16`.
pub const FOLDER_DATE_FORMAT: &str = "%m-%d-%y";

/// `{prefix}{section}{page:03}-{YYYYMMDD}.pdf`
pub fn page_url(prefix: &str, section: char, page: u32, date: NaiveDate) -> String {
    format!(
        "{}{}{:03}-{}.pdf",
        prefix,
        section,
        page,
        date.format(URL_DATE_FORMAT)
    )
}

pub fn date_folder(output_folder: &Path, date: NaiveDate) -> PathBuf {
    output_folder.join(date.format(FOLDER_DATE_FORMAT).to_string())
}

pub fn section_folder(output_folder: &Path, date: NaiveDate, section: char) -> PathBuf {
    date_folder(output_folder, date).join(section.to_string())
}

/// `{output}/{MM-DD-YY}/{section}/{page:03}.pdf`
pub fn page_path(output_folder: &Path, date: NaiveDate, section: char, page: u32) -> PathBuf {
    section_folder(output_folder, date, section).join(format!("{:03}.pdf", page))
}

/// One date's worth of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    date: NaiveDate,
    sections: Sections,
    output_folder: PathBuf,
}

impl FetchRequest {
    pub fn new(date: NaiveDate, sections: Sections, output_folder: impl Into<PathBuf>) -> Self {
        FetchRequest {
            date,
            sections,
            output_folder: output_folder.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    pub fn date_folder(&self) -> PathBuf {
        date_folder(&self.output_folder, self.date)
    }

    pub fn section_folder(&self, section: char) -> PathBuf {
        section_folder(&self.output_folder, self.date, section)
    }
}

/// A single page about to be attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProbe {
    pub section: char,
    pub page: u32,
    pub url: String,
    pub path: PathBuf,
}

impl PageProbe {
    pub fn new(prefix: &str, request: &FetchRequest, section: char, page: u32) -> Self {
        PageProbe {
            section,
            page,
            url: page_url(prefix, section, page, request.date()),
            path: page_path(request.output_folder(), request.date(), section, page),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub date: NaiveDate,
    pub section: char,
    /// Downloaded pages in page order.
    pub files: Vec<PathBuf>,
}

impl SectionReport {
    pub fn pages(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateReport {
    pub date: NaiveDate,
    pub sections: Vec<SectionReport>,
}

impl DateReport {
    pub fn total_pages(&self) -> usize {
        self.sections.iter().map(SectionReport::pages).sum()
    }

    /// One line per date, e.g. `12-30-16: A=16 B=10 (26 pages)`.
    pub fn summary(&self) -> String {
        let found: Vec<String> = self
            .sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}={}", s.section, s.pages()))
            .collect();
        if found.is_empty() {
            return format!("{}: no pages found", self.date.format(FOLDER_DATE_FORMAT));
        }
        format!(
            "{}: {} ({} pages)",
            self.date.format(FOLDER_DATE_FORMAT),
            found.join(" "),
            self.total_pages()
        )
    }
}

/// Walks the pages of each section until one comes back empty.
#[derive(Debug)]
pub struct SectionFetcher<T> {
    transport: T,
    url_prefix: String,
}

impl<T: Transport> SectionFetcher<T> {
    pub fn new(transport: T, url_prefix: impl Into<String>) -> Self {
        SectionFetcher {
            transport,
            url_prefix: url_prefix.into(),
        }
    }

    /// Uses the URL prefix from `config`.
    pub fn from_config(transport: T, config: &FetcherConfig) -> Self {
        SectionFetcher::new(transport, config.url_prefix.clone())
    }

    /// Downloads pages 1, 2, ... of `section` until the first empty probe.
    ///
    /// If no page was found the section folder is removed again, provided this
    /// call created it.
    pub fn fetch_section(&self, request: &FetchRequest, section: char) -> Result<SectionReport> {
        let section_dir = request.section_folder(section);
        let existed_before = section_dir.exists();

        let mut files = Vec::new();
        let mut page = 1;
        let mut more_pages_likely = true;
        while more_pages_likely {
            let probe = PageProbe::new(&self.url_prefix, request, section, page);
            info!(
                "Downloading  : {}\nto local file: {}",
                probe.url,
                probe.path.display()
            );
            let result = download_file(&self.transport, &probe.url, &probe.path)?;
            info!("Got {} bytes", result.byte_count());

            more_pages_likely = !result.is_end_of_section();
            if more_pages_likely {
                files.push(probe.path);
                page += 1;
            } else {
                log_end_of_section(&probe, &result);
            }
        }

        if files.is_empty() {
            info!("No pages in section {}", section);
            if !existed_before {
                remove_empty_dir(&section_dir);
            }
        }

        Ok(SectionReport {
            date: request.date(),
            section,
            files,
        })
    }

    /// Fetches every requested section for one date, in order.
    pub fn fetch_date(&self, request: &FetchRequest) -> Result<DateReport> {
        info!("Downloading date {}", request.date());
        let date_dir = request.date_folder();
        let existed_before = date_dir.exists();

        let mut sections = Vec::with_capacity(request.sections().len());
        for section in request.sections().iter() {
            sections.push(self.fetch_section(request, section)?);
        }

        let report = DateReport {
            date: request.date(),
            sections,
        };
        if report.total_pages() == 0 && !existed_before {
            remove_empty_dir(&date_dir);
        }
        Ok(report)
    }

    /// Fetches each date in turn, all with the same sections and folder.
    pub fn fetch_dates<I>(
        &self,
        dates: I,
        sections: &Sections,
        output_folder: &Path,
    ) -> Result<Vec<DateReport>>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates
            .into_iter()
            .map(|date| {
                let request = FetchRequest::new(date, sections.clone(), output_folder);
                self.fetch_date(&request)
            })
            .collect()
    }
}

fn log_end_of_section(probe: &PageProbe, result: &DownloadResult) {
    match result.failure() {
        Some(reason) => debug!(
            "Section {} ends before page {}: {}",
            probe.section, probe.page, reason
        ),
        None => debug!(
            "Section {} ends before page {}: empty response",
            probe.section, probe.page
        ),
    }
}
