use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

pub const DEFAULT_URL_PREFIX: &str = "http://online.wsj.com/public/resources/documents/print/WSJ_-";
pub const DEFAULT_SECTIONS: &str = "ABCDM";

/// Ordered set of single-character section codes, e.g. `"ABCDM"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections(Vec<char>);

#[allow(clippy::len_without_is_empty)]
impl Sections {
    pub fn parse(input: &str) -> Result<Self> {
        let mut codes: Vec<char> = Vec::new();
        for c in input.trim().chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(Error::invalid_input(format!(
                    "Invalid section code '{}', sections are single letters or digits such as {}",
                    c, DEFAULT_SECTIONS
                )));
            }
            if !codes.contains(&c) {
                codes.push(c);
            }
        }

        if codes.is_empty() {
            return Err(Error::invalid_input(
                "Please specify a valid section to grab",
            ));
        }
        Ok(Sections(codes))
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    /// At least one: parsing rejects an empty list.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for Sections {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Sections::parse(s)
    }
}

impl fmt::Display for Sections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Default for Sections {
    fn default() -> Self {
        Sections(DEFAULT_SECTIONS.chars().collect())
    }
}

/// Everything a run needs besides the dates.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub url_prefix: String,
    pub output_folder: PathBuf,
    pub sections: Sections,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfig {
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            output_folder: default_output_folder(),
            sections: Sections::default(),
        }
    }
}

/// `C:\WSJ` on Windows, `<home>/WSJ` elsewhere.
pub fn default_output_folder() -> PathBuf {
    if cfg!(windows) {
        return PathBuf::from("C:\\WSJ");
    }
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("WSJ"),
        |base| base.home_dir().join("WSJ"),
    )
}
