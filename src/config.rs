// src/config.rs

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

pub const DEFAULT_TARGET_URL: &str = "https://ivy.yale.edu/course-stats/";
pub const DEFAULT_SEMESTER: &str = "202001";
/// AMTH always has a non-empty listing, so its page carries the date headers.
pub const DEFAULT_REFERENCE_SUBJECT: &str = "AMTH";
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);

static SEMESTER_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})(0[1-3])$").expect("semester regex"));

/// A term code such as `202001` (2020 spring) or `201903` (2019 fall).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    code: String,
    year: u16,
    term: Term,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn term(&self) -> Term {
        self.term
    }
}

impl FromStr for Semester {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let caps = SEMESTER_CODE
            .captures(s.trim())
            .ok_or_else(|| anyhow!("semester code {:?} is not YYYY01, YYYY02 or YYYY03", s))?;
        let year = caps[1].parse()?;
        let term = match &caps[2] {
            "01" => Term::Spring,
            "02" => Term::Summer,
            _ => Term::Fall,
        };
        Ok(Self {
            code: caps[0].to_string(),
            year,
            term,
        })
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let term = match self.term {
            Term::Spring => "Spring",
            Term::Summer => "Summer",
            Term::Fall => "Fall",
        };
        write!(f, "{} {} ({})", self.year, term, self.code)
    }
}

/// Settings for one demand scrape.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub target_url: String,
    pub semester: Semester,
    pub output_dir: PathBuf,
    pub reference_subject: String,
    /// Sleep between subject fetches.
    pub pause: Duration,
    /// Abort on the first rejected listing row instead of skipping it.
    pub strict: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            semester: DEFAULT_SEMESTER.parse().expect("default semester is valid"),
            output_dir: PathBuf::from("."),
            reference_subject: DEFAULT_REFERENCE_SUBJECT.to_string(),
            pause: DEFAULT_PAUSE,
            strict: false,
        }
    }
}
