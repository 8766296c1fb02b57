//! Configuration for loading, classifying and writing employee data.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{EngagementError, Result};

/// Default rows per record batch when reading
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Environment variable that overrides the reader batch size
pub const BATCH_SIZE_ENV: &str = "ENGAGEMENT_BATCH_SIZE";

/// Default share of qualifying employees a department must exceed
///
/// The original analysis described this cut-off as "more than 50%" but
/// filtered on 40; 40 is kept as the default.
pub const DEFAULT_THRESHOLD: f64 = 40.0;

/// Default minimum satisfaction rating for a qualifying employee
pub const DEFAULT_MIN_RATING: i64 = 4;

/// Engagement levels that qualify by default
pub const DEFAULT_QUALIFYING_LEVELS: [&str; 2] = ["High", "Medium"];

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var(BATCH_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Policy for the department classifier
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Departments are kept when their percentage is strictly greater than this
    pub threshold: f64,
    /// Minimum satisfaction rating (inclusive) for a qualifying employee
    pub min_rating: i64,
    /// Engagement levels that count as qualifying
    pub qualifying_levels: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_rating: DEFAULT_MIN_RATING,
            qualifying_levels: DEFAULT_QUALIFYING_LEVELS
                .iter()
                .map(|level| (*level).to_string())
                .collect(),
        }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_min_rating(mut self, min_rating: i64) -> Self {
        self.min_rating = min_rating;
        self
    }

    #[must_use]
    pub fn with_qualifying_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qualifying_levels = levels.into_iter().map(Into::into).collect();
        self
    }

    /// Check the configuration for values the classifier cannot use
    ///
    /// # Errors
    /// Returns a configuration error for a non-finite threshold
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            return Err(EngagementError::config(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        if self.qualifying_levels.is_empty() {
            log::warn!("No qualifying engagement levels configured; no employee can qualify");
        }
        Ok(())
    }
}

impl fmt::Display for ClassifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classifier Configuration:")?;
        writeln!(f, "  Threshold: > {}%", self.threshold)?;
        writeln!(f, "  Minimum Rating: {}", self.min_rating)?;
        write!(f, "  Qualifying Levels: {}", self.qualifying_levels.join(", "))
    }
}

/// Configuration for reading employee tables
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Rows per record batch
    pub batch_size: usize,
    /// Field delimiter for delimited text input
    pub delimiter: u8,
    /// Whether delimited text input starts with a header row
    pub has_header: bool,
    /// Maximum number of files read concurrently from a directory
    pub parallelism: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
            delimiter: b',',
            has_header: true,
            parallelism: num_cpus::get(),
        }
    }
}

impl ReaderConfig {
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Delimited text with a header row
    #[default]
    Csv,
    /// A JSON array of result objects
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Where and how results are written
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl OutputConfig {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
