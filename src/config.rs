//! Configuration handling for scorefeed

use std::path::PathBuf;

/// Default feed location; a numeric cache buster is appended as the query string
pub const DEFAULT_URL: &str = "http://www.nowgoal.com/data/bf_en2.js";

/// Where the raw JavaScript text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self {
        Source::Url(DEFAULT_URL.to_string())
    }
}

/// Output serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Row terminator for CSV output, applied to every row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl std::str::FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            _ => Err(format!("Unknown line ending: {}", s)),
        }
    }
}

/// How an array-literal body is split into fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenizer {
    /// Split on every comma, quoted or not
    #[default]
    Naive,
    /// Keep commas inside quoted strings and honour `\'` escapes
    QuoteAware,
}

/// What to do when a primary row's keyed-table key has no entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Fail the whole export
    #[default]
    Abort,
    /// Log the row and leave it out
    Skip,
}

/// Configuration for one export run
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed location
    pub source: Source,
    /// Output file; stdout when unset
    pub output: Option<PathBuf>,
    /// Output format
    pub output_format: OutputFormat,
    /// CSV row terminator
    pub line_ending: LineEnding,
    /// Literal splitting strategy
    pub tokenizer: Tokenizer,
    /// Handling of unresolved keyed-table keys
    pub missing_key: MissingKeyPolicy,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::default(),
            output: None,
            output_format: OutputFormat::default(),
            line_ending: LineEnding::default(),
            tokenizer: Tokenizer::default(),
            missing_key: MissingKeyPolicy::default(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Set output file
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set CSV row terminator
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set literal splitting strategy
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Set missing-key policy
    pub fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }

    /// Set HTTP timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
