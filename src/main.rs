//! scorefeed - export live-score JavaScript feeds as CSV

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use scorefeed::config::{
    Config, LineEnding, MissingKeyPolicy, OutputFormat, Source, Tokenizer, DEFAULT_URL,
};
use scorefeed::fetch::{cache_buster, fetcher_for};
use scorefeed::output::{RowSink, SinkFactory};
use scorefeed::Exporter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Csv,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Export match data from a live-score JavaScript feed as CSV
#[derive(Parser, Debug)]
#[command(name = "scorefeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output file (stdout if not given)
    #[arg(value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Feed URL; a timestamp is appended as the query string
    #[arg(long, default_value = DEFAULT_URL, conflicts_with = "input")]
    url: String,

    /// Read a saved feed from a file instead of fetching
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: CliOutputFormat,

    /// Terminate CSV rows with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Keep commas inside quoted strings when splitting literals
    #[arg(long)]
    quote_aware: bool,

    /// Drop rows that cannot be joined or exported instead of failing
    #[arg(long)]
    skip_unresolved: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print the columns a joined record can carry and exit
    #[arg(long)]
    list_columns: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        let source = match &self.input {
            Some(path) => Source::File(path.clone()),
            None => Source::Url(self.url.clone()),
        };

        Config::new(source)
            .with_output(self.outfile.clone())
            .with_output_format(self.format.into())
            .with_line_ending(if self.crlf { LineEnding::CrLf } else { LineEnding::Lf })
            .with_tokenizer(if self.quote_aware {
                Tokenizer::QuoteAware
            } else {
                Tokenizer::Naive
            })
            .with_missing_key(if self.skip_unresolved {
                MissingKeyPolicy::Skip
            } else {
                MissingKeyPolicy::Abort
            })
            .with_timeout_secs(self.timeout)
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    let exporter = Exporter::with_preset()
        .context("Invalid export layout")?
        .configured(&config);

    if cli.list_columns {
        let mut stdout = io::stdout().lock();
        for column in exporter.plan().output_columns() {
            writeln!(stdout, "{}", column)?;
        }
        return Ok(());
    }

    let fetcher = fetcher_for(&config)?;
    let text = fetcher
        .fetch(cache_buster())
        .context("Failed to fetch feed")?;

    exporter
        .export(&text, || open_sink(&config))
        .context("Failed to export feed")?;
    Ok(())
}

fn open_sink(config: &Config) -> scorefeed::Result<Box<dyn RowSink>> {
    let writer: Box<dyn Write> = match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                io::Error::new(e.kind(), format!("cannot create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(SinkFactory::create(
        config.output_format,
        config.line_ending,
        writer,
    ))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
