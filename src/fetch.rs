//! Fetch collaborators returning the raw feed text

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::info;

use crate::config::{Config, Source};
use crate::error::{ExportError, Result};

/// Something that produces one complete feed response
pub trait Fetch {
    /// Return the decoded text; `cache_buster` keeps proxies from serving stale data
    fn fetch(&self, cache_buster: i64) -> Result<String>;
}

/// Current Unix timestamp, used as the cache-busting query string
pub fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Plain HTTP GET of `<url>?<cache_buster>`
pub struct HttpFetcher {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scorefeed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Full request URL for one cache buster
    pub fn request_url(&self, cache_buster: i64) -> String {
        format!("{}?{}", self.url, cache_buster)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, cache_buster: i64) -> Result<String> {
        let url = self.request_url(cache_buster);
        info!("fetching {}", url);

        let text = self
            .client
            .get(&url)
            .send()?
            .error_for_status()?
            .text()?;

        info!("received {} bytes", text.len());
        Ok(text)
    }
}

/// Reads a previously saved response from disk
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, _cache_buster: i64) -> Result<String> {
        info!("reading {}", self.path.display());
        fs::read_to_string(&self.path)
            .map_err(|e| ExportError::Fetch(format!("{}: {}", self.path.display(), e)))
    }
}

/// Pick the fetcher for the configured source
pub fn fetcher_for(config: &Config) -> Result<Box<dyn Fetch>> {
    Ok(match &config.source {
        Source::Url(url) => Box::new(HttpFetcher::new(
            url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?),
        Source::File(path) => Box::new(FileFetcher::new(path.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_appends_cache_buster() {
        let fetcher = HttpFetcher::new("http://example.com/data.js", Duration::from_secs(1)).unwrap();
        assert_eq!(fetcher.request_url(42), "http://example.com/data.js?42");
    }

    #[test]
    fn test_file_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.js");
        fs::write(&path, "var A=Array(0);").unwrap();

        assert_eq!(FileFetcher::new(&path).fetch(0).unwrap(), "var A=Array(0);");
        let missing = FileFetcher::new(dir.path().join("nope.js")).fetch(0);
        assert!(matches!(missing, Err(ExportError::Fetch(_))));
    }

    #[test]
    fn test_cache_buster_is_recent() {
        assert!(cache_buster() > 1_500_000_000);
    }
}
