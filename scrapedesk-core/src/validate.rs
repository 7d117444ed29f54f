use crate::error::{CoreError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SCRAPE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(ftp|http|https)://[^ "]+$"#).expect("scrape URL pattern"));

/// A URL that passed the scrape pre-check: `ftp|http|https`, then `://`,
/// then at least one character with no spaces or double quotes.
///
/// This is a shape check only, the backend does the real parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeUrl(String);

impl ScrapeUrl {
    pub fn parse(input: &str) -> Result<Self> {
        if is_valid_scrape_url(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(CoreError::InvalidScrapeUrl(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScrapeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_valid_scrape_url(input: &str) -> bool {
    SCRAPE_URL.is_match(input)
}
