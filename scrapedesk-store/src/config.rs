use crate::error::{Result, StoreError};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the backend lives. API routes and static assets are both resolved
/// against `base_url`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    base_url: Url,
}

impl StoreConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Self::from_url(parsed)
    }

    pub fn from_url(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET`/`POST` target for the whole collection.
    pub fn companies_url(&self) -> Url {
        self.join(&["api", "companies"])
    }

    pub fn company_url(&self, id: &str) -> Url {
        self.join(&["api", "companies", id])
    }

    pub fn scrape_url(&self) -> Url {
        self.join(&["api", "companies", "scrape"])
    }

    pub fn logo_url(&self, file_name: &str) -> Url {
        self.join(&["logos", file_name])
    }

    pub fn screenshot_url(&self, file_name: &str) -> Url {
        self.join(&["screenshots", file_name])
    }

    fn join(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // from_url rejects cannot-be-a-base URLs, so path_segments_mut succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}
