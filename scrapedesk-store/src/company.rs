use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend-assigned company identifier.
///
/// The backend may send ids as JSON strings or integers; both are kept in
/// their textual form so they can be used verbatim in request paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CompanyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CompanyId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CompanyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Unsigned(id) => Self(id.to_string()),
        })
    }
}

/// One scraped company as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "logo", alias = "logoPath", alias = "logo_path")]
    pub logo_path: Option<String>,
    #[serde(
        default,
        rename = "screenshot",
        alias = "screenshotPath",
        alias = "screenshot_path"
    )]
    pub screenshot_path: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl Company {
    pub fn new(id: impl Into<CompanyId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for display, empty when the backend did not provide one.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}
