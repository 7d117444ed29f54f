use crate::assets::{logo_url, screenshot_url, social_profiles, website_link};
use scrapedesk_store::{Company, CompanyId, StoreConfig, StoreError};
use url::Url;

/// State of the single-company screen.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Company),
    Failed(String),
    NotFound,
}

impl DetailState {
    pub fn from_result(result: Result<Company, StoreError>) -> Self {
        match result {
            Ok(company) => DetailState::Loaded(company),
            Err(StoreError::NotFound(_)) => DetailState::NotFound,
            Err(e) => DetailState::Failed(e.to_string()),
        }
    }

    /// Plain message shown in place of content, if there is no company.
    pub fn message(&self) -> Option<String> {
        match self {
            DetailState::Loading => Some("Loading...".to_string()),
            DetailState::Loaded(_) => None,
            DetailState::Failed(e) => Some(format!("Error: {}", e)),
            DetailState::NotFound => Some("No company data found".to_string()),
        }
    }
}

/// Detail screen for one company id.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetailView {
    pub id: CompanyId,
    pub state: DetailState,
}

impl CompanyDetailView {
    pub fn loading(id: CompanyId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
        }
    }

    /// Apply a fetch result. Results for a different id are stale and ignored.
    pub fn apply(&mut self, id: &CompanyId, result: Result<Company, StoreError>) -> bool {
        if *id != self.id {
            return false;
        }
        self.state = DetailState::from_result(result);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    pub link: Option<String>,
}

impl DetailField {
    fn text(label: &str, value: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.unwrap_or_default().to_string(),
            link: None,
        }
    }
}

/// Everything the detail screen draws, resolved from a loaded company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetail {
    pub breadcrumb: Vec<String>,
    pub name: String,
    pub summary: Vec<DetailField>,
    pub fields: Vec<DetailField>,
    pub logo_url: Option<Url>,
    pub screenshot_url: Option<Url>,
}

pub fn company_detail(company: &Company, config: &StoreConfig) -> CompanyDetail {
    let summary = vec![
        DetailField::text("Description", company.description.as_deref()),
        DetailField::text("Phone", company.phone.as_deref()),
        DetailField::text("Email", company.email.as_deref()),
    ];

    let mut fields = Vec::new();
    let website = company.website.as_deref().unwrap_or_default();
    fields.push(DetailField {
        label: "Website".to_string(),
        value: website.to_string(),
        link: (!website.is_empty()).then(|| website_link(website)),
    });
    fields.push(DetailField::text("Description", company.description.as_deref()));
    fields.push(DetailField::text("Email", company.email.as_deref()));
    for profile in social_profiles(company) {
        fields.push(DetailField {
            label: profile.network.label().to_string(),
            value: profile.handle,
            link: Some(profile.url),
        });
    }
    fields.push(DetailField::text("Address", company.address.as_deref()));

    CompanyDetail {
        breadcrumb: vec!["Home".to_string(), company.display_name().to_string()],
        name: company.display_name().to_string(),
        summary,
        fields,
        logo_url: logo_url(config, company),
        screenshot_url: screenshot_url(config, company),
    }
}

/// Plain-text rendering used by `scrapedesk show`.
pub fn render_detail_text(detail: &CompanyDetail) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", detail.breadcrumb.join(" / ")));
    out.push_str(&format!("\n{}\n", detail.name));
    out.push_str(&format!("{}\n", "─".repeat(detail.name.chars().count().max(1))));

    for field in &detail.summary {
        out.push_str(&format!("{:<12} {}\n", format!("{}:", field.label), field.value));
    }

    out.push_str("\nCompany Details\n");
    for field in &detail.fields {
        match &field.link {
            Some(link) if *link != field.value => out.push_str(&format!(
                "{:<12} {} <{}>\n",
                format!("{}:", field.label),
                field.value,
                link
            )),
            _ => out.push_str(&format!("{:<12} {}\n", format!("{}:", field.label), field.value)),
        }
    }

    if let Some(ref logo) = detail.logo_url {
        out.push_str(&format!("\nLogo:        {}\n", logo));
    }
    if let Some(ref screenshot) = detail.screenshot_url {
        out.push_str(&format!("Screenshot:  {}\n", screenshot));
    }

    out
}
