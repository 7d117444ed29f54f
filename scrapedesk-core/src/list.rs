use crate::assets::{SocialNetwork, list_profiles};
use crate::error::Result;
use crate::export::companies_csv;
use crate::request::StoreRequest;
use crate::selection::{SelectAllState, SelectionSet};
use crate::validate::ScrapeUrl;
use scrapedesk_store::{Company, CompanyId, StoreError};
use tracing::{debug, warn};

pub const LIST_COLUMNS: [&str; 6] = [
    "COMPANY",
    "SOCIAL PROFILES",
    "DESCRIPTION",
    "ADDRESS",
    "PHONE NO.",
    "EMAIL",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Ready,
    Failed(String),
}

/// One table row, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: CompanyId,
    pub selected: bool,
    pub name: String,
    pub socials: Vec<SocialNetwork>,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl ListRow {
    pub fn socials_text(&self) -> String {
        self.socials
            .iter()
            .map(|network| network.tag())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Cell values in `LIST_COLUMNS` order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.socials_text(),
            self.description.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }
}

/// State of the company list screen: the last fetched collection and the
/// rows checked for bulk actions.
#[derive(Debug, Clone)]
pub struct CompanyList {
    companies: Vec<Company>,
    selection: SelectionSet,
    status: ListStatus,
}

impl CompanyList {
    pub fn new() -> Self {
        Self {
            companies: Vec::new(),
            selection: SelectionSet::new(),
            status: ListStatus::Loading,
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn get(&self, index: usize) -> Option<&Company> {
        self.companies.get(index)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn refresh_request(&mut self) -> StoreRequest {
        self.status = ListStatus::Loading;
        StoreRequest::Refresh
    }

    /// Apply the result of a collection fetch. A successful fetch replaces the
    /// collection and resets the selection; a failure replaces the content
    /// with the error message.
    pub fn apply_refresh(&mut self, result: std::result::Result<Vec<Company>, StoreError>) {
        match result {
            Ok(companies) => {
                debug!("List refreshed with {} companies", companies.len());
                self.companies = companies;
                self.status = ListStatus::Ready;
            }
            Err(e) => {
                warn!("Failed to load companies: {}", e);
                self.companies.clear();
                self.status = ListStatus::Failed(e.to_string());
            }
        }
        self.selection.clear();
    }

    pub fn toggle(&mut self, id: &CompanyId) {
        self.selection.toggle(id);
    }

    pub fn toggle_all(&mut self) {
        self.selection.toggle_all(&self.companies);
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selection.state(&self.companies)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Validate the scrape input. Nothing is sent when validation fails.
    pub fn scrape_request(&self, input: &str) -> Result<StoreRequest> {
        let url = ScrapeUrl::parse(input)?;
        Ok(StoreRequest::Scrape(url))
    }

    pub fn delete_request(&self) -> StoreRequest {
        StoreRequest::Delete {
            ids: self.selection.selected_ids(&self.companies),
        }
    }

    pub fn export_csv(&self) -> String {
        companies_csv(&self.companies)
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.companies
            .iter()
            .map(|company| ListRow {
                id: company.id.clone(),
                selected: self.selection.is_selected(&company.id),
                name: company.display_name().to_string(),
                socials: list_profiles(company),
                description: company.description.clone().unwrap_or_default(),
                address: company.address.clone().unwrap_or_default(),
                phone: company.phone.clone().unwrap_or_default(),
                email: company.email.clone().unwrap_or_default(),
            })
            .collect()
    }
}

impl Default for CompanyList {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-width plain-text table used by `scrapedesk list`.
pub fn render_table(rows: &[ListRow]) -> String {
    let id_width = rows
        .iter()
        .map(|r| r.id.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max(2);

    let mut widths = LIST_COLUMNS.map(|c| c.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells().iter()) {
            *width = (*width).max(cell.chars().count()).min(40);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{:<id_width$}", "ID"));
    for (column, width) in LIST_COLUMNS.iter().zip(widths.iter()) {
        out.push_str(&format!("  {:<width$}", column, width = *width));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<id_width$}", row.id.as_str()));
        for (cell, width) in row.cells().iter().zip(widths.iter()) {
            out.push_str(&format!("  {:<width$}", truncate(cell, *width), width = *width));
        }
        out.push('\n');
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_render_table_has_header_and_rows() {
        let mut list = CompanyList::new();
        let mut acme = Company::new("1").with_name("Acme");
        acme.linkedin = Some("https://linkedin.com/company/acme".to_string());
        list.apply_refresh(Ok(vec![acme, Company::new("22").with_name("Globex")]));

        let table = render_table(&list.rows());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  COMPANY"));
        assert!(lines[1].starts_with("1   Acme"));
        assert!(lines[1].contains("in"));
        assert!(lines[2].starts_with("22  Globex"));
    }
}
