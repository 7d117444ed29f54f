// CSV export of the company collection

use crate::error::Result;
use scrapedesk_store::Company;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CSV_HEADER: &str = "ID,Name,Description,Address,Phone,Email";
pub const CSV_FILE_NAME: &str = "companies.csv";

/// One line per company after the header, fields joined by commas.
///
/// Values are written raw: embedded commas, quotes and newlines are not
/// escaped. Missing fields become empty columns.
pub fn companies_csv(companies: &[Company]) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for company in companies {
        csv.push_str(&csv_row(company));
        csv.push('\n');
    }

    csv
}

pub fn csv_row(company: &Company) -> String {
    [
        company.id.as_str(),
        company.name.as_deref().unwrap_or_default(),
        company.description.as_deref().unwrap_or_default(),
        company.address.as_deref().unwrap_or_default(),
        company.phone.as_deref().unwrap_or_default(),
        company.email.as_deref().unwrap_or_default(),
    ]
    .join(",")
}

pub fn save_csv(companies: &[Company], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(companies_csv(companies).as_bytes())?;
    info!("Exported {} companies to {}", companies.len(), path.display());
    Ok(())
}

/// Write `companies.csv` into `dir`, returning the file path.
pub fn export_to_dir(companies: &[Company], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CSV_FILE_NAME);
    save_csv(companies, &path)?;
    Ok(path)
}
