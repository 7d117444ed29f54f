use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scrapedesk_core::detail::{company_detail, render_detail_text};
use scrapedesk_core::export::{CSV_FILE_NAME, companies_csv, save_csv};
use scrapedesk_core::list::{CompanyList, render_table};
use scrapedesk_core::request::{RefreshCause, StoreRequest, StoreResponse, execute, refresh};
use scrapedesk_core::validate::ScrapeUrl;
use scrapedesk_core::{CompanyId, HttpStore, RecordStore, StoreConfig};
use scrapedesk_tui::UiOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;
use url::Url;

/// Build the backend location from the global `--base-url` argument.
pub fn store_config(matches: &ArgMatches) -> Result<StoreConfig> {
    let base_url = matches
        .get_one::<Url>("base-url")
        .cloned()
        .context("No backend URL given")?;
    Ok(StoreConfig::from_url(base_url)?)
}

/// Expand a leading `~` in a user supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Where `export` writes to when not streaming to stdout.
pub fn export_destination(args: &ArgMatches) -> PathBuf {
    args.get_one::<String>("output")
        .map(|path| expand_path(path))
        .unwrap_or_else(|| PathBuf::from(CSV_FILE_NAME))
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message);
    spinner
}

fn print_divider(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "═".repeat(60).bright_blue().bold())?;
    Ok(())
}

pub async fn handle_ui(store: HttpStore, args: &ArgMatches) -> Result<()> {
    let export_dir = args
        .get_one::<String>("export-dir")
        .map(|dir| expand_path(dir))
        .unwrap_or_else(|| PathBuf::from("."));
    let config = store.config().clone();
    let options = UiOptions { export_dir };
    let runtime = Handle::current();

    info!("Starting UI against {}", config.base_url());
    tokio::task::spawn_blocking(move || scrapedesk_tui::run(store, config, options, runtime))
        .await?
}

pub async fn handle_list<S: RecordStore>(
    store: &S,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let companies = refresh(store).await?;

    if args.get_flag("json") {
        serde_json::to_writer_pretty(&mut *out, &companies)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut list = CompanyList::new();
    list.apply_refresh(Ok(companies));

    if list.is_empty() {
        writeln!(out, "No companies yet. Run `scrapedesk scrape <URL>` to add one.")?;
        return Ok(());
    }

    write!(out, "{}", render_table(&list.rows()))?;
    writeln!(out)?;
    writeln!(out, "{} {} companies", "✓".green().bold(), list.len())?;
    Ok(())
}

pub async fn handle_show<S: RecordStore>(
    store: &S,
    config: &StoreConfig,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let id = args.get_one::<String>("ID").context("No company id given")?;
    let company = store.get(&CompanyId::from(id.as_str())).await?;

    let detail = company_detail(&company, config);
    write!(out, "{}", render_detail_text(&detail))?;
    Ok(())
}

pub async fn handle_scrape<S: RecordStore>(
    store: &S,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let input = args.get_one::<String>("URL").context("No URL given")?;
    // Rejected before anything touches the network
    let url = ScrapeUrl::parse(input)?;

    let progress = spinner(format!("Fetching and saving details for {}...", url));
    let response = execute(store, StoreRequest::Scrape(url)).await;
    progress.finish_and_clear();

    match response {
        StoreResponse::Refreshed {
            cause: RefreshCause::Scraped { url },
            result,
        } => {
            let companies = result?;
            writeln!(out, "{} Saved details for {}", "✓".green().bold(), url)?;
            writeln!(out, "{} {} companies on record", "→".blue(), companies.len())?;
            Ok(())
        }
        StoreResponse::ScrapeFailed { url, error } => {
            Err(anyhow::Error::new(error).context(format!("Could not save details for {}", url)))
        }
        other => bail!("Unexpected response to scrape: {:?}", other),
    }
}

pub async fn handle_delete<S: RecordStore>(
    store: &S,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let ids: Vec<CompanyId> = args
        .get_many::<String>("ID")
        .into_iter()
        .flatten()
        .map(|id| CompanyId::from(id.as_str()))
        .collect();

    let progress = spinner(format!("Deleting {} companies...", ids.len()));
    let response = execute(store, StoreRequest::Delete { ids }).await;
    progress.finish_and_clear();

    let (summary, result) = match response {
        StoreResponse::Refreshed {
            cause: RefreshCause::Deleted(summary),
            result,
        } => (summary, result),
        other => bail!("Unexpected response to delete: {:?}", other),
    };

    print_divider(out)?;
    writeln!(
        out,
        "{} Deleted {} of {} companies",
        "✓".green().bold(),
        summary.requested - summary.failed,
        summary.requested
    )?;
    if summary.failed > 0 {
        writeln!(
            out,
            "{} {} deletes failed (see logs)",
            "⚠".yellow().bold(),
            summary.failed
        )?;
    }
    let remaining = result?;
    writeln!(out, "{} {} companies remain", "→".blue(), remaining.len())?;
    print_divider(out)?;
    Ok(())
}

pub async fn handle_export<S: RecordStore>(
    store: &S,
    args: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let companies = refresh(store).await?;

    if args.get_flag("stdout") {
        write!(out, "{}", companies_csv(&companies))?;
        return Ok(());
    }

    let path = export_destination(args);
    save_csv(&companies, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writeln!(
        out,
        "{} Exported {} companies to {}",
        "✓".green().bold(),
        companies.len(),
        path.display().to_string().bright_white()
    )?;
    Ok(())
}
