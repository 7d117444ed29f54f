use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use scrapedesk::command_argument_builder;
use scrapedesk::handlers::{
    handle_delete, handle_export, handle_list, handle_scrape, handle_show, handle_ui, store_config,
};
use scrapedesk_core::{HttpStore, print_banner};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    // Show banner unless --quiet is set or stdout carries data
    if show_banner(&chosen_command) {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    if let Err(e) = init_logging(&chosen_command) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }

    if let Err(e) = run(&chosen_command).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(chosen_command: &ArgMatches) -> Result<()> {
    let config = store_config(chosen_command)?;
    let store = HttpStore::new(config.clone())?;
    let mut stdout = io::stdout();

    match chosen_command.subcommand() {
        Some(("ui", args)) => handle_ui(store, args).await,
        Some(("list", args)) => handle_list(&store, args, &mut stdout).await,
        Some(("show", args)) => handle_show(&store, &config, args, &mut stdout).await,
        Some(("scrape", args)) => handle_scrape(&store, args, &mut stdout).await,
        Some(("delete", args)) => handle_delete(&store, args, &mut stdout).await,
        Some(("export", args)) => handle_export(&store, args, &mut stdout).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

fn show_banner(chosen_command: &ArgMatches) -> bool {
    if chosen_command.get_flag("quiet") {
        return false;
    }
    match chosen_command.subcommand() {
        Some(("list", args)) => !args.get_flag("json"),
        Some(("export", args)) => !args.get_flag("stdout"),
        _ => true,
    }
}

fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(chosen_command: &ArgMatches) -> Result<()> {
    let level = log_level(chosen_command.get_count("verbose"));

    if let Some(path) = chosen_command.get_one::<PathBuf>("log-file") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if chosen_command.subcommand_name() != Some("ui") {
        // The UI owns the terminal, so it only logs when given a file
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}
