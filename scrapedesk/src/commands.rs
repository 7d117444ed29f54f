use clap::{arg, command, value_parser};
use scrapedesk_core::export::CSV_FILE_NAME;
use scrapedesk_core::DEFAULT_BASE_URL;
use std::path::PathBuf;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("scrapedesk")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("scrapedesk")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(--"base-url" <URL>)
                .required(false)
                .help("Base URL of the company records backend")
                .env("SCRAPEDESK_URL")
                .value_parser(value_parser!(Url))
                .default_value(DEFAULT_BASE_URL)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" ...)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .global(true),
        )
        .arg(
            arg!(--"log-file" <PATH>)
                .required(false)
                .help("Write logs to a file instead of stderr")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("ui")
                .about("Browse, select, delete and export companies interactively")
                .arg(
                    arg!(--"export-dir" <DIR>)
                        .required(false)
                        .help(format!("Directory {} is downloaded to", CSV_FILE_NAME))
                        .default_value("."),
                ),
        )
        .subcommand(
            command!("list").about("Print every company on record").arg(
                arg!(--"json" "Print the records as JSON")
                    .required(false)
                    .action(clap::ArgAction::SetTrue),
            ),
        )
        .subcommand(
            command!("show")
                .about("Print the details of one company")
                .arg(arg!(<ID> "The company id")),
        )
        .subcommand(
            command!("scrape")
                .about(
                    "Ask the backend to fetch and save details for a website, then refresh the \
                list.",
                )
                .arg(arg!(<URL> "The website to scrape (ftp, http or https)")),
        )
        .subcommand(
            command!("delete")
                .about("Delete one or more companies, then refresh the list")
                .arg(arg!(<ID> ... "The company ids to delete")),
        )
        .subcommand(
            command!("export")
                .about("Download every company as CSV")
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help(format!("Where to save the CSV (default: ./{})", CSV_FILE_NAME))
                        .conflicts_with("stdout"),
                )
                .arg(
                    arg!(--"stdout" "Write the CSV to standard output")
                        .required(false)
                        .action(clap::ArgAction::SetTrue)
                        .conflicts_with("output"),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command_argument_builder().debug_assert();
    }

    #[test]
    fn test_base_url_defaults_to_localhost() {
        let matches = command_argument_builder()
            .try_get_matches_from(["scrapedesk", "list"])
            .unwrap();
        let base_url = matches.get_one::<Url>("base-url").unwrap();
        // Only holds when SCRAPEDESK_URL is unset in the test environment
        if std::env::var_os("SCRAPEDESK_URL").is_none() {
            assert_eq!(base_url.as_str(), "http://localhost:8000/");
        }
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let matches = command_argument_builder()
            .try_get_matches_from([
                "scrapedesk",
                "delete",
                "1",
                "2",
                "-vv",
                "--base-url",
                "http://records.test:9000",
            ])
            .unwrap();

        assert_eq!(matches.get_count("verbose"), 2);
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "delete");
        let ids: Vec<&String> = sub.get_many::<String>("ID").unwrap().collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(
            sub.get_one::<Url>("base-url").unwrap().as_str(),
            "http://records.test:9000/"
        );
    }

    #[test]
    fn test_export_output_conflicts_with_stdout() {
        let result = command_argument_builder().try_get_matches_from([
            "scrapedesk",
            "export",
            "-o",
            "out.csv",
            "--stdout",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_requires_an_id() {
        let result = command_argument_builder().try_get_matches_from(["scrapedesk", "delete"]);
        assert!(result.is_err());
    }
}
