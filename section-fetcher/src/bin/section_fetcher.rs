use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{info, LevelFilter};
use section_fetcher::{
    default_output_folder, DateModes, FetcherConfig, HttpTransport, Sections, SectionFetcher,
    DEFAULT_SECTIONS, DEFAULT_URL_PREFIX,
};

/// Download the print edition sections as numbered PDF pages
///
/// Date modes may be combined: a range (-b and -e), a single date (-d) and
/// today (-t). Without any of them today's paper is fetched.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Begin date for range
    #[arg(short = 'b', long = "begin", value_name = "MM/DD/YYYY")]
    begin: Option<String>,

    /// End date for range
    #[arg(short = 'e', long = "end", value_name = "MM/DD/YYYY")]
    end: Option<String>,

    /// Specify a date
    #[arg(short = 'd', long = "date", value_name = "MM/DD/YYYY")]
    date: Option<String>,

    /// Set date to today
    #[arg(short = 't', long = "today")]
    today: bool,

    /// Sections to grab
    #[arg(short = 's', long = "sections", default_value = DEFAULT_SECTIONS)]
    sections: String,

    /// Output folder (defaults to C:\WSJ on Windows, ~/WSJ elsewhere)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// URL prefix the section, page and date are appended to
    #[arg(short = 'p', long = "prefix", default_value = DEFAULT_URL_PREFIX)]
    prefix: String,

    /// Print status messages
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Prints the problem and the usage text to stdout, then exits with 1.
fn usage_error(message: &str) -> ! {
    println!("{}", message);
    println!();
    println!("{}", Cli::command().render_help());
    std::process::exit(1);
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => usage_error(e.to_string().trim_end()),
    };
    init_logging(cli.verbose);

    let modes = DateModes::parse(
        cli.begin.as_deref(),
        cli.end.as_deref(),
        cli.date.as_deref(),
        cli.today,
    )
    .unwrap_or_else(|e| usage_error(&e.to_string()));
    let sections = Sections::parse(&cli.sections).unwrap_or_else(|e| usage_error(&e.to_string()));

    if modes.implies_today() {
        info!("No date mode selected, grabbing today's paper");
    }

    let config = FetcherConfig {
        url_prefix: cli.prefix,
        output_folder: cli.output.unwrap_or_else(default_output_folder),
        sections,
    };
    info!(
        "Sections {} into {}",
        config.sections,
        config.output_folder.display()
    );

    let fetcher = SectionFetcher::from_config(HttpTransport::new(), &config);
    let dates = modes.dates(Local::now().date_naive());
    let reports = fetcher
        .fetch_dates(dates, &config.sections, &config.output_folder)
        .context("Download stopped on a filesystem error")?;

    for report in &reports {
        println!("{}", report.summary());
    }

    Ok(())
}
