//! CLI entry point: log into Vanguard Personal Investor and export the
//! Performance Details table to CSV.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use vanguard_export::{prompt, ScrapeConfig, Scraper, ScraperError, VanguardScraper};

#[derive(Parser, Debug)]
#[command(
    name = "vanguard-export",
    about = "Log into Vanguard Personal Investor and export the Performance Details table to CSV"
)]
struct Args {
    /// Vanguard username; prompts if omitted
    #[arg(long)]
    username: Option<String>,

    /// Vanguard password; prompts securely if omitted
    #[arg(long)]
    password: Option<String>,

    /// Destination CSV path
    #[arg(long, default_value = "vanguard_performance.csv")]
    output_file: PathBuf,

    /// Run the browser in headless mode
    #[arg(long)]
    headless: bool,

    /// Maximum wait time for elements to appear (milliseconds)
    #[arg(long, default_value_t = 30_000)]
    max_wait_ms: u64,

    /// Optional path to write the final page HTML for troubleshooting
    #[arg(long)]
    store_html_debug: Option<PathBuf>,

    /// Keep the browser open if an error occurs so the state can be
    /// inspected before exiting
    #[arg(long)]
    pause_on_error: bool,

    /// Logging verbosity
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    log_level: String,
}

fn filter_directive(log_level: &str) -> &'static str {
    match log_level {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        "CRITICAL" => "error",
        _ => "info",
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(&args.log_level)))
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Scrape failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ScraperError> {
    let (username, password) = prompt::resolve_credentials(args.username, args.password)?;

    let mut config = ScrapeConfig::new(username, password)
        .with_output_file(args.output_file)
        .with_headless(args.headless)
        .with_max_wait(Duration::from_millis(args.max_wait_ms))
        .with_pause_on_error(args.pause_on_error);
    if let Some(path) = args.store_html_debug {
        config = config.with_store_html_debug(path);
    }
    let output_file = config.output_file.clone();
    let pause_on_error = config.pause_on_error;

    let mut scraper = VanguardScraper::new(config);
    scraper.initialize().await?;

    let result = match scraper.login().await {
        Ok(()) => match scraper.navigate().await {
            Ok(()) => scraper.extract().await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    if let Err(ref e) = result {
        if pause_on_error {
            error!("Encountered an error. Leaving browser open for inspection: {}", e);
            prompt::wait_for_operator("Press Enter after reviewing the browser window to exit...")
                .await?;
        }
    }

    // The browser is torn down whether or not a stage failed.
    let closed = scraper.close().await;
    let table = result?;
    closed?;

    vanguard_export::export::write_csv(&table, &output_file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["vanguard-export"]).unwrap();
        assert!(args.username.is_none());
        assert!(args.password.is_none());
        assert_eq!(args.output_file, PathBuf::from("vanguard_performance.csv"));
        assert!(!args.headless);
        assert_eq!(args.max_wait_ms, 30_000);
        assert!(args.store_html_debug.is_none());
        assert!(!args.pause_on_error);
        assert_eq!(args.log_level, "INFO");
    }

    #[test]
    fn test_args_full_invocation() {
        let args = Args::try_parse_from([
            "vanguard-export",
            "--username",
            "user",
            "--password",
            "pass",
            "--output-file",
            "data/out.csv",
            "--headless",
            "--max-wait-ms",
            "5000",
            "--store-html-debug",
            "/tmp/page.html",
            "--pause-on-error",
            "--log-level",
            "DEBUG",
        ])
        .unwrap();

        assert_eq!(args.username.as_deref(), Some("user"));
        assert_eq!(args.output_file, PathBuf::from("data/out.csv"));
        assert!(args.headless);
        assert_eq!(args.max_wait_ms, 5_000);
        assert_eq!(args.store_html_debug, Some(PathBuf::from("/tmp/page.html")));
        assert!(args.pause_on_error);
        assert_eq!(args.log_level, "DEBUG");
    }

    #[test]
    fn test_args_reject_unknown_log_level() {
        assert!(Args::try_parse_from(["vanguard-export", "--log-level", "TRACE"]).is_err());
    }

    #[test]
    fn test_filter_directive_mapping() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
    }
}
