use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::export;
use crate::traits::Scraper;
use crate::vanguard::VanguardScraper;

/// One export request
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub username: String,
    pub password: String,
    pub output_file: PathBuf,
    pub headless: bool,
}

impl ScrapeRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            output_file: PathBuf::from("vanguard_performance.csv"),
            headless: true,
        }
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

impl From<ScrapeRequest> for ScrapeConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScrapeConfig::new(req.username, req.password)
            .with_output_file(req.output_file)
            .with_headless(req.headless)
    }
}

/// Export result: where the CSV landed and the selected table's shape.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub csv_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// tower::Service wrapper around the scrape pipeline, for embedding the
/// exporter in a larger application.
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // Reserved for future state (rate limiting, session reuse)
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("Scrape request received: username={}", req.username);

        Box::pin(async move {
            let config: ScrapeConfig = req.into();
            let output_file = config.output_file.clone();

            let mut scraper = VanguardScraper::new(config);
            let table = scraper.execute().await?;

            export::write_csv(&table, &output_file)?;

            let result = ScrapeResult {
                csv_path: output_file,
                rows: table.row_count(),
                columns: table.column_count(),
            };
            info!(
                "Scrape complete: path={:?}, shape={}x{}",
                result.csv_path, result.rows, result.columns
            );
            Ok(result)
        })
    }
}
