//! Vanguard performance export scraper
//!
//! Logs into the Vanguard Personal Investor portal with a Chrome session,
//! navigates to Performance Details, expands the "Show More" section and
//! writes the performance table to CSV. Mirrors the manual workflow of
//! visiting <https://personal-performance.web.vanguard.com/>.
//!
//! The portal's authenticated DOM can change at any time, so the selectors
//! are intentionally flexible and include multiple fallbacks. Review the
//! logs when a run fails and update the candidate lists as needed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vanguard_export::{ScrapeConfig, Scraper, VanguardScraper};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScrapeConfig::new("username", "password")
//!         .with_output_file("data/vanguard_performance.csv")
//!         .with_headless(true);
//!
//!     let mut scraper = VanguardScraper::new(config);
//!     let table = scraper.execute().await.unwrap();
//!     println!("Scraped {} rows", table.row_count());
//! }
//! ```
//!
//! # As a tower service
//!
//! ```rust,ignore
//! use vanguard_export::{ScrapeRequest, ScraperService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!     let request = ScrapeRequest::new("username", "password")
//!         .with_output_file("./vanguard_performance.csv");
//!     let result = service.call(request).await.unwrap();
//!     println!("CSV written: {:?}", result.csv_path);
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod prompt;
pub mod service;
pub mod table;
pub mod traits;
pub mod vanguard;

pub use config::ScrapeConfig;
pub use error::ScraperError;
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use table::ExtractedTable;
pub use traits::Scraper;
pub use vanguard::VanguardScraper;
