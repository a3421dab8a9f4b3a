//! Vanguard Personal Investor scraper
//!
//! Logs into the portal, opens Performance Details and lifts the performance
//! table out of the rendered page.

mod scraper;

pub use scraper::VanguardScraper;
