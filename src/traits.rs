use async_trait::async_trait;

use crate::error::ScraperError;
use crate::table::ExtractedTable;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Launch the browser and open the working page
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// Authenticate against the portal
    async fn login(&mut self) -> Result<(), ScraperError>;

    /// Drive the authenticated page to the report section
    async fn navigate(&mut self) -> Result<(), ScraperError>;

    /// Scrape the primary data table from the rendered page
    async fn extract(&mut self) -> Result<ExtractedTable, ScraperError>;

    /// Release the browser session
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// Full pipeline (initialize → login → navigate → extract → close).
    ///
    /// The browser is torn down on every exit path; a stage error takes
    /// precedence over a close error.
    async fn execute(&mut self) -> Result<ExtractedTable, ScraperError> {
        self.initialize().await?;
        let result = match self.login().await {
            Ok(()) => match self.navigate().await {
                Ok(()) => self.extract().await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        let closed = self.close().await;
        let table = result?;
        closed?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stage-scripted stand-in that records teardown calls.
    #[derive(Default)]
    struct StageRecorder {
        fail_login: bool,
        fail_navigate: bool,
        close_calls: u32,
    }

    fn sample_table() -> ExtractedTable {
        ExtractedTable {
            headers: vec!["Fund".into(), "Balance".into(), "Return".into()],
            rows: vec![vec!["VTSAX".into(), "1,000".into(), "7.1%".into()]],
        }
    }

    #[async_trait]
    impl Scraper for StageRecorder {
        async fn initialize(&mut self) -> Result<(), ScraperError> {
            Ok(())
        }

        async fn login(&mut self) -> Result<(), ScraperError> {
            if self.fail_login {
                return Err(ScraperError::Timeout(
                    "login did not complete before the deadline".to_string(),
                ));
            }
            Ok(())
        }

        async fn navigate(&mut self) -> Result<(), ScraperError> {
            if self.fail_navigate {
                return Err(ScraperError::ElementNotFound(
                    "unable to locate the Performance Details section".to_string(),
                ));
            }
            Ok(())
        }

        async fn extract(&mut self) -> Result<ExtractedTable, ScraperError> {
            Ok(sample_table())
        }

        async fn close(&mut self) -> Result<(), ScraperError> {
            self.close_calls += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_execute_closes_session_on_success() {
        let mut scraper = StageRecorder::default();
        let table = scraper.execute().await.unwrap();
        assert_eq!(table, sample_table());
        assert_eq!(scraper.close_calls, 1);
    }

    #[tokio::test]
    async fn test_execute_closes_session_when_login_fails() {
        let mut scraper = StageRecorder {
            fail_login: true,
            ..Default::default()
        };
        let err = scraper.execute().await.unwrap_err();
        assert!(matches!(err, ScraperError::Timeout(_)));
        assert_eq!(scraper.close_calls, 1);
    }

    #[tokio::test]
    async fn test_execute_closes_session_when_navigation_fails() {
        let mut scraper = StageRecorder {
            fail_navigate: true,
            ..Default::default()
        };
        let err = scraper.execute().await.unwrap_err();
        assert!(matches!(err, ScraperError::ElementNotFound(_)));
        assert_eq!(scraper.close_calls, 1);
    }
}
