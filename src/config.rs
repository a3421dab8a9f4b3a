use std::path::PathBuf;
use std::time::Duration;

/// Default bound for element/auth waits (milliseconds).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for one export run. Built once from the CLI (or the tower
/// service request) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub username: String,
    pub password: String,
    pub output_file: PathBuf,
    pub headless: bool,
    pub max_wait: Duration,
    pub store_html_debug: Option<PathBuf>,
    pub pause_on_error: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            output_file: PathBuf::from("vanguard_performance.csv"),
            headless: false,
            max_wait: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            store_html_debug: None,
            pause_on_error: false,
        }
    }
}

impl ScrapeConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
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

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_store_html_debug(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_html_debug = Some(path.into());
        self
    }

    pub fn with_pause_on_error(mut self, pause: bool) -> Self {
        self.pause_on_error = pause;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScrapeConfig::new("user", "pass");
        assert_eq!(config.username, "user");
        assert_eq!(config.password, "pass");
        assert_eq!(config.output_file, PathBuf::from("vanguard_performance.csv"));
        assert!(!config.headless);
        assert_eq!(config.max_wait, Duration::from_millis(30_000));
        assert!(config.store_html_debug.is_none());
        assert!(!config.pause_on_error);
    }

    #[test]
    fn test_config_builder() {
        let config = ScrapeConfig::new("user", "pass")
            .with_output_file("data/out.csv")
            .with_headless(true)
            .with_max_wait(Duration::from_secs(120))
            .with_store_html_debug("/tmp/page.html")
            .with_pause_on_error(true);

        assert_eq!(config.output_file, PathBuf::from("data/out.csv"));
        assert!(config.headless);
        assert_eq!(config.max_wait, Duration::from_secs(120));
        assert_eq!(config.store_html_debug, Some(PathBuf::from("/tmp/page.html")));
        assert!(config.pause_on_error);
    }
}
