use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("browser init error: {0}")]
    BrowserInit(String),

    #[error("navigation error: {0}")]
    Navigation(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("javascript error: {0}")]
    JavaScript(String),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("file I/O error: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
