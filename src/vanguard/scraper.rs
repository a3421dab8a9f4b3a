//! Vanguard Personal Investor scraper implementation.
//!
//! The portal's authenticated DOM is unversioned and changes without notice,
//! so every lookup below runs through an ordered candidate list tried in
//! sequence (first match wins). Review the logs when a run fails and extend
//! the lists as needed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::target::TargetId;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::prompt;
use crate::table::{self, ExtractedTable};
use crate::traits::Scraper;

const LOGIN_URL: &str = "https://personal-performance.web.vanguard.com/";

/// URL substring that distinguishes post-login portal pages.
const AUTH_URL_MARKER: &str = "personal-performance";

const USERNAME_SELECTORS: &[&str] = &[
    r#"input[name="USER"]"#,
    r#"input[name="USERNAME"]"#,
    r#"input[name="USER_ID"]"#,
    r#"input[id="username"]"#,
    r#"input[id="UserID"]"#,
    r#"input[autocomplete="username"]"#,
    r#"input[type="text"]"#,
];

const PASSWORD_SELECTORS: &[&str] = &[
    r#"input[name="PASSWORD"]"#,
    r#"input[name="PASSWORD1"]"#,
    r#"input[id="password"]"#,
    r#"input[autocomplete="current-password"]"#,
    r#"input[type="password"]"#,
];

const SUBMIT_SELECTORS: &[&str] = &[
    r#"button[type="submit"]"#,
    r#"button[name="login"]"#,
    r#"input[type="submit"]"#,
];

const SUBMIT_TEXT_CANDIDATES: &[&str] = &["Log on", "Log On", "Sign in", "Sign On"];

const PERFORMANCE_DETAILS_KEYWORDS: &[&str] =
    &["Performance", "Performance details", "Performance Details"];

const SHOW_MORE_KEYWORDS: &[&str] = &["Show more", "Show More"];

/// Body-text markers that indicate an authenticated page.
const AUTH_TEXT_MARKERS: &[&str] = &["log off", "sign out", "performance"];

/// Body-text markers for a pending second-factor challenge.
const TWO_FACTOR_MARKERS: &[&str] = &[
    "verification",
    "two-factor",
    "multi-factor",
    "security code",
    "one-time password",
];

/// Polling interval for bounded waits (milliseconds).
const POLL_INTERVAL_MS: u64 = 250;
/// Settle delay after reaching the login page; the login widget initializes
/// asynchronously after the navigation event fires.
const LOGIN_SETTLE_MS: u64 = 2_000;
/// Network idle wait timeout (milliseconds).
const NETWORK_IDLE_TIMEOUT_MS: u64 = 30_000;
/// Network idle check interval (milliseconds).
const NETWORK_IDLE_CHECK_INTERVAL_MS: u64 = 500;

const BODY_TEXT_JS: &str = "document.body ? document.body.innerText : ''";

/// Index of the first document (main frame, then same-origin iframes in DOM
/// order) where any candidate selector matches, or -1.
const PROBE_FRAME_JS: &str = r#"(function(args) {
    var docs = [document];
    var frames = document.querySelectorAll('iframe');
    for (var i = 0; i < frames.length; i++) {
        try {
            if (frames[i].contentDocument) { docs.push(frames[i].contentDocument); }
        } catch (e) {}
    }
    for (var d = 0; d < docs.length; d++) {
        for (var s = 0; s < args.selectors.length; s++) {
            try {
                if (docs[d].querySelector(args.selectors[s])) { return d; }
            } catch (e) {}
        }
    }
    return -1;
})(__ARGS__)"#;

/// Fill the first matching candidate in the chosen document; returns the
/// selector that matched, or null.
const FILL_JS: &str = r#"(function(args) {
    var docs = [document];
    var frames = document.querySelectorAll('iframe');
    for (var i = 0; i < frames.length; i++) {
        try {
            if (frames[i].contentDocument) { docs.push(frames[i].contentDocument); }
        } catch (e) {}
    }
    var doc = docs[args.frame];
    if (!doc) { return null; }
    for (var s = 0; s < args.selectors.length; s++) {
        var el = null;
        try { el = doc.querySelector(args.selectors[s]); } catch (e) { continue; }
        if (!el) { continue; }
        try { el.focus(); } catch (e) {}
        el.value = args.value;
        try {
            el.dispatchEvent(new Event('input', { bubbles: true }));
            el.dispatchEvent(new Event('change', { bubbles: true }));
        } catch (e) {}
        return args.selectors[s];
    }
    return null;
})(__ARGS__)"#;

/// Click the first matching candidate selector in the chosen document;
/// returns the selector that matched, or null.
const CLICK_SELECTOR_JS: &str = r#"(function(args) {
    var docs = [document];
    var frames = document.querySelectorAll('iframe');
    for (var i = 0; i < frames.length; i++) {
        try {
            if (frames[i].contentDocument) { docs.push(frames[i].contentDocument); }
        } catch (e) {}
    }
    var doc = docs[args.frame];
    if (!doc) { return null; }
    for (var s = 0; s < args.selectors.length; s++) {
        var el = null;
        try { el = doc.querySelector(args.selectors[s]); } catch (e) { continue; }
        if (!el) { continue; }
        el.click();
        return args.selectors[s];
    }
    return null;
})(__ARGS__)"#;

/// Click the first button whose label contains one of the candidates
/// (ordered, case-insensitive) in the chosen document.
const CLICK_BUTTON_TEXT_JS: &str = r#"(function(args) {
    var docs = [document];
    var frames = document.querySelectorAll('iframe');
    for (var i = 0; i < frames.length; i++) {
        try {
            if (frames[i].contentDocument) { docs.push(frames[i].contentDocument); }
        } catch (e) {}
    }
    var doc = docs[args.frame];
    if (!doc) { return null; }
    var nodes = doc.querySelectorAll('button, input[type="submit"]');
    for (var l = 0; l < args.labels.length; l++) {
        var needle = args.labels[l].toLowerCase();
        for (var i = 0; i < nodes.length; i++) {
            var label = (nodes[i].innerText || nodes[i].textContent || nodes[i].value || '').trim();
            if (label.toLowerCase().indexOf(needle) >= 0) {
                nodes[i].click();
                return label;
            }
        }
    }
    return null;
})(__ARGS__)"#;

/// Click the first element matching the role selector whose accessible text
/// contains the keyword (case-insensitive); returns the label, or null.
const CLICK_ROLE_JS: &str = r#"(function(args) {
    var nodes = document.querySelectorAll(args.selector);
    var needle = args.keyword.toLowerCase();
    for (var i = 0; i < nodes.length; i++) {
        var el = nodes[i];
        var label = (el.innerText || el.textContent || '').trim();
        var aria = el.getAttribute ? (el.getAttribute('aria-label') || '') : '';
        if (label.toLowerCase().indexOf(needle) >= 0 || aria.toLowerCase().indexOf(needle) >= 0) {
            el.click();
            return label || aria;
        }
    }
    return null;
})(__ARGS__)"#;

/// Click the innermost element whose own text contains the keyword.
const CLICK_TEXT_JS: &str = r#"(function(args) {
    var needle = args.keyword.toLowerCase();
    var all = document.querySelectorAll('*');
    for (var i = 0; i < all.length; i++) {
        var el = all[i];
        var own = '';
        for (var j = 0; j < el.childNodes.length; j++) {
            var node = el.childNodes[j];
            if (node.nodeType === 3) { own += node.textContent; }
        }
        if (own.toLowerCase().indexOf(needle) >= 0) {
            el.click();
            return (el.innerText || own).trim();
        }
    }
    return null;
})(__ARGS__)"#;

/// No in-flight network activity per the Performance API.
const NETWORK_IDLE_JS: &str = r#"(function() {
    var entries = performance.getEntriesByType('resource');
    var now = performance.now();
    var recent = entries.filter(function(e) {
        return (now - e.startTime) < 500 && e.duration === 0;
    });
    return recent.length === 0;
})()"#;

pub struct VanguardScraper {
    config: ScrapeConfig,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
}

impl VanguardScraper {
    pub fn new(config: ScrapeConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
        }
    }

    fn get_page(&self) -> Result<&Arc<Page>, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("browser is not initialized".to_string()))
    }

    fn get_browser(&self) -> Result<&Browser, ScraperError> {
        self.browser
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("browser is not initialized".to_string()))
    }
}

#[async_trait]
impl Scraper for VanguardScraper {
    async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Initializing browser...");

        let mut builder = BrowserConfig::builder()
            .window_size(1280, 800)
            .request_timeout(Duration::from_secs(60));

        if let Ok(chrome_path) =
            std::env::var("CHROME_PATH").or_else(|_| std::env::var("CHROMIUM_PATH"))
        {
            builder = builder.chrome_executable(chrome_path);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(ScraperError::BrowserInit)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // Drain browser events in the background
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));

        info!("Browser initialized");
        Ok(())
    }

    async fn login(&mut self) -> Result<(), ScraperError> {
        let page = self.get_page()?.clone();
        info!("Navigating to the Vanguard login page");

        page.goto(LOGIN_URL)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        debug!("Allowing the login page to fully initialize before locating inputs");
        sleep(Duration::from_millis(LOGIN_SETTLE_MS)).await;

        let frame = wait_for_login_frame(&page, USERNAME_SELECTORS, self.config.max_wait).await?;
        fill_first_available(&page, frame, USERNAME_SELECTORS, &self.config.username, "username")
            .await?;
        fill_first_available(&page, frame, PASSWORD_SELECTORS, &self.config.password, "password")
            .await?;

        let existing = open_target_ids(self.get_browser()?).await;
        click_submit(&page, frame).await?;

        info!("Waiting for post-login navigation");
        let new_page = {
            let browser = self.get_browser()?;
            wait_for_authentication(browser, &page, &existing, self.config.max_wait).await?
        };
        if let Some(authenticated) = new_page {
            // Login opened a new tab; it becomes the current page.
            self.page = Some(Arc::new(authenticated));
        }

        let page = self.get_page()?.clone();
        wait_request_idle(&page).await?;

        if requires_two_factor(&page).await {
            warn!(
                "Two-factor authentication detected. Complete verification in the \
                 browser window, then press Enter to continue."
            );
            prompt::wait_for_operator("Press Enter after completing multi-factor authentication...")
                .await?;
            wait_request_idle(&page).await?;
        }

        info!("Login complete");
        Ok(())
    }

    async fn navigate(&mut self) -> Result<(), ScraperError> {
        let page = self.get_page()?.clone();
        info!("Navigating to Performance Details");

        ensure_portal_url(&page, self.config.max_wait).await?;

        if !url_matches_portal(&current_url(&page).await) {
            if !click_link_by_keywords(&page, PERFORMANCE_DETAILS_KEYWORDS).await {
                return Err(ScraperError::ElementNotFound(
                    "unable to locate the Performance Details section; update selectors"
                        .to_string(),
                ));
            }
            wait_request_idle(&page).await?;
            ensure_portal_url(&page, self.config.max_wait).await?;
        }

        info!("Expanding 'Show More' section if available");
        if !click_button_by_keywords(&page, SHOW_MORE_KEYWORDS).await
            && click_text(&page, "Show More").await.is_none()
        {
            // Non-fatal; the extractor tolerates a collapsed view.
            warn!("'Show More' control not found; continuing without expanding");
        }

        wait_request_idle(&page).await?;
        Ok(())
    }

    async fn extract(&mut self) -> Result<ExtractedTable, ScraperError> {
        let page = self.get_page()?.clone();
        info!("Extracting performance tables from the page HTML");

        let html = page
            .content()
            .await
            .map_err(|e| ScraperError::Extraction(e.to_string()))?;

        if let Some(debug_path) = &self.config.store_html_debug {
            if let Some(parent) = debug_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(debug_path, &html)?;
            info!("Wrote debug HTML to {}", debug_path.display());
        }

        table::select_largest(&html)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser session...");

        self.page = None;
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                debug!("Browser close failed: {}", e);
            }
        }

        info!("Browser session closed");
        Ok(())
    }
}

fn with_args(template: &str, args: &serde_json::Value) -> String {
    template.replace("__ARGS__", &args.to_string())
}

async fn current_url(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        _ => String::new(),
    }
}

fn url_matches_portal(url: &str) -> bool {
    url.to_ascii_lowercase().contains(AUTH_URL_MARKER)
}

fn is_authenticated_url(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    lowered.contains(AUTH_URL_MARKER) && !lowered.contains("logon")
}

fn body_marks_authenticated(text: &str) -> bool {
    let lowered = text.to_lowercase();
    AUTH_TEXT_MARKERS.iter().any(|marker| lowered.contains(marker))
}

fn contains_two_factor_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    TWO_FACTOR_MARKERS.iter().any(|marker| lowered.contains(marker))
}

async fn body_text(page: &Page) -> String {
    page.evaluate(BODY_TEXT_JS)
        .await
        .ok()
        .and_then(|v| v.into_value::<String>().ok())
        .unwrap_or_default()
}

async fn is_authenticated(page: &Page) -> bool {
    if is_authenticated_url(&current_url(page).await) {
        return true;
    }
    body_marks_authenticated(&body_text(page).await)
}

async fn requires_two_factor(page: &Page) -> bool {
    contains_two_factor_marker(&body_text(page).await)
}

async fn open_target_ids(browser: &Browser) -> Vec<TargetId> {
    match browser.pages().await {
        Ok(pages) => pages.iter().map(|p| p.target_id().clone()).collect(),
        Err(e) => {
            debug!("Failed to enumerate open pages: {}", e);
            Vec::new()
        }
    }
}

/// Poll for a document (main frame first, then embedded frames) in which any
/// of the username selector candidates matches.
async fn wait_for_login_frame(
    page: &Page,
    selectors: &[&str],
    max_wait: Duration,
) -> Result<i64, ScraperError> {
    let js = with_args(PROBE_FRAME_JS, &json!({ "selectors": selectors }));
    let deadline = Instant::now() + max_wait;

    loop {
        let found = page
            .evaluate(js.as_str())
            .await
            .ok()
            .and_then(|v| v.into_value::<i64>().ok())
            .unwrap_or(-1);
        if found >= 0 {
            debug!(
                "Login inputs found in {}",
                if found == 0 { "the main frame".to_string() } else { format!("frame {}", found) }
            );
            return Ok(found);
        }
        if Instant::now() >= deadline {
            return Err(ScraperError::Timeout(
                "timed out waiting for login inputs to become available; update selectors"
                    .to_string(),
            ));
        }
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

async fn eval_optional_string(page: &Page, js: &str) -> Result<Option<String>, ScraperError> {
    let result = page
        .evaluate(js)
        .await
        .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
    Ok(result.into_value::<Option<String>>().unwrap_or(None))
}

/// First-match-wins verdict: a matched candidate passes through, no match
/// is a locator failure.
fn require_match(matched: Option<String>, missing: &str) -> Result<String, ScraperError> {
    matched.ok_or_else(|| ScraperError::ElementNotFound(missing.to_string()))
}

async fn fill_first_available(
    page: &Page,
    frame: i64,
    selectors: &[&str],
    value: &str,
    label: &str,
) -> Result<(), ScraperError> {
    let js = with_args(
        FILL_JS,
        &json!({ "frame": frame, "selectors": selectors, "value": value }),
    );
    let selector = require_match(
        eval_optional_string(page, &js).await?,
        &format!(
            "unable to find a {} input matching selectors: {:?}",
            label, selectors
        ),
    )?;
    debug!("Filled {} via selector {}", label, selector);
    Ok(())
}

async fn click_submit(page: &Page, frame: i64) -> Result<(), ScraperError> {
    let js = with_args(
        CLICK_SELECTOR_JS,
        &json!({ "frame": frame, "selectors": SUBMIT_SELECTORS }),
    );
    let mut matched = eval_optional_string(page, &js).await?;

    if matched.is_none() {
        let js = with_args(
            CLICK_BUTTON_TEXT_JS,
            &json!({ "frame": frame, "labels": SUBMIT_TEXT_CANDIDATES }),
        );
        matched = eval_optional_string(page, &js).await?;
    }

    let label = require_match(
        matched,
        &format!(
            "unable to find a submit control matching {:?} or labels {:?}",
            SUBMIT_SELECTORS, SUBMIT_TEXT_CANDIDATES
        ),
    )?;
    debug!("Clicked submit control '{}'", label);
    Ok(())
}

/// Wait until either a newly opened page or the original one is
/// authenticated. Returns the new page when login switched tabs, `None` when
/// the original page authenticated in place.
async fn wait_for_authentication(
    browser: &Browser,
    page: &Page,
    existing: &[TargetId],
    max_wait: Duration,
) -> Result<Option<Page>, ScraperError> {
    let deadline = Instant::now() + max_wait;

    loop {
        if let Ok(pages) = browser.pages().await {
            for candidate in pages {
                if existing.contains(candidate.target_id()) {
                    continue;
                }
                let url = current_url(&candidate).await;
                if url.is_empty() {
                    continue;
                }
                let ready_state = candidate
                    .evaluate("document.readyState")
                    .await
                    .ok()
                    .and_then(|v| v.into_value::<String>().ok())
                    .unwrap_or_default();
                if ready_state == "loading" {
                    continue;
                }
                if is_authenticated(&candidate).await {
                    info!("Authenticated in a newly opened tab: {}", url);
                    return Ok(Some(candidate));
                }
            }
        }

        if is_authenticated(page).await {
            info!("Authenticated on the original page");
            return Ok(None);
        }

        if Instant::now() >= deadline {
            return Err(ScraperError::Timeout(
                "login did not complete before the deadline; check credentials or MFA".to_string(),
            ));
        }
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// Make sure the page is on the portal URL, re-navigating to the login URL
/// once before giving up.
async fn ensure_portal_url(page: &Page, max_wait: Duration) -> Result<(), ScraperError> {
    if url_matches_portal(&current_url(page).await) {
        return Ok(());
    }
    if wait_for_portal_url(page, max_wait).await {
        return Ok(());
    }

    info!("Portal URL not reached; re-navigating to the login page");
    page.goto(LOGIN_URL)
        .await
        .map_err(|e| ScraperError::Navigation(e.to_string()))?;
    wait_request_idle(page).await?;
    if wait_for_portal_url(page, max_wait).await {
        return Ok(());
    }

    Err(ScraperError::Timeout(
        "page never reached the performance portal URL".to_string(),
    ))
}

async fn wait_for_portal_url(page: &Page, max_wait: Duration) -> bool {
    let deadline = Instant::now() + max_wait;
    loop {
        if url_matches_portal(&current_url(page).await) {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

async fn click_role(page: &Page, selector: &str, keyword: &str) -> Option<String> {
    let js = with_args(CLICK_ROLE_JS, &json!({ "selector": selector, "keyword": keyword }));
    match page.evaluate(js.as_str()).await {
        Ok(val) => val.into_value::<Option<String>>().unwrap_or(None),
        Err(e) => {
            debug!("Role click for '{}' failed: {}", keyword, e);
            None
        }
    }
}

async fn click_text(page: &Page, keyword: &str) -> Option<String> {
    let js = with_args(CLICK_TEXT_JS, &json!({ "keyword": keyword }));
    match page.evaluate(js.as_str()).await {
        Ok(val) => val.into_value::<Option<String>>().unwrap_or(None),
        Err(e) => {
            debug!("Text click for '{}' failed: {}", keyword, e);
            None
        }
    }
}

async fn click_link_by_keywords(page: &Page, keywords: &[&str]) -> bool {
    for keyword in keywords {
        if let Some(label) = click_role(page, r#"a, [role="link"]"#, keyword).await {
            info!("Clicked link '{}'", label);
            return true;
        }
    }
    // Fall back to plain text matching anywhere on the page.
    for keyword in keywords {
        if let Some(label) = click_text(page, keyword).await {
            info!("Clicked text match '{}'", label);
            return true;
        }
    }
    false
}

async fn click_button_by_keywords(page: &Page, keywords: &[&str]) -> bool {
    for keyword in keywords {
        if let Some(label) = click_role(page, r#"button, [role="button"]"#, keyword).await {
            info!("Clicked button '{}'", label);
            return true;
        }
    }
    false
}

/// Wait until no network requests have started recently, polling the
/// Performance API. Times out with a warning rather than an error.
async fn wait_request_idle(page: &Page) -> Result<(), ScraperError> {
    debug!("Waiting for network to become idle...");
    let start = Instant::now();
    let timeout = Duration::from_millis(NETWORK_IDLE_TIMEOUT_MS);

    let mut idle_count = 0;
    const REQUIRED_IDLE_CHECKS: u32 = 3;

    while start.elapsed() < timeout {
        match page.evaluate(NETWORK_IDLE_JS).await {
            Ok(val) => {
                if val.into_value::<bool>().unwrap_or(false) {
                    idle_count += 1;
                    if idle_count >= REQUIRED_IDLE_CHECKS {
                        debug!(
                            "Network idle after {:?} ({} consecutive checks)",
                            start.elapsed(),
                            idle_count
                        );
                        return Ok(());
                    }
                } else {
                    idle_count = 0;
                }
            }
            Err(e) => {
                debug!("Network idle check error: {}", e);
                idle_count = 0;
            }
        }
        sleep(Duration::from_millis(NETWORK_IDLE_CHECK_INTERVAL_MS)).await;
    }

    warn!(
        "Network idle timeout after {:?}, proceeding anyway",
        start.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanguard_scraper_new() {
        let config = ScrapeConfig::new("test_user", "test_password");
        let scraper = VanguardScraper::new(config);
        assert!(scraper.browser.is_none());
        assert!(scraper.page.is_none());
    }

    #[test]
    fn test_authenticated_url_requires_domain_marker() {
        assert!(is_authenticated_url(
            "https://personal-performance.web.vanguard.com/details"
        ));
        assert!(!is_authenticated_url("https://investor.vanguard.com/home"));
        assert!(!is_authenticated_url(""));
    }

    #[test]
    fn test_url_containing_logon_is_never_authenticated() {
        assert!(!is_authenticated_url(
            "https://personal-performance.web.vanguard.com/logon?next=details"
        ));
        assert!(!is_authenticated_url(
            "https://personal-performance.web.vanguard.com/Logon"
        ));
    }

    #[test]
    fn test_portal_url_match_ignores_case_and_logon() {
        assert!(url_matches_portal(
            "https://Personal-Performance.web.vanguard.com/"
        ));
        // The portal match alone does not exclude logon pages.
        assert!(url_matches_portal(
            "https://personal-performance.web.vanguard.com/logon"
        ));
    }

    #[test]
    fn test_body_markers_detect_authenticated_text() {
        assert!(body_marks_authenticated("Click here to LOG OFF"));
        assert!(body_marks_authenticated("Sign Out of your account"));
        assert!(body_marks_authenticated("Your performance summary"));
        assert!(!body_marks_authenticated("Welcome, please sign in"));
    }

    #[test]
    fn test_two_factor_markers_are_case_insensitive() {
        assert!(contains_two_factor_marker("Enter the Security Code we sent you"));
        assert!(contains_two_factor_marker("TWO-FACTOR authentication required"));
        assert!(contains_two_factor_marker("one-time password"));
        assert!(!contains_two_factor_marker("Welcome to your dashboard"));
    }

    #[test]
    fn test_with_args_embeds_selector_list() {
        let js = with_args(PROBE_FRAME_JS, &json!({ "selectors": USERNAME_SELECTORS }));
        assert!(!js.contains("__ARGS__"));
        assert!(js.contains(r#"input[name=\"USER\""#));
    }

    #[test]
    fn test_require_match_passes_through_the_matched_candidate() {
        let matched = require_match(Some("input[name=\"USER\"]".to_string()), "username input");
        assert_eq!(matched.unwrap(), "input[name=\"USER\"]");
    }

    #[test]
    fn test_require_match_turns_no_match_into_element_not_found() {
        let err = require_match(None, "unable to find a password input").unwrap_err();
        match err {
            ScraperError::ElementNotFound(msg) => {
                assert_eq!(msg, "unable to find a password input");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore] // live run: cargo test test_vanguard_scraper_live -- --ignored --nocapture
    async fn test_vanguard_scraper_live() {
        tracing_subscriber::fmt()
            .with_env_filter("info,vanguard_export=debug")
            .init();

        let username = std::env::var("VANGUARD_USERNAME").expect("VANGUARD_USERNAME not set");
        let password = std::env::var("VANGUARD_PASSWORD").expect("VANGUARD_PASSWORD not set");

        let config = ScrapeConfig::new(username, password).with_headless(false);
        let mut scraper = VanguardScraper::new(config);

        match scraper.execute().await {
            Ok(table) => {
                println!("\n=== Scrape Result ===");
                println!("Headers: {:?}", table.headers);
                println!("Rows: {}", table.row_count());
            }
            Err(e) => panic!("Scrape failed: {:?}", e),
        }
    }
}
