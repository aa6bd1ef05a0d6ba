use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use lcscrape_core::error::ScrapeError;
use lcscrape_core::traits::{Renderer, RendererFactory};
use tokio::task::JoinHandle;

/// Headless-browser renderer using Chromium via the Chrome DevTools Protocol.
///
/// Unlike [`super::HttpFetcher`], this executes JavaScript before returning
/// the markup, which the target profile page needs — most of its content is
/// rendered client-side.
///
/// One browser process per instance, one instance per request. The
/// orchestrator calls [`Renderer::shutdown`] on every exit path; instances
/// are never shared or pooled.
pub struct BrowserRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    timeout: Duration,
}

/// Element that signals the profile content has rendered.
const PROFILE_MARKER: &str = r#"div[class*="text-label-1"]"#;

/// Upper bound on waiting for the profile marker before capturing anyway.
const SETTLE_BUDGET: Duration = Duration::from_secs(3);
const SETTLE_POLL: Duration = Duration::from_millis(250);

const DEFAULT_NAV_TIMEOUT: Duration = Duration::from_secs(30);

impl BrowserRenderer {
    /// Launches a headless Chromium with a **30 s** navigation timeout.
    ///
    /// Requires a Chromium / Chrome binary reachable via `$PATH`, the
    /// well-known locations checked below, or `$CHROME_BIN`. Launch
    /// failure is a capability gap ([`ScrapeError::BackendUnavailable`]),
    /// which the orchestrator degrades on rather than failing.
    pub async fn launch() -> Result<Self, ScrapeError> {
        Self::with_timeout(DEFAULT_NAV_TIMEOUT).await
    }

    pub async fn with_timeout(timeout: Duration) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .disable_default_args()
            .window_size(1920, 1080);

        if let Some(bin) = find_chrome_binary() {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        // The site actively varies markup for detected automation, so the
        // automation-controlled blink flag and the default headless UA are
        // both replaced.
        let config = builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--user-agent={}", super::USER_AGENT))
            .arg("--no-first-run")
            .build()
            .map_err(|e| ScrapeError::BackendUnavailable(format!("browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::BackendUnavailable(format!("failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            timeout,
        })
    }
}

impl Renderer for BrowserRenderer {
    async fn render(&self, url: &str) -> Result<String, ScrapeError> {
        let timeout = self.timeout;

        let result = tokio::time::timeout(timeout, async {
            // Open a tab and navigate to the profile page.
            let page = self
                .browser
                .new_page(url)
                .await
                .map_err(|e| ScrapeError::Fetch(format!("failed to navigate to {url}: {e}")))?;

            // Hide the webdriver flag the site checks for.
            if let Err(e) = page
                .evaluate("Object.defineProperty(navigator, 'webdriver', {get: () => undefined})")
                .await
            {
                tracing::debug!("webdriver suppression failed: {e}");
            }

            wait_for_marker(&page).await;

            // Grab the fully-rendered DOM.
            let html = page
                .content()
                .await
                .map_err(|e| ScrapeError::Fetch(format!("failed to read page content: {e}")))?;

            // Close the tab to free browser resources.
            let _ = page.close().await;

            Ok::<String, ScrapeError>(html)
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(ScrapeError::Timeout(timeout.as_secs())),
        }
    }

    /// Terminate the browser process. Cleanup must not raise, so every
    /// failure here is logged and dropped.
    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser process wait failed: {e}");
        }
        self.handler_task.abort();
    }
}

/// Poll for the profile marker element, bounded by the settle budget.
///
/// Replaces a fixed post-navigation sleep: returns as soon as the marker
/// appears, and proceeds with whatever has rendered once the budget is
/// spent — capture is best-effort either way.
async fn wait_for_marker(page: &Page) {
    let deadline = tokio::time::Instant::now() + SETTLE_BUDGET;
    loop {
        if page.find_element(PROFILE_MARKER).await.is_ok() {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            tracing::debug!("profile marker did not appear within settle budget");
            return;
        }
        tokio::time::sleep(SETTLE_POLL).await;
    }
}

/// Tries to locate the real Chrome/Chromium binary.
///
/// Snap-packaged Chromium exposes a wrapper that strips unknown CLI flags
/// and breaks headless mode, so the real binary inside the snap is checked
/// first, then other well-known install paths. `$CHROME_BIN` overrides
/// everything; `None` lets chromiumoxide do its own lookup.
fn find_chrome_binary() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates: &[&str] = &[
        // Snap (Ubuntu default)
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        // Flatpak
        "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
        // Common apt / manual installs
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Provisions one [`BrowserRenderer`] per request.
#[derive(Clone)]
pub struct BrowserRendererFactory {
    timeout: Duration,
}

impl BrowserRendererFactory {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_NAV_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for BrowserRendererFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererFactory for BrowserRendererFactory {
    type Renderer = BrowserRenderer;

    async fn create(&self) -> Result<BrowserRenderer, ScrapeError> {
        BrowserRenderer::with_timeout(self.timeout).await
    }
}
