use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

/// One headless browser per process invocation. The user agent passed to
/// Chrome is the same string the robots check ran against.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

/// The Chrome argument carrying the spoofed identifier. Built in one place
/// so the browser always presents the string the robots check ran against.
pub fn user_agent_arg(config: &ScrapeConfig) -> String {
    format!("--user-agent={}", config.user_agent)
}

impl BrowserSession {
    pub async fn launch(config: &ScrapeConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder().arg(user_agent_arg(config));
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(ScrapeError::BrowserLaunch)?;

        info!("Initializing browser session...");
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // The CDP websocket must be pumped for the lifetime of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP handler event error: {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(BrowserSession {
            browser,
            handler_task,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Shuts the browser down and reaps the handler task. Called on success
    /// and error paths alike; never skipped once a session exists.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to reap browser process: {}", e);
        }
        self.handler_task.abort();
    }
}
