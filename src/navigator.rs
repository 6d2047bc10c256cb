use std::time::Instant;

use chromiumoxide::element::Element;
use chromiumoxide::Page;
use log::info;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

/// Drives the five UI actions of a run: load the page, wait for the Program
/// Area dropdown to populate, select the configured option, click Search,
/// and wait for the results table. Fixed sleeps are replaced by bounded
/// poll-until-present loops so slow renders wait and fast renders don't.
pub struct Navigator<'a> {
    page: &'a Page,
    config: &'a ScrapeConfig,
}

impl<'a> Navigator<'a> {
    pub fn new(page: &'a Page, config: &'a ScrapeConfig) -> Self {
        Navigator { page, config }
    }

    /// Runs the full sequence and returns an HTML snapshot of the rendered
    /// page, taken after the results table has rows.
    pub async fn run(&self) -> Result<String> {
        let url = self.config.target_url();
        info!("Opening the target URL {}...", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;

        self.wait_for_dropdown_populated().await?;

        info!(
            "Selecting '{}' from the dropdown...",
            self.config.program_label
        );
        self.select_program_by_label().await?;

        info!("Clicking the 'Search' button...");
        let button = self
            .wait_for_element(&self.config.search_button_selector)
            .await?;
        button.click().await?;

        let row_selector = self.config.results_row_selector();
        self.wait_for_element(&row_selector).await?;

        self.snapshot().await
    }

    /// Polls for a selector until it appears or the configured timeout runs
    /// out.
    async fn wait_for_element(&self, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.config.wait_timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::WaitTimeout {
                    selector: selector.to_string(),
                    waited: self.config.wait_timeout,
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// The dropdown id is JSF-generated and contains colons, so both waits
    /// and the selection go through getElementById instead of CSS. Populated
    /// means more than the placeholder option is present.
    async fn wait_for_dropdown_populated(&self) -> Result<()> {
        let probe = format!(
            "(() => {{ const sel = document.getElementById('{}'); \
             return sel !== null && sel.options.length > 1; }})()",
            js_escape(&self.config.program_dropdown_id)
        );
        let deadline = Instant::now() + self.config.wait_timeout;
        loop {
            let populated = self
                .page
                .evaluate(probe.as_str())
                .await?
                .into_value::<bool>()
                .unwrap_or(false);
            if populated {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::WaitTimeout {
                    selector: format!("#{}", self.config.program_dropdown_id),
                    waited: self.config.wait_timeout,
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn select_program_by_label(&self) -> Result<()> {
        let script = select_by_label_script(
            &self.config.program_dropdown_id,
            &self.config.program_label,
        );
        let outcome = self
            .page
            .evaluate(script.as_str())
            .await?
            .into_value::<String>()?;
        match outcome.as_str() {
            "ok" => Ok(()),
            "missing" => Err(ScrapeError::ElementNotFound {
                selector: format!("#{}", self.config.program_dropdown_id),
            }),
            _ => Err(ScrapeError::OptionNotFound {
                label: self.config.program_label.clone(),
            }),
        }
    }

    async fn snapshot(&self) -> Result<String> {
        let html = self
            .page
            .evaluate("document.documentElement.outerHTML")
            .await?
            .into_value::<String>()?;
        Ok(html)
    }
}

/// Selects an option by exact visible-label match (after trim) and fires a
/// change event so the page's own handlers run.
fn select_by_label_script(dropdown_id: &str, label: &str) -> String {
    format!(
        "(() => {{ \
           const sel = document.getElementById('{id}'); \
           if (!sel) return 'missing'; \
           const idx = Array.from(sel.options).findIndex(o => o.text.trim() === '{label}'); \
           if (idx < 0) return 'nolabel'; \
           sel.selectedIndex = idx; \
           sel.dispatchEvent(new Event('change', {{ bubbles: true }})); \
           return 'ok'; \
         }})()",
        id = js_escape(dropdown_id),
        label = js_escape(label),
    )
}

fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
