use std::path::PathBuf;
use std::time::Duration;

/// What to do when robots.txt cannot be fetched or parsed.
/// Deny (fail closed) is the default; the site's wishes are unknown, so we
/// do not guess in our own favor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotsFallback {
    Allow,
    Deny,
}

impl RobotsFallback {
    pub fn allows(self) -> bool {
        matches!(self, RobotsFallback::Allow)
    }
}

/// All knobs for one scrape run, passed into each stage explicitly.
/// Defaults reproduce the esla.wi.gov inspector lookup.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub target_path: String,
    /// Sent on every request (robots.txt fetch and browser traffic alike).
    /// The identifier checked against robots.txt must equal the one the
    /// browser sends, otherwise the policy check is meaningless.
    pub user_agent: String,
    /// DOM id of the Program Area <select>. Contains colons (JSF-generated),
    /// so stages look it up via getElementById rather than a CSS selector.
    pub program_dropdown_id: String,
    /// Visible label of the option to select, matched exactly after trim.
    pub program_label: String,
    pub search_button_selector: String,
    pub results_table_selector: String,
    /// Upper bound for each poll-until-present wait.
    pub wait_timeout: Duration,
    pub poll_interval: Duration,
    pub output_file: PathBuf,
    pub robots_fallback: RobotsFallback,
    pub headless: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig {
            base_url: "https://esla.wi.gov".to_string(),
            target_path: "/inspectorlookup".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            program_dropdown_id: "j_id0:j_id70:programArea".to_string(),
            program_label: "Boiler and Unfired Pressure Vessels".to_string(),
            search_button_selector: ".btn.btn-primary.searchButton".to_string(),
            results_table_selector: ".table.table-striped.no-footer.dataTable".to_string(),
            wait_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
            output_file: PathBuf::from("inspectors_expanded.csv"),
            robots_fallback: RobotsFallback::Deny,
            headless: true,
        }
    }
}

impl ScrapeConfig {
    pub fn target_url(&self) -> String {
        format!("{}{}", self.base_url, self.target_path)
    }

    pub fn results_row_selector(&self) -> String {
        format!("{} tbody tr", self.results_table_selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_url_points_at_inspector_lookup() {
        let config = ScrapeConfig::default();
        assert_eq!(config.target_url(), "https://esla.wi.gov/inspectorlookup");
    }

    #[test]
    fn default_robots_fallback_is_fail_closed() {
        let config = ScrapeConfig::default();
        assert_eq!(config.robots_fallback, RobotsFallback::Deny);
        assert!(!config.robots_fallback.allows());
    }

    #[test]
    fn row_selector_scopes_into_table_body() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.results_row_selector(),
            ".table.table-striped.no-footer.dataTable tbody tr"
        );
    }
}
