use log::{info, warn};
use texting_robots::Robot;
use url::Url;

use crate::config::{RobotsFallback, ScrapeConfig};
use crate::error::{Result, ScrapeError};

/// Asks whether the configured base URL may be fetched by our user agent.
///
/// A 4xx response means the site publishes no policy, which by convention
/// allows everything. A network error, a 5xx response, or an unparseable
/// file falls back to `config.robots_fallback` (Deny unless overridden).
pub async fn is_fetch_allowed(client: &reqwest::Client, config: &ScrapeConfig) -> Result<bool> {
    let base = Url::parse(&config.base_url).map_err(|e| ScrapeError::InvalidUrl {
        url: config.base_url.clone(),
        reason: e.to_string(),
    })?;
    let robots_url = base.join("/robots.txt").map_err(|e| ScrapeError::InvalidUrl {
        url: config.base_url.clone(),
        reason: e.to_string(),
    })?;

    info!("Checking robots.txt at {}...", robots_url);

    match client.get(robots_url.clone()).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body = resp.bytes().await?;
            Ok(decision_from_body(
                &config.user_agent,
                &body,
                &config.base_url,
                config.robots_fallback,
            ))
        }
        Ok(resp) if resp.status().is_client_error() => {
            info!(
                "No robots.txt published ({}). Treating as allowed.",
                resp.status()
            );
            Ok(true)
        }
        Ok(resp) => {
            warn!(
                "robots.txt fetch returned {}. Applying {:?} fallback.",
                resp.status(),
                config.robots_fallback
            );
            Ok(config.robots_fallback.allows())
        }
        Err(e) => {
            warn!(
                "Failed to fetch robots.txt: {}. Applying {:?} fallback.",
                e, config.robots_fallback
            );
            Ok(config.robots_fallback.allows())
        }
    }
}

/// Pure decision over a fetched policy body, split out so it can be tested
/// without network access.
pub fn decision_from_body(
    user_agent: &str,
    body: &[u8],
    target_url: &str,
    fallback: RobotsFallback,
) -> bool {
    match Robot::new(user_agent, body) {
        Ok(robot) => robot.allowed(target_url),
        Err(e) => {
            warn!(
                "Failed to parse robots.txt: {}. Applying {:?} fallback.",
                e, fallback
            );
            fallback.allows()
        }
    }
}
