use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use inspector_scraper_lib::{robots, RobotsFallback, ScrapeConfig};

/// Serves one canned HTTP response to every connection on a loopback port
/// and returns the base URL to point the policy check at.
async fn serve(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://{}", addr)
}

fn config_for(base_url: String, output_dir: &std::path::Path) -> ScrapeConfig {
    let mut config = ScrapeConfig::default();
    config.base_url = base_url;
    config.output_file = output_dir.join("inspectors_expanded.csv");
    config
}

fn client(config: &ScrapeConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn blanket_disallow_denies_and_touches_no_output_file() {
    let base = serve("HTTP/1.1 200 OK", "User-agent: *\nDisallow: /\n").await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(base, dir.path());

    let allowed = robots::is_fetch_allowed(&client(&config), &config)
        .await
        .unwrap();

    assert!(!allowed);
    // A denied policy check happens before any writer exists; nothing may
    // have been created at the output path.
    assert!(!config.output_file.exists());
}

#[tokio::test]
async fn missing_robots_file_is_treated_as_allowed() {
    let base = serve("HTTP/1.1 404 Not Found", "").await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(base, dir.path());

    let allowed = robots::is_fetch_allowed(&client(&config), &config)
        .await
        .unwrap();

    assert!(allowed);
}

#[tokio::test]
async fn scoped_disallow_still_permits_the_target() {
    let base = serve("HTTP/1.1 200 OK", "User-agent: *\nDisallow: /admin\n").await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(base, dir.path());

    let allowed = robots::is_fetch_allowed(&client(&config), &config)
        .await
        .unwrap();

    assert!(allowed);
}

#[tokio::test]
async fn unreachable_robots_host_applies_the_configured_fallback() {
    // Bind a port, then drop the listener so the fetch gets refused.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(base, dir.path());

    let denied = robots::is_fetch_allowed(&client(&config), &config)
        .await
        .unwrap();
    assert!(!denied, "default fallback is fail-closed");

    config.robots_fallback = RobotsFallback::Allow;
    let allowed = robots::is_fetch_allowed(&client(&config), &config)
        .await
        .unwrap();
    assert!(allowed);
}
