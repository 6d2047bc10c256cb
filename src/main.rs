use inspector_scraper_lib::{logger, robots};
use inspector_scraper_lib::{BrowserSession, CsvWriter, Extractor, Navigator, ScrapeConfig, ScrapeError};

use std::process::ExitCode;
use std::time::Duration;
use log::{error, info};
use scraper::Html;

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();
    info!("Starting Inspector Lookup Scraper...");

    let config = ScrapeConfig::default();

    match run(&config).await {
        Ok(_) => {
            info!("Web scraping completed successfully.");
            println!("Data saved to {}", config.output_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            match &e {
                ScrapeError::PolicyDenied { url } => error!(
                    "Scraping {} is not allowed by the robots.txt file. Exiting...",
                    url
                ),
                _ => error!("Scraping failed: {}", e),
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(config: &ScrapeConfig) -> Result<usize, ScrapeError> {
    // 1. Robots policy check, before any file or browser exists.
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(30))
        .build()?;
    if !robots::is_fetch_allowed(&client, config).await? {
        return Err(ScrapeError::PolicyDenied {
            url: config.base_url.clone(),
        });
    }

    info!("Ensuring compliance with website terms of service and legal regulations.");
    info!(
        "IMPORTANT: This tool should only be used if scraping this website \
         is allowed according to its terms of service."
    );

    // 2. Browser session. Closed on success and error paths alike.
    let session = BrowserSession::launch(config).await?;
    let result = scrape(&session, config).await;
    session.close().await;
    result
}

async fn scrape(session: &BrowserSession, config: &ScrapeConfig) -> Result<usize, ScrapeError> {
    // 3. Drive the page and snapshot the rendered results.
    let navigator = Navigator::new(session.page(), config);
    let html = navigator.run().await?;

    // 4. Extract and write, one output row per (inspector, county) pair.
    let extractor = Extractor::new(&config.results_row_selector())?;
    let mut writer = CsvWriter::create(&config.output_file)?;
    let document = Html::parse_document(&html);
    for raw in extractor.rows(&document) {
        for record in raw?.expand() {
            writer.write(&record)?;
        }
    }
    writer.finish()
}
