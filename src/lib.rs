pub mod config;
pub mod error;
pub mod extractor;
pub mod logger;
pub mod navigator;
pub mod robots;
pub mod session;
pub mod writer;

// Exporting types for convenience
pub use config::{RobotsFallback, ScrapeConfig};
pub use error::ScrapeError;
pub use extractor::{Extractor, InspectorRecord, RawRow};
pub use navigator::Navigator;
pub use session::BrowserSession;
pub use writer::CsvWriter;
