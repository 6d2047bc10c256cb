use std::fs::File;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::extractor::InspectorRecord;

pub const HEADER: [&str; 5] = [
    "Inspector Name",
    "Program Area",
    "Email",
    "Phone Number",
    "County",
];

/// Writes the expanded records as UTF-8 CSV. The header goes out as soon as
/// the file is created, so an empty result set still produces a header-only
/// file.
pub struct CsvWriter {
    inner: csv::Writer<File>,
    path: PathBuf,
    written: usize,
}

impl CsvWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        info!("Saving scraped data to {}...", path.display());
        let file = File::create(&path)?;
        let mut inner = csv::WriterBuilder::new().from_writer(file);
        inner.write_record(HEADER)?;
        Ok(CsvWriter {
            inner,
            path,
            written: 0,
        })
    }

    pub fn write(&mut self, record: &InspectorRecord) -> Result<()> {
        self.inner.write_record([
            record.name.as_str(),
            record.program_area.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            record.county.as_str(),
        ])?;
        self.written += 1;
        info!("Added record for {} in {}.", record.name, record.county);
        Ok(())
    }

    /// Flushes and reports the record count.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        info!(
            "Wrote {} records to {}.",
            self.written,
            self.path.display()
        );
        Ok(self.written)
    }
}
