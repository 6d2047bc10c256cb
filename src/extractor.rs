use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::error::{Result, ScrapeError};

/// One output record per (inspector, county) pair. An inspector listed for
/// N counties produces N records sharing all other fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InspectorRecord {
    pub name: String,
    pub program_area: String,
    pub email: String,
    pub phone: String,
    pub county: String,
}

/// Intermediate form of one table row, expanded immediately into records
/// and never retained.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub name: String,
    pub program_area: String,
    pub email: String,
    pub phone: String,
    pub counties: Vec<String>,
}

impl RawRow {
    /// One record per county, in county-list order.
    pub fn expand(self) -> Vec<InspectorRecord> {
        let RawRow {
            name,
            program_area,
            email,
            phone,
            counties,
        } = self;
        counties
            .into_iter()
            .map(|county| InspectorRecord {
                name: name.clone(),
                program_area: program_area.clone(),
                email: email.clone(),
                phone: phone.clone(),
                county,
            })
            .collect()
    }
}

pub struct Extractor {
    row_selector: Selector,
    cell_selector: Selector,
    span_selector: Selector,
}

impl Extractor {
    pub fn new(row_selector: &str) -> Result<Self> {
        Ok(Extractor {
            row_selector: Selector::parse(row_selector)
                .map_err(|_| ScrapeError::InvalidSelector(row_selector.to_string()))?,
            cell_selector: Selector::parse("td").unwrap(),
            span_selector: Selector::parse("span").unwrap(),
        })
    }

    /// Lazily yields one RawRow per table row present in the document.
    pub fn rows<'a>(
        &'a self,
        document: &'a Html,
    ) -> impl Iterator<Item = Result<RawRow>> + 'a {
        document
            .select(&self.row_selector)
            .enumerate()
            .map(move |(index, row)| self.parse_row(index, row))
    }

    fn parse_row(&self, index: usize, row: ElementRef) -> Result<RawRow> {
        let cells: Vec<ElementRef> = row.select(&self.cell_selector).collect();
        if cells.len() < 4 {
            return Err(ScrapeError::MalformedRow {
                row: index,
                cells: cells.len(),
            });
        }

        let name = cell_text(&cells[0]);
        let program_area = cell_text(&cells[1]);

        // The contact cell renders its spans positionally: first span is the
        // email, second the phone. A phone-only row would land in the email
        // column; the source has never rendered one.
        let spans: Vec<String> = cells[2]
            .select(&self.span_selector)
            .map(|span| cell_text(&span))
            .collect();
        let email = spans.first().cloned().unwrap_or_default();
        let phone = spans.get(1).cloned().unwrap_or_default();

        // Split on the literal ", " delimiter; always at least one county.
        let counties = cell_text(&cells[3])
            .split(", ")
            .map(str::to_string)
            .collect();

        Ok(RawRow {
            name,
            program_area,
            email,
            phone,
            counties,
        })
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<Vec<_>>().join("").trim().to_string()
}
