// src/extract/dates.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::error::ExtractError;

static HEADER_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table table").expect("header table selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("cell selector"));

/// Read the date headers from the first nested table of a listing page.
///
/// The result fixes the column layout of every demand row for the run, so it
/// is resolved once from the reference subject's page and reused.
#[instrument(level = "debug", skip(body), fields(body_len = body.len()))]
pub fn extract_date_headers(body: &str, subject: &str) -> Result<Vec<String>, ExtractError> {
    let doc = Html::parse_document(body);
    let headers: Vec<String> = doc
        .select(&HEADER_TABLE)
        .next()
        .map(|table| {
            table
                .select(&CELL)
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    if headers.is_empty() {
        return Err(ExtractError::NoDateHeaders {
            subject: subject.to_string(),
        });
    }
    debug!(count = headers.len(), "extracted date headers");
    Ok(headers)
}
