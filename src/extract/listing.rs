// src/extract/listing.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

use super::sanitized_text;
use crate::error::ExtractError;
use crate::model::{Course, DemandRecord};

static ROW: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#content > div > table > tbody > tr").expect("listing row selector")
});
static CODE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("td a").expect("code selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("td span").expect("title selector"));
static TREND_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.trendCell").expect("trend cell selector"));

/// The raw view of one listing row, before cross-listing resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Combined code, e.g. `ECON 101/AMTH 101`.
    pub code: String,
    pub title: String,
    /// Demand counts in date-header order, trimmed but otherwise verbatim.
    pub counts: Vec<String>,
}

/// What a listing row contributes during the current subject's pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The current subject owns the row. Aliases in listing order; the first
    /// one is the canonical alias.
    Emit(Vec<String>),
    /// Another subject owns the row; it is (or was) emitted on that pass.
    Skip,
}

/// Extract every listing row of a subject page.
///
/// One entry per `<tr>`, so a row that fails to parse still occupies its
/// position for id assignment.
#[instrument(level = "debug", skip(body), fields(body_len = body.len()))]
pub fn extract_rows(body: &str) -> Vec<Result<ListingRow, ExtractError>> {
    let doc = Html::parse_document(body);
    let rows: Vec<_> = doc.select(&ROW).map(parse_row).collect();
    debug!(rows = rows.len(), "extracted listing rows");
    rows
}

fn parse_row(tr: ElementRef<'_>) -> Result<ListingRow, ExtractError> {
    let code = tr
        .select(&CODE_LINK)
        .next()
        .map(sanitized_text)
        .ok_or(ExtractError::MissingElement {
            element: "code link",
        })?;
    let title = tr
        .select(&TITLE)
        .next()
        .map(sanitized_text)
        .ok_or(ExtractError::MissingElement { element: "title" })?;
    let counts = tr
        .select(&TREND_CELL)
        .map(|td| td.text().collect::<String>().trim().to_string())
        .collect();

    Ok(ListingRow {
        code,
        title,
        counts,
    })
}

/// Decide whether the row with combined code `raw` is emitted while
/// iterating `subject`.
///
/// Fragments whose leading token is not a known subject code are dropped.
/// The row is emitted only when the fragment belonging to `subject` is the
/// first surviving one, so each cross-listed course is emitted exactly once
/// over a full pass of all subjects.
pub fn resolve_aliases(
    raw: &str,
    subject: &str,
    known: &HashSet<String>,
) -> Result<Emission, ExtractError> {
    let mut aliases = Vec::new();
    let mut canonical = None;

    for fragment in raw.split('/').map(str::trim) {
        let token = fragment
            .split_whitespace()
            .next()
            .ok_or_else(|| ExtractError::MalformedCode {
                fragment: fragment.to_string(),
                raw: raw.to_string(),
            })?;
        if !known.contains(token) {
            trace!(fragment, "dropping unknown subject fragment");
            continue;
        }
        if canonical.is_none() && token == subject {
            canonical = Some(aliases.len());
        }
        aliases.push(fragment.to_string());
    }

    match canonical {
        Some(0) => Ok(Emission::Emit(aliases)),
        Some(_) => Ok(Emission::Skip),
        None => Err(ExtractError::SubjectNotListed {
            subject: subject.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Expand an owned row into its course and demand records.
///
/// Every alias becomes a `Course` with the shared `id`; for every alias there
/// is one `DemandRecord` per date header, tagged with the canonical alias and
/// holding the count from the aligned cell.
pub fn fan_out(
    id: u32,
    row: &ListingRow,
    aliases: &[String],
    dates: &[String],
) -> Result<(Vec<Course>, Vec<DemandRecord>), ExtractError> {
    if row.counts.len() < dates.len() {
        return Err(ExtractError::MissingDemandCell {
            raw: row.code.clone(),
            found: row.counts.len(),
            expected: dates.len(),
        });
    }
    let canonical = aliases.first().cloned().unwrap_or_default();

    let courses: Vec<Course> = aliases
        .iter()
        .map(|code| Course {
            id,
            code: code.clone(),
            name: row.title.clone(),
        })
        .collect();

    let mut demand = Vec::with_capacity(aliases.len() * dates.len());
    for _ in aliases {
        demand.extend(dates.iter().zip(&row.counts).map(|(date, count)| DemandRecord {
            id,
            code: canonical.clone(),
            date: date.clone(),
            count: count.clone(),
        }));
    }

    Ok((courses, demand))
}
