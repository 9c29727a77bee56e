// src/coursetable.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::{fs, path::Path};
use tracing::{debug, info, instrument};

use crate::model::CourseTableRow;
use crate::rating::{self, RatingField};

/// One course as published in the catalog JSON.
///
/// `areas` and `skills` are present in the catalog but not exported, so they
/// are left to serde's unknown-field handling.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCourse {
    #[serde(default, deserialize_with = "text_or_number")]
    pub subject: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub number: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub section: String,
    #[serde(default)]
    pub times: Option<Times>,
    #[serde(default)]
    pub locations_summary: Option<String>,
    #[serde(default)]
    pub average: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Times {
    #[serde(default)]
    pub summary: Option<String>,
}

/// Catalog fields mix `"1"` and `1`; both become text. A missing key is blank.
fn text_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl CatalogCourse {
    pub fn to_row(&self) -> CourseTableRow {
        CourseTableRow {
            subject: self.subject.clone(),
            number: self.number.clone(),
            section: self.section.clone(),
            times: self
                .times
                .as_ref()
                .and_then(|t| t.summary.clone())
                .unwrap_or_default(),
            locations: self.locations_summary.clone().unwrap_or_default(),
            rating: rating::resolve(&self.average, RatingField::Rating),
            workload: rating::resolve(&self.average, RatingField::Workload),
        }
    }
}

/// Parse a catalog document and flatten it, preserving order.
pub fn flatten_catalog(json: &str) -> Result<Vec<CourseTableRow>> {
    let courses: Vec<CatalogCourse> =
        serde_json::from_str(json).context("parsing course catalog")?;
    let rows: Vec<CourseTableRow> = courses.iter().map(CatalogCourse::to_row).collect();
    debug!(
        rows = rows.len(),
        unrated = rows.iter().filter(|r| r.rating.is_none()).count(),
        "flattened catalog"
    );
    Ok(rows)
}

#[instrument(level = "info")]
pub fn load_catalog(path: &Path) -> Result<Vec<CourseTableRow>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let rows = flatten_catalog(&text).with_context(|| format!("in {}", path.display()))?;
    info!(rows = rows.len(), "loaded catalog");
    Ok(rows)
}
