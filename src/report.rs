// src/report.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::collect::{Collection, SkippedRow};

pub const REPORT_FILE: &str = "run.json";

/// Summary of one demand scrape, written next to the CSV tables.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub semester: String,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub subjects: usize,
    pub date_headers: usize,
    pub rows_seen: u32,
    pub courses: usize,
    pub demand: usize,
    pub skipped: Vec<SkippedRow>,
}

impl RunReport {
    pub fn new(
        semester: &str,
        source: String,
        started_at: DateTime<Utc>,
        collection: &Collection,
    ) -> Self {
        Self {
            semester: semester.to_string(),
            source,
            started_at,
            finished_at: Utc::now(),
            subjects: collection.tables.subjects.len(),
            date_headers: collection.dates.len(),
            rows_seen: collection.rows_seen,
            courses: collection.tables.courses.len(),
            demand: collection.tables.demand.len(),
            skipped: collection.skipped.clone(),
        }
    }

    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::Tables;
    use tempfile::tempdir;

    #[test]
    fn test_report_counts_and_roundtrip_to_disk() {
        let collection = Collection {
            tables: Tables::default(),
            dates: vec!["1/10".into(), "1/11".into()],
            rows_seen: 7,
            skipped: vec![SkippedRow {
                row_id: 5,
                subject: "ECON".into(),
                reason: "listing row has no title".into(),
            }],
        };
        let report = RunReport::new("202001", "memory".into(), Utc::now(), &collection);
        assert_eq!(report.date_headers, 2);
        assert_eq!(report.rows_seen, 7);
        assert!(report.finished_at >= report.started_at);

        let tmp = tempdir().unwrap();
        let path = report.write(tmp.path()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["semester"], "202001");
        assert_eq!(value["skipped"][0]["row_id"], 5);
        assert_eq!(value["skipped"][0]["subject"], "ECON");
    }
}
