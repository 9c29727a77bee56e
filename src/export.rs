// src/export.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::collect::Tables;
use crate::model::CourseTableRow;

pub const SUBJECTS_FILE: &str = "subjects.csv";
pub const COURSES_FILE: &str = "courses.csv";
pub const DEMAND_FILE: &str = "demand.csv";
pub const COURSETABLE_FILE: &str = "coursetable.csv";

/// Write `rows` as a headed CSV file; the header comes from the row type.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "wrote");
    Ok(())
}

/// Write `subjects.csv`, `courses.csv` and `demand.csv` under `out_dir`.
pub fn write_tables(out_dir: &Path, tables: &Tables) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let subjects = out_dir.join(SUBJECTS_FILE);
    let courses = out_dir.join(COURSES_FILE);
    let demand = out_dir.join(DEMAND_FILE);
    write_csv(&subjects, &tables.subjects)?;
    write_csv(&courses, &tables.courses)?;
    write_csv(&demand, &tables.demand)?;
    Ok(vec![subjects, courses, demand])
}

pub fn write_coursetable(out_dir: &Path, rows: &[CourseTableRow]) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(COURSETABLE_FILE);
    write_csv(&path, rows)?;
    Ok(path)
}
