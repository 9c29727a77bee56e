// src/collect.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::ScrapeConfig;
use crate::error::ExtractError;
use crate::extract::{fan_out, resolve_aliases, Emission, ListingRow};
use crate::model::{Course, DemandRecord, Subject};
use crate::source::CourseSource;

/// The three demand-side tables accumulated over a run.
#[derive(Debug, Default, Clone)]
pub struct Tables {
    pub subjects: Vec<Subject>,
    pub courses: Vec<Course>,
    pub demand: Vec<DemandRecord>,
}

/// A listing row that was rejected and left out of the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_id: u32,
    pub subject: String,
    pub reason: String,
}

/// Everything one collection pass produced.
#[derive(Debug, Clone)]
pub struct Collection {
    pub tables: Tables,
    pub dates: Vec<String>,
    /// Listing rows visited over all subjects, emitted or not.
    pub rows_seen: u32,
    pub skipped: Vec<SkippedRow>,
}

/// Walks every subject of a source in order and builds the demand tables.
///
/// Row ids come from one counter that advances once per listing row across
/// the whole run, so a course group's id is the position of the row that
/// emitted it.
pub struct Collector<'a, S> {
    source: &'a S,
    config: &'a ScrapeConfig,
    next_id: u32,
    tables: Tables,
    skipped: Vec<SkippedRow>,
}

impl<'a, S: CourseSource> Collector<'a, S> {
    pub fn new(source: &'a S, config: &'a ScrapeConfig) -> Self {
        Self {
            source,
            config,
            next_id: 1,
            tables: Tables::default(),
            skipped: Vec::new(),
        }
    }

    /// Fetch the subject list and date headers, then every subject page.
    #[instrument(level = "info", skip(self), fields(source = %self.source.describe()))]
    pub async fn run(mut self) -> Result<Collection> {
        let subjects = self
            .source
            .fetch_subject_list()
            .await
            .context("fetching subject list")?;
        info!(count = subjects.len(), "subjects");

        let reference = &self.config.reference_subject;
        let dates = self
            .source
            .fetch_date_headers(reference)
            .await
            .with_context(|| format!("fetching date headers from {}", reference))?;
        info!(count = dates.len(), first = ?dates.first(), last = ?dates.last(), "date headers");

        let known: HashSet<String> = subjects.iter().map(|s| s.code.clone()).collect();

        for subject in &subjects {
            if !self.config.pause.is_zero() {
                sleep(self.config.pause).await;
            }
            let rows = self
                .source
                .fetch_subject_page(&subject.code)
                .await
                .with_context(|| format!("fetching listing for {}", subject.code))?;
            let before = self.tables.courses.len();
            self.collect_subject(&subject.code, rows, &known, &dates)?;
            info!(
                subject = %subject.code,
                courses = self.tables.courses.len() - before,
                "collected"
            );
        }

        self.tables.subjects = subjects;
        Ok(Collection {
            tables: self.tables,
            dates,
            rows_seen: self.next_id - 1,
            skipped: self.skipped,
        })
    }

    /// Process one subject's listing rows against the run-wide date headers.
    pub fn collect_subject(
        &mut self,
        subject: &str,
        rows: Vec<Result<ListingRow, ExtractError>>,
        known: &HashSet<String>,
        dates: &[String],
    ) -> Result<()> {
        for row in rows {
            let id = self.next_id;
            self.next_id += 1;

            match self.collect_row(id, subject, row, known, dates) {
                Ok(()) => {}
                Err(e) if e.is_row_level() && !self.config.strict => {
                    warn!(row_id = id, subject, error = %e, "skipping listing row");
                    self.skipped.push(SkippedRow {
                        row_id: id,
                        subject: subject.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("row {} of subject {}", id, subject))
                }
            }
        }
        Ok(())
    }

    fn collect_row(
        &mut self,
        id: u32,
        subject: &str,
        row: Result<ListingRow, ExtractError>,
        known: &HashSet<String>,
        dates: &[String],
    ) -> Result<(), ExtractError> {
        let row = row?;
        match resolve_aliases(&row.code, subject, known)? {
            Emission::Skip => {
                debug!(row_id = id, code = %row.code, "owned by another subject");
            }
            Emission::Emit(aliases) => {
                let (courses, demand) = fan_out(id, &row, &aliases, dates)?;
                self.tables.courses.extend(courses);
                self.tables.demand.extend(demand);
            }
        }
        Ok(())
    }

    /// Id the next listing row will receive.
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }
}
