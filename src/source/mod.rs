//! Where listing pages come from.
//!
//! A source only has to hand back raw documents; the provided methods of
//! [`CourseSource`] run the shared extractors over them, so the collector is
//! written once for every backend.

pub mod http;
pub mod snapshot;

pub use http::HttpSource;
pub use snapshot::{Recording, SnapshotSource};

use anyhow::Result;

use crate::extract::{self, ListingRow};
use crate::error::ExtractError;
use crate::model::Subject;

/// A document the collector asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    /// The landing page carrying the `#subjectCode` dropdown.
    SubjectIndex,
    /// The listing of one subject for the configured semester.
    Subject(&'a str),
}

#[allow(async_fn_in_trait)]
pub trait CourseSource {
    /// Fetch the raw body of `page`.
    async fn fetch_document(&self, page: Page<'_>) -> Result<String>;

    /// Short human-readable description for logs and the run report.
    fn describe(&self) -> String;

    async fn fetch_subject_list(&self) -> Result<Vec<Subject>> {
        let body = self.fetch_document(Page::SubjectIndex).await?;
        Ok(extract::extract_subjects(&body)?)
    }

    /// Date headers come from the listing of `reference`, a subject known to
    /// have a non-empty table.
    async fn fetch_date_headers(&self, reference: &str) -> Result<Vec<String>> {
        let body = self.fetch_document(Page::Subject(reference)).await?;
        Ok(extract::extract_date_headers(&body, reference)?)
    }

    async fn fetch_subject_page(
        &self,
        subject: &str,
    ) -> Result<Vec<Result<ListingRow, ExtractError>>> {
        let body = self.fetch_document(Page::Subject(subject)).await?;
        Ok(extract::extract_rows(&body))
    }
}
