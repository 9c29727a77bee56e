// src/extract/subjects.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, trace};

use super::element_text;
use crate::error::ExtractError;
use crate::model::Subject;

static SUBJECT_OPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#subjectCode option").expect("subject option selector"));

const SEPARATOR: &str = " - ";

/// Parse the `#subjectCode` dropdown into subjects, in document order.
///
/// The first option is the blank placeholder and is skipped. Every other
/// option reads `"<code> - <name>"`; only the first separator splits, so a
/// name may itself contain `" - "`.
#[instrument(level = "debug", skip(body), fields(body_len = body.len()))]
pub fn extract_subjects(body: &str) -> Result<Vec<Subject>, ExtractError> {
    let doc = Html::parse_document(body);
    let mut subjects = Vec::new();

    for option in doc.select(&SUBJECT_OPTION).skip(1) {
        let text = element_text(option);
        let (code, name) = text
            .split_once(SEPARATOR)
            .ok_or_else(|| ExtractError::MissingSeparator { text: text.clone() })?;
        trace!(code, name, "subject option");
        subjects.push(Subject {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
        });
    }

    if subjects.is_empty() {
        return Err(ExtractError::NoSubjects);
    }
    debug!(count = subjects.len(), "extracted subjects");
    Ok(subjects)
}
