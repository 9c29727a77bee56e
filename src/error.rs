// src/error.rs

use thiserror::Error;

/// Failures while turning a fetched page into records.
///
/// Row-level variants reject a single listing row; the collector decides
/// whether that skips the row or aborts the run. Document-level variants
/// always abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A cross-listing fragment has no leading subject token.
    #[error("malformed course code fragment {fragment:?} in {raw:?}")]
    MalformedCode { fragment: String, raw: String },

    #[error("subject option {text:?} has no \" - \" separator")]
    MissingSeparator { text: String },

    #[error("subject {subject} not among the aliases of {raw:?}")]
    SubjectNotListed { subject: String, raw: String },

    #[error("listing row has no {element}")]
    MissingElement { element: &'static str },

    #[error("row {raw:?} has {found} demand cells, expected {expected}")]
    MissingDemandCell {
        raw: String,
        found: usize,
        expected: usize,
    },

    #[error("subject index lists no subjects")]
    NoSubjects,

    #[error("reference page for {subject} has no date headers")]
    NoDateHeaders { subject: String },
}

impl ExtractError {
    /// Whether this error only invalidates one listing row.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ExtractError::MalformedCode { .. }
                | ExtractError::SubjectNotListed { .. }
                | ExtractError::MissingElement { .. }
                | ExtractError::MissingDemandCell { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_level_classification() {
        assert!(ExtractError::MissingElement { element: "code link" }.is_row_level());
        assert!(ExtractError::MalformedCode {
            fragment: "".into(),
            raw: "ECON 101/".into()
        }
        .is_row_level());
        assert!(!ExtractError::NoSubjects.is_row_level());
        assert!(!ExtractError::MissingSeparator { text: "ECON".into() }.is_row_level());
    }

    #[test]
    fn test_messages_name_the_input() {
        let e = ExtractError::SubjectNotListed {
            subject: "ECON".into(),
            raw: "AMTH 101".into(),
        };
        assert_eq!(
            e.to_string(),
            "subject ECON not among the aliases of \"AMTH 101\""
        );
    }
}
