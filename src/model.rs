// src/model.rs

use serde::Serialize;

/// One entry of the subject dropdown, e.g. `AMTH` / `Applied Mathematics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    #[serde(rename = "subject")]
    pub code: String,
    pub name: String,
}

/// One alias of a course group. All aliases of a cross-listed course share `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: u32,
    pub code: String,
    pub name: String,
}

/// A demand count for one course group on one date.
///
/// `code` is the alias under which the row was collected; it is kept for
/// auditing and left out of `demand.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemandRecord {
    pub id: u32,
    #[serde(skip_serializing)]
    pub code: String,
    pub date: String,
    pub count: String,
}

/// Flattened catalog row written to `coursetable.csv`.
///
/// `rating` and `workload` hold the resolved catalog value as text, so numbers
/// keep their catalog formatting and placeholders pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseTableRow {
    pub subject: String,
    pub number: String,
    pub section: String,
    pub times: String,
    pub locations: String,
    pub rating: Option<String>,
    pub workload: Option<String>,
}
