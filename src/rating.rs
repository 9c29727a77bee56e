// src/rating.rs

use serde_json::Value;
use tracing::trace;

/// Evaluation sources under a course's `average` object, from most to least
/// specific comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKey {
    /// Same course with the same instructors.
    SameBoth,
    /// Same course, any instructor.
    SameClass,
    /// Same instructors, any course.
    SameProfessors,
}

impl RatingKey {
    pub const PRIORITY: [RatingKey; 3] = [
        RatingKey::SameBoth,
        RatingKey::SameClass,
        RatingKey::SameProfessors,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RatingKey::SameBoth => "same_both",
            RatingKey::SameClass => "same_class",
            RatingKey::SameProfessors => "same_professors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingField {
    Rating,
    Workload,
}

impl RatingField {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingField::Rating => "rating",
            RatingField::Workload => "workload",
        }
    }
}

/// First non-null `field` found under the sources in [`RatingKey::PRIORITY`]
/// order, together with the source it came from.
pub fn first_present(average: &Value, field: RatingField) -> Option<(RatingKey, &Value)> {
    RatingKey::PRIORITY.into_iter().find_map(|key| {
        average
            .get(key.as_str())
            .and_then(|source| source.get(field.as_str()))
            .filter(|v| !v.is_null())
            .map(|v| (key, v))
    })
}

/// Resolve `field` to the text written in its CSV column, or `None` when no
/// source carries it.
///
/// Numbers keep their JSON formatting and strings pass through verbatim, so a
/// placeholder such as `"N/A"` is exported as found. Each field is resolved
/// on its own; the winning source for `rating` says nothing about where
/// `workload` comes from.
pub fn resolve(average: &Value, field: RatingField) -> Option<String> {
    let (key, value) = first_present(average, field)?;
    let text = match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) | Value::Null => None,
    };
    trace!(field = field.as_str(), source = key.as_str(), ?text, "resolved");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_per_field() {
        let avg = json!({
            "same_both": {"rating": 3},
            "same_class": {"rating": 5, "workload": 2}
        });
        assert_eq!(resolve(&avg, RatingField::Rating).as_deref(), Some("3"));
        assert_eq!(resolve(&avg, RatingField::Workload).as_deref(), Some("2"));
        assert_eq!(
            first_present(&avg, RatingField::Workload).map(|(k, _)| k),
            Some(RatingKey::SameClass)
        );
    }

    #[test]
    fn test_absent_sources_are_missing_not_errors() {
        let avg = json!({});
        assert_eq!(resolve(&avg, RatingField::Rating), None);
        assert_eq!(resolve(&avg, RatingField::Workload), None);
        assert_eq!(resolve(&Value::Null, RatingField::Rating), None);
        assert_eq!(resolve(&json!("n/a"), RatingField::Rating), None);
    }

    #[test]
    fn test_falls_through_to_professors() {
        let avg = json!({
            "same_both": {},
            "same_class": null,
            "same_professors": {"rating": 4.25, "workload": 3.5}
        });
        assert_eq!(resolve(&avg, RatingField::Rating).as_deref(), Some("4.25"));
        assert_eq!(resolve(&avg, RatingField::Workload).as_deref(), Some("3.5"));
    }

    #[test]
    fn test_null_field_falls_through() {
        let avg = json!({
            "same_both": {"rating": null},
            "same_class": {"rating": 2.5}
        });
        assert_eq!(resolve(&avg, RatingField::Rating).as_deref(), Some("2.5"));
    }

    #[test]
    fn test_present_text_value_is_kept_verbatim() {
        let avg = json!({
            "same_both": {"rating": "N/A", "workload": " 3.75 "},
            "same_class": {"rating": 4.1, "workload": 2}
        });
        // A present value wins even when it is not a number.
        assert_eq!(resolve(&avg, RatingField::Rating).as_deref(), Some("N/A"));
        assert_eq!(
            resolve(&avg, RatingField::Workload).as_deref(),
            Some(" 3.75 ")
        );
    }
}
