//! Page-to-record extraction for the course-stats pages.
//!
//! Every function here takes an already-fetched document body and is free of
//! I/O, so the same code serves the HTTP and snapshot sources.

pub mod dates;
pub mod listing;
pub mod subjects;

pub use dates::extract_date_headers;
pub use listing::{extract_rows, fan_out, resolve_aliases, Emission, ListingRow};
pub use subjects::extract_subjects;

use scraper::ElementRef;

/// Concatenated text of an element with whitespace runs collapsed to one space.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Like [`element_text`], with `;` stripped for the exported code/title
/// columns. The strip runs first so `"Law ; Society"` leaves no double space.
pub(crate) fn sanitized_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>().replace(';', ""))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_element_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>\n  Intro to\n\t <b>Micro</b>economics  </p>");
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "Intro to Microeconomics");
    }

    #[test]
    fn test_sanitized_text_strips_semicolons_before_collapsing() {
        let doc = Html::parse_fragment(
            "<ul><li>Law ; Society; Ethics</li><li> ; </li><li>ECON 101</li></ul>",
        );
        let sel = Selector::parse("li").unwrap();
        let texts: Vec<String> = doc.select(&sel).map(sanitized_text).collect();
        assert_eq!(texts, ["Law Society Ethics", "", "ECON 101"]);
    }
}
