// src/source/http.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::{CourseSource, Page};

/// Fetches pages live from the course-stats site.
pub struct HttpSource {
    client: Client,
    base: Url,
    semester: String,
}

impl HttpSource {
    pub fn new(client: Client, base: &str, semester: &str) -> Result<Self> {
        let base = Url::parse(base).with_context(|| format!("parsing target URL {}", base))?;
        Ok(Self {
            client,
            base,
            semester: semester.to_string(),
        })
    }

    /// URL of `page`. Subject codes go through the query serializer, so codes
    /// such as `E&EB` arrive intact.
    pub fn page_url(&self, page: Page<'_>) -> Url {
        let mut url = self.base.clone();
        if let Page::Subject(subject) = page {
            url.query_pairs_mut()
                .clear()
                .append_pair("termCode", &self.semester)
                .append_pair("subjectCode", subject);
        }
        url
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}

impl CourseSource for HttpSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_document(&self, page: Page<'_>) -> Result<String> {
        get_text(&self.client, &self.page_url(page)).await
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> HttpSource {
        HttpSource::new(Client::new(), "https://ivy.yale.edu/course-stats/", "202001").unwrap()
    }

    #[test]
    fn test_index_url_is_base() {
        assert_eq!(
            source().page_url(Page::SubjectIndex).as_str(),
            "https://ivy.yale.edu/course-stats/"
        );
    }

    #[test]
    fn test_subject_url_escapes_ampersand() {
        assert_eq!(
            source().page_url(Page::Subject("E&EB")).as_str(),
            "https://ivy.yale.edu/course-stats/?termCode=202001&subjectCode=E%26EB"
        );
    }

    #[test]
    fn test_bad_base_rejected() {
        assert!(HttpSource::new(Client::new(), "not a url", "202001").is_err());
    }
}
