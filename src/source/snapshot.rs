// src/source/snapshot.rs

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};
use url::form_urlencoded;

use super::{CourseSource, Page};

/// Path of `page` inside a snapshot directory:
/// `index.html` and `subject/<percent-encoded code>.html`.
pub fn snapshot_path(dir: &Path, page: Page<'_>) -> PathBuf {
    match page {
        Page::SubjectIndex => dir.join("index.html"),
        Page::Subject(code) => {
            let name: String = form_urlencoded::byte_serialize(code.as_bytes()).collect();
            dir.join("subject").join(format!("{}.html", name))
        }
    }
}

/// Replays pages saved by [`Recording`] (or by hand) from a directory.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CourseSource for SnapshotSource {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_document(&self, page: Page<'_>) -> Result<String> {
        let path = snapshot_path(&self.dir, page);
        fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading snapshot page {}", path.display()))
    }

    fn describe(&self) -> String {
        format!("snapshot:{}", self.dir.display())
    }
}

/// Wraps a source and saves every page it returns into a snapshot directory.
pub struct Recording<S> {
    inner: S,
    dir: PathBuf,
}

impl<S: CourseSource> Recording<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }
}

impl<S: CourseSource> CourseSource for Recording<S> {
    async fn fetch_document(&self, page: Page<'_>) -> Result<String> {
        let body = self.inner.fetch_document(page).await?;
        let path = snapshot_path(&self.dir, page);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, &body)
            .await
            .with_context(|| format!("writing snapshot page {}", path.display()))?;
        debug!(path = %path.display(), "recorded page");
        Ok(body)
    }

    fn describe(&self) -> String {
        format!("{} (recording to {})", self.inner.describe(), self.dir.display())
    }
}
