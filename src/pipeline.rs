// src/pipeline.rs

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::collect::Collector;
use crate::config::ScrapeConfig;
use crate::coursetable::load_catalog;
use crate::export;
use crate::report::RunReport;
use crate::source::CourseSource;

/// Collect the demand tables from `source` and write them out.
///
/// Nothing is written unless collection finishes: an aborted run leaves the
/// output directory untouched.
pub async fn scrape<S: CourseSource>(source: &S, config: &ScrapeConfig) -> Result<RunReport> {
    let started_at = Utc::now();
    info!(semester = %config.semester, source = %source.describe(), "scrape start");

    let collection = Collector::new(source, config).run().await?;

    export::write_tables(&config.output_dir, &collection.tables)?;
    let report = RunReport::new(
        config.semester.code(),
        source.describe(),
        started_at,
        &collection,
    );
    let path = report.write(&config.output_dir)?;
    info!(
        courses = report.courses,
        demand = report.demand,
        skipped = report.skipped.len(),
        report = %path.display(),
        "scrape done"
    );
    Ok(report)
}

/// Flatten the catalog JSON at `catalog` into `coursetable.csv` under `out_dir`.
pub fn coursetable(catalog: &Path, out_dir: &Path) -> Result<PathBuf> {
    let rows = load_catalog(catalog)?;
    export::write_coursetable(out_dir, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SnapshotSource;
    use std::{fs, time::Duration};
    use tempfile::tempdir;

    const INDEX: &str = r#"<html><body><select id="subjectCode">
        <option value=""></option>
        <option value="AMTH">AMTH - Applied Mathematics</option>
        <option value="ECON">ECON - Economics</option>
    </select></body></html>"#;

    fn listing(rows: &str) -> String {
        format!(
            r#"<html><body><div id="content"><div><table>
                <thead><tr><th>Course</th><th><table><tr><td>1/10</td><td>1/11</td></tr></table></th></tr></thead>
                <tbody>{rows}</tbody>
            </table></div></div></body></html>"#
        )
    }

    fn write_snapshot(dir: &Path) {
        fs::create_dir_all(dir.join("subject")).unwrap();
        fs::write(dir.join("index.html"), INDEX).unwrap();
        fs::write(
            dir.join("subject/AMTH.html"),
            listing(
                r#"<tr><td><a>ECON 101/AMTH 101</a></td><td><span>Intro Micro</span></td>
                   <td class="trendCell">5</td><td class="trendCell">6</td></tr>"#,
            ),
        )
        .unwrap();
        fs::write(
            dir.join("subject/ECON.html"),
            listing(
                r#"<tr><td><a>ECON 101/AMTH 101</a></td><td><span>Intro Micro</span></td>
                   <td class="trendCell">5</td><td class="trendCell">6</td></tr>
                   <tr><td><a>ECON 115</a></td><td><span>Intro Macro</span></td>
                   <td class="trendCell">n/a</td></tr>"#,
            ),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_scrape_from_snapshot_writes_all_tables() {
        let snap = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_snapshot(snap.path());

        let config = ScrapeConfig {
            output_dir: out.path().to_path_buf(),
            pause: Duration::ZERO,
            ..ScrapeConfig::default()
        };
        let report = scrape(&SnapshotSource::new(snap.path()), &config)
            .await
            .unwrap();

        assert_eq!(report.subjects, 2);
        assert_eq!(report.rows_seen, 3);
        assert_eq!(report.courses, 2);
        assert_eq!(report.demand, 4);
        // ECON 115 has one demand cell for two date headers.
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].row_id, 3);

        let courses = fs::read_to_string(out.path().join("courses.csv")).unwrap();
        assert_eq!(
            courses,
            "id,code,name\n2,ECON 101,Intro Micro\n2,AMTH 101,Intro Micro\n"
        );
        let demand = fs::read_to_string(out.path().join("demand.csv")).unwrap();
        assert_eq!(
            demand,
            "id,date,count\n2,1/10,5\n2,1/11,6\n2,1/10,5\n2,1/11,6\n"
        );
        assert!(out.path().join("subjects.csv").exists());
        assert!(out.path().join("run.json").exists());
    }

    #[tokio::test]
    async fn test_aborted_scrape_writes_nothing() {
        let snap = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_snapshot(snap.path());
        fs::remove_file(snap.path().join("subject/ECON.html")).unwrap();

        let config = ScrapeConfig {
            output_dir: out.path().to_path_buf(),
            pause: Duration::ZERO,
            ..ScrapeConfig::default()
        };
        assert!(scrape(&SnapshotSource::new(snap.path()), &config)
            .await
            .is_err());
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_coursetable_end_to_end() {
        let tmp = tempdir().unwrap();
        let catalog = tmp.path().join("coursetable_202001.json");
        fs::write(
            &catalog,
            r#"[{"subject": "ECON", "number": "101", "section": "1",
                 "times": {"summary": "TTh 9-10.15"}, "locations_summary": "SSS 114",
                 "areas": [], "skills": [],
                 "average": {"same_class": {"rating": 4, "workload": 2.5}}},
                {"subject": "HIST", "number": "001", "section": "1",
                 "average": {"same_both": {"rating": "N/A"}, "same_class": {"rating": 4.1}}}]"#,
        )
        .unwrap();

        let path = coursetable(&catalog, tmp.path()).unwrap();
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "subject,number,section,times,locations,rating,workload\n\
             ECON,101,1,TTh 9-10.15,SSS 114,4,2.5\n\
             HIST,001,1,,,N/A,\n"
        );
    }
}
