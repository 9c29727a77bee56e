use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use coursestats::{
    config::{
        ScrapeConfig, Semester, DEFAULT_REFERENCE_SUBJECT, DEFAULT_SEMESTER, DEFAULT_TARGET_URL,
    },
    pipeline,
    source::{CourseSource, HttpSource, Recording, SnapshotSource},
};
use reqwest::Client;
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Course demand and catalog scraper.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory the CSV tables are written to.
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Semester code, e.g. 202001 (2020 spring) or 201903 (2019 fall).
    #[arg(long, global = true, default_value = DEFAULT_SEMESTER)]
    semester: Semester,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape subjects, courses and per-date demand.
    Scrape(ScrapeArgs),
    /// Flatten a catalog JSON file into coursetable.csv.
    Coursetable {
        /// Catalog JSON; defaults to <output-dir>/coursetable_<semester>.json.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// Subject whose listing supplies the date headers.
    #[arg(long, default_value = DEFAULT_REFERENCE_SUBJECT)]
    reference_subject: String,

    /// Pause between subject fetches, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pause_ms: u64,

    /// Abort on the first malformed listing row instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Read pages from a saved snapshot directory instead of the network.
    #[arg(long, conflicts_with = "record")]
    snapshot: Option<PathBuf>,

    /// Save every fetched page into this directory.
    #[arg(long)]
    record: Option<PathBuf>,
}

async fn run_scrape<S: CourseSource>(source: &S, config: &ScrapeConfig) -> Result<()> {
    let report = pipeline::scrape(source, config).await?;
    info!(
        subjects = report.subjects,
        courses = report.courses,
        demand = report.demand,
        "finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scrape(args) => {
            let config = ScrapeConfig {
                target_url: args.url,
                semester: cli.semester,
                output_dir: cli.output_dir,
                reference_subject: args.reference_subject,
                pause: Duration::from_millis(args.pause_ms),
                strict: args.strict,
            };

            if let Some(dir) = args.snapshot {
                return run_scrape(&SnapshotSource::new(dir), &config).await;
            }
            let http = HttpSource::new(Client::new(), &config.target_url, config.semester.code())?;
            match args.record {
                Some(dir) => run_scrape(&Recording::new(http, dir), &config).await,
                None => run_scrape(&http, &config).await,
            }
        }
        Command::Coursetable { catalog } => {
            let catalog = catalog.unwrap_or_else(|| {
                cli.output_dir
                    .join(format!("coursetable_{}.json", cli.semester.code()))
            });
            let path = pipeline::coursetable(&catalog, &cli.output_dir)?;
            info!(path = %path.display(), "finished");
            Ok(())
        }
    }
}
