mod cli;
mod progress;

use clap::Parser;
use cli::{ArchiveArgs, Cli, Commands, ConfigArgs, FetchArgs};
use pagefetch::archive::cbz_path;
use pagefetch::config::Config;
use pagefetch::fetch::{ProgressSink, SilentProgress};
use pagefetch::{observability, pipeline};
use progress::BarProgress;
use std::sync::Arc;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => fetch(args).await?,
        Commands::Archive(args) => archive(args).await?,
        Commands::ShowConfig(args) => show_config(args)?,
    }

    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<Config, AnyError> {
    let config = match &args.config {
        Some(path) => Config::load_from_path(path.clone())?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn fetch(args: FetchArgs) -> Result<(), AnyError> {
    let mut config = load_config(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    observability::init_tracing(&config.telemetry)?;

    let progress: Arc<dyn ProgressSink> = if args.no_progress || args.json {
        Arc::new(SilentProgress)
    } else {
        Arc::new(BarProgress::new())
    };

    let summary = pipeline::run(&config, progress).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let report = &summary.report;
        println!(
            "{} of {} images downloaded to {}.",
            report.saved_count,
            report.requested,
            config.fetch.output_dir.display()
        );
        if !report.failed_filenames.is_empty() {
            println!("Failed downloads: {}", report.failed_filenames.join(", "));
        }
        if !report.unsupported.is_empty() {
            let indices: Vec<String> = report
                .unsupported
                .iter()
                .map(|page| page.index.to_string())
                .collect();
            println!("Unsupported content type: pages {}", indices.join(", "));
        }
        if let Some(archive) = &summary.archive {
            println!("CBZ file created: {}", archive.path.display());
        }
    }

    Ok(())
}

async fn archive(args: ArchiveArgs) -> Result<(), AnyError> {
    observability::init_tracing(&Default::default())?;

    let archive_path = args
        .output
        .clone()
        .unwrap_or_else(|| cbz_path(&args.dir, &args.name));

    let summary = pipeline::build_archive(args.dir, archive_path).await?;
    println!(
        "CBZ file created: {} ({} entries)",
        summary.path.display(),
        summary.entries.len()
    );

    Ok(())
}

fn show_config(args: ConfigArgs) -> Result<(), AnyError> {
    let config = load_config(&args)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
