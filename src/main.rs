use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};

use mpk_version_changer::config::{self, AppConfig};
use mpk_version_changer::logging;
use mpk_version_changer::package::{MetadataRecord, PackageError, Pipeline};
use mpk_version_changer::versions::{
    HttpVersionList, MendixVersion, VersionListSource, spawn_fetch,
};

#[derive(Parser)]
#[command(name = "mpk-version-changer")]
#[command(version, about = "Change the product and build version of a Mendix package")]
struct Cli {
    /// Config file to use instead of config.json in the data directory
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the version metadata of a package
    Show {
        archive: PathBuf,

        /// Do not download the list of known versions
        #[arg(long)]
        offline: bool,
    },
    /// Save a copy of a package with new version metadata
    #[command(group(
        ArgGroup::new("change")
            .required(true)
            .multiple(true)
            .args(["product_version", "build_version", "mendix_version"])
    ))]
    Set {
        archive: PathBuf,

        #[arg(long)]
        product_version: Option<String>,

        #[arg(long)]
        build_version: Option<String>,

        /// Set both fields to this version
        #[arg(long, short = 'm')]
        mendix_version: Option<MendixVersion>,
    },
    /// List the known Mendix versions, newest first
    Versions {
        /// Override the configured version list URL
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(&config::log_path())
        .inspect_err(|e| eprintln!("warning: logging disabled: {}", e))
        .ok();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let config = AppConfig::load(&config_path)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, config))
}

async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Show { archive, offline } => show(archive, offline, &config).await,
        Command::Set {
            archive,
            product_version,
            build_version,
            mendix_version,
        } => {
            let scratch_dir = config.scratch_dir();
            let saved = tokio::task::spawn_blocking(move || -> Result<PathBuf, PackageError> {
                let mut pipeline = Pipeline::new(scratch_dir);
                let mut record = pipeline.extract(&archive)?;
                apply_changes(&mut record, product_version, build_version, mendix_version);
                pipeline.save(&record.product_version, &record.build_version)
            })
            .await??;

            println!("Package saved as {}", saved.display());
            Ok(())
        }
        Command::Versions { url } => {
            let mut config = config;
            if let Some(url) = url {
                config.versions_url = url;
            }
            let source = HttpVersionList::from_config(&config)?;
            let versions = source
                .fetch_versions()
                .await
                .with_context(|| format!("Error loading versions from {}", source.url()))?;

            for version in versions {
                println!("{}", version);
            }
            Ok(())
        }
    }
}

async fn show(archive: PathBuf, offline: bool, config: &AppConfig) -> anyhow::Result<()> {
    // Start the download first so it overlaps with extraction.
    let pending = if offline {
        None
    } else {
        let source: Arc<dyn VersionListSource> = Arc::new(HttpVersionList::from_config(config)?);
        Some(spawn_fetch(source))
    };

    let scratch_dir = config.scratch_dir();
    let record =
        tokio::task::spawn_blocking(move || Pipeline::new(scratch_dir).extract(&archive)).await??;

    println!("Product version: {}", record.product_version);
    println!("Build version:   {}", record.build_version);

    let Some(pending) = pending else {
        return Ok(());
    };

    match pending.await {
        Ok(Ok(versions)) => {
            let current = record.product_version.parse::<MendixVersion>().ok();
            if let (Some(current), Some(newest)) = (current, versions.first()) {
                if current < *newest {
                    println!("Newer version available: {}", newest);
                }
            }
            println!("Known versions:");
            for version in versions {
                let marker = if Some(version) == current { "*" } else { " " };
                println!("{} {}", marker, version);
            }
        }
        Ok(Err(e)) => eprintln!("warning: error loading versions: {}", e),
        Err(_) => eprintln!("warning: version list fetch was aborted"),
    }

    Ok(())
}

fn apply_changes(
    record: &mut MetadataRecord,
    product_version: Option<String>,
    build_version: Option<String>,
    mendix_version: Option<MendixVersion>,
) {
    if let Some(version) = mendix_version {
        record.product_version = version.to_string();
        record.build_version = version.to_string();
    }
    if let Some(product_version) = product_version {
        record.product_version = product_version;
    }
    if let Some(build_version) = build_version {
        record.build_version = build_version;
    }
}
