//! Unpack command: index the source trees (or load a saved index), then copy
//! the unpacked application files to their destinations.

use std::path::PathBuf;

use console::Style;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::index::{Index, IndexOptions, Indexer};
use crate::unpack::file_ops::ensure_dir;
use crate::unpack::{UnpackOptions, UnpackReport, Unpacker};

/// Resolved options for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub indexes_path: PathBuf,
    pub temp_dir: PathBuf,
    pub unpack_dir: PathBuf,
    pub parent_dir: String,
    pub skip_db: bool,
    pub no_index: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let parent_dir = match &cli.parent_dir {
            Some(name) => name.clone(),
            None => current_dir_name()?,
        };

        Ok(Self {
            config_path: cli.config_path.clone(),
            indexes_path: cli.indexes_path.clone(),
            temp_dir: cli.temp_dir.clone(),
            unpack_dir: cli.unpack_dir.clone(),
            parent_dir,
            skip_db: cli.skip_db,
            no_index: cli.no_index,
        })
    }
}

fn current_dir_name() -> Result<String> {
    let cwd = std::env::current_dir()?;
    Ok(cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default())
}

pub fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    let report = execute(&settings)?;
    print_summary(&settings, report);
    Ok(())
}

/// Run the whole pipeline for `settings`.
pub fn execute(settings: &Settings) -> Result<UnpackReport> {
    let config = Config::load(&settings.config_path)?;
    ensure_dir(&settings.temp_dir)?;

    let index = load_or_build_index(settings, &config)?;
    if index.is_empty() {
        tracing::warn!("Index is empty, every bundle file will go to new_files");
    }

    let unpacker = Unpacker::new(
        &index,
        UnpackOptions {
            output_root: settings.temp_dir.clone(),
            parent_dir: settings.parent_dir.clone(),
            skip_db: settings.skip_db,
        },
    );
    unpacker.prepare(config.aliases())?;
    unpacker.run(&settings.unpack_dir)
}

fn load_or_build_index(settings: &Settings, config: &Config) -> Result<Index> {
    if settings.no_index {
        return Index::load(&settings.indexes_path);
    }

    let index = Indexer::new(
        config,
        IndexOptions {
            skip_db: settings.skip_db,
            parent_dir: settings.parent_dir.clone(),
        },
    )
    .build()?;
    index.save(&settings.indexes_path)?;

    let green = Style::new().green();
    println!(
        "{} {} entries to {}",
        green.apply_to("Indexed"),
        index.len(),
        settings.indexes_path.display()
    );

    Ok(index)
}

fn print_summary(settings: &Settings, report: UnpackReport) {
    let bold = Style::new().bold();
    let yellow = Style::new().yellow();

    println!(
        "{} {} file(s) copied to their repositories",
        bold.apply_to("Done:"),
        report.mapped
    );
    if report.unmapped > 0 {
        println!(
            "{} {} file(s) could not be mapped, see {}",
            yellow.apply_to("New:"),
            report.unmapped,
            settings
                .temp_dir
                .join(crate::unpack::NEW_FILES_DIR)
                .display()
        );
    }
}
