//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// vdom-unpack - map an unpacked VDOM application back onto its repositories
#[derive(Parser, Debug)]
#[command(
    name = "vdom-unpack",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Unpack VDOM application files back into the repositories they were built from",
    long_about = "Builds an index of the source trees declared in the vdom2fs configuration, \
                  then copies every file of the unpacked application to the directory it came \
                  from. Files that cannot be mapped are collected in <temp_dir>/new_files.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  vdom-unpack                                  \x1b[90m# Index and unpack with defaults\x1b[0m\n   \
                  vdom-unpack --no_index                       \x1b[90m# Reuse .tmp/index.json\x1b[0m\n   \
                  vdom-unpack --skip_db false                  \x1b[90m# Include Databases\x1b[0m\n   \
                  vdom-unpack --config_path app.conf --unpack_dir build/app\n"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long = "config_path", value_name = "PATH", default_value = "vdom2fs.conf")]
    pub config_path: PathBuf,

    /// Path to the indexes file
    #[arg(long = "indexes_path", value_name = "PATH", default_value = ".tmp/index.json")]
    pub indexes_path: PathBuf,

    /// Output directory for copied files
    #[arg(long = "temp_dir", value_name = "DIR", default_value = ".tmp/changes")]
    pub temp_dir: PathBuf,

    /// Directory holding the unpacked application
    #[arg(long = "unpack_dir", value_name = "DIR", default_value = ".tmp/unpack")]
    pub unpack_dir: PathBuf,

    /// Directory name used for aliases pointing at "." (defaults to the current directory's name)
    #[arg(long = "parent_dir", value_name = "NAME")]
    pub parent_dir: Option<String>,

    /// Skip the Databases category and directories
    #[arg(
        long = "skip_db",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub skip_db: bool,

    /// Skip indexing and load the previously saved index
    #[arg(
        long = "no_index",
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    pub no_index: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
