//! vdom-unpack - map an unpacked VDOM application back onto its repositories
//!
//! Reads a vdom2fs configuration, indexes the source trees it declares and
//! copies each file of the unpacked application to the directory it came from.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod index;
mod logging;
mod path_utils;
mod progress;
mod unpack;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::unpack::run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
