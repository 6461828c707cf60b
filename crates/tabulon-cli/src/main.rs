//! tabulon: extract tables from PDF documents.

mod cli;
mod detect_cmd;
mod extract_cmd;
mod info_cmd;
mod page_range;
mod shared;
mod writers;

use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            ref file,
            ref pages,
            ref format,
            ref method,
            ref area,
            ref columns,
            guess,
            ref password,
        } => extract_cmd::run(
            file,
            pages.as_deref(),
            format,
            method,
            area.as_deref(),
            columns.as_deref(),
            guess,
            password.as_deref(),
        ),
        Commands::Detect {
            ref file,
            ref pages,
            ref password,
        } => detect_cmd::run(file, pages.as_deref(), password.as_deref()),
        Commands::Info {
            ref file,
            ref password,
        } => info_cmd::run(file, password.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
