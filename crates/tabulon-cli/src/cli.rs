use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Extract tables from PDF documents.
#[derive(Debug, Parser)]
#[command(name = "tabulon", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract tables from PDF pages
    Extract {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Table reconstruction method
        #[arg(long, value_enum, default_value_t = MethodArg::Auto)]
        method: MethodArg,

        /// Restrict extraction to an area: top,left,bottom,right (points)
        #[arg(long)]
        area: Option<String>,

        /// Explicit column x-positions (e.g. '120.5,260')
        #[arg(long)]
        columns: Option<String>,

        /// Detect table regions before extracting
        #[arg(long)]
        guess: bool,

        /// Password for encrypted documents
        #[arg(long)]
        password: Option<String>,
    },

    /// Detect table regions without extracting them
    Detect {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Password for encrypted documents
        #[arg(long)]
        password: Option<String>,
    },

    /// Display page count and per-page geometry
    Info {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Password for encrypted documents
        #[arg(long)]
        password: Option<String>,
    },
}

/// Table reconstruction method.
#[derive(Debug, Clone, ValueEnum)]
pub enum MethodArg {
    /// Reconstruct from ruling lines
    Lattice,
    /// Reconstruct from text layout
    Stream,
    /// Lattice first, stream as fallback
    Auto,
}

/// Output format for extracted tables.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// JSON array of tables
    Json,
    /// GitHub-flavored Markdown tables
    Markdown,
}
