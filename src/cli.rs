use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "attrsim",
    about = "Group near-duplicate attribute names and explain how they differ",
    version
)]
pub struct Cli {
    /// Spreadsheet export (.csv / .tsv) or plain list (.txt) of attribute names
    pub input: PathBuf,

    /// Minimum similarity (0-100) for two attributes to be grouped; prompts when omitted
    #[arg(short, long, value_name = "PERCENT")]
    pub threshold: Option<String>,

    /// Attribute column: header name or 1-based index [default: first column]
    #[arg(long, value_name = "COLUMN")]
    pub column: Option<String>,

    /// Treat the first row as data instead of a header
    #[arg(long)]
    pub no_headers: bool,

    /// Field delimiter for delimited input
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Config file [default: ./.attrsim/config.toml, fallback ~/.config/attrsim/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Review worksheet path for `--report csv` [default: similarity_<input>_<threshold>pct.csv]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// List member pairs that are only grouped through other members
    #[arg(long)]
    pub show_bridges: bool,

    /// Show every linking pair and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Csv,
}
