//! Command-line parsing for the OLS fitting tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the table/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "linfit",
    version,
    about = "Ordinary least squares regression for numeric CSV tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a linear model and print the equation, fit quality, and residuals.
    ///
    /// Anything not given as a flag (file, dependent, independents) is asked
    /// for interactively.
    Fit(FitArgs),
    /// List the numeric columns of a CSV that are usable for fitting.
    Columns(ColumnsArgs),
    /// Write a synthetic demo CSV with a known linear relationship.
    Sample(SampleArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// CSV file to fit (interactive picker when omitted).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Dependent (response) column name.
    #[arg(short = 'y', long)]
    pub dependent: Option<String>,

    /// Independent (predictor) column names, comma-separated or repeated.
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub independents: Vec<String>,

    /// Show the top-N rows by absolute residual (0 disables the table).
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Export per-row fitted values/residuals to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the fitted model (coefficients + metrics) to JSON.
    #[arg(long = "export-model")]
    pub export_model: Option<PathBuf>,
}

/// Options for column listing.
#[derive(Debug, Parser)]
pub struct ColumnsArgs {
    /// CSV file to inspect (interactive picker when omitted).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

/// Options for sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, default_value = "sample.csv")]
    pub out: PathBuf,

    /// Number of rows to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub rows: usize,

    /// Random seed (generation is deterministic per seed).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the Gaussian noise on the response.
    #[arg(long, default_value_t = 12.0)]
    pub noise: f64,
}
