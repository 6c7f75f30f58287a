//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and validates the CSV table
//! - resolves the variable selection (flags or interactive prompts)
//! - runs the regression pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{picker, ColumnsArgs, Command, FitArgs, SampleArgs};
use crate::data::SampleSpec;
use crate::domain::Selection;
use crate::error::AppError;
use crate::io::ingest::{load_table, IngestedData};

pub mod pipeline;

/// Entry point for the `linfit` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `linfit` (or `linfit -f data.csv`) to behave like
    // `linfit fit ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the interactive-first UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Columns(args) => handle_columns(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let path = match &args.file {
        Some(path) => picker::validate_csv_path(path)?,
        None => picker::prompt_for_csv_path()?,
    };
    let ingest = load_table(&path)?;

    let selection = resolve_selection(&ingest, &args)?;
    let run = pipeline::run_fit(&ingest.table, &selection)?;

    println!(
        "{}",
        crate::report::format_run_summary(&ingest, &selection, &run.model)
    );

    if args.top > 0 {
        let ranked = crate::report::rank_by_abs_residual(&run.row_fits, args.top);
        println!(
            "{}",
            crate::report::format_residual_table(&ranked, &run.model.dependent)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_results_csv(path, &run.row_fits, &run.model.dependent)?;
        println!("Wrote per-row results to {}", path.display());
    }
    if let Some(path) = &args.export_model {
        crate::io::export::write_model_json(path, &run.model)?;
        println!("Wrote model JSON to {}", path.display());
    }

    Ok(())
}

/// Resolve the dependent/independent columns from flags, prompting for
/// whatever was omitted.
fn resolve_selection(ingest: &IngestedData, args: &FitArgs) -> Result<Selection, AppError> {
    let dependent = match &args.dependent {
        Some(name) => name.clone(),
        None => picker::prompt_for_dependent(&ingest.table)?,
    };

    let independents = if args.independents.is_empty() {
        picker::prompt_for_independents(&ingest.table, &dependent)?
    } else {
        args.independents.clone()
    };

    Selection::resolve(&ingest.table, &dependent, &independents)
}

fn handle_columns(args: ColumnsArgs) -> Result<(), AppError> {
    let path = match &args.file {
        Some(path) => picker::validate_csv_path(path)?,
        None => picker::prompt_for_csv_path()?,
    };
    let ingest = load_table(&path)?;

    println!("{}", crate::report::format_columns(&ingest));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let spec = SampleSpec {
        rows: args.rows,
        seed: args.seed,
        noise: args.noise,
    };
    crate::data::write_sample_csv(&args.out, &spec)?;

    println!(
        "Wrote {} sample row(s) to {} (seed {}).",
        args.rows,
        args.out.display(),
        args.seed
    );
    println!("Try: linfit fit -f {} -y price -x area,rooms,age", args.out.display());
    Ok(())
}

/// Rewrite argv so `linfit` defaults to `linfit fit`.
///
/// Rules:
/// - `linfit`                      -> `linfit fit`
/// - `linfit -f data.csv ...`      -> `linfit fit -f data.csv ...`
/// - `linfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "columns" | "sample");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_fit() {
        assert_eq!(rewrite_args(argv(&["linfit"])), argv(&["linfit", "fit"]));
    }

    #[test]
    fn leading_flag_is_treated_as_fit_flags() {
        assert_eq!(
            rewrite_args(argv(&["linfit", "-f", "data.csv"])),
            argv(&["linfit", "fit", "-f", "data.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["linfit", "columns"])),
            argv(&["linfit", "columns"])
        );
        assert_eq!(
            rewrite_args(argv(&["linfit", "--help"])),
            argv(&["linfit", "--help"])
        );
    }
}
