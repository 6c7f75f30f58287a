//! Interactive prompts: CSV file picker and column pickers.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the pickers provide the "run `linfit` and choose as you go" UX
//!
//! All prompts use explicit retry loops that exit cleanly on EOF or `q`, so
//! repeated bad input never grows the call stack.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::ObservationTable;
use crate::error::AppError;

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt the user to select a CSV file from the current directory tree.
///
/// Behavior:
/// - list discovered `*.csv` files
/// - accept either a number (from the list) or an explicit path
/// - `q` cancels
pub fn prompt_for_csv_path() -> Result<PathBuf, AppError> {
    let files = discover_csv_files();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .csv files found. Provide one with `linfit fit -f <file.csv>`.",
        ));
    }

    println!("Found {} CSV file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    loop {
        let input = read_prompt_line(&format!(
            "Select a file by number (1-{}) or type a path (q to quit): ",
            files.len()
        ))?;

        if let Ok(choice) = input.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_csv_path(&files[choice - 1]);
            }
            println!(
                "Invalid choice: {choice}. Enter a number between 1 and {}.",
                files.len()
            );
            continue;
        }

        let candidate = PathBuf::from(&input);
        match validate_csv_path(&candidate) {
            Ok(path) => return Ok(path),
            Err(err) => {
                println!("{err}");
                continue;
            }
        }
    }
}

/// Prompt for the dependent (response) column.
pub fn prompt_for_dependent(table: &ObservationTable) -> Result<String, AppError> {
    print_column_list(table);

    loop {
        let input = read_prompt_line(&format!(
            "Dependent column, by number (1-{}) or name (q to quit): ",
            table.n_columns()
        ))?;

        match resolve_column(table, &input) {
            Some(name) => return Ok(name),
            None => {
                println!("Unknown column `{input}`. Pick one from the list above.");
            }
        }
    }
}

/// Prompt for the ordered independent (predictor) columns.
///
/// Accepts a comma-separated mix of numbers and names; the dependent column
/// is rejected here so the typed selection cannot fail on overlap later.
pub fn prompt_for_independents(
    table: &ObservationTable,
    dependent: &str,
) -> Result<Vec<String>, AppError> {
    loop {
        let input = read_prompt_line(
            "Independent column(s), comma-separated numbers or names (q to quit): ",
        )?;

        let mut names = Vec::new();
        let mut bad: Option<String> = None;
        for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match resolve_column(table, token) {
                Some(name) if name == dependent => {
                    bad = Some(format!(
                        "`{name}` is already the dependent column; pick different predictors."
                    ));
                    break;
                }
                Some(name) => {
                    if names.contains(&name) {
                        bad = Some(format!("Column `{name}` listed more than once."));
                        break;
                    }
                    names.push(name);
                }
                None => {
                    bad = Some(format!("Unknown column `{token}`."));
                    break;
                }
            }
        }

        if let Some(message) = bad {
            println!("{message}");
            continue;
        }
        if names.is_empty() {
            println!("At least one independent column is required.");
            continue;
        }

        return Ok(names);
    }
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        != Some(true)
    {
        return Err(AppError::new(
            2,
            format!(
                "Expected a .csv file (got: {}). Use -f to pass a CSV path.",
                path.display()
            ),
        ));
    }

    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn print_column_list(table: &ObservationTable) {
    println!("Numeric columns:");
    for (idx, name) in table.column_names().iter().enumerate() {
        println!("{:>3}) {}", idx + 1, name);
    }
}

/// Resolve a user token (1-based number or exact name) to a column name.
fn resolve_column(table: &ObservationTable, token: &str) -> Option<String> {
    if let Ok(choice) = token.parse::<usize>() {
        if (1..=table.n_columns()).contains(&choice) {
            return Some(table.column_names()[choice - 1].clone());
        }
        return None;
    }
    table
        .column_index(token)
        .map(|idx| table.column_names()[idx].clone())
}

/// Print a prompt and read one trimmed line. EOF and `q` become errors so
/// callers' retry loops always terminate.
fn read_prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Provide selections with `-f`, `-y`, and `-x`.",
        ));
    }

    let input = input.trim().to_string();
    if input.eq_ignore_ascii_case("q") {
        return Err(AppError::new(2, "Canceled."));
    }

    Ok(input)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by(|a, b| pretty_path(a).cmp(&pretty_path(b)));
    out
}

fn find_csv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            find_csv_files_inner(&path, depth + 1, max_depth, out);
            continue;
        }

        if file_type.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                == Some(true)
        {
            out.push(path);
        }
    }
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
