//! `jobhound search`: prompt, run the pipeline, print, export.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use jobhound_config::Config;
use jobhound_core::{
    ExportCapabilities, ExportOutcome, ExportSink, JobSearch, ResultSet, SearchQuery, COLUMNS,
    DEFAULT_LOCATION,
};

use crate::adapters::ChromeDriverLauncher;
use crate::cli::SearchArgs;

/// Longest cell printed in the terminal table; links are never cut.
const MAX_CELL: usize = 40;

pub(crate) async fn handle_search(
    args: SearchArgs,
    mut config: Config,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if args.headed {
        config.browser.headless = false;
    }

    let query = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        resolve_query(&args, &config, &mut input, &mut out)?
    };

    info!(
        "Searching '{}' in '{}' for {} results",
        query.term(),
        query.location(),
        query.target_count()
    );
    let search = JobSearch::new(Arc::new(ChromeDriverLauncher), &config);
    let results = search.search(&query).await?;

    if results.is_empty() {
        println!("No jobs found.");
        return Ok(ExitCode::SUCCESS);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Collected {} jobs.", results.len());
        print!("{}", format_table(&results));
    }

    if !args.no_export {
        let path = args.output.as_deref().unwrap_or(config.export.path.as_path());
        let sink = ExportSink::new(ExportCapabilities::probe());
        let outcome = sink.export(&results, path)?;
        report_export(&outcome);
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the query from arguments, prompting for the term when it was not
/// given. Location and count are only prompted for alongside the term.
fn resolve_query<R: BufRead, W: Write>(
    args: &SearchArgs,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<SearchQuery, Box<dyn std::error::Error>> {
    let default_count = config.search.default_count;
    let default_location = if config.search.default_location.trim().is_empty() {
        DEFAULT_LOCATION
    } else {
        config.search.default_location.as_str()
    };

    let (term, location, count) = match &args.term {
        Some(term) => (
            term.clone(),
            args.location.clone().unwrap_or_default(),
            args.count.unwrap_or(default_count),
        ),
        None => {
            let term = prompt(input, out, "Enter job search term")?;
            let location = match &args.location {
                Some(l) => l.clone(),
                None => prompt(
                    input,
                    out,
                    &format!("Enter location (default {default_location})"),
                )?,
            };
            let count = match args.count {
                Some(n) => n,
                None => {
                    let raw = prompt(
                        input,
                        out,
                        &format!("Number of results (default {default_count})"),
                    )?;
                    parse_count(&raw, default_count)
                }
            };
            (term, location, count)
        }
    };

    let location = if location.trim().is_empty() {
        default_location.to_string()
    } else {
        location
    };
    Ok(SearchQuery::new(term, location, count)?)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Unparsable or non-positive input falls back to `default`.
fn parse_count(raw: &str, default: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => default,
    }
}

fn report_export(outcome: &ExportOutcome) {
    let shown = std::path::absolute(&outcome.path).unwrap_or_else(|_| outcome.path.clone());
    match &outcome.fallback {
        Some(reason) => println!("{reason}; exported to CSV: {}", shown.display()),
        None => println!("Exported to {}: {}", outcome.format, shown.display()),
    }
}

/// Render a fixed-width text table in column order.
pub(crate) fn format_table(results: &ResultSet) -> String {
    let rows: Vec<[String; 5]> = results
        .iter()
        .map(|r| {
            let mut row = r.to_row();
            for cell in row.iter_mut().take(4) {
                *cell = clip(cell, MAX_CELL);
            }
            row
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = widths.map(|w| "-".repeat(w));
    let mut out = String::new();
    push_line(&mut out, COLUMNS.iter().copied(), &widths);
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) {
    let line = cells
        .zip(widths.iter())
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn clip(cell: &str, max: usize) -> String {
    if cell.chars().count() <= max {
        return cell.to_string();
    }
    let kept: String = cell.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
#[path = "cmd_search_tests.rs"]
mod tests;
