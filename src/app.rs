//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and validates the CSV table
//! - computes dominant types, dichotomy totals, and rankings
//! - prints reports/charts
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ViewArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::BarRow;

pub mod pipeline;

/// Entry point for the `mbti` binary.
pub fn run() -> Result<(), AppError> {
    // We want `mbti` and `mbti --country France` to behave like
    // `mbti dominant ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the short default invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Dominant(args) => handle_view(args, View::Dominant),
        Command::Axes(args) => handle_view(args, View::Axes),
        Command::Rank(args) => handle_view(args, View::Rank),
        Command::Table(args) => handle_view(args, View::Table),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Dominant,
    Axes,
    Rank,
    Table,
}

fn handle_view(args: ViewArgs, view: View) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run(&config)?;

    if view != View::Rank {
        println!("{}", crate::report::format_run_summary(&run.ingest, &config));
    }

    match view {
        View::Dominant => {
            let top = top_slice(&run.rankings, config.top_n);
            println!(
                "{}",
                crate::report::format_rank_table(top, config.metric)
            );
            if config.plot {
                let bars = bar_rows(&run, top);
                println!(
                    "{}",
                    crate::plot::render_bar_chart(
                        config.metric.display_name(),
                        &bars,
                        config.plot_width
                    )
                );
            }
        }
        View::Axes => {
            println!("{}", crate::report::format_axes_table(&run.summaries));
        }
        View::Rank => {
            let top = top_slice(&run.rankings, config.top_n);
            println!(
                "{}",
                crate::report::format_rank_table(top, config.metric)
            );
        }
        View::Table => {
            // Sorted by dominant share descending, like the source data table.
            let mut rows = run.summaries.clone();
            rows.sort_by(|a, b| {
                b.dominant
                    .dominant_share
                    .partial_cmp(&a.dominant.dominant_share)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.country.cmp(&b.country))
            });
            println!("{}", crate::report::format_summary_table(&rows));
        }
    }

    // Optional exports (any view).
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.summaries)?;
    }
    if let Some(path) = &config.export_summary {
        crate::io::export::write_summary_json(path, config.metric, &run.summaries, &run.rankings)?;
    }

    Ok(())
}

/// Bar labels carry the dominant type so the chart reads like the source
/// dashboard's colored bars.
fn bar_rows(run: &pipeline::RunData, top: &[crate::domain::CountryRank]) -> Vec<BarRow> {
    top.iter()
        .map(|rank| {
            let code = run
                .summaries
                .iter()
                .find(|s| s.country == rank.country)
                .map(|s| s.dominant.dominant_type.code())
                .unwrap_or("????");
            BarRow {
                label: format!("{} [{}]", rank.country, code),
                value: rank.value,
            }
        })
        .collect()
}

fn top_slice<T>(items: &[T], top_n: usize) -> &[T] {
    if top_n == 0 || top_n >= items.len() {
        items
    } else {
        &items[..top_n]
    }
}

pub fn run_config_from_args(args: &ViewArgs) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        country: args.country.clone(),
        metric: args.metric,
        top_n: args.top,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        export_results: args.export.clone(),
        export_summary: args.export_json.clone(),
    }
}

/// Rewrite argv so `mbti` defaults to `mbti dominant`.
///
/// Rules:
/// - `mbti`                      -> `mbti dominant`
/// - `mbti --country X ...`      -> `mbti dominant --country X ...`
/// - `mbti --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("dominant".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "dominant" | "axes" | "rank" | "table");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "dominant flags".
    if arg1.starts_with('-') {
        argv.insert(1, "dominant".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_dominant() {
        assert_eq!(rewrite_args(args(&["mbti"])), args(&["mbti", "dominant"]));
    }

    #[test]
    fn leading_flags_default_to_dominant() {
        assert_eq!(
            rewrite_args(args(&["mbti", "--country", "France"])),
            args(&["mbti", "dominant", "--country", "France"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["mbti", "rank", "-m", "i"])),
            args(&["mbti", "rank", "-m", "i"])
        );
        assert_eq!(rewrite_args(args(&["mbti", "--help"])), args(&["mbti", "--help"]));
    }
}
