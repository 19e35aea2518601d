//! Command-line parsing for the country MBTI atlas.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RankMetric;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mbti", version, about = "Country MBTI distribution explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dominant type per country: run summary, ranking, and a bar chart.
    Dominant(ViewArgs),
    /// Dichotomy-axis totals (I/E, S/N, T/F, J/P) per country.
    Axes(ViewArgs),
    /// Print the ranking only (useful for scripting).
    Rank(ViewArgs),
    /// Full data table: dominant type plus all eight axis totals.
    Table(ViewArgs),
}

/// Common options for all views.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Path to the per-country MBTI shares CSV.
    #[arg(short = 'c', long, default_value = "countriesMBTI_16types.csv")]
    pub csv: PathBuf,

    /// Restrict output to a single country (default: all).
    #[arg(long)]
    pub country: Option<String>,

    /// Ranking metric.
    #[arg(short = 'm', long, value_enum, default_value_t = RankMetric::Dominant)]
    pub metric: RankMetric,

    /// Show top-N countries in rankings and charts (0 = all).
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Render an ASCII bar chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Export per-country results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the run summary (dominant + axes + ranking) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
