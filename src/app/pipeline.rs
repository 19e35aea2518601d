//! The load → filter → aggregate → rank pipeline shared by all views.

use crate::domain::{CountryRank, CountrySummary, RunConfig, TypeRecord};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedData};
use crate::report;

/// Everything a view needs, computed once per invocation.
///
/// Summaries and rankings cover the records surviving the country filter.
#[derive(Debug, Clone)]
pub struct RunData {
    pub ingest: IngestedData,
    pub summaries: Vec<CountrySummary>,
    pub rankings: Vec<CountryRank>,
}

/// Run the full pipeline for one configuration.
pub fn run(config: &RunConfig) -> Result<RunData, AppError> {
    let ingest = ingest::load_records(&config.csv_path)?;

    let records: Vec<TypeRecord> =
        report::filter_by_country(&ingest.records, config.country.as_deref())?
            .into_iter()
            .cloned()
            .collect();

    let summaries = report::summarize_all(&records)?;
    let rankings = report::rank_countries(&records, config.metric)?;

    Ok(RunData {
        ingest,
        summaries,
        rankings,
    })
}
