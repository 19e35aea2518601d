//! Export derived results to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON summary is the "portable" representation of a run.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Axis, CountryRank, CountrySummary, RankMetric, SummaryFile};
use crate::error::AppError;

/// Write per-country results to a CSV file.
///
/// Columns: country, dominant type/share, then both letter totals per axis.
pub fn write_results_csv(path: &Path, rows: &[CountrySummary]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::export(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "country,dominant_type,dominant_share,i,e,s,n,t,f,j,p")
        .map_err(|e| AppError::export(format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        let mut line = format!(
            "{},{},{:.6}",
            csv_field(&row.country),
            row.dominant.dominant_type.code(),
            row.dominant.dominant_share,
        );
        for axis in Axis::ALL {
            let split = row.axes.split(axis);
            line.push_str(&format!(",{:.6},{:.6}", split.first, split.second));
        }
        writeln!(file, "{line}")
            .map_err(|e| AppError::export(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write a run summary JSON file.
pub fn write_summary_json(
    path: &Path,
    metric: RankMetric,
    countries: &[CountrySummary],
    rankings: &[CountryRank],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::export(format!(
            "Failed to create summary JSON '{}': {e}",
            path.display()
        ))
    })?;

    let summary = SummaryFile {
        tool: "mbti".to_string(),
        metric,
        countries: countries.to_vec(),
        rankings: rankings.to_vec(),
    };

    serde_json::to_writer_pretty(file, &summary)
        .map_err(|e| AppError::export(format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

/// Quote a CSV field if it contains separators or quotes.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_only_when_needed() {
        assert_eq!(csv_field("Aland"), "Aland");
        assert_eq!(csv_field("Korea, South"), "\"Korea, South\"");
        assert_eq!(csv_field("The \"Reach\""), "\"The \"\"Reach\"\"\"");
    }
}
