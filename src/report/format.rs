//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Axis, CountryRank, CountrySummary, RankMetric, RunConfig};
use crate::io::ingest::IngestedData;

/// Format the run summary (dataset stats + skipped-row report).
pub fn format_run_summary(ingest: &IngestedData, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== mbti - Country MBTI Atlas ===\n");
    out.push_str(&format!("CSV: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Countries: {} (rows read: {}, used: {})\n",
        ingest.stats.n_records, ingest.rows_read, ingest.rows_used
    ));
    out.push_str(&format!(
        "Shares: [{:.4}, {:.4}]\n",
        ingest.stats.share_min, ingest.stats.share_max
    ));
    if let Some(country) = &config.country {
        out.push_str(&format!("Selected: {country}\n"));
    }
    out.push_str(&format!("Metric: {}\n", config.metric.display_name()));

    if !ingest.row_errors.is_empty() {
        out.push_str(&format!("\nSkipped rows ({}):\n", ingest.row_errors.len()));
        for err in &ingest.row_errors {
            let country = err.country.as_deref().unwrap_or("?");
            out.push_str(&format!("- line {} ({}): {}\n", err.line, country, err.message));
        }
    }

    out.push('\n');
    out
}

/// Format the ranking table for the chosen metric.
pub fn format_rank_table(ranks: &[CountryRank], metric: RankMetric) -> String {
    let mut out = String::new();

    out.push_str(&format!("Ranking by {}:\n", metric.display_name()));
    out.push_str(&format!("{:>4} {:<24} {:>10}\n", "#", "country", "value"));
    out.push_str(&format!("{:->4} {:-<24} {:->10}\n", "", "", ""));
    for (i, rank) in ranks.iter().enumerate() {
        out.push_str(&format!(
            "{:>4} {:<24} {:>10.4}\n",
            i + 1,
            truncate(&rank.country, 24),
            rank.value
        ));
    }

    out
}

/// Format the dichotomy-axis table (one row per country, two columns per axis).
pub fn format_axes_table(rows: &[CountrySummary]) -> String {
    let mut out = String::new();

    let axis_labels: Vec<&str> = Axis::ALL.iter().map(|a| a.display_name()).collect();
    out.push_str(&format!("Dichotomy totals ({}):\n", axis_labels.join(", ")));
    out.push_str(&format!("{:<24}", "country"));
    for axis in Axis::ALL {
        let (first, second) = axis.letters();
        out.push_str(&format!(" {:>7} {:>7}", first, second));
    }
    out.push('\n');
    out.push_str(&format!("{:-<24}", ""));
    for _ in Axis::ALL {
        out.push_str(&format!(" {:->7} {:->7}", "", ""));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<24}", truncate(&row.country, 24)));
        for axis in Axis::ALL {
            let split = row.axes.split(axis);
            out.push_str(&format!(" {:>7.4} {:>7.4}", split.first, split.second));
        }
        out.push('\n');
    }

    out
}

/// Format the full data table: dominant type plus all eight axis totals.
pub fn format_summary_table(rows: &[CountrySummary]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<24} {:>6} {:>8}",
        "country", "type", "share"
    ));
    for axis in Axis::ALL {
        let (first, second) = axis.letters();
        out.push_str(&format!(" {:>7} {:>7}", first, second));
    }
    out.push('\n');
    out.push_str(&format!("{:-<24} {:->6} {:->8}", "", "", ""));
    for _ in Axis::ALL {
        out.push_str(&format!(" {:->7} {:->7}", "", ""));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<24} {:>6} {:>8.4}",
            truncate(&row.country, 24),
            row.dominant.dominant_type.code(),
            row.dominant.dominant_share
        ));
        for axis in Axis::ALL {
            let split = row.axes.split(axis);
            out.push_str(&format!(" {:>7.4} {:>7.4}", split.first, split.second));
        }
        out.push('\n');
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MbtiType, TypeRecord};
    use crate::report::{rank_countries, summarize_all};

    fn peaked(country: &str, peak: MbtiType, peak_share: f64) -> TypeRecord {
        let rest = (1.0 - peak_share) / 15.0;
        let mut shares = [rest; 16];
        shares[peak.index()] = peak_share;
        TypeRecord::new(country, shares)
    }

    #[test]
    fn rank_table_lists_countries_in_order() {
        let records = vec![
            peaked("Aland", MbtiType::Infp, 0.20),
            peaked("Borduria", MbtiType::Esfj, 0.35),
        ];
        let ranks = rank_countries(&records, RankMetric::Dominant).unwrap();
        let txt = format_rank_table(&ranks, RankMetric::Dominant);

        let expected = concat!(
            "Ranking by dominant share:\n",
            "   # country                       value\n",
            "---- ------------------------ ----------\n",
            "   1 Borduria                     0.3500\n",
            "   2 Aland                        0.2000\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn summary_table_shows_dominant_and_axes() {
        let rows = summarize_all(&[peaked("Borduria", MbtiType::Esfj, 0.35)]).unwrap();
        let txt = format_summary_table(&rows);
        assert!(txt.contains("Borduria"));
        assert!(txt.contains("ESFJ"));
        assert!(txt.contains("0.3500"));
    }

    #[test]
    fn axes_table_names_the_axes() {
        let rows = summarize_all(&[peaked("Borduria", MbtiType::Esfj, 0.35)]).unwrap();
        let txt = format_axes_table(&rows);
        assert!(txt.starts_with("Dichotomy totals (I/E, S/N, T/F, J/P):"));
        assert!(txt.contains("Borduria"));
    }

    #[test]
    fn long_country_names_are_truncated() {
        let name = "A".repeat(40);
        assert_eq!(truncate(&name, 24).chars().count(), 24);
        assert!(truncate(&name, 24).ends_with('.'));
    }
}
