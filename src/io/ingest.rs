//! CSV ingest and validation.
//!
//! This module turns a per-country MBTI shares CSV into clean `TypeRecord`s
//! that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{MbtiType, TypeRecord};
use crate::error::AppError;
use crate::mbti;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub country: Option<String>,
    pub message: String,
}

/// Summary stats about the records actually loaded.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_records: usize,
    pub share_min: f64,
    pub share_max: f64,
}

/// Ingest output: validated records + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<TypeRecord>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and validate records from a CSV file.
pub fn load_records(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_records(file)
}

/// Load and validate records from any reader (used by tests on in-memory CSV).
pub fn read_records<R: Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let (country_idx, type_cols) = resolve_columns(&headers)?;

    let mut records: Vec<TypeRecord> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    country: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, country_idx, &type_cols) {
            Ok(row) => {
                let key = row.country.trim().to_ascii_lowercase();
                if !seen.insert(key) {
                    row_errors.push(RowError {
                        line,
                        country: Some(row.country.clone()),
                        message: "duplicate country (first occurrence kept)".to_string(),
                    });
                    continue;
                }
                match mbti::validate_record(&row) {
                    Ok(()) => records.push(row),
                    Err(e) => row_errors.push(RowError {
                        line,
                        country: Some(row.country.clone()),
                        message: e.to_string(),
                    }),
                }
            }
            Err((country, message)) => row_errors.push(RowError {
                line,
                country,
                message,
            }),
        }
    }

    let rows_used = records.len();
    let stats = compute_stats(&records).ok_or_else(|| {
        AppError::no_data("No valid rows remain after validation.")
    })?;

    Ok(IngestedData {
        records,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Resolve the `Country` column and the 16 type-code columns.
///
/// Column order in the file is free; records are reindexed into canonical
/// type order. Each of the 16 codes must appear exactly once.
fn resolve_columns(headers: &StringRecord) -> Result<(usize, [usize; 16]), AppError> {
    let mut country_idx: Option<usize> = None;
    let mut type_cols: [Option<usize>; 16] = [None; 16];

    for (idx, raw) in headers.iter().enumerate() {
        let name = normalize_header_name(raw);
        if name.eq_ignore_ascii_case("country") {
            if country_idx.is_some() {
                return Err(AppError::input("Duplicate `Country` column."));
            }
            country_idx = Some(idx);
            continue;
        }
        match MbtiType::parse(&name) {
            Some(t) => {
                let slot = &mut type_cols[t.index()];
                if slot.is_some() {
                    return Err(AppError::input(format!("Duplicate column: `{}`", t.code())));
                }
                *slot = Some(idx);
            }
            // Unknown columns are tolerated (and ignored) so annotated
            // exports load back.
            None => {}
        }
    }

    let Some(country_idx) = country_idx else {
        return Err(AppError::input("Missing required column: `Country`"));
    };

    let mut cols = [0usize; 16];
    for (i, slot) in type_cols.into_iter().enumerate() {
        let Some(idx) = slot else {
            return Err(AppError::input(format!(
                "Missing required column: `{}`",
                MbtiType::ALL[i].code()
            )));
        };
        cols[i] = idx;
    }

    Ok((country_idx, cols))
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Country"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Parse one CSV row into a `TypeRecord`. Errors carry the country name when
/// it was readable, so row errors stay attributable.
fn parse_row(
    record: &StringRecord,
    country_idx: usize,
    type_cols: &[usize; 16],
) -> Result<TypeRecord, (Option<String>, String)> {
    let country = record
        .get(country_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or((None, "Missing country name.".to_string()))?
        .to_string();

    let mut shares = [0.0; 16];
    for (i, &col) in type_cols.iter().enumerate() {
        let code = MbtiType::ALL[i].code();
        let raw = record
            .get(col)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                (
                    Some(country.clone()),
                    format!("Missing `{code}` value."),
                )
            })?;
        let value: f64 = raw.parse().map_err(|_| {
            (
                Some(country.clone()),
                format!("Invalid `{code}` value '{raw}'."),
            )
        })?;
        shares[i] = value;
    }

    Ok(TypeRecord::new(country, shares))
}

fn compute_stats(records: &[TypeRecord]) -> Option<DatasetStats> {
    let mut share_min = f64::INFINITY;
    let mut share_max = f64::NEG_INFINITY;

    for record in records {
        for &share in record.shares() {
            share_min = share_min.min(share);
            share_max = share_max.max(share);
        }
    }

    if !share_min.is_finite() || !share_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_records: records.len(),
        share_min,
        share_max,
    })
}
