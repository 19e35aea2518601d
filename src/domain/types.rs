//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation
//! - exported to JSON/CSV
//! - reloaded later for comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One of the four MBTI dichotomy axes.
///
/// Each axis corresponds to a fixed character position within a 4-letter
/// type code (I/E at 0, S/N at 1, T/F at 2, J/P at 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Axis {
    Ie,
    Sn,
    Tf,
    Jp,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Ie, Axis::Sn, Axis::Tf, Axis::Jp];

    /// Character position of this axis within a type code.
    pub fn position(self) -> usize {
        self as usize
    }

    /// The two letters on this axis, in canonical order.
    pub fn letters(self) -> (char, char) {
        match self {
            Axis::Ie => ('I', 'E'),
            Axis::Sn => ('S', 'N'),
            Axis::Tf => ('T', 'F'),
            Axis::Jp => ('J', 'P'),
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Axis::Ie => "I/E",
            Axis::Sn => "S/N",
            Axis::Tf => "T/F",
            Axis::Jp => "J/P",
        }
    }
}

/// One of the 16 MBTI type codes.
///
/// Variant order is the canonical column order; exact ties in dominant-type
/// selection resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MbtiType {
    Istj,
    Isfj,
    Infj,
    Intj,
    Istp,
    Isfp,
    Infp,
    Intp,
    Estp,
    Esfp,
    Enfp,
    Entp,
    Estj,
    Esfj,
    Enfj,
    Entj,
}

impl MbtiType {
    pub const COUNT: usize = 16;

    /// All 16 types in canonical order.
    pub const ALL: [MbtiType; 16] = [
        MbtiType::Istj,
        MbtiType::Isfj,
        MbtiType::Infj,
        MbtiType::Intj,
        MbtiType::Istp,
        MbtiType::Isfp,
        MbtiType::Infp,
        MbtiType::Intp,
        MbtiType::Estp,
        MbtiType::Esfp,
        MbtiType::Enfp,
        MbtiType::Entp,
        MbtiType::Estj,
        MbtiType::Esfj,
        MbtiType::Enfj,
        MbtiType::Entj,
    ];

    /// Axis letters per type, one row per canonical index.
    ///
    /// Precomputed from the canonical codes so axis membership is an explicit,
    /// checked table rather than repeated string indexing.
    const LETTERS: [[char; 4]; 16] = [
        ['I', 'S', 'T', 'J'],
        ['I', 'S', 'F', 'J'],
        ['I', 'N', 'F', 'J'],
        ['I', 'N', 'T', 'J'],
        ['I', 'S', 'T', 'P'],
        ['I', 'S', 'F', 'P'],
        ['I', 'N', 'F', 'P'],
        ['I', 'N', 'T', 'P'],
        ['E', 'S', 'T', 'P'],
        ['E', 'S', 'F', 'P'],
        ['E', 'N', 'F', 'P'],
        ['E', 'N', 'T', 'P'],
        ['E', 'S', 'T', 'J'],
        ['E', 'S', 'F', 'J'],
        ['E', 'N', 'F', 'J'],
        ['E', 'N', 'T', 'J'],
    ];

    /// The 4-letter code, e.g. `"ISTJ"`.
    pub fn code(self) -> &'static str {
        match self {
            MbtiType::Istj => "ISTJ",
            MbtiType::Isfj => "ISFJ",
            MbtiType::Infj => "INFJ",
            MbtiType::Intj => "INTJ",
            MbtiType::Istp => "ISTP",
            MbtiType::Isfp => "ISFP",
            MbtiType::Infp => "INFP",
            MbtiType::Intp => "INTP",
            MbtiType::Estp => "ESTP",
            MbtiType::Esfp => "ESFP",
            MbtiType::Enfp => "ENFP",
            MbtiType::Entp => "ENTP",
            MbtiType::Estj => "ESTJ",
            MbtiType::Esfj => "ESFJ",
            MbtiType::Enfj => "ENFJ",
            MbtiType::Entj => "ENTJ",
        }
    }

    /// Position of this type in the canonical ordering.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a type code (case-insensitive). Returns `None` for anything that
    /// is not one of the 16 canonical codes.
    pub fn parse(code: &str) -> Option<MbtiType> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }

    /// Letter of this type on the given axis.
    pub fn letter(self, axis: Axis) -> char {
        Self::LETTERS[self.index()][axis.position()]
    }
}

/// One country's full 16-share distribution, indexed in canonical type order.
///
/// Records are immutable once built; all derived views are recomputed on
/// demand from the shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub country: String,
    shares: [f64; MbtiType::COUNT],
}

impl TypeRecord {
    pub fn new(country: impl Into<String>, shares: [f64; MbtiType::COUNT]) -> Self {
        Self {
            country: country.into(),
            shares,
        }
    }

    /// Build a record from `(type, share)` pairs.
    ///
    /// Each of the 16 types must appear exactly once; anything else is a
    /// `MalformedRecord`.
    pub fn from_pairs(
        country: impl Into<String>,
        pairs: &[(MbtiType, f64)],
    ) -> Result<Self, AppError> {
        let country = country.into();
        if pairs.len() != MbtiType::COUNT {
            return Err(AppError::malformed(
                country,
                format!("expected 16 shares, got {}", pairs.len()),
            ));
        }

        let mut shares = [None; MbtiType::COUNT];
        for &(mbti_type, share) in pairs {
            let slot = &mut shares[mbti_type.index()];
            if slot.is_some() {
                return Err(AppError::malformed(
                    country,
                    format!("duplicate share for {}", mbti_type.code()),
                ));
            }
            *slot = Some(share);
        }

        let mut out = [0.0; MbtiType::COUNT];
        for (idx, slot) in shares.into_iter().enumerate() {
            let Some(share) = slot else {
                return Err(AppError::malformed(
                    country,
                    format!("missing share for {}", MbtiType::ALL[idx].code()),
                ));
            };
            out[idx] = share;
        }

        Ok(Self::new(country, out))
    }

    /// Share recorded for one type.
    pub fn share(&self, mbti_type: MbtiType) -> f64 {
        self.shares[mbti_type.index()]
    }

    /// All 16 shares in canonical order.
    pub fn shares(&self) -> &[f64; MbtiType::COUNT] {
        &self.shares
    }

    /// Sum of all 16 shares (≈ 1.0 for a well-formed record).
    pub fn total(&self) -> f64 {
        self.shares.iter().sum()
    }
}

/// Dominant type and its share for one country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantResult {
    pub dominant_type: MbtiType,
    pub dominant_share: f64,
}

/// Aggregated shares for both letters of one axis.
///
/// `first`/`second` follow `axis.letters()` order; their sum equals the
/// record's total share sum (rounding drift propagates, never renormalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSplit {
    pub axis: Axis,
    pub first: f64,
    pub second: f64,
}

impl AxisSplit {
    pub fn total(&self) -> f64 {
        self.first + self.second
    }
}

/// The four per-axis splits for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DichotomyAggregate {
    pub splits: [AxisSplit; 4],
}

impl DichotomyAggregate {
    pub fn split(&self, axis: Axis) -> AxisSplit {
        self.splits[axis.position()]
    }

    /// Total share for one axis letter, e.g. `'I'` or `'P'`.
    pub fn letter_total(&self, axis: Axis, letter: char) -> f64 {
        let split = self.split(axis);
        let (first, _) = axis.letters();
        if letter == first { split.first } else { split.second }
    }
}

/// Both derived views for one country (table rows, exports).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub dominant: DominantResult,
    pub axes: DichotomyAggregate,
}

/// Metric used to order countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankMetric {
    /// Share of the country's dominant type.
    Dominant,
    /// Total introvert share (I on the I/E axis).
    I,
    /// Total extravert share.
    E,
    /// Total sensing share.
    S,
    /// Total intuition share.
    N,
    /// Total thinking share.
    T,
    /// Total feeling share.
    F,
    /// Total judging share.
    J,
    /// Total perceiving share.
    P,
}

impl RankMetric {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RankMetric::Dominant => "dominant share",
            RankMetric::I => "I total",
            RankMetric::E => "E total",
            RankMetric::S => "S total",
            RankMetric::N => "N total",
            RankMetric::T => "T total",
            RankMetric::F => "F total",
            RankMetric::J => "J total",
            RankMetric::P => "P total",
        }
    }

    /// The axis and letter behind an axis-letter metric (`None` for `Dominant`).
    pub fn axis_letter(self) -> Option<(Axis, char)> {
        match self {
            RankMetric::Dominant => None,
            RankMetric::I => Some((Axis::Ie, 'I')),
            RankMetric::E => Some((Axis::Ie, 'E')),
            RankMetric::S => Some((Axis::Sn, 'S')),
            RankMetric::N => Some((Axis::Sn, 'N')),
            RankMetric::T => Some((Axis::Tf, 'T')),
            RankMetric::F => Some((Axis::Tf, 'F')),
            RankMetric::J => Some((Axis::Jp, 'J')),
            RankMetric::P => Some((Axis::Jp, 'P')),
        }
    }
}

/// One ranked entry: country plus its metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRank {
    pub country: String,
    pub value: f64,
}

/// A saved summary file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub metric: RankMetric,
    pub countries: Vec<CountrySummary>,
    pub rankings: Vec<CountryRank>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    /// Restrict output to one country (`None` means all).
    pub country: Option<String>,
    pub metric: RankMetric,
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub export_results: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}
