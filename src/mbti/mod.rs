//! The MBTI aggregation core.
//!
//! Pure, stateless transforms over immutable `TypeRecord`s:
//!
//! - dominant-type selection (argmax over the 16 shares)
//! - dichotomy-axis totals (I/E, S/N, T/F, J/P)
//!
//! The table itself is owned by the caller; nothing here caches or mutates.
//! Every operation validates its input and surfaces `MalformedRecord` with
//! the offending country's identity (no silent defaults, no partial recovery).

use crate::domain::{
    Axis, AxisSplit, CountrySummary, DichotomyAggregate, DominantResult, MbtiType, TypeRecord,
};
use crate::error::AppError;

/// Allowed drift of a record's share sum from 1.0.
pub const SHARE_SUM_TOLERANCE: f64 = 1e-6;

/// Check the 16-share contract: every share finite and non-negative, and the
/// sum within `SHARE_SUM_TOLERANCE` of 1.0.
pub fn validate_record(record: &TypeRecord) -> Result<(), AppError> {
    for mbti_type in MbtiType::ALL {
        let share = record.share(mbti_type);
        if !share.is_finite() {
            return Err(AppError::malformed(
                &record.country,
                format!("non-finite share for {}", mbti_type.code()),
            ));
        }
        if share < 0.0 {
            return Err(AppError::malformed(
                &record.country,
                format!("negative share for {} ({share})", mbti_type.code()),
            ));
        }
    }

    let total = record.total();
    if (total - 1.0).abs() > SHARE_SUM_TOLERANCE {
        return Err(AppError::malformed(
            &record.country,
            format!("shares sum to {total:.8}, expected 1.0 \u{b1} {SHARE_SUM_TOLERANCE:e}"),
        ));
    }

    Ok(())
}

/// Dominant type and its share for one record.
///
/// Exact ties resolve to the type earlier in canonical order (strict `>` scan).
pub fn compute_dominant(record: &TypeRecord) -> Result<DominantResult, AppError> {
    validate_record(record)?;

    let mut dominant_type = MbtiType::ALL[0];
    let mut dominant_share = record.share(dominant_type);
    for mbti_type in MbtiType::ALL.into_iter().skip(1) {
        let share = record.share(mbti_type);
        if share > dominant_share {
            dominant_type = mbti_type;
            dominant_share = share;
        }
    }

    Ok(DominantResult {
        dominant_type,
        dominant_share,
    })
}

/// Per-axis letter totals for one record.
///
/// Each axis partitions the 16 types into two groups of 8; both group sums
/// together carry the record's full total (drift propagates, no renormalizing).
pub fn compute_dichotomies(record: &TypeRecord) -> Result<DichotomyAggregate, AppError> {
    validate_record(record)?;

    let splits = Axis::ALL.map(|axis| {
        let (first_letter, _) = axis.letters();
        let mut first = 0.0;
        let mut second = 0.0;
        for mbti_type in MbtiType::ALL {
            let share = record.share(mbti_type);
            if mbti_type.letter(axis) == first_letter {
                first += share;
            } else {
                second += share;
            }
        }
        AxisSplit { axis, first, second }
    });

    Ok(DichotomyAggregate { splits })
}

/// Both derived views for one record.
pub fn summarize(record: &TypeRecord) -> Result<CountrySummary, AppError> {
    Ok(CountrySummary {
        country: record.country.clone(),
        dominant: compute_dominant(record)?,
        axes: compute_dichotomies(record)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform record: every share 1/16.
    fn uniform(country: &str) -> TypeRecord {
        TypeRecord::new(country, [1.0 / 16.0; 16])
    }

    /// Record with one type bumped and the rest sharing the remainder evenly.
    fn peaked(country: &str, peak: MbtiType, peak_share: f64) -> TypeRecord {
        let rest = (1.0 - peak_share) / 15.0;
        let mut shares = [rest; 16];
        shares[peak.index()] = peak_share;
        TypeRecord::new(country, shares)
    }

    #[test]
    fn dominant_picks_the_maximum() {
        let record = peaked("X", MbtiType::Esfp, 0.20);
        let result = compute_dominant(&record).unwrap();
        assert_eq!(result.dominant_type, MbtiType::Esfp);
        assert!((result.dominant_share - 0.20).abs() < 1e-12);

        let max = record
            .shares()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.dominant_share, max);
    }

    #[test]
    fn dominant_tie_breaks_to_canonical_order() {
        // ISFJ and INFJ tied at the top; ISFJ is earlier in canonical order.
        let rest = (1.0 - 0.30) / 14.0;
        let mut shares = [rest; 16];
        shares[MbtiType::Isfj.index()] = 0.15;
        shares[MbtiType::Infj.index()] = 0.15;
        let record = TypeRecord::new("X", shares);

        for _ in 0..3 {
            let result = compute_dominant(&record).unwrap();
            assert_eq!(result.dominant_type, MbtiType::Isfj);
        }
    }

    #[test]
    fn dominant_is_idempotent() {
        let record = peaked("X", MbtiType::Intj, 0.40);
        let a = compute_dominant(&record).unwrap();
        let b = compute_dominant(&record).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dichotomies_partition_the_total() {
        let record = peaked("X", MbtiType::Entp, 0.25);
        let agg = compute_dichotomies(&record).unwrap();
        let total = record.total();
        for axis in Axis::ALL {
            assert!((agg.split(axis).total() - total).abs() < 1e-12);
        }
    }

    #[test]
    fn dichotomies_even_split_on_uniform_record() {
        let agg = compute_dichotomies(&uniform("X")).unwrap();
        let ie = agg.split(Axis::Ie);
        assert!((ie.first - 0.5).abs() < 1e-12);
        assert!((ie.second - 0.5).abs() < 1e-12);
    }

    #[test]
    fn dichotomies_group_by_precomputed_letters() {
        let record = peaked("X", MbtiType::Istj, 0.50);
        let agg = compute_dichotomies(&record).unwrap();

        // ISTJ sits on the I, S, T, J sides.
        assert!(agg.letter_total(Axis::Ie, 'I') > agg.letter_total(Axis::Ie, 'E'));
        assert!(agg.letter_total(Axis::Sn, 'S') > agg.letter_total(Axis::Sn, 'N'));
        assert!(agg.letter_total(Axis::Tf, 'T') > agg.letter_total(Axis::Tf, 'F'));
        assert!(agg.letter_total(Axis::Jp, 'J') > agg.letter_total(Axis::Jp, 'P'));
    }

    #[test]
    fn negative_share_is_malformed() {
        let mut shares = [1.0 / 16.0; 16];
        shares[0] = -0.01;
        shares[1] = 2.0 / 16.0 + 0.01;
        let record = TypeRecord::new("Ruritania", shares);

        let err = compute_dominant(&record).unwrap_err();
        match err {
            AppError::MalformedRecord { country, .. } => assert_eq!(country, "Ruritania"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_share_is_malformed() {
        let mut shares = [1.0 / 16.0; 16];
        shares[3] = f64::NAN;
        let record = TypeRecord::new("X", shares);
        assert!(matches!(
            compute_dichotomies(&record),
            Err(AppError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn bad_sum_is_malformed() {
        let record = TypeRecord::new("X", [0.05; 16]); // sums to 0.8
        assert!(matches!(
            compute_dominant(&record),
            Err(AppError::MalformedRecord { .. })
        ));

        // Drift inside the tolerance is accepted.
        let mut shares = [1.0 / 16.0; 16];
        shares[0] += 5e-7;
        shares[1] -= 1e-7;
        assert!(validate_record(&TypeRecord::new("X", shares)).is_ok());
    }

    #[test]
    fn summarize_combines_both_views() {
        let record = peaked("X", MbtiType::Enfj, 0.22);
        let summary = summarize(&record).unwrap();
        assert_eq!(summary.country, "X");
        assert_eq!(summary.dominant.dominant_type, MbtiType::Enfj);
        assert!((summary.axes.split(Axis::Jp).total() - record.total()).abs() < 1e-12);
    }
}
