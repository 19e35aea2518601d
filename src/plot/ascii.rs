//! ASCII bar charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-width rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! One row per country: a left-aligned label, a `#` bar scaled against the
//! maximum value, then the numeric value.

/// One bar: label + value. The caller decides what goes in the label
/// (e.g. `"Borduria [ESFJ]"`).
#[derive(Debug, Clone)]
pub struct BarRow {
    pub label: String,
    pub value: f64,
}

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 8;

/// Render a horizontal bar chart.
///
/// `width` is the total column count; bars scale linearly from zero to the
/// maximum value so relative magnitudes read directly off the bar lengths.
pub fn render_bar_chart(title: &str, rows: &[BarRow], width: usize) -> String {
    let width = width.max(LABEL_WIDTH + VALUE_WIDTH + 12);
    let bar_width = width - LABEL_WIDTH - VALUE_WIDTH - 3;

    let max = rows
        .iter()
        .map(|r| r.value)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Bars: {title} | n={} | max={max:.4}\n", rows.len()));

    for row in rows {
        let filled = bar_len(row.value, max, bar_width);
        out.push_str(&format!(
            "{:<label$} |{:<bar$} {:>value$.4}\n",
            truncate(&row.label, LABEL_WIDTH),
            "#".repeat(filled),
            row.value,
            label = LABEL_WIDTH,
            bar = bar_width,
            value = VALUE_WIDTH,
        ));
    }

    out
}

fn bar_len(value: f64, max: f64, bar_width: usize) -> usize {
    if !(value.is_finite() && max > 0.0) {
        return 0;
    }
    let u = (value / max).clamp(0.0, 1.0);
    (u * bar_width as f64).round() as usize
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

    #[test]
    fn bar_golden_snapshot_small() {
        let rows = vec![
            BarRow {
                label: "Borduria [ESFJ]".to_string(),
                value: 0.35,
            },
            BarRow {
                label: "Aland [INFP]".to_string(),
                value: 0.175,
            },
        ];

        // width 51 -> 12 bar columns.
        let txt = render_bar_chart("dominant share", &rows, 51);
        let expected = concat!(
            "Bars: dominant share | n=2 | max=0.3500\n",
            "Borduria [ESFJ]              |############   0.3500\n",
            "Aland [INFP]                 |######         0.1750\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn zero_max_renders_empty_bars() {
        let rows = vec![BarRow {
            label: "X".to_string(),
            value: 0.0,
        }];
        let txt = render_bar_chart("dominant share", &rows, 60);
        assert!(txt.lines().nth(1).unwrap().contains("|"));
        assert!(!txt.contains('#'));
    }
}
