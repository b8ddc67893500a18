//! Byte Distribution histogram.

use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Longest bar drawn, whatever width is configured.
pub const MAX_BAR_WIDTH: usize = 200;

/// One histogram bar: how many rows have exactly `value` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub value: u64,
    pub count: usize,
}

/// Count rows per exact byte value, ascending by value.
pub fn histogram(values: &[u64]) -> Vec<Bin> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| Bin { value, count })
        .collect()
}

/// Draw bins as horizontal bars, the tallest bar `width` cells long
/// (at most [`MAX_BAR_WIDTH`]).
pub fn render(bins: &[Bin], width: usize, max_bins: usize) -> String {
    let width = width.min(MAX_BAR_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Byte Distribution".bold().underline());

    if bins.is_empty() {
        let _ = writeln!(out, "  {}", "no rows to chart".dimmed());
        return out;
    }

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(1);
    let label_width = bins
        .iter()
        .take(max_bins)
        .map(|b| b.value.to_string().len())
        .max()
        .unwrap_or(1);

    for bin in bins.iter().take(max_bins) {
        let bar = "█".repeat(bar_len(bin.count, max_count, width));
        let _ = writeln!(
            out,
            "  {:>label_width$} │{} {}",
            bin.value,
            bar.green(),
            bin.count.to_string().cyan()
        );
    }

    if bins.len() > max_bins {
        let _ = writeln!(
            out,
            "  {}",
            format!("... {} more", bins.len() - max_bins).dimmed()
        );
    }

    out
}

fn bar_len(count: usize, max_count: usize, width: usize) -> usize {
    if max_count == 0 || count == 0 {
        return 0;
    }
    count.saturating_mul(width).div_ceil(max_count).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bins_by_exact_value() {
        let bins = histogram(&[10, 50_000, 10, 200_000, 10]);
        assert_eq!(
            bins,
            vec![
                Bin { value: 10, count: 3 },
                Bin { value: 50_000, count: 1 },
                Bin { value: 200_000, count: 1 },
            ]
        );
    }

    #[test]
    fn test_histogram_counts_sum_to_rows() {
        let values = [5, 5, 6, 7, 7, 7];
        let total: usize = histogram(&values).iter().map(|b| b.count).sum();
        assert_eq!(total, values.len());
    }

    #[test]
    fn test_bar_len_scales_to_width() {
        assert_eq!(bar_len(4, 4, 40), 40);
        assert_eq!(bar_len(2, 4, 40), 20);
        assert_eq!(bar_len(1, 1000, 40), 1);
        assert_eq!(bar_len(0, 4, 40), 0);
    }

    #[test]
    fn test_huge_width_is_capped() {
        assert_eq!(bar_len(3, 3, usize::MAX), usize::MAX.div_ceil(3));

        colored::control::set_override(false);
        let bins = histogram(&[7, 7, 8]);
        let text = render(&bins, usize::MAX, 10);
        let longest = text
            .lines()
            .map(|line| line.matches('█').count())
            .max()
            .unwrap_or(0);
        assert_eq!(longest, MAX_BAR_WIDTH);
    }

    #[test]
    fn test_render_truncates_bins() {
        colored::control::set_override(false);
        let bins = histogram(&[1, 2, 3, 4, 5]);
        let text = render(&bins, 10, 3);
        assert!(text.contains("Byte Distribution"));
        assert!(text.contains("... 2 more"));
        assert!(!text.contains(" 4 │"));
    }

    #[test]
    fn test_render_empty() {
        colored::control::set_override(false);
        let text = render(&[], 10, 3);
        assert!(text.contains("no rows to chart"));
    }
}
