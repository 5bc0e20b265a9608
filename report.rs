use std::cmp::Ordering;
use std::io::Write;
use clap::ValueEnum;
use itertools::Itertools;

use crate::error::Result;
use crate::substring_types::{FrequencyTable, Report, ResultEntry};

const CHART_WIDTH: usize = 70; // max bar length in the table chart
const PERCENT_COLUMN_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Total line, then `<rank> <percentage> <substring>` lines
    #[default]
    Plain,
    /// Boxed table followed by a horizontal bar chart
    Table,
    Json,
}

/// Higher count first; on equal counts the lexicographically greater substring first.
fn by_rank(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0))
}

/// Share of `count` in `total`, in percent. `total` must be non-zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    (100 * count) as f64 / total as f64
}

/// Shortest round-trip form with a signed, two-digit exponent: `100.0`,
/// `33.333333333333336`, `1e-05`, `1e+16`.
pub fn shortest_repr(value: f64) -> String {
    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Six significant digits, trailing zeros dropped: `33.3333`, `100`, `1.5e-05`.
pub fn six_significant(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let scientific = format!("{:.5e}", value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs());
    }
    let decimals = (5 - exponent) as usize;
    trim_zeros(&format!("{:.*}", decimals, value)).to_string()
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Take the `top` best entries of the table. An empty table yields an empty
/// report, so no percentage is ever computed against a zero total.
pub fn rank<'a>(table: &FrequencyTable<'a>, top: usize) -> Report<'a> {
    let total = table.total();
    let entries = table
        .iter()
        .k_smallest_by(top, by_rank)
        .enumerate()
        .map(|(rank, (substring, count))| ResultEntry {
            rank,
            count,
            percentage: percentage(count, total),
            substring,
        })
        .collect();
    Report { total, entries }
}

pub fn render<W: Write>(out: &mut W, report: &Report<'_>, format: OutputFormat, min_length: usize) -> Result<()> {
    match format {
        OutputFormat::Plain => render_plain(out, report, min_length),
        OutputFormat::Table => render_table(out, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_plain<W: Write>(out: &mut W, report: &Report<'_>, min_length: usize) -> Result<()> {
    writeln!(
        out,
        "Number of substrings longer than {} is: {}",
        min_length.saturating_sub(1),
        report.total
    )?;
    for entry in &report.entries {
        writeln!(out, "{} {} {}", entry.rank, shortest_repr(entry.percentage), entry.substring)?;
    }
    Ok(())
}

fn render_table<W: Write>(out: &mut W, report: &Report<'_>) -> Result<()> {
    let entries = &report.entries;
    if entries.is_empty() {
        writeln!(out, "No results to show.")?;
        return Ok(());
    }

    let id_width = "Id".len().max(4);
    let text_width = entries
        .iter()
        .map(|e| e.substring.chars().count())
        .fold("Substring".len(), usize::max);
    let separator = format!(
        "+{}+{}+{}+",
        "-".repeat(id_width),
        "-".repeat(text_width),
        "-".repeat(PERCENT_COLUMN_WIDTH + 1)
    );

    writeln!(out, "{}", separator)?;
    writeln!(
        out,
        "|{:>id_width$}|{:>text_width$}|{:>pw$}|",
        "Id",
        "Substring",
        "Percentage",
        pw = PERCENT_COLUMN_WIDTH + 1
    )?;
    writeln!(out, "{}", separator)?;
    for entry in entries {
        writeln!(
            out,
            "|{:>id_width$}|{:>text_width$}|{:>pw$}%|",
            entry.rank,
            entry.substring,
            six_significant(entry.percentage),
            pw = PERCENT_COLUMN_WIDTH
        )?;
        writeln!(out, "{}", separator)?;
    }
    writeln!(out)?;

    if entries.len() < 2 {
        writeln!(out, "Only one result, nothing to show on a chart")?;
        return Ok(());
    }

    // bars start from zero, not from the smallest percentage
    let max = entries.iter().map(|e| e.percentage).fold(0.0, f64::max);

    writeln!(out, "Frequency difference horizontal bar chart:")?;
    writeln!(out)?;
    writeln!(out, "{:id_width$}{:<w$}| Maximal %", "", "| Minimal %", w = CHART_WIDTH - 1)?;
    writeln!(out, "{:<id_width$}|{:<w$}|{}", "Id", 0, six_significant(max), w = CHART_WIDTH - 2)?;
    writeln!(
        out,
        "{}+{}+{}",
        "-".repeat(id_width),
        "-".repeat(CHART_WIDTH - 2),
        "-".repeat(PERCENT_COLUMN_WIDTH)
    )?;
    for entry in entries {
        let points = (CHART_WIDTH as f64 * entry.percentage / max).round() as usize;
        let bar = match points {
            0 | 1 => String::new(),
            n => format!("|{}", "#".repeat(n - 2)),
        };
        writeln!(out, "{:<id_width$}{}| {}%", entry.rank, bar, six_significant(entry.percentage))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::count;

    fn plain(text: &str) -> String {
        let table = count(text, 4);
        let mut out = Vec::new();
        render(&mut out, &rank(&table, 10), OutputFormat::Plain, 4).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn no_qualifying_words() {
        let report = rank(&count("abc", 4), 10);
        assert_eq!(report.total, 0);
        assert!(report.entries.is_empty());
        assert_eq!(plain("abc"), "Number of substrings longer than 3 is: 0\n");
        assert_eq!(plain(""), "Number of substrings longer than 3 is: 0\n");
    }

    #[test]
    fn single_word() {
        let table = count("abcd", 4);
        let report = rank(&table, 10);
        assert_eq!(
            report.entries,
            [ResultEntry { rank: 0, count: 1, percentage: 100.0, substring: "abcd" }]
        );
        assert_eq!(plain("aaaa"), "Number of substrings longer than 3 is: 1\n0 100.0 aaaa\n");
    }

    #[test]
    fn ties_break_on_descending_substring() {
        assert_eq!(
            plain("abcde"),
            "Number of substrings longer than 3 is: 3\n\
             0 33.333333333333336 bcde\n\
             1 33.333333333333336 abcde\n\
             2 33.333333333333336 abcd\n"
        );
    }

    #[test]
    fn bounded_and_sorted() {
        let text = "abcdefghijkl abcdef abcdef mnopqrstu";
        let table = count(text, 4);
        let report = rank(&table, 10);
        assert_eq!(report.entries.len(), 10);
        for (i, pair) in report.entries.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            assert_eq!(a.rank, i);
            assert!(a.count > b.count || (a.count == b.count && a.substring > b.substring));
        }
        assert_eq!(report.entries[0].count, 3);
        assert_eq!(report.entries[0].substring, "cdef");
    }

    #[test]
    fn top_limits_entries() {
        let table = count("abcdefgh", 4);
        assert_eq!(rank(&table, 3).entries.len(), 3);
        assert!(rank(&table, 0).entries.is_empty());
        assert_eq!(rank(&table, 100).entries.len(), table.len());
    }

    #[test]
    fn ranking_is_stable_across_runs() {
        let text = "hall feels heels heels hall abababa";
        assert_eq!(plain(text), plain(text));
    }

    #[test]
    fn table_layout() {
        let table = count("abcde", 4);
        let mut out = Vec::new();
        render(&mut out, &rank(&table, 10), OutputFormat::Table, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], format!("+----+---------+{}+", "-".repeat(31)));
        assert!(lines[1].starts_with("|  Id|Substring|"));
        assert!(lines[3].starts_with("|   0|     bcde|"));
        assert!(lines[3].ends_with(&format!("|{:>w$}%|", "33.3333", w = PERCENT_COLUMN_WIDTH)));
        assert!(text.contains("Frequency difference horizontal bar chart:"));
        let bar = lines.iter().find(|l| l.starts_with("0   |#")).unwrap();
        assert_eq!(bar.matches('#').count(), CHART_WIDTH - 2);
    }

    #[test]
    fn percentages_print_like_python_repr() {
        assert_eq!(shortest_repr(100.0), "100.0");
        assert_eq!(shortest_repr(33.333333333333336), "33.333333333333336");
        assert_eq!(shortest_repr(0.0001), "0.0001");
        assert_eq!(shortest_repr(0.00001), "1e-05");
        assert_eq!(shortest_repr(0.000015), "1.5e-05");
        assert_eq!(shortest_repr(1.5e-120), "1.5e-120");
        assert_eq!(shortest_repr(1e16), "1e+16");
    }

    #[test]
    fn percentages_in_table_have_six_significant_digits() {
        assert_eq!(six_significant(33.333333333333336), "33.3333");
        assert_eq!(six_significant(100.0), "100");
        assert_eq!(six_significant(50.0), "50");
        assert_eq!(six_significant(14.285714285714286), "14.2857");
        assert_eq!(six_significant(0.000123456789), "0.000123457");
        assert_eq!(six_significant(0.000015), "1.5e-05");
        assert_eq!(six_significant(1234567.0), "1.23457e+06");
        assert_eq!(six_significant(0.0), "0");
    }

    #[test]
    fn table_edge_cases() {
        let mut out = Vec::new();
        render(&mut out, &rank(&count("abc", 4), 10), OutputFormat::Table, 4).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No results to show.\n");

        let mut out = Vec::new();
        render(&mut out, &rank(&count("abcd", 4), 10), OutputFormat::Table, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Only one result, nothing to show on a chart\n"));
    }

    #[test]
    fn json_output() {
        let mut out = Vec::new();
        render(&mut out, &rank(&count("abcd", 4), 10), OutputFormat::Json, 4).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 1);
        assert_eq!(value["entries"][0]["substring"], "abcd");
        assert_eq!(value["entries"][0]["percentage"], 100.0);
        assert_eq!(value["entries"][0]["rank"], 0);
    }
}
