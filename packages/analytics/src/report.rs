//! Plain-text report rendering for terminal output.
//!
//! Formatting is controlled per call through [`ReportOptions`]; nothing here
//! reads or mutates process-wide display settings.

use vleague_analytics_models::{GenderHistogram, GroupAggregate, ReportOptions, TeamReport};
use vleague_match_models::MatchRecord;

/// Placeholder for missing cells.
const MISSING: &str = "-";

/// Formats an optional rate with the configured precision.
#[must_use]
pub fn format_rate(rate: Option<f64>, options: &ReportOptions) -> String {
    rate.map_or_else(
        || MISSING.to_string(),
        |r| format!("{r:.prec$}", prec = options.precision),
    )
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn cell(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

fn is_numeric(value: &str) -> bool {
    value.trim_end_matches('%').parse::<f64>().is_ok()
}

fn truncate(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        line.to_string()
    } else {
        line.chars().take(width).collect()
    }
}

fn format_row(values: &[&str], widths: &[usize], numeric: &[bool], width: usize) -> String {
    let mut line = String::new();
    for (i, value) in values.iter().enumerate().take(widths.len()) {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = " ".repeat(widths[i].saturating_sub(value.chars().count()));
        if numeric[i] {
            line.push_str(&pad);
            line.push_str(value);
        } else {
            line.push_str(value);
            line.push_str(&pad);
        }
    }
    truncate(line.trim_end(), width)
}

/// Renders `rows` as an aligned text table under a `title` banner.
///
/// Columns whose cells are all numeric (or missing) are right-aligned.
/// At most `max_rows` rows are printed, followed by a count of the rest,
/// and every line is cut at `width` characters.
#[must_use]
pub fn render_table(
    title: &str,
    headers: &[&str],
    rows: &[Vec<String>],
    options: &ReportOptions,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let numeric: Vec<bool> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .all(|v| v == MISSING || is_numeric(v))
                && !rows.is_empty()
        })
        .collect();

    let mut out = String::new();
    let banner = "=".repeat(20);
    push_line(&mut out, &format!("\n{banner} {title} {banner}"));
    push_line(&mut out, &format_row(headers, &widths, &numeric, options.width));

    let shown = options.max_rows.unwrap_or(rows.len()).min(rows.len());
    for row in &rows[..shown] {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut out, &format_row(&values, &widths, &numeric, options.width));
    }
    if shown < rows.len() {
        push_line(&mut out, &format!("... ({} more rows)", rows.len() - shown));
    }
    push_line(&mut out, &format!("[{} rows]", rows.len()));

    out
}

/// Renders a ranked aggregate list.
#[must_use]
pub fn render_aggregates(
    title: &str,
    key_header: &str,
    aggregates: &[GroupAggregate],
    options: &ReportOptions,
) -> String {
    let rows: Vec<Vec<String>> = aggregates
        .iter()
        .enumerate()
        .map(|(i, agg)| {
            vec![
                (i + 1).to_string(),
                agg.key.clone(),
                format_rate(Some(agg.mean), options),
                agg.count.to_string(),
                format_rate(Some(agg.max), options),
            ]
        })
        .collect();

    render_table(
        title,
        &["#", key_header, "평균 시청률", "경기 수", "최고 시청률"],
        &rows,
        options,
    )
}

/// Renders a match list with date, stadium, city, and rate.
#[must_use]
pub fn render_matches(title: &str, matches: &[&MatchRecord], options: &ReportOptions) -> String {
    let rows: Vec<Vec<String>> = matches
        .iter()
        .map(|r| {
            vec![
                cell(r.date.as_deref()),
                r.matchup(),
                cell(r.home_stadium.as_deref()),
                cell(r.home_city.as_deref()),
                format_rate(r.rate(), options),
            ]
        })
        .collect();

    render_table(
        title,
        &["일자", "경기", "구단홈구장", "소속도시", "가구 시청률"],
        &rows,
        options,
    )
}

/// Renders a [`TeamReport`] as a summary block followed by its games.
#[must_use]
pub fn render_team_report(report: &TeamReport, options: &ReportOptions) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    push_line(&mut out, &format!("\n{rule}"));
    push_line(&mut out, &format!("  [{}] 상세 분석 리포트", report.team));
    push_line(&mut out, &rule);
    push_line(
        &mut out,
        &format!(
            "▶ 대상 시즌: {}",
            report.season.as_deref().unwrap_or("전체 데이터")
        ),
    );

    if report.is_empty() {
        push_line(&mut out, "\n[알림] 해당 조건에 맞는 경기 데이터가 없습니다.");
        push_line(
            &mut out,
            &format!("       팀명이나 시즌을 확인해주세요. (입력된 팀: {})", report.team),
        );
        return out;
    }

    push_line(&mut out, &format!("▶ 총 경기 수: {} 경기", report.match_count));
    push_line(
        &mut out,
        &format!("▶ 평균 시청률: {}%", format_rate(report.mean, options)),
    );
    match &report.best_match {
        Some(best) => {
            push_line(
                &mut out,
                &format!(
                    "▶ 최고 시청률: {}%  (vs {}, {} {})",
                    format_rate(Some(best.rate), options),
                    cell(best.away_team.as_deref()),
                    cell(best.date.as_deref()),
                    best.weekday
                        .as_deref()
                        .map_or_else(String::new, |w| format!("({w})")),
                ),
            );
        }
        None => {
            push_line(&mut out, &format!("▶ 최고 시청률: {MISSING}"));
        }
    }
    push_line(
        &mut out,
        &format!("▶ 최저 시청률: {}%", format_rate(report.min, options)),
    );

    let rows: Vec<Vec<String>> = report
        .matches
        .iter()
        .map(|r| {
            vec![
                cell(r.date.as_deref()),
                cell(r.season.as_deref()),
                cell(r.round.as_deref()),
                cell(r.home_team.as_deref()),
                cell(r.away_team.as_deref()),
                cell(r.home_stadium.as_deref()),
                format_rate(r.rate(), options),
            ]
        })
        .collect();

    out.push_str(&render_table(
        "상세 경기 리스트 (최신순)",
        &["일자", "시즌", "라운드구분", "홈", "어웨이", "구단홈구장", "가구 시청률"],
        &rows,
        options,
    ));

    out
}

/// Renders a gender histogram as two count columns per bucket.
#[must_use]
pub fn render_histogram(title: &str, histogram: &GenderHistogram, options: &ReportOptions) -> String {
    let rows: Vec<Vec<String>> = histogram
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                b.men.unsigned_abs().to_string(),
                b.women.to_string(),
            ]
        })
        .collect();

    let mut out = render_table(title, &["구간", "남자부", "여자부"], &rows, options);
    push_line(&mut out, &format!("최대 빈도: {}", histogram.max_abs));
    out
}
