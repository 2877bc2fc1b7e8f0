use colored::Colorize;

use crate::config::settings::DisplaySettings;
use crate::domain::ScoredReview;
use crate::rating::RankedBatch;
use crate::rating::types::TimeWeightedSummary;
use crate::services::inspection::{ColumnKind, DatasetProfile};

const RANKING_HEADERS: [&str; 9] = [
    "rank",
    "reviewer",
    "overall",
    "days",
    "helpful_yes",
    "helpful_no",
    "score_pos_neg_diff",
    "score_average_rating",
    "wilson_lower_bound",
];
const REVIEWER_WIDTH: usize = 14;
const MIN_COLUMN_WIDTH: usize = 8;

/// Top reviews by Wilson lower bound, followed by the batch rating.
pub fn render_ranking(batch: &RankedBatch, display: &DisplaySettings) -> String {
    let mut out = String::new();

    out.push_str(&section("Top Reviews"));
    out.push_str(&header_line(&RANKING_HEADERS));

    for (idx, review) in batch.reviews.iter().take(display.top).enumerate() {
        out.push_str(&ranking_row(idx + 1, review, display.precision));
    }

    out.push_str(&format!(
        "\nShowing {} of {} reviews\n",
        batch.reviews.len().min(display.top),
        batch.reviews.len()
    ));
    out.push_str(&format!(
        "Time-weighted average rating: {}\n",
        format!("{:.*}", display.precision, batch.summary.weighted_average).green().bold()
    ));
    out
}

fn ranking_row(rank: usize, review: &ScoredReview, precision: usize) -> String {
    let cells = [
        rank.to_string(),
        truncate(&review.review.reviewer_id, REVIEWER_WIDTH),
        format!("{:.*}", precision, review.review.overall),
        review.days_since_review.to_string(),
        review.review.helpful_yes.to_string(),
        review.helpful_no.to_string(),
        review.score_pos_neg_diff.to_string(),
        format!("{:.*}", precision, review.score_average_rating),
        format!("{:.*}", precision, review.wilson_lower_bound),
    ];
    row_line(&cells, &RANKING_HEADERS)
}

/// Bucket breakdown of the time-weighted rating.
pub fn render_summary(summary: &TimeWeightedSummary, display: &DisplaySettings) -> String {
    let p = display.precision;
    let headers = ["bucket", "days", "reviews", "mean_rating", "weight"];
    let b = &summary.boundaries;
    let ranges = [
        format!("<= {:.1}", b.q1),
        format!("{:.1} - {:.1}", b.q1, b.q2),
        format!("{:.1} - {:.1}", b.q2, b.q3),
        format!("> {:.1}", b.q3),
    ];

    let mut out = section("Product Rating");
    out.push_str(&format!("Reviews:        {}\n", summary.review_count));
    out.push_str(&format!("Reference date: {}\n", summary.reference_date));
    out.push_str(&format!("Plain mean:     {:.*}\n\n", p, summary.plain_mean));
    out.push_str(&header_line(&headers));

    for (stats, range) in summary.buckets.iter().zip(ranges) {
        let cells = [
            stats.bucket.as_str().to_string(),
            range,
            stats.count.to_string(),
            format!("{:.*}", p, stats.mean_rating),
            format!("{}%", stats.weight_percent),
        ];
        out.push_str(&row_line(&cells, &headers));
    }

    out.push_str(&format!(
        "\nTime-weighted average rating: {}\n",
        format!("{:.*}", p, summary.weighted_average).green().bold()
    ));
    out
}

pub fn render_profile(profile: &DatasetProfile, display: &DisplaySettings) -> String {
    let p = display.precision;
    let mut out = section("Shape");
    out.push_str(&format!("({}, {})\n", profile.rows, profile.columns.len()));

    out.push_str(&section("Types"));
    for column in &profile.columns {
        let kind = match column.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        };
        out.push_str(&format!("{:<20} {}\n", column.name, kind));
    }

    let names: Vec<&str> = profile.columns.iter().map(|c| c.name.as_str()).collect();
    out.push_str(&section("Head"));
    out.push_str(&raw_rows(&names, &profile.head));
    out.push_str(&section("Tail"));
    out.push_str(&raw_rows(&names, &profile.tail));

    out.push_str(&section("NA"));
    for column in &profile.columns {
        out.push_str(&format!("{:<20} {}\n", column.name, column.missing));
    }

    out.push_str(&section("Quantiles"));
    let mut headers: Vec<String> = ["column", "count", "mean", "std"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    if let Some(first) = profile.numeric.first() {
        headers.extend(first.quantiles.iter().map(|(q, _)| format!("{}%", q * 100.0)));
    }
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    out.push_str(&header_line(&header_refs));

    for summary in &profile.numeric {
        let mut cells = vec![
            summary.column.clone(),
            summary.count.to_string(),
            format!("{:.*}", p, summary.mean),
            format!("{:.*}", p, summary.std),
        ];
        cells.extend(summary.quantiles.iter().map(|(_, v)| format!("{:.*}", p, v)));
        out.push_str(&row_line(&cells, &header_refs));
    }
    out
}

fn raw_rows(names: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> = names
            .iter()
            .zip(row)
            .map(|(name, value)| format!("{}={}", name, truncate(value, 24)))
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

fn section(title: &str) -> String {
    let banner = format!("##################### {} #####################", title);
    format!("{}\n", banner.cyan())
}

fn header_line(headers: &[&str]) -> String {
    let cells: Vec<String> = headers
        .iter()
        .map(|h| format!("{:>width$}", h, width = column_width(h)).bold().to_string())
        .collect();
    format!("{}\n", cells.join(" "))
}

fn row_line(cells: &[String], headers: &[&str]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(headers)
        .map(|(cell, h)| format!("{:>width$}", cell, width = column_width(h)))
        .collect();
    format!("{}\n", cells.join(" "))
}

fn column_width(header: &str) -> usize {
    if header == "reviewer" {
        return REVIEWER_WIDTH;
    }
    header.chars().count().max(MIN_COLUMN_WIDTH)
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut short: String = value.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
