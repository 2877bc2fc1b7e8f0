use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info};

use crate::domain::{Review, ReviewRecord};
use crate::errors::{ScoringError, with_load_context, with_parse_context, with_row_context};

const DATE_FORMATS: [&str; 3] = ["%m %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Load and validate every review in a CSV export.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<Vec<Review>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    info!("Loading reviews from {}", display);

    let reader = with_load_context(csv::Reader::from_path(path), &display)?;
    let reviews = read_reviews(reader)?;

    info!("  → Loaded {} reviews", reviews.len());
    Ok(reviews)
}

/// Parse reviews from any CSV source with a header row.
pub fn read_reviews<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Review>> {
    let headers = with_parse_context(reader.headers(), "CSV header")?.clone();
    let mut reviews = Vec::new();

    for row in reader.records() {
        let line = record_line(&row);
        let raw = with_row_context(row, line)?;
        let record: ReviewRecord = with_row_context(raw.deserialize(Some(&headers)), line)?;
        let review = with_row_context(convert_record(record), line)?;
        reviews.push(review);
    }

    Ok(reviews)
}

/// Line on which a record starts. Quoted fields may span several lines,
/// so this is not the record index.
pub fn record_line(row: &csv::Result<csv::StringRecord>) -> usize {
    let position = match row {
        Ok(record) => record.position(),
        Err(err) => err.position(),
    };
    position.map_or(0, |p| p.line() as usize)
}

pub fn convert_record(record: ReviewRecord) -> Result<Review, ScoringError> {
    let reviewed_on = parse_review_date(&record.review_time, record.unix_review_time)?;
    let payload = record.payload();

    let review = Review::new(
        record.asin,
        record.reviewer_id,
        record.overall,
        reviewed_on,
        record.helpful_yes,
        record.total_vote,
    )?;

    Ok(review.with_payload(payload))
}

/// Calendar date of a review. Falls back to the epoch column when the
/// text column is in an unknown format.
pub fn parse_review_date(
    review_time: &str,
    unix_review_time: Option<i64>,
) -> Result<NaiveDate, ScoringError> {
    let text = review_time.trim();

    if let Some(date) = parse_date_text(text) {
        return Ok(date);
    }

    if let Some(date) = unix_review_time.and_then(date_from_unix) {
        debug!("Using unixReviewTime for unparseable reviewTime {:?}", text);
        return Ok(date);
    }

    Err(ScoringError::InvalidDate(review_time.to_string()))
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn date_from_unix(seconds: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "reviewerID,asin,reviewerName,helpful,reviewText,overall,summary,unixReviewTime,reviewTime,day_diff,helpful_yes,total_vote\n";

    fn reader(rows: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(rows.as_bytes())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_export_date_format() {
        assert_eq!(
            parse_review_date("07 23, 2014", None).unwrap(),
            ymd(2014, 7, 23)
        );
        assert_eq!(
            parse_review_date("2014-07-23", None).unwrap(),
            ymd(2014, 7, 23)
        );
        assert_eq!(
            parse_review_date("2014-07-23 18:30:00", None).unwrap(),
            ymd(2014, 7, 23)
        );
    }

    #[test]
    fn test_parse_falls_back_to_unix_time() {
        // 2014-07-23T00:00:00Z
        assert_eq!(
            parse_review_date("yesterday", Some(1406073600)).unwrap(),
            ymd(2014, 7, 23)
        );
        assert_eq!(
            parse_review_date("yesterday", None),
            Err(ScoringError::InvalidDate("yesterday".to_string()))
        );
    }

    #[test]
    fn test_read_reviews_keeps_payload() {
        let csv = format!(
            "{HEADER}A3SBTW3WS4IQSN,B007WTAJTO,,\"[0, 0]\",No issues.,4.0,Four Stars,1406073600,\"07 23, 2014\",138,0,0\n\
             A18K1ODH1I2MVB,B007WTAJTO,0mie,\"[0, 0]\",Works as expected.,5.0,MOAR SPACE!!!,1382659200,\"10 25, 2013\",409,1,3\n"
        );

        let reviews = read_reviews(reader(&csv)).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].reviewer_id, "A3SBTW3WS4IQSN");
        assert_eq!(reviews[0].product_id, "B007WTAJTO");
        assert_eq!(reviews[0].payload.reviewer_name, None);
        assert_eq!(reviews[0].payload.day_diff, Some(138));
        assert_eq!(reviews[1].reviewed_on, ymd(2013, 10, 25));
        assert_eq!(reviews[1].helpful_no(), 2);
        assert_eq!(reviews[1].payload.summary.as_deref(), Some("MOAR SPACE!!!"));
    }

    #[test]
    fn test_invalid_votes_report_the_row() {
        let csv = format!(
            "{HEADER}A1,B007WTAJTO,x,\"[0, 0]\",ok,5.0,ok,1406073600,\"07 23, 2014\",138,0,0\n\
             A2,B007WTAJTO,y,\"[5, 3]\",ok,5.0,ok,1406073600,\"07 23, 2014\",138,5,3\n"
        );

        let err = read_reviews(reader(&csv)).unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse review row 3");
        assert_eq!(
            err.downcast_ref::<ScoringError>(),
            Some(&ScoringError::InvalidVoteCount {
                helpful_yes: 5,
                total_vote: 3
            })
        );
    }

    #[test]
    fn test_multiline_review_text_keeps_row_numbers() {
        let csv = format!(
            "{HEADER}A1,B007WTAJTO,x,\"[0, 0]\",\"First line\nsecond line\nthird\",5.0,ok,1406073600,\"07 23, 2014\",138,0,0\n\
             A2,B007WTAJTO,y,\"[5, 3]\",ok,5.0,ok,1406073600,\"07 23, 2014\",138,5,3\n"
        );

        let err = read_reviews(reader(&csv)).unwrap_err();

        // Header on line 1, first record on lines 2-4
        assert_eq!(err.to_string(), "Failed to parse review row 5");
    }

    #[test]
    fn test_multiline_review_text_is_kept() {
        let csv = format!(
            "{HEADER}A1,B007WTAJTO,x,\"[0, 0]\",\"Line one\nline two\",5.0,ok,1406073600,\"07 23, 2014\",138,0,0\n"
        );

        let reviews = read_reviews(reader(&csv)).unwrap();

        assert_eq!(
            reviews[0].payload.review_text.as_deref(),
            Some("Line one\nline two")
        );
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_reviews("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load reviews from:"));
    }
}
