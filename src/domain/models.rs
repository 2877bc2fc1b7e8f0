use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;
use crate::rating::types::{DaysSince, RatingValue, RecencyBucket, ScoreBundle};

/// Review with validated vote counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub product_id: String,
    pub reviewer_id: String,
    pub overall: RatingValue,
    pub reviewed_on: NaiveDate,
    pub helpful_yes: u64,
    pub total_vote: u64,
    #[serde(default)]
    pub payload: ReviewPayload,
}

impl Review {
    pub fn new(
        product_id: impl Into<String>,
        reviewer_id: impl Into<String>,
        overall: RatingValue,
        reviewed_on: NaiveDate,
        helpful_yes: i64,
        total_vote: i64,
    ) -> Result<Self, ScoringError> {
        let (helpful_yes, total_vote) = validate_votes(helpful_yes, total_vote)?;

        Ok(Self {
            product_id: product_id.into(),
            reviewer_id: reviewer_id.into(),
            overall,
            reviewed_on,
            helpful_yes,
            total_vote,
            payload: ReviewPayload::default(),
        })
    }

    pub fn with_payload(mut self, payload: ReviewPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn helpful_no(&self) -> u64 {
        self.total_vote - self.helpful_yes
    }
}

fn validate_votes(helpful_yes: i64, total_vote: i64) -> Result<(u64, u64), ScoringError> {
    if helpful_yes < 0 || total_vote < 0 || helpful_yes > total_vote {
        return Err(ScoringError::InvalidVoteCount {
            helpful_yes,
            total_vote,
        });
    }
    Ok((helpful_yes as u64, total_vote as u64))
}

/// Columns the scoring never reads, carried along for display
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub reviewer_name: Option<String>,
    pub helpful: Option<String>,
    pub review_text: Option<String>,
    pub summary: Option<String>,
    pub unix_review_time: Option<i64>,
    pub review_time: Option<String>,
    pub day_diff: Option<i64>,
}

/// Review annotated with recency and helpfulness metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub days_since_review: DaysSince,
    pub recency_bucket: RecencyBucket,
    pub helpful_no: u64,
    pub score_pos_neg_diff: i64,
    pub score_average_rating: f64,
    pub wilson_lower_bound: f64,
}

impl ScoredReview {
    pub fn new(
        review: Review,
        days_since_review: DaysSince,
        recency_bucket: RecencyBucket,
        scores: ScoreBundle,
    ) -> Self {
        let helpful_no = review.helpful_no();

        Self {
            review,
            days_since_review,
            recency_bucket,
            helpful_no,
            score_pos_neg_diff: scores.diff,
            score_average_rating: scores.average,
            wilson_lower_bound: scores.wilson_lower_bound,
        }
    }
}

// --- CSV Row Structures ---

/// Raw row of the Amazon review export
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewRecord {
    #[serde(rename = "reviewerID")]
    pub reviewer_id: String,
    pub asin: String,
    #[serde(rename = "reviewerName", default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub helpful: Option<String>,
    #[serde(rename = "reviewText", default)]
    pub review_text: Option<String>,
    pub overall: f64,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "unixReviewTime", default)]
    pub unix_review_time: Option<i64>,
    #[serde(rename = "reviewTime")]
    pub review_time: String,
    #[serde(default)]
    pub day_diff: Option<i64>,
    pub helpful_yes: i64,
    pub total_vote: i64,
}

impl ReviewRecord {
    pub fn payload(&self) -> ReviewPayload {
        ReviewPayload {
            reviewer_name: non_empty(&self.reviewer_name),
            helpful: non_empty(&self.helpful),
            review_text: non_empty(&self.review_text),
            summary: non_empty(&self.summary),
            unix_review_time: self.unix_review_time,
            review_time: Some(self.review_time.clone()),
            day_diff: self.day_diff,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}
