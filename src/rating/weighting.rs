use chrono::NaiveDate;
use log::debug;
use ndarray::Array1;

use super::quantile::{quantile, sorted_array};
use super::types::{
    BucketStats, BucketWeights, DaysSince, QuartileBoundaries, RatingValue, RecencyBucket,
    TimeWeightedSummary,
};
use crate::domain::Review;
use crate::errors::ScoringError;

/// Most recent review date in the batch; all ages are measured from it.
pub fn reference_date(reviews: &[Review]) -> Result<NaiveDate, ScoringError> {
    reviews
        .iter()
        .map(|r| r.reviewed_on)
        .max()
        .ok_or(ScoringError::EmptyInput {
            what: "reference date",
        })
}

pub fn calculate_age_days(review_date: NaiveDate, reference_date: NaiveDate) -> DaysSince {
    let duration = reference_date.signed_duration_since(review_date);
    duration.num_days().max(0)
}

pub fn days_since_review(reviews: &[Review], reference_date: NaiveDate) -> Vec<DaysSince> {
    reviews
        .iter()
        .map(|r| calculate_age_days(r.reviewed_on, reference_date))
        .collect()
}

pub fn boundaries_from_days(days: &[DaysSince]) -> Result<QuartileBoundaries, ScoringError> {
    let sorted = sorted_array(days.iter().map(|&d| d as f64));

    Ok(QuartileBoundaries {
        q1: quantile(&sorted, 0.25)?,
        q2: quantile(&sorted, 0.50)?,
        q3: quantile(&sorted, 0.75)?,
    })
}

pub fn quartile_boundaries(reviews: &[Review]) -> Result<QuartileBoundaries, ScoringError> {
    let reference = reference_date(reviews)?;
    boundaries_from_days(&days_since_review(reviews, reference))
}

/// Weighted blend of per-bucket mean ratings, most recent bucket first.
///
/// An empty bucket contributes 0 and the other weights are left as they are.
pub fn compute_weighted_average(
    reviews: &[Review],
    weights: &BucketWeights,
) -> Result<RatingValue, ScoringError> {
    Ok(summarize(reviews, weights)?.weighted_average)
}

pub fn summarize(
    reviews: &[Review],
    weights: &BucketWeights,
) -> Result<TimeWeightedSummary, ScoringError> {
    let reference = reference_date(reviews)?;
    let days = days_since_review(reviews, reference);
    let boundaries = boundaries_from_days(&days)?;
    debug!(
        "Quartile boundaries: q1={} q2={} q3={} (reference {})",
        boundaries.q1, boundaries.q2, boundaries.q3, reference
    );

    let buckets = bucket_stats(reviews, &days, &boundaries, weights);
    let weighted_average = blend(&buckets);

    Ok(TimeWeightedSummary {
        review_count: reviews.len(),
        reference_date: reference,
        plain_mean: plain_mean(reviews),
        boundaries,
        buckets,
        weighted_average,
    })
}

fn bucket_stats(
    reviews: &[Review],
    days: &[DaysSince],
    boundaries: &QuartileBoundaries,
    weights: &BucketWeights,
) -> Vec<BucketStats> {
    RecencyBucket::ALL
        .iter()
        .map(|&bucket| {
            let ratings = ratings_in_bucket(reviews, days, boundaries, bucket);
            debug!("Bucket {}: {} reviews", bucket.as_str(), ratings.len());

            BucketStats {
                bucket,
                count: ratings.len(),
                mean_rating: ratings.mean().unwrap_or(0.0),
                weight_percent: weights.percent(bucket),
            }
        })
        .collect()
}

fn ratings_in_bucket(
    reviews: &[Review],
    days: &[DaysSince],
    boundaries: &QuartileBoundaries,
    bucket: RecencyBucket,
) -> Array1<f64> {
    reviews
        .iter()
        .zip(days)
        .filter(|(_, d)| boundaries.bucket_for(**d) == bucket)
        .map(|(r, _)| r.overall)
        .collect()
}

fn blend(buckets: &[BucketStats]) -> RatingValue {
    buckets
        .iter()
        .map(|b| b.mean_rating * b.weight_percent / 100.0)
        .sum()
}

fn plain_mean(reviews: &[Review]) -> RatingValue {
    let ratings: Array1<f64> = reviews.iter().map(|r| r.overall).collect();
    ratings.mean().unwrap_or(0.0)
}
