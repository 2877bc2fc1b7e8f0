use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::types::{QuartileBoundaries, TimeWeightedSummary};
use super::weighting::{self, calculate_age_days};
use super::wilson;
use crate::config::settings::ScoringSettings;
use crate::domain::{Review, ScoredReview};
use crate::errors::ScoringError;

/// Scored reviews in display order plus the batch rating summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBatch {
    pub reviews: Vec<ScoredReview>,
    pub summary: TimeWeightedSummary,
}

/// Score every review and sort by Wilson lower bound, best first.
///
/// Ties keep their input order. The input slice is left untouched.
pub fn rank(
    reviews: &[Review],
    settings: &ScoringSettings,
) -> Result<RankedBatch, ScoringError> {
    info!(
        "Ranking {} reviews (confidence {})",
        reviews.len(),
        settings.confidence.level()
    );

    let summary = weighting::summarize(reviews, &settings.weights)?;
    let mut scored = score_reviews(reviews, &summary, settings);
    sort_by_wilson(&mut scored);

    debug!(
        "Top wilson_lower_bound: {:?}",
        scored.first().map(|r| r.wilson_lower_bound)
    );

    Ok(RankedBatch {
        reviews: scored,
        summary,
    })
}

fn score_reviews(
    reviews: &[Review],
    summary: &TimeWeightedSummary,
    settings: &ScoringSettings,
) -> Vec<ScoredReview> {
    reviews
        .par_iter()
        .map(|review| {
            score_single(
                review,
                summary.reference_date,
                &summary.boundaries,
                settings,
            )
        })
        .collect()
}

fn score_single(
    review: &Review,
    reference_date: chrono::NaiveDate,
    boundaries: &QuartileBoundaries,
    settings: &ScoringSettings,
) -> ScoredReview {
    let days = calculate_age_days(review.reviewed_on, reference_date);
    let scores = wilson::score(review.helpful_yes, review.helpful_no(), settings.confidence);

    ScoredReview::new(review.clone(), days, boundaries.bucket_for(days), scores)
}

// Vec::sort_by is stable.
fn sort_by_wilson(scored: &mut [ScoredReview]) {
    scored.sort_by(|a, b| b.wilson_lower_bound.total_cmp(&a.wilson_lower_bound));
}
