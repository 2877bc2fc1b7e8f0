use std::path::Path;

use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::Review;
use crate::rating::types::TimeWeightedSummary;
use crate::rating::{self, RankedBatch};
use crate::services::ingestion;

pub struct RankingService {
    config: AppConfig,
}

impl RankingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn rank_file<P: AsRef<Path>>(&self, path: P) -> Result<RankedBatch> {
        info!("=== Starting Review Ranking ===");

        let reviews = self.load(path)?;
        let batch = self.rank_reviews(&reviews)?;

        info!("=== Ranking Complete ===");
        Ok(batch)
    }

    pub fn rate_file<P: AsRef<Path>>(&self, path: P) -> Result<TimeWeightedSummary> {
        info!("=== Starting Product Rating ===");

        let reviews = self.load(path)?;
        let summary = self.rate_reviews(&reviews)?;

        info!("=== Rating Complete ===");
        Ok(summary)
    }

    pub fn rank_reviews(&self, reviews: &[Review]) -> Result<RankedBatch> {
        let batch = rating::rank(reviews, &self.config.scoring)?;
        info!(
            "  → Scored {} reviews, time-weighted rating {:.5}",
            batch.reviews.len(),
            batch.summary.weighted_average
        );
        Ok(batch)
    }

    pub fn rate_reviews(&self, reviews: &[Review]) -> Result<TimeWeightedSummary> {
        let summary = rating::weighting::summarize(reviews, &self.config.scoring.weights)?;
        info!(
            "  → Plain mean {:.5}, time-weighted {:.5} (weights {})",
            summary.plain_mean, summary.weighted_average, self.config.scoring.weights
        );
        Ok(summary)
    }

    fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Review>> {
        ingestion::load_reviews(path)
    }
}
