use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;

pub type DaysSince = i64;
pub type RatingValue = f64;

const BUCKET_COUNT: usize = 4;
const WEIGHT_TOTAL: f64 = 100.0;
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Percentage weights for the four recency buckets, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketWeights {
    percents: [f64; BUCKET_COUNT],
}

impl BucketWeights {
    pub fn new(w1: u32, w2: u32, w3: u32, w4: u32) -> Result<Self, ScoringError> {
        let percents = [w1 as f64, w2 as f64, w3 as f64, w4 as f64];
        let sum: f64 = percents.iter().sum();

        if sum != WEIGHT_TOTAL {
            return Err(ScoringError::InvalidWeight { sum });
        }

        Ok(Self { percents })
    }

    /// Weights given as fractions of 1.0 instead of percentages.
    pub fn from_fractions(fractions: [f64; BUCKET_COUNT]) -> Result<Self, ScoringError> {
        let sum: f64 = fractions.iter().sum();

        if fractions.iter().any(|f| !(0.0..=1.0).contains(f))
            || (sum - 1.0).abs() > FRACTION_TOLERANCE
        {
            return Err(ScoringError::InvalidWeight { sum });
        }

        Ok(Self {
            percents: fractions.map(|f| f * WEIGHT_TOTAL),
        })
    }

    pub fn percent(&self, bucket: RecencyBucket) -> f64 {
        self.percents[bucket.index()]
    }

    pub fn percents(&self) -> [f64; BUCKET_COUNT] {
        self.percents
    }
}

impl Default for BucketWeights {
    fn default() -> Self {
        Self {
            percents: [40.0, 30.0, 20.0, 10.0],
        }
    }
}

impl FromStr for BucketWeights {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("weights must be four integers like 40,30,20,10: {e}"))?;

        match parts.as_slice() {
            [w1, w2, w3, w4] => Self::new(*w1, *w2, *w3, *w4).map_err(|e| e.to_string()),
            _ => Err(format!("expected 4 weights, got {}", parts.len())),
        }
    }
}

impl fmt::Display for BucketWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w1, w2, w3, w4] = self.percents;
        write!(f, "{w1}/{w2}/{w3}/{w4}")
    }
}

/// Confidence level of the Wilson interval, strictly inside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(level: f64) -> Result<Self, ScoringError> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(ScoringError::InvalidConfidence(level))
        }
    }

    pub fn level(&self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.95)
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("confidence must be a number: {e}"))?;
        Self::new(level).map_err(|e| e.to_string())
    }
}

/// Recency bucket relative to the batch quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBucket {
    MostRecent, // days <= q1
    Recent,     // q1 < days <= q2
    Older,      // q2 < days <= q3
    Oldest,     // days > q3
}

impl RecencyBucket {
    pub const ALL: [RecencyBucket; BUCKET_COUNT] = [
        RecencyBucket::MostRecent,
        RecencyBucket::Recent,
        RecencyBucket::Older,
        RecencyBucket::Oldest,
    ];

    pub fn index(&self) -> usize {
        match self {
            RecencyBucket::MostRecent => 0,
            RecencyBucket::Recent => 1,
            RecencyBucket::Older => 2,
            RecencyBucket::Oldest => 3,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecencyBucket::MostRecent => "most_recent",
            RecencyBucket::Recent => "recent",
            RecencyBucket::Older => "older",
            RecencyBucket::Oldest => "oldest",
        }
    }
}

/// 25th/50th/75th percentiles of `days_since_review` over one batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuartileBoundaries {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl QuartileBoundaries {
    pub fn bucket_for(&self, days: DaysSince) -> RecencyBucket {
        let days = days as f64;
        if days <= self.q1 {
            RecencyBucket::MostRecent
        } else if days <= self.q2 {
            RecencyBucket::Recent
        } else if days <= self.q3 {
            RecencyBucket::Older
        } else {
            RecencyBucket::Oldest
        }
    }
}

/// Helpfulness metrics for one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub diff: i64,
    pub average: f64,
    pub wilson_lower_bound: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub bucket: RecencyBucket,
    pub count: usize,
    pub mean_rating: RatingValue,
    pub weight_percent: f64,
}

/// Everything the time-decayed aggregation computed for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWeightedSummary {
    pub review_count: usize,
    pub reference_date: NaiveDate,
    pub plain_mean: RatingValue,
    pub boundaries: QuartileBoundaries,
    pub buckets: Vec<BucketStats>,
    pub weighted_average: RatingValue,
}
