pub mod batch;
pub mod normal;
pub mod quantile;
pub mod types;
pub mod weighting;
pub mod wilson;

pub use batch::{RankedBatch, rank};
pub use types::{BucketWeights, Confidence, QuartileBoundaries, RecencyBucket, ScoreBundle};
pub use weighting::compute_weighted_average;
pub use wilson::{score, wilson_lower_bound};
