use crate::rating::types::{BucketWeights, Confidence};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringSettings {
    /// Recency bucket weights, most recent first (default 40/30/20/10)
    pub weights: BucketWeights,
    /// Wilson interval confidence (default 0.95)
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    pub top: usize,
    pub precision: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            top: 20,
            precision: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub display: DisplaySettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: Option<BucketWeights>) -> Self {
        if let Some(weights) = weights {
            self.scoring.weights = weights;
        }
        self
    }

    pub fn with_confidence(mut self, confidence: Option<Confidence>) -> Self {
        if let Some(confidence) = confidence {
            self.scoring.confidence = confidence;
        }
        self
    }

    pub fn with_top(mut self, top: Option<usize>) -> Self {
        if let Some(top) = top {
            self.display.top = top;
        }
        self
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        if let Some(precision) = precision {
            self.display.precision = precision;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();

        assert_eq!(config.scoring.weights.percents(), [40.0, 30.0, 20.0, 10.0]);
        assert_eq!(config.scoring.confidence.level(), 0.95);
        assert_eq!(config.display.top, 20);
        assert_eq!(config.display.precision, 5);
    }

    #[test]
    fn test_overrides_only_apply_when_given() {
        let config = AppConfig::new()
            .with_confidence(Some(Confidence::new(0.99).unwrap()))
            .with_weights(None)
            .with_top(Some(5));

        assert_eq!(config.scoring.confidence.level(), 0.99);
        assert_eq!(config.scoring.weights, BucketWeights::default());
        assert_eq!(config.display.top, 5);
    }
}
