use super::normal::two_sided_z;
use super::types::{Confidence, ScoreBundle};

/// Helpful minus unhelpful votes. May be negative.
pub fn score_up_down_diff(up: u64, down: u64) -> i64 {
    up as i64 - down as i64
}

/// Share of helpful votes, 0 when nobody voted.
pub fn score_average_rating(up: u64, down: u64) -> f64 {
    let n = up + down;
    if n == 0 {
        return 0.0;
    }
    up as f64 / n as f64
}

/// Lower bound of the Wilson score interval for the helpful proportion.
///
/// Small samples are pulled towards 0.5 and then bounded from below, so a
/// review with 7 of 7 helpful votes ranks under one with 1952 of 2020.
/// Returns 0 when there are no helpful votes, including no votes at all.
pub fn wilson_lower_bound(up: u64, down: u64, confidence: Confidence) -> f64 {
    // The closed form cancels to a tiny negative instead of 0 for these
    if up == 0 {
        return 0.0;
    }

    let n = up + down;

    let z = two_sided_z(confidence);
    let n = n as f64;
    let phat = up as f64 / n;
    let z2 = z * z;

    let centre = phat + z2 / (2.0 * n);
    let margin = z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt();

    ((centre - margin) / (1.0 + z2 / n)).clamp(0.0, 1.0)
}

pub fn score(up: u64, down: u64, confidence: Confidence) -> ScoreBundle {
    ScoreBundle {
        diff: score_up_down_diff(up, down),
        average: score_average_rating(up, down),
        wilson_lower_bound: wilson_lower_bound(up, down, confidence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    fn level(c: f64) -> Confidence {
        Confidence::new(c).unwrap()
    }

    #[test]
    fn test_top_review_from_dataset() {
        let bundle = score(1952, 68, Confidence::default());

        assert_eq!(bundle.diff, 1884);
        assert!((bundle.average - 0.96634).abs() < TOLERANCE);
        assert!((bundle.wilson_lower_bound - 0.95754).abs() < TOLERANCE);
    }

    #[test]
    fn test_perfect_ratio_with_few_votes() {
        let bundle = score(7, 0, level(0.95));

        assert_eq!(bundle.average, 1.0);
        assert!((bundle.wilson_lower_bound - 0.64567).abs() < TOLERANCE);
    }

    #[test]
    fn test_no_votes_scores_zero() {
        let bundle = score(0, 0, Confidence::default());

        assert_eq!(bundle.diff, 0);
        assert_eq!(bundle.average, 0.0);
        assert_eq!(bundle.wilson_lower_bound, 0.0);
    }

    #[test]
    fn test_diff_can_be_negative() {
        assert_eq!(score_up_down_diff(2, 3), -1);
        let bound = wilson_lower_bound(2, 3, Confidence::default());
        assert!((bound - 0.117_620_774).abs() < 1e-6);
    }

    #[test]
    fn test_bound_never_exceeds_point_estimate() {
        for up in 0..40u64 {
            for down in 0..40u64 {
                if up + down == 0 {
                    continue;
                }
                let bundle = score(up, down, Confidence::default());
                assert!(
                    bundle.wilson_lower_bound >= 0.0,
                    "negative bound for {up}/{down}"
                );
                assert!(
                    bundle.wilson_lower_bound <= bundle.average + 1e-12,
                    "bound above average for {up}/{down}"
                );
                assert!(bundle.average <= 1.0);
            }
        }
    }

    #[test]
    fn test_no_helpful_votes_ties_with_no_votes() {
        for down in 0..5000u64 {
            assert_eq!(
                wilson_lower_bound(0, down, Confidence::default()),
                0.0,
                "nonzero bound for 0/{down}"
            );
        }
    }

    #[test]
    fn test_bound_stays_in_unit_interval_for_large_counts() {
        for up in [1u64, 2, 7, 61, 1952] {
            for down in (0..200_000u64).step_by(997) {
                let bound = wilson_lower_bound(up, down, level(0.999));
                assert!((0.0..=1.0).contains(&bound), "{bound} for {up}/{down}");
                assert!(bound <= score_average_rating(up, down) + 1e-12);
            }
        }
    }

    #[test]
    fn test_extreme_confidence_keeps_bound_finite() {
        let bound = wilson_lower_bound(5, 5, level(0.999_999_999_999_999_9));

        assert!(bound.is_finite());
        assert!(bound > 0.0 && bound < 0.5, "bound = {bound}");
    }

    #[test]
    fn test_monotonic_in_helpful_votes() {
        for down in [0u64, 1, 5, 68, 400] {
            let mut previous = 0.0;
            for up in 0..300u64 {
                let current = wilson_lower_bound(up, down, Confidence::default());
                assert!(current >= previous, "dropped at up={up}, down={down}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_more_evidence_raises_bound_at_fixed_ratio() {
        let small = wilson_lower_bound(6, 4, Confidence::default());
        let medium = wilson_lower_bound(60, 40, Confidence::default());
        let large = wilson_lower_bound(600, 400, Confidence::default());

        assert!(small < medium && medium < large);
        assert!((large - 0.569_309_43).abs() < 1e-6);
    }

    #[test]
    fn test_higher_confidence_is_more_conservative() {
        let at_80 = wilson_lower_bound(7, 0, level(0.80));
        let at_95 = wilson_lower_bound(7, 0, level(0.95));
        let at_99 = wilson_lower_bound(7, 0, level(0.99));

        assert!(at_99 < at_95 && at_95 < at_80);
        assert!((at_99 - 0.513_388_565).abs() < 1e-6);
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let first = score(422, 73, Confidence::default());
        let second = score(422, 73, Confidence::default());

        assert_eq!(
            first.wilson_lower_bound.to_bits(),
            second.wilson_lower_bound.to_bits()
        );
    }
}
