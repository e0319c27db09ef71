//! Z-score normalization of raw customer features

use crate::record::{CustomerRecord, Feature};
use ndarray::Array2;

/// Standard deviations below this are treated as zero variance.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Converts raw numeric feature columns into z-scores.
///
/// Normalization statistics are computed over the entire input batch using
/// the population standard deviation (divide by N). The normalizer is a pure
/// function of its input; a new run recomputes statistics from its own
/// snapshot and never shares them with another run.
#[derive(Debug, Clone)]
pub struct FeatureNormalizer {
    features: Vec<Feature>,
}

impl FeatureNormalizer {
    /// Create a normalizer over an ordered feature set.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// The ordered dimensions this normalizer emits.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Normalize a batch of records into a `(n_records, n_features)` matrix
    /// of z-scores, rows in input order.
    ///
    /// A dimension whose population standard deviation is zero (all values
    /// identical) normalizes to 0.0 for every record rather than producing
    /// NaN. An empty batch yields an empty matrix.
    pub fn normalize(&self, records: &[CustomerRecord]) -> Array2<f64> {
        let n = records.len();
        let d = self.features.len();
        let mut normalized = Array2::zeros((n, d));

        if n == 0 {
            return normalized;
        }

        for (col, feature) in self.features.iter().enumerate() {
            let mean = records.iter().map(|r| feature.extract(r)).sum::<f64>() / n as f64;
            let variance = records
                .iter()
                .map(|r| (feature.extract(r) - mean).powi(2))
                .sum::<f64>()
                / n as f64;
            let std_dev = variance.sqrt();

            if std_dev < VARIANCE_EPSILON {
                // Zero-variance dimension: every value sits on the mean.
                continue;
            }

            for (row, record) in records.iter().enumerate() {
                normalized[[row, col]] = (feature.extract(record) - mean) / std_dev;
            }
        }

        normalized
    }
}
