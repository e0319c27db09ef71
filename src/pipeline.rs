//! End-to-end segmentation run: configure, cluster, profile, persist

use crate::catalog::{CustomerAssignment, SegmentationCatalog};
use crate::error::{Error, Result};
use crate::kmeans::{KMeans, RunOutcome};
use crate::profile::{ClusterMetadata, ClusterProfiler};
use crate::record::{CustomerRecord, Feature};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caller-supplied configuration for one segmentation run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentationConfig {
    /// Clustering algorithm selector; only "k-means" is supported
    pub algorithm: String,
    /// Requested cluster count
    pub n_clusters: usize,
    /// Iteration cap
    pub max_iter: usize,
    /// Convergence threshold on centroid movement
    pub tol: f64,
    /// Seed for centroid initialization
    pub seed: u64,
    /// Ordered feature dimensions to cluster on
    pub features: Vec<Feature>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            algorithm: "k-means".to_string(),
            n_clusters: 5,
            max_iter: 100,
            tol: 1e-4,
            seed: 0,
            features: Feature::default_set(),
        }
    }
}

impl SegmentationConfig {
    /// Reject any algorithm selector other than the supported k-means
    /// variant, before any data is touched.
    pub fn validate_algorithm(&self) -> Result<()> {
        match self.algorithm.trim().to_ascii_lowercase().as_str() {
            "k-means" | "kmeans" => Ok(()),
            _ => Err(Error::unsupported_algorithm(&self.algorithm)),
        }
    }
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct SegmentationRun {
    /// Per-customer cluster labels
    pub assignments: Vec<CustomerAssignment>,
    /// Per-cluster metadata, exactly `n_clusters` entries (empty for a
    /// no-op run over empty input)
    pub metadata: Vec<ClusterMetadata>,
    /// Terminal state of the engine
    pub outcome: RunOutcome,
    /// Iterations performed
    pub n_iter: usize,
}

/// Run a full segmentation: validate configuration, cluster the records,
/// profile the final partition, and replace both catalog collections.
///
/// The catalog write is a full overwrite of labels then metadata, which also
/// recovers from a partial write left by a previously interrupted run.
pub fn run_segmentation<C: SegmentationCatalog>(
    records: &[CustomerRecord],
    config: &SegmentationConfig,
    catalog: &mut C,
) -> Result<SegmentationRun> {
    config.validate_algorithm()?;

    let engine = KMeans::new(config.n_clusters)
        .max_iter(config.max_iter)
        .tolerance(config.tol)
        .random_state(config.seed)
        .features(config.features.clone());

    let result = engine.fit(records)?;

    let metadata = if result.outcome == RunOutcome::EmptyInput {
        Vec::new()
    } else {
        ClusterProfiler::new().profile(records, result.assignments.view(), config.n_clusters)?
    };

    let assignments: Vec<CustomerAssignment> = records
        .iter()
        .zip(result.assignments.iter())
        .map(|(record, &cluster_label)| CustomerAssignment {
            customer_id: record.customer_id,
            cluster_label,
        })
        .collect();

    catalog.replace_assignments(&assignments)?;
    catalog.replace_cluster_metadata(&metadata)?;

    Ok(SegmentationRun {
        assignments,
        metadata,
        outcome: result.outcome,
        n_iter: result.n_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    #[test]
    fn test_unsupported_algorithm_rejected_before_data_load() {
        let config = SegmentationConfig {
            algorithm: "dbscan".to_string(),
            ..Default::default()
        };
        let mut catalog = InMemoryCatalog::new();

        let err = run_segmentation(&[], &config, &mut catalog).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm { .. }));
    }

    #[test]
    fn test_algorithm_selector_accepts_spelling_variants() {
        for name in ["k-means", "kmeans", "K-Means", " KMEANS "] {
            let config = SegmentationConfig {
                algorithm: name.to_string(),
                ..Default::default()
            };
            assert!(config.validate_algorithm().is_ok(), "rejected {:?}", name);
        }
    }

    #[test]
    fn test_empty_input_runs_as_noop() {
        let config = SegmentationConfig::default();
        let mut catalog = InMemoryCatalog::new();

        let run = run_segmentation(&[], &config, &mut catalog).unwrap();
        assert_eq!(run.outcome, RunOutcome::EmptyInput);
        assert_eq!(run.n_iter, 0);
        assert!(run.assignments.is_empty());
        assert!(run.metadata.is_empty());
        assert!(catalog.is_consistent());
    }
}
