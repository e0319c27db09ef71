//! K-means clustering engine (Lloyd's algorithm)

use crate::distance::{Distance, EuclideanDistance};
use crate::error::{Error, Result};
use crate::normalize::FeatureNormalizer;
use crate::record::{CustomerRecord, Feature};
use crate::utils::{assign_to_centroids, cluster_members};
use ndarray::{Array1, Array2, ArrayView2};
use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Terminal state of a clustering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunOutcome {
    /// Every centroid moved less than the convergence threshold
    Converged,
    /// The iteration cap was reached before convergence; the last-computed
    /// assignment is still valid
    MaxIterationsReached,
    /// The input batch was empty, nothing to cluster
    EmptyInput,
}

/// Result of a k-means run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeansResult {
    /// Cluster index per input record, in input order.
    ///
    /// Recomputed from the final centroids, so assigning once more against
    /// [`KMeansResult::centroids`] reproduces it exactly.
    pub assignments: Array1<usize>,
    /// Final centroids in normalized feature space, one row per cluster
    pub centroids: Array2<f64>,
    /// Number of Assign/Update iterations performed
    pub n_iter: usize,
    /// How the run terminated
    pub outcome: RunOutcome,
}

/// K-means clustering over customer records.
///
/// Owns the full run: z-score normalization of the input snapshot, seeded
/// centroid initialization, and the Assign/Update cycle until convergence or
/// the iteration cap. Runs are single-threaded and deterministic given a
/// seed; independent runs never share normalization statistics or centroid
/// state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeans {
    /// Number of clusters
    pub n_clusters: usize,
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Convergence threshold on centroid movement
    pub tol: f64,
    /// Random seed for centroid initialization
    pub random_state: Option<u64>,
    /// Ordered feature dimensions to cluster on
    pub features: Vec<Feature>,
    /// Enable verbose output
    pub verbose: bool,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_clusters: 5,
            max_iter: 100,
            tol: 1e-4,
            random_state: None,
            features: Feature::default_set(),
            verbose: false,
        }
    }
}

impl KMeans {
    /// Create a new k-means engine with the requested number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold on centroid movement
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed for reproducible initialization
    pub fn random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Set the ordered feature dimensions to cluster on
    pub fn features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run Lloyd's algorithm over a batch of customer records.
    ///
    /// An empty batch is not an error: the run reports
    /// [`RunOutcome::EmptyInput`] with zero iterations and empty output so
    /// callers can tell "nothing to do" apart from failure.
    pub fn fit(&self, records: &[CustomerRecord]) -> Result<KMeansResult> {
        self.validate_parameters()?;

        if records.is_empty() {
            return Ok(KMeansResult {
                assignments: Array1::zeros(0),
                centroids: Array2::zeros((0, self.features.len())),
                n_iter: 0,
                outcome: RunOutcome::EmptyInput,
            });
        }

        let normalizer = FeatureNormalizer::new(self.features.clone());
        let data = normalizer.normalize(records);

        self.validate_distinct_records(&data)?;

        let metric = EuclideanDistance;
        let mut rng = StdRng::seed_from_u64(self.random_state.unwrap_or(0));
        let mut centroids = self.initialize_centroids(data.view(), &mut rng)?;

        let mut n_iter = 0;
        let mut outcome = RunOutcome::MaxIterationsReached;

        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            let labels = assign_to_centroids(data.view(), centroids.view(), &metric)?;
            let new_centroids = self.update_centroids(data.view(), &labels, &centroids)?;

            let max_shift = self.max_centroid_shift(&centroids, &new_centroids, &metric)?;
            centroids = new_centroids;

            if max_shift < self.tol {
                outcome = RunOutcome::Converged;
                if self.verbose {
                    println!("K-means converged after {} iterations", n_iter);
                }
                break;
            }

            if self.verbose && n_iter % 10 == 0 {
                println!("K-means iteration {}", n_iter);
            }
        }

        // Assignment is derived from the final centroids so a converged run
        // is an exact fixed point of one more Assign step.
        let assignments = assign_to_centroids(data.view(), centroids.view(), &metric)?;

        Ok(KMeansResult {
            assignments,
            centroids,
            n_iter,
            outcome,
        })
    }

    /// Seeded initialization: pick `n_clusters` distinct normalized records.
    fn initialize_centroids<R: Rng>(
        &self,
        data: ArrayView2<f64>,
        rng: &mut R,
    ) -> Result<Array2<f64>> {
        let unique_rows = distinct_row_indices(data);

        // validate_distinct_records guarantees unique_rows.len() >= n_clusters
        let mut chosen: Vec<usize> = Vec::with_capacity(self.n_clusters);
        while chosen.len() < self.n_clusters {
            let idx = rng.gen_range(0..unique_rows.len());
            if !chosen.contains(&idx) {
                chosen.push(idx);
            }
        }

        let mut centroids = Array2::zeros((self.n_clusters, data.ncols()));
        for (cluster_id, &pick) in chosen.iter().enumerate() {
            let row = unique_rows[pick];
            for col in 0..data.ncols() {
                centroids[[cluster_id, col]] = data[[row, col]];
            }
        }

        Ok(centroids)
    }

    /// New centroid = mean of assigned members; a cluster with no members
    /// keeps its previous centroid rather than collapsing to the origin.
    fn update_centroids(
        &self,
        data: ArrayView2<f64>,
        labels: &Array1<usize>,
        previous: &Array2<f64>,
    ) -> Result<Array2<f64>> {
        if previous.dim() != (self.n_clusters, data.ncols()) {
            return Err(Error::computation_error("Centroid dimension mismatch"));
        }

        let members = cluster_members(labels.view(), self.n_clusters);
        let mut new_centroids = Array2::zeros((self.n_clusters, data.ncols()));

        for (cluster_id, rows) in members.iter().enumerate() {
            if rows.is_empty() {
                for col in 0..data.ncols() {
                    new_centroids[[cluster_id, col]] = previous[[cluster_id, col]];
                }
                continue;
            }

            for col in 0..data.ncols() {
                let sum: f64 = rows.iter().map(|&row| data[[row, col]]).sum();
                new_centroids[[cluster_id, col]] = sum / rows.len() as f64;
            }
        }

        Ok(new_centroids)
    }

    /// Largest per-centroid movement between two iterations
    fn max_centroid_shift<D: Distance>(
        &self,
        old: &Array2<f64>,
        new: &Array2<f64>,
        metric: &D,
    ) -> Result<f64> {
        if old.dim() != new.dim() {
            return Err(Error::computation_error("Centroid dimension mismatch"));
        }

        let mut max_shift = 0.0f64;
        for (old_row, new_row) in old.rows().into_iter().zip(new.rows()) {
            let shift = metric.distance(old_row, new_row)?;
            max_shift = max_shift.max(shift);
        }

        Ok(max_shift)
    }

    /// Validate builder parameters before any computation starts
    fn validate_parameters(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(Error::invalid_configuration("max_iter must be > 0"));
        }
        if self.tol < 0.0 {
            return Err(Error::invalid_configuration("tolerance must be >= 0"));
        }
        if self.features.is_empty() {
            return Err(Error::invalid_configuration(
                "at least one feature dimension is required",
            ));
        }
        if self.n_clusters < 2 {
            return Err(Error::invalid_configuration(format!(
                "n_clusters must be at least 2, got {}",
                self.n_clusters
            )));
        }

        Ok(())
    }

    /// Validate `k` against the distinct-record count of the batch
    fn validate_distinct_records(&self, data: &Array2<f64>) -> Result<()> {
        let distinct = distinct_row_indices(data.view()).len();
        if self.n_clusters > distinct {
            return Err(Error::invalid_configuration(format!(
                "n_clusters = {} exceeds the {} distinct records in the input",
                self.n_clusters, distinct
            )));
        }

        Ok(())
    }
}

/// First-occurrence row indices of the distinct rows of a matrix.
///
/// Distinctness is exact (bit-level) equality, which is what the seeded
/// initialization needs to guarantee `k` genuinely different starting points.
fn distinct_row_indices(data: ArrayView2<f64>) -> Vec<usize> {
    use std::collections::HashSet;

    let mut seen: HashSet<Vec<u64>> = HashSet::new();
    let mut indices = Vec::new();

    for (row, values) in data.rows().into_iter().enumerate() {
        let key: Vec<u64> = values.iter().map(|v| v.to_bits()).collect();
        if seen.insert(key) {
            indices.push(row);
        }
    }

    indices
}
