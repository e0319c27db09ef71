//! Assignment and partition helpers shared by the engine and profiler

use crate::distance::Distance;
use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Distances this close to the minimum count as a tie.
const TIE_TOLERANCE: f64 = 1e-9;

/// Find the nearest centroid for a point.
///
/// Equidistant centroids (within floating tolerance) resolve to the lowest
/// cluster index so repeated runs over identical inputs stay reproducible.
pub fn nearest_centroid<D: Distance>(
    point: ArrayView1<f64>,
    centroids: ArrayView2<f64>,
    metric: &D,
) -> Result<usize> {
    if centroids.nrows() == 0 {
        return Err(Error::computation_error("No centroids provided"));
    }

    let distances = metric.distances_to_centroids(point, centroids)?;
    let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);

    distances
        .iter()
        .position(|&d| d <= min + TIE_TOLERANCE)
        .ok_or_else(|| Error::computation_error("No nearest centroid found"))
}

/// Assign every point to its nearest centroid, rows in input order.
pub fn assign_to_centroids<D: Distance>(
    points: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
    metric: &D,
) -> Result<Array1<usize>> {
    let mut assignments = Array1::zeros(points.nrows());

    for (i, point) in points.rows().into_iter().enumerate() {
        assignments[i] = nearest_centroid(point, centroids, metric)?;
    }

    Ok(assignments)
}

/// Check whether two assignment vectors are identical
pub fn assignments_equal(a: ArrayView1<usize>, b: ArrayView1<usize>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| x == y)
}

/// Row indices of the members of each cluster, indexed by cluster id
pub fn cluster_members(assignments: ArrayView1<usize>, k: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); k];

    for (row, &cluster_id) in assignments.iter().enumerate() {
        if cluster_id < k {
            members[cluster_id].push(row);
        }
    }

    members
}

/// Number of members per cluster
pub fn cluster_sizes(assignments: ArrayView1<usize>, k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];

    for &cluster_id in assignments.iter() {
        if cluster_id < k {
            sizes[cluster_id] += 1;
        }
    }

    sizes
}
