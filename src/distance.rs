//! Distance metrics over normalized feature space

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};

/// Trait for computing distances between points in normalized feature space
pub trait Distance {
    /// Compute the distance between two feature vectors
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64>;

    /// Compute distances between a single point and every centroid row
    fn distances_to_centroids(
        &self,
        point: ArrayView1<f64>,
        centroids: ArrayView2<f64>,
    ) -> Result<Vec<f64>>;
}

/// Euclidean distance over the fixed, ordered dimension set
#[derive(Debug, Clone)]
pub struct EuclideanDistance;

impl Distance for EuclideanDistance {
    fn distance(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::computation_error(
                "Vectors must have the same length",
            ));
        }

        let sum_sq_diff = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>();

        Ok(sum_sq_diff.sqrt())
    }

    fn distances_to_centroids(
        &self,
        point: ArrayView1<f64>,
        centroids: ArrayView2<f64>,
    ) -> Result<Vec<f64>> {
        if centroids.ncols() != point.len() {
            return Err(Error::computation_error(
                "Point and centroids must have the same number of features",
            ));
        }

        let mut distances = Vec::with_capacity(centroids.nrows());
        for centroid_row in centroids.rows() {
            distances.push(self.distance(point, centroid_row)?);
        }
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_four_five_triangle() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[0.0, 0.0, 0.0]);
        let b = ndarray::arr1(&[3.0, 4.0, 0.0]);

        let result = metric.distance(a.view(), b.view()).unwrap();
        assert_eq!(result, 5.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[25.0, 50000.0, 100.0]);
        assert_eq!(metric.distance(a.view(), a.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_single_axis_distances() {
        let metric = EuclideanDistance;
        let origin = ndarray::arr1(&[0.0, 0.0, 0.0]);

        for axis in 0..3 {
            let mut point = vec![0.0; 3];
            point[axis] = 1.0;
            let p = ndarray::Array1::from_vec(point);
            let dist = metric.distance(origin.view(), p.view()).unwrap();
            assert!((dist - 1.0).abs() < 1e-10, "axis {} distance {}", axis, dist);
        }
    }

    #[test]
    fn test_negative_coordinates() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[-5.0, 0.0, 0.0]);
        let b = ndarray::arr1(&[5.0, 0.0, 0.0]);
        assert!((metric.distance(a.view(), b.view()).unwrap() - 10.0).abs() < 1e-10);

        let c = ndarray::arr1(&[-10.0, -20.0, -30.0]);
        let d = ndarray::arr1(&[-13.0, -24.0, -30.0]);
        assert!((metric.distance(c.view(), d.view()).unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_decimal_values() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[1.5, 2.5, 3.5]);
        let b = ndarray::arr1(&[4.5, 5.5, 6.5]);
        let result = metric.distance(a.view(), b.view()).unwrap();
        assert!((result - 5.196152).abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[10.0, 100.0, 50.0]);
        let b = ndarray::arr1(&[20.0, 200.0, 100.0]);

        let ab = metric.distance(a.view(), b.view()).unwrap();
        let ba = metric.distance(b.view(), a.view()).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_triangle_inequality() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[0.0, 0.0, 0.0]);
        let b = ndarray::arr1(&[3.0, 4.0, 0.0]);
        let c = ndarray::arr1(&[6.0, 8.0, 0.0]);

        let ab = metric.distance(a.view(), b.view()).unwrap();
        let bc = metric.distance(b.view(), c.view()).unwrap();
        let ac = metric.distance(a.view(), c.view()).unwrap();
        assert!(ac <= ab + bc + 1e-4);
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let metric = EuclideanDistance;
        let a = ndarray::arr1(&[1.0, 2.0]);
        let b = ndarray::arr1(&[1.0, 2.0, 3.0]);
        assert!(metric.distance(a.view(), b.view()).is_err());
    }

    #[test]
    fn test_distances_to_centroids() {
        let metric = EuclideanDistance;
        let point = ndarray::arr1(&[0.0, 0.0]);
        let centroids =
            ndarray::Array2::from_shape_vec((2, 2), vec![3.0, 4.0, 0.0, 1.0]).unwrap();

        let distances = metric
            .distances_to_centroids(point.view(), centroids.view())
            .unwrap();
        assert_eq!(distances.len(), 2);
        assert!((distances[0] - 5.0).abs() < 1e-10);
        assert!((distances[1] - 1.0).abs() < 1e-10);
    }
}
