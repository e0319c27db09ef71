//! Segmentation catalog boundary for persisting run outputs

use crate::error::Result;
use crate::profile::ClusterMetadata;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One per-customer label produced by a segmentation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomerAssignment {
    /// Customer identity
    pub customer_id: u64,
    /// Cluster index the customer was assigned to
    pub cluster_label: usize,
}

/// Storage collaborator that persists segmentation output.
///
/// A run performs one batched write per collection and fully replaces any
/// previous content. The two writes are not transactional: a crash between
/// them leaves labels without metadata (or the reverse), which
/// [`SegmentationCatalog::is_consistent`] surfaces so the next run can
/// recover by overwriting both collections.
pub trait SegmentationCatalog {
    /// Replace all stored per-customer labels
    fn replace_assignments(&mut self, assignments: &[CustomerAssignment]) -> Result<()>;

    /// Replace all stored per-cluster metadata
    fn replace_cluster_metadata(&mut self, metadata: &[ClusterMetadata]) -> Result<()>;

    /// Whether the stored labels and metadata describe the same run.
    ///
    /// False indicates a partial write from an interrupted run; the content
    /// is stale but recoverable, not lost.
    fn is_consistent(&self) -> bool;
}

/// In-memory catalog for tests and embedding without a storage backend
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    assignments: Vec<CustomerAssignment>,
    metadata: Vec<ClusterMetadata>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored per-customer labels
    pub fn assignments(&self) -> &[CustomerAssignment] {
        &self.assignments
    }

    /// Stored per-cluster metadata
    pub fn cluster_metadata(&self) -> &[ClusterMetadata] {
        &self.metadata
    }

    /// Look up the cluster label for one customer
    pub fn label_for(&self, customer_id: u64) -> Option<usize> {
        self.assignments
            .iter()
            .find(|a| a.customer_id == customer_id)
            .map(|a| a.cluster_label)
    }
}

impl SegmentationCatalog for InMemoryCatalog {
    fn replace_assignments(&mut self, assignments: &[CustomerAssignment]) -> Result<()> {
        self.assignments = assignments.to_vec();
        Ok(())
    }

    fn replace_cluster_metadata(&mut self, metadata: &[ClusterMetadata]) -> Result<()> {
        self.metadata = metadata.to_vec();
        Ok(())
    }

    fn is_consistent(&self) -> bool {
        self.assignments.iter().all(|a| {
            self.metadata
                .iter()
                .any(|m| m.cluster_id == a.cluster_label)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_for(cluster_id: usize) -> ClusterMetadata {
        ClusterMetadata {
            cluster_id,
            customer_count: 1,
            avg_age: 30.0,
            age_min: 30.0,
            age_max: 30.0,
            avg_income: 1000.0,
            avg_purchase_amount: 50.0,
            dominant_gender: "F".to_string(),
            dominant_region: "North".to_string(),
            cluster_name: "Value Seekers".to_string(),
            description: "test".to_string(),
            business_recommendation: "a; b".to_string(),
        }
    }

    #[test]
    fn test_replace_overwrites_previous_content() {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .replace_assignments(&[CustomerAssignment {
                customer_id: 1,
                cluster_label: 0,
            }])
            .unwrap();
        catalog
            .replace_assignments(&[CustomerAssignment {
                customer_id: 2,
                cluster_label: 1,
            }])
            .unwrap();

        assert_eq!(catalog.assignments().len(), 1);
        assert_eq!(catalog.label_for(2), Some(1));
        assert_eq!(catalog.label_for(1), None);
    }

    #[test]
    fn test_partial_write_is_detectable() {
        let mut catalog = InMemoryCatalog::new();
        assert!(catalog.is_consistent());

        // Labels landed but the metadata write never happened.
        catalog
            .replace_assignments(&[CustomerAssignment {
                customer_id: 7,
                cluster_label: 2,
            }])
            .unwrap();
        assert!(!catalog.is_consistent());

        catalog.replace_cluster_metadata(&[metadata_for(2)]).unwrap();
        assert!(catalog.is_consistent());
    }
}
