//! Per-cluster descriptive statistics and business labeling

use crate::error::{Error, Result};
use crate::record::CustomerRecord;
use crate::utils::cluster_members;
use ndarray::ArrayView1;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Descriptive statistics and business labels for one cluster.
///
/// Computed once from the raw (unnormalized) records after the engine's
/// final assignment; overwritten wholesale by a re-run, never updated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterMetadata {
    /// Cluster index this metadata describes
    pub cluster_id: usize,
    /// Number of assigned customers
    pub customer_count: usize,
    /// Mean age of members
    pub avg_age: f64,
    /// Youngest member age
    pub age_min: f64,
    /// Oldest member age
    pub age_max: f64,
    /// Mean income of members
    pub avg_income: f64,
    /// Mean purchase amount of members
    pub avg_purchase_amount: f64,
    /// Most frequent gender among members (first-encountered wins ties)
    pub dominant_gender: String,
    /// Most frequent region among members (first-encountered wins ties)
    pub dominant_region: String,
    /// Human-readable segment name
    pub cluster_name: String,
    /// Segment description with headline statistics
    pub description: String,
    /// Semicolon-delimited list of recommended actions
    pub business_recommendation: String,
}

/// Label tiers assigned top-to-bottom by composite income/purchase rank.
/// The wording is policy, the ranking that selects a row is contract.
const TIERS: [(&str, &str, &str); 4] = [
    (
        "Premium High-Value",
        "High income customers with strong purchase activity",
        "Offer exclusive premium products; Provide early access to new releases; Assign dedicated account management",
    ),
    (
        "Established Spenders",
        "Comfortable income with steady purchase behavior",
        "Promote mid-to-upper tier bundles; Enroll in the loyalty program; Cross-sell complementary products",
    ),
    (
        "Value Seekers",
        "Moderate income customers who buy selectively",
        "Highlight seasonal discounts; Use targeted email promotions; Reward repeat purchases",
    ),
    (
        "Budget Conscious",
        "Lower income customers with light purchase activity",
        "Lead with entry-level pricing; Offer installment options; Build engagement through low-cost offers",
    ),
];

/// Derives [`ClusterMetadata`] from a final assignment.
#[derive(Debug, Clone, Default)]
pub struct ClusterProfiler;

impl ClusterProfiler {
    /// Create a new profiler
    pub fn new() -> Self {
        Self
    }

    /// Profile every cluster of an assignment.
    ///
    /// Always returns exactly `n_clusters` entries in cluster-index order;
    /// a cluster that lost all members is reported with `customer_count = 0`
    /// and placeholder descriptive fields rather than omitted.
    pub fn profile(
        &self,
        records: &[CustomerRecord],
        assignments: ArrayView1<usize>,
        n_clusters: usize,
    ) -> Result<Vec<ClusterMetadata>> {
        if records.len() != assignments.len() {
            return Err(Error::computation_error(
                "Record count and assignment count do not match",
            ));
        }

        let members = cluster_members(assignments, n_clusters);
        let mut metadata: Vec<ClusterMetadata> = members
            .iter()
            .enumerate()
            .map(|(cluster_id, rows)| self.summarize(cluster_id, rows, records))
            .collect();

        self.apply_labels(&mut metadata);
        Ok(metadata)
    }

    /// Numeric and categorical summary of one cluster, labels filled later.
    fn summarize(
        &self,
        cluster_id: usize,
        rows: &[usize],
        records: &[CustomerRecord],
    ) -> ClusterMetadata {
        if rows.is_empty() {
            return ClusterMetadata {
                cluster_id,
                customer_count: 0,
                avg_age: 0.0,
                age_min: 0.0,
                age_max: 0.0,
                avg_income: 0.0,
                avg_purchase_amount: 0.0,
                dominant_gender: String::new(),
                dominant_region: String::new(),
                cluster_name: "Empty Segment".to_string(),
                description: "No customers assigned to this segment".to_string(),
                business_recommendation: String::new(),
            };
        }

        let n = rows.len() as f64;
        let mut age_min = f64::INFINITY;
        let mut age_max = f64::NEG_INFINITY;
        let mut age_sum = 0.0;
        let mut income_sum = 0.0;
        let mut purchase_sum = 0.0;

        for &row in rows {
            let record = &records[row];
            age_min = age_min.min(record.age);
            age_max = age_max.max(record.age);
            age_sum += record.age;
            income_sum += record.income;
            purchase_sum += record.purchase_amount;
        }

        ClusterMetadata {
            cluster_id,
            customer_count: rows.len(),
            avg_age: age_sum / n,
            age_min,
            age_max,
            avg_income: income_sum / n,
            avg_purchase_amount: purchase_sum / n,
            dominant_gender: dominant_value(rows, records, |r| &r.gender),
            dominant_region: dominant_value(rows, records, |r| &r.region),
            cluster_name: String::new(),
            description: String::new(),
            business_recommendation: String::new(),
        }
    }

    /// Assign tier names, descriptions, and recommendations by composite
    /// rank of mean income and mean purchase amount among non-empty
    /// clusters, top-to-bottom. Ties resolve by cluster index so reruns on
    /// unchanged data stay stable.
    fn apply_labels(&self, metadata: &mut [ClusterMetadata]) {
        let populated: Vec<usize> = metadata
            .iter()
            .filter(|m| m.customer_count > 0)
            .map(|m| m.cluster_id)
            .collect();
        let m = populated.len();
        if m == 0 {
            return;
        }

        let income_ranks = rank_descending(metadata, &populated, |c| c.avg_income);
        let purchase_ranks = rank_descending(metadata, &populated, |c| c.avg_purchase_amount);

        let mut ordered: Vec<(usize, usize)> = populated
            .iter()
            .map(|&id| (id, income_ranks[&id] + purchase_ranks[&id]))
            .collect();
        ordered.sort_by_key(|&(id, composite)| (composite, id));

        for (position, &(cluster_id, _)) in ordered.iter().enumerate() {
            let tier = (position * TIERS.len() / m).min(TIERS.len() - 1);
            let (name, blurb, recommendation) = TIERS[tier];
            let entry = &mut metadata[cluster_id];
            entry.cluster_name = name.to_string();
            entry.description = format!(
                "{} (avg income ${:.2}, avg purchase ${:.2}, {} customers)",
                blurb, entry.avg_income, entry.avg_purchase_amount, entry.customer_count
            );
            entry.business_recommendation = recommendation.to_string();
        }
    }
}

/// Most frequent categorical value among the member rows; ties go to the
/// value encountered first in input order.
fn dominant_value<'a, F>(rows: &[usize], records: &'a [CustomerRecord], field: F) -> String
where
    F: Fn(&'a CustomerRecord) -> &'a str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (order, &row) in rows.iter().enumerate() {
        let value = field(&records[row]);
        *counts.entry(value).or_insert(0) += 1;
        first_seen.entry(value).or_insert(order);
    }

    let mut dominant: Option<&str> = None;
    let mut best = (0usize, usize::MAX); // (count, first-encountered order)
    for (&value, &count) in counts.iter() {
        let order = first_seen[value];
        if count > best.0 || (count == best.0 && order < best.1) {
            dominant = Some(value);
            best = (count, order);
        }
    }

    dominant.map(str::to_string).unwrap_or_default()
}

/// Rank cluster ids by a statistic, 0 = highest; ties keep cluster order.
fn rank_descending<F>(
    metadata: &[ClusterMetadata],
    ids: &[usize],
    stat: F,
) -> HashMap<usize, usize>
where
    F: Fn(&ClusterMetadata) -> f64,
{
    let mut sorted: Vec<usize> = ids.to_vec();
    sorted.sort_by(|&a, &b| {
        stat(&metadata[b])
            .partial_cmp(&stat(&metadata[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(rank, id)| (id, rank))
        .collect()
}
