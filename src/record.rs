//! Customer records and the named numeric feature dimensions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One customer row as loaded from the storage collaborator.
///
/// Read-only to the clustering engine; `customer_id` is the immutable
/// identity used to hand assignments back to the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomerRecord {
    /// Unique customer identity
    pub customer_id: u64,
    /// Age in years
    pub age: f64,
    /// Annual income
    pub income: f64,
    /// Average purchase amount
    pub purchase_amount: f64,
    /// Purchases per period, if tracked
    pub purchase_frequency: Option<f64>,
    /// Months since first purchase, if tracked
    pub customer_lifespan_months: Option<f64>,
    /// Gender attribute (categorical, not clustered on)
    pub gender: String,
    /// Region attribute (categorical, not clustered on)
    pub region: String,
}

/// Numeric feature dimensions a clustering run can operate on.
///
/// The ordered feature set fixes both the normalization columns and the
/// coordinate order for distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Feature {
    /// Customer age
    Age,
    /// Annual income
    Income,
    /// Average purchase amount
    PurchaseAmount,
    /// Purchases per period
    PurchaseFrequency,
    /// Customer lifespan in months
    LifespanMonths,
}

impl Feature {
    /// The default clustering dimensions: age, income, purchase amount.
    pub fn default_set() -> Vec<Feature> {
        vec![Feature::Age, Feature::Income, Feature::PurchaseAmount]
    }

    /// Extract this feature's raw value from a record.
    ///
    /// Optional features that were never tracked for a customer read as 0.0
    /// so every record yields a complete coordinate vector.
    pub fn extract(&self, record: &CustomerRecord) -> f64 {
        match self {
            Feature::Age => record.age,
            Feature::Income => record.income,
            Feature::PurchaseAmount => record.purchase_amount,
            Feature::PurchaseFrequency => record.purchase_frequency.unwrap_or(0.0),
            Feature::LifespanMonths => record.customer_lifespan_months.unwrap_or(0.0),
        }
    }
}

impl CustomerRecord {
    /// Build a record with only the always-present fields populated.
    pub fn new(
        customer_id: u64,
        age: f64,
        income: f64,
        purchase_amount: f64,
        gender: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            age,
            income,
            purchase_amount,
            purchase_frequency: None,
            customer_lifespan_months: None,
            gender: gender.into(),
            region: region.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_extract() {
        let record = CustomerRecord::new(1, 34.0, 52000.0, 480.0, "F", "North");
        assert_eq!(Feature::Age.extract(&record), 34.0);
        assert_eq!(Feature::Income.extract(&record), 52000.0);
        assert_eq!(Feature::PurchaseAmount.extract(&record), 480.0);
    }

    #[test]
    fn test_optional_features_default_to_zero() {
        let record = CustomerRecord::new(2, 28.0, 31000.0, 120.0, "M", "South");
        assert_eq!(Feature::PurchaseFrequency.extract(&record), 0.0);
        assert_eq!(Feature::LifespanMonths.extract(&record), 0.0);

        let mut tracked = record.clone();
        tracked.purchase_frequency = Some(4.0);
        tracked.customer_lifespan_months = Some(18.0);
        assert_eq!(Feature::PurchaseFrequency.extract(&tracked), 4.0);
        assert_eq!(Feature::LifespanMonths.extract(&tracked), 18.0);
    }

    #[test]
    fn test_default_feature_set_order() {
        assert_eq!(
            Feature::default_set(),
            vec![Feature::Age, Feature::Income, Feature::PurchaseAmount]
        );
    }
}
