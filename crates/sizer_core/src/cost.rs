//! Cost breakdown across the recommended platforms.

use serde::{Deserialize, Serialize};

use crate::models::{IngestionType, PricingModel};
use crate::sizing::PlatformRecommendation;

/// Storage price per GB-month, independent of platform pricing.
pub const STORAGE_PRICE_PER_GB_MONTH: f64 = 0.023;

const COMPUTE_SHARE: f64 = 0.5;
const LICENSING_SHARE: f64 = 0.15;
const INGESTION_SHARE: f64 = 0.1;
const EGRESS_SHARE: f64 = 0.05;

/// Cost component category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Compute,
    Storage,
    Licensing,
    Ingestion,
    Egress,
}

impl CostCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Compute => "Compute",
            CostCategory::Storage => "Storage",
            CostCategory::Licensing => "Licensing",
            CostCategory::Ingestion => "Ingestion",
            CostCategory::Egress => "Egress",
        }
    }
}

/// One component's value and its share of the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostComponent {
    pub label: String,
    pub value: f64,
    /// Share of the recomputed total, 0-100
    pub percentage: f64,
    pub category: CostCategory,
}

/// Monthly cost split into components.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub compute: f64,
    pub storage: f64,
    pub licensing: f64,
    pub ingestion: f64,
    pub egress: f64,
    pub total: f64,
    pub components: Vec<CostComponent>,
    pub monthly_total: f64,
    pub yearly_total: f64,
    /// Average monthly saving from reserved capacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_discount: Option<f64>,
    /// Average monthly saving from spot capacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_savings: Option<f64>,
}

impl CostBreakdown {
    pub fn component(&self, category: CostCategory) -> Option<&CostComponent> {
        self.components.iter().find(|c| c.category == category)
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Aggregate platform prices into a cost breakdown.
///
/// Compute, licensing, ingestion and egress are fixed shares of the average
/// platform price; storage is priced per GB-month on its own, so component
/// percentages are recomputed against the resulting total.
pub fn aggregate_costs(
    recommendations: &[&PlatformRecommendation],
    data_volume_gb: f64,
    ingestion: IngestionType,
    pricing_model: PricingModel,
) -> CostBreakdown {
    let avg_cost = average(recommendations.iter().map(|r| r.monthly_price()));

    let compute = avg_cost * COMPUTE_SHARE;
    let storage = data_volume_gb * STORAGE_PRICE_PER_GB_MONTH;
    let licensing = avg_cost * LICENSING_SHARE;
    let ingestion_cost = if ingestion.is_streaming() { avg_cost * INGESTION_SHARE } else { 0.0 };
    let egress = avg_cost * EGRESS_SHARE;
    let total = compute + storage + licensing + ingestion_cost + egress;

    let components = [
        (CostCategory::Compute, compute),
        (CostCategory::Storage, storage),
        (CostCategory::Licensing, licensing),
        (CostCategory::Ingestion, ingestion_cost),
        (CostCategory::Egress, egress),
    ]
    .into_iter()
    .map(|(category, value)| CostComponent {
        label: category.label().to_string(),
        value,
        percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
        category,
    })
    .collect();

    let avg_savings = average(recommendations.iter().map(|r| r.pricing.savings()));
    let reserved_discount =
        matches!(pricing_model, PricingModel::Reserved | PricingModel::Hybrid).then_some(avg_savings);
    let spot_savings = matches!(pricing_model, PricingModel::Spot).then_some(avg_savings);

    CostBreakdown {
        compute,
        storage,
        licensing,
        ingestion: ingestion_cost,
        egress,
        total,
        components,
        monthly_total: total,
        yearly_total: total * 12.0,
        reserved_discount,
        spot_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, QueryComplexity};
    use crate::multipliers::MultiplierSet;
    use crate::pricing::PricingTerms;
    use crate::reference::ReferenceData;
    use crate::sizing::{size_for_platform, RequirementInputs};

    fn recommendations(terms: PricingTerms) -> Vec<PlatformRecommendation> {
        let data = ReferenceData::builtin();
        let region = data.region("us-east").unwrap();
        let inputs = RequirementInputs::new(2.0, 50, QueryComplexity::Simple, MultiplierSet::neutral());
        Platform::ALL
            .iter()
            .map(|p| size_for_platform(*p, &inputs, data.catalog(), region, terms).unwrap())
            .collect()
    }

    #[test]
    fn test_components_sum_to_total() {
        let recs = recommendations(PricingTerms::on_demand());
        let refs: Vec<_> = recs.iter().collect();
        let breakdown = aggregate_costs(&refs, 2048.0, IngestionType::Realtime, PricingModel::OnDemand);

        let value_sum: f64 = breakdown.components.iter().map(|c| c.value).sum();
        let pct_sum: f64 = breakdown.components.iter().map(|c| c.percentage).sum();
        assert!((value_sum - breakdown.total).abs() < 1e-6);
        assert!((pct_sum - 100.0).abs() < 1e-6);
        assert!((breakdown.storage - 2048.0 * 0.023).abs() < 1e-9);
        assert!(breakdown.ingestion > 0.0);
        assert_eq!(breakdown.yearly_total, breakdown.monthly_total * 12.0);
    }

    #[test]
    fn test_batch_has_no_ingestion_cost() {
        let recs = recommendations(PricingTerms::on_demand());
        let refs: Vec<_> = recs.iter().collect();
        let breakdown = aggregate_costs(&refs, 100.0, IngestionType::Batch, PricingModel::OnDemand);
        assert_eq!(breakdown.ingestion, 0.0);
        assert_eq!(breakdown.component(CostCategory::Ingestion).unwrap().percentage, 0.0);
        assert!(breakdown.reserved_discount.is_none());
        assert!(breakdown.spot_savings.is_none());
    }

    #[test]
    fn test_savings_reported_for_discounted_models() {
        let recs = recommendations(PricingTerms::new(PricingModel::Spot, None));
        let refs: Vec<_> = recs.iter().collect();
        let breakdown = aggregate_costs(&refs, 100.0, IngestionType::Batch, PricingModel::Spot);
        let avg_list: f64 = recs.iter().map(|r| r.pricing.list_price).sum::<f64>() / 3.0;
        assert!((breakdown.spot_savings.unwrap() - avg_list * 0.5).abs() < 1e-6);
        assert!(breakdown.reserved_discount.is_none());
    }
}
