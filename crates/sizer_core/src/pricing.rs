//! Pricing-model adjustments applied per platform before aggregation.

use serde::{Deserialize, Serialize};

use crate::models::PricingModel;

/// Reserved capacity costs 70% of list.
pub const RESERVED_RATE: f64 = 0.7;
/// Spot capacity costs 50% of list.
pub const SPOT_RATE: f64 = 0.5;

/// Monthly price after applying `model` to `base_price`.
///
/// Hybrid blends reserved and on-demand pricing by `reserved_percentage`
/// (0-100). A missing percentage prices hybrid entirely on demand; callers
/// that go through configuration validation always supply one.
pub fn apply_pricing_model(base_price: f64, model: PricingModel, reserved_percentage: Option<f64>) -> f64 {
    match model {
        PricingModel::OnDemand => base_price,
        PricingModel::Reserved => base_price * RESERVED_RATE,
        PricingModel::Spot => base_price * SPOT_RATE,
        PricingModel::Hybrid => {
            let reserved_share = reserved_percentage.unwrap_or(0.0) / 100.0;
            base_price * RESERVED_RATE * reserved_share + base_price * (1.0 - reserved_share)
        }
    }
}

/// Pricing model together with its hybrid split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingTerms {
    pub model: PricingModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_percentage: Option<f64>,
}

impl PricingTerms {
    pub fn new(model: PricingModel, reserved_percentage: Option<f64>) -> Self {
        Self {
            model,
            reserved_percentage,
        }
    }

    pub fn on_demand() -> Self {
        Self::default()
    }

    /// Quote a catalog base price in a region with these terms.
    pub fn quote(&self, base_price: f64, region_multiplier: f64) -> PriceQuote {
        PriceQuote::new(base_price, region_multiplier, self.model, self.reserved_percentage)
    }
}

/// Prices of one recommended SKU.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Region-adjusted on-demand list price per month
    pub list_price: f64,
    /// Price per month after the pricing model
    pub monthly_price: f64,
    pub yearly_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot_price: Option<f64>,
}

impl PriceQuote {
    /// Quote a catalog base price in a region under a pricing model.
    pub fn new(
        base_price: f64,
        region_multiplier: f64,
        model: PricingModel,
        reserved_percentage: Option<f64>,
    ) -> Self {
        let list_price = base_price * region_multiplier;
        let monthly_price = apply_pricing_model(list_price, model, reserved_percentage);

        let reserved_price = matches!(model, PricingModel::Reserved | PricingModel::Hybrid)
            .then(|| list_price * RESERVED_RATE);
        let spot_price = matches!(model, PricingModel::Spot | PricingModel::Hybrid)
            .then(|| list_price * SPOT_RATE);

        Self {
            list_price,
            monthly_price,
            yearly_price: monthly_price * 12.0,
            reserved_price,
            spot_price,
        }
    }

    /// Monthly saving versus on-demand list price.
    pub fn savings(&self) -> f64 {
        self.list_price - self.monthly_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rates() {
        assert_eq!(apply_pricing_model(1000.0, PricingModel::OnDemand, None), 1000.0);
        assert!((apply_pricing_model(1000.0, PricingModel::Reserved, None) - 700.0).abs() < 1e-9);
        assert!((apply_pricing_model(1000.0, PricingModel::Spot, None) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_blend() {
        let price = apply_pricing_model(1000.0, PricingModel::Hybrid, Some(50.0));
        assert!((price - 850.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_lies_between_reserved_and_on_demand() {
        for pct in [0.5, 1.0, 25.0, 50.0, 75.0, 99.0, 99.5] {
            let price = apply_pricing_model(1000.0, PricingModel::Hybrid, Some(pct));
            assert!(price > 700.0 && price < 1000.0, "pct {} gave {}", pct, price);
        }
    }

    #[test]
    fn test_quote_includes_region_and_alternatives() {
        let quote = PriceQuote::new(1000.0, 1.2, PricingModel::Hybrid, Some(50.0));
        assert!((quote.list_price - 1200.0).abs() < 1e-9);
        assert!((quote.monthly_price - 1020.0).abs() < 1e-9);
        assert!((quote.yearly_price - 12240.0).abs() < 1e-9);
        assert!((quote.reserved_price.unwrap() - 840.0).abs() < 1e-9);
        assert!((quote.spot_price.unwrap() - 600.0).abs() < 1e-9);

        let on_demand = PriceQuote::new(1000.0, 1.0, PricingModel::OnDemand, None);
        assert!(on_demand.reserved_price.is_none());
        assert!(on_demand.spot_price.is_none());
        assert_eq!(on_demand.savings(), 0.0);
    }
}
