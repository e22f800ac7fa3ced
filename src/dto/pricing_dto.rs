use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::options::{CoverageOption, DesignTier, FinishOption, InstallOption, DEFAULT_FINISH};
use crate::pricing::vehicle_table::{category_avg_sqft, find_model};
use crate::pricing::{PaymentMilestones, PriceBreakdown, QuoteSelection, VehicleModel};

/// Catálogo completo de opciones del calculador
#[derive(Debug, Serialize)]
pub struct PricingOptionsResponse {
    pub coverage: &'static [CoverageOption],
    pub design_tiers: &'static [DesignTier],
    pub finishes: &'static [FinishOption],
    pub installs: &'static [InstallOption],
    pub design_fee: i64,
    pub default_finish: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ModelsQuery {
    pub make: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub make: String,
    pub models: Vec<&'static VehicleModel>,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    #[serde(rename = "type")]
    pub category_type: &'static str,
    pub avg_sqft: u32,
    pub model_count: usize,
}

/// Selecciones del calculador. El acabado cae en `gloss` si no se indica.
/// La superficie puede venir directa (`sqft`), de un modelo de la tabla
/// (`make` + `model`) o de la media de una categoría (`category`).
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuoteRequest {
    #[serde(default)]
    pub sqft: Option<Decimal>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub coverage: Option<String>,
    pub design: Option<String>,
    pub finish: Option<String>,
    pub install: Option<String>,
}

impl PriceQuoteRequest {
    fn table_sqft(&self) -> Option<Decimal> {
        let from_model = match (self.make.as_deref(), self.model.as_deref()) {
            (Some(make), Some(model)) => find_model(make, model).map(|m| m.total_sqft),
            _ => None,
        };
        from_model
            .or_else(|| self.category.as_deref().and_then(category_avg_sqft))
            .map(Decimal::from)
    }

    pub fn into_selection(self) -> QuoteSelection {
        let sqft = self.sqft.or_else(|| self.table_sqft());
        QuoteSelection {
            sqft,
            coverage: self.coverage,
            design: self.design,
            finish: self.finish.or_else(|| Some(DEFAULT_FINISH.to_string())),
            install: self.install,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceQuoteResponse {
    pub ready: bool,
    pub breakdown: Option<PriceBreakdown>,
    pub milestones: Option<PaymentMilestones>,
    /// Total redondeado menos la suma de los hitos (puede no ser 0)
    pub milestone_drift: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqft_from_model_or_category() {
        let request = PriceQuoteRequest {
            make: Some("Chevrolet".to_string()),
            model: Some("Camaro".to_string()),
            ..Default::default()
        };
        let selection = request.into_selection();
        assert_eq!(selection.sqft, Some(Decimal::from(270)));
        assert_eq!(selection.finish.as_deref(), Some(DEFAULT_FINISH));

        let request = PriceQuoteRequest {
            category: Some("Truck".to_string()),
            ..Default::default()
        };
        assert_eq!(request.into_selection().sqft, Some(Decimal::from(340)));
    }

    #[test]
    fn test_explicit_sqft_wins() {
        let request = PriceQuoteRequest {
            sqft: Some(Decimal::from(100)),
            category: Some("Truck".to_string()),
            ..Default::default()
        };
        assert_eq!(request.into_selection().sqft, Some(Decimal::from(100)));
    }
}
