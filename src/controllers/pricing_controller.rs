use crate::dto::pricing_dto::{
    CategorySummary, ModelsResponse, PriceQuoteRequest, PriceQuoteResponse, PricingOptionsResponse,
};
use crate::pricing::options::{COVERAGE_OPTIONS, DEFAULT_FINISH, DESIGN_TIERS, FINISH_OPTIONS, INSTALL_OPTIONS};
use crate::pricing::vehicle_table::VEHICLE_DATABASE;
use crate::pricing::{get_all_makes, get_models_for_make, DESIGN_FEE};

/// Calculador público: sin base de datos ni estado
pub struct PricingController;

impl PricingController {
    pub fn options() -> PricingOptionsResponse {
        PricingOptionsResponse {
            coverage: COVERAGE_OPTIONS.as_slice(),
            design_tiers: DESIGN_TIERS.as_slice(),
            finishes: FINISH_OPTIONS.as_slice(),
            installs: INSTALL_OPTIONS.as_slice(),
            design_fee: DESIGN_FEE,
            default_finish: DEFAULT_FINISH,
        }
    }

    pub fn makes() -> Vec<&'static str> {
        get_all_makes()
    }

    pub fn models(make: Option<String>) -> ModelsResponse {
        let make = make.unwrap_or_default();
        let models = get_models_for_make(&make);
        ModelsResponse { make, models }
    }

    pub fn categories() -> Vec<CategorySummary> {
        VEHICLE_DATABASE
            .iter()
            .map(|category| CategorySummary {
                category_type: category.category_type,
                avg_sqft: category.avg_sqft,
                model_count: category.models.len(),
            })
            .collect()
    }

    /// Presupuesto: `ready = false` mientras falte o no se reconozca alguna selección
    pub fn quote(request: PriceQuoteRequest) -> PriceQuoteResponse {
        match request.into_selection().price() {
            Some(breakdown) => {
                let milestones = breakdown.milestones();
                PriceQuoteResponse {
                    ready: true,
                    milestone_drift: Some(milestones.drift(breakdown.total)),
                    milestones: Some(milestones),
                    breakdown: Some(breakdown),
                }
            }
            None => PriceQuoteResponse {
                ready: false,
                breakdown: None,
                milestones: None,
                milestone_drift: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_quote_ready_only_with_all_selections() {
        let partial = PriceQuoteRequest {
            sqft: Some(Decimal::from(270)),
            coverage: Some("full".to_string()),
            ..Default::default()
        };
        let response = PricingController::quote(partial);
        assert!(!response.ready);
        assert!(response.breakdown.is_none());

        let complete = PriceQuoteRequest {
            sqft: Some(Decimal::from(270)),
            coverage: Some("full".to_string()),
            design: Some("fullcustom".to_string()),
            install: Some("ship".to_string()),
            ..Default::default()
        };
        let response = PricingController::quote(complete);
        assert!(response.ready);
        assert_eq!(response.breakdown.map(|b| b.total), Some(Decimal::from(4149)));
        assert_eq!(response.milestones.map(|m| m.deposit), Some(Decimal::from(1037)));
        assert_eq!(response.milestone_drift, Some(Decimal::ZERO));
    }

    #[test]
    fn test_oversized_area_is_not_ready() {
        let request = PriceQuoteRequest {
            sqft: Some(Decimal::from_str_exact("70000000000000000000000000000").expect("decimal")),
            coverage: Some("full".to_string()),
            design: Some("fullcustom".to_string()),
            install: Some("ship".to_string()),
            ..Default::default()
        };
        let response = PricingController::quote(request);
        assert!(!response.ready);
        assert!(response.breakdown.is_none());
    }

    #[test]
    fn test_categories_cover_table() {
        let categories = PricingController::categories();
        assert_eq!(categories.len(), VEHICLE_DATABASE.len());
        assert!(categories.iter().all(|c| c.model_count > 0));
    }
}
