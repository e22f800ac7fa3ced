//! Calculador de precios
//!
//! Función pura: superficie × cobertura × (tarifa de diseño + recargo de
//! acabado) + tarifa fija de diseño + instalación opcional.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::options::{find_coverage, find_design_tier, find_finish, find_install};

/// Tarifa fija de diseño (reembolsable), independiente de la superficie
pub const DESIGN_FEE: i64 = 99;

/// Superficie máxima aceptada por el calculador (pies cuadrados)
pub const MAX_SQFT: i64 = 10_000;

/// Desglose de un presupuesto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub effective_sqft: i64,
    pub subtotal: Decimal,
    pub design_fee: Decimal,
    pub total: Decimal,
}

/// Hitos de pago 25/25/50, cada uno redondeado por separado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentMilestones {
    pub deposit: Decimal,
    pub design_approval: Decimal,
    pub print_ship: Decimal,
}

pub(crate) fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Calcula el desglose. No valida rangos: el llamador entrega las cinco
/// selecciones ya resueltas.
pub fn calculate_price(
    sqft: Decimal,
    coverage_multiplier: Decimal,
    price_per_sqft: Decimal,
    finish_add: Decimal,
    install_price: Decimal,
) -> PriceBreakdown {
    let effective = round_half_up(sqft * coverage_multiplier);
    let subtotal = effective * (price_per_sqft + finish_add);
    let design_fee = Decimal::from(DESIGN_FEE);
    let total = subtotal + install_price + design_fee;

    PriceBreakdown {
        effective_sqft: effective.to_i64().unwrap_or_default(),
        subtotal,
        design_fee,
        total,
    }
}

impl PriceBreakdown {
    pub fn milestones(&self) -> PaymentMilestones {
        PaymentMilestones::from_total(self.total)
    }
}

impl PaymentMilestones {
    pub fn from_total(total: Decimal) -> Self {
        Self {
            deposit: round_half_up(total * Decimal::new(25, 2)),
            design_approval: round_half_up(total * Decimal::new(25, 2)),
            print_ship: round_half_up(total * Decimal::new(50, 2)),
        }
    }

    pub fn sum(&self) -> Decimal {
        self.deposit + self.design_approval + self.print_ship
    }

    /// Diferencia entre el total redondeado y la suma de los hitos.
    /// No se corrige; solo se expone.
    pub fn drift(&self, total: Decimal) -> Decimal {
        round_half_up(total) - self.sum()
    }
}

/// Selecciones del cliente en el calculador (por id). Cualquier selección
/// ausente o desconocida, o una superficie fuera de (0, MAX_SQFT], impide el
/// cálculo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSelection {
    pub sqft: Option<Decimal>,
    pub coverage: Option<String>,
    pub design: Option<String>,
    pub finish: Option<String>,
    pub install: Option<String>,
}

impl QuoteSelection {
    pub fn price(&self) -> Option<PriceBreakdown> {
        let sqft = self
            .sqft
            .filter(|s| *s > Decimal::ZERO && *s <= Decimal::from(MAX_SQFT))?;
        let coverage = find_coverage(self.coverage.as_deref()?)?;
        let design = find_design_tier(self.design.as_deref()?)?;
        let finish = find_finish(self.finish.as_deref()?)?;
        let install = find_install(self.install.as_deref()?)?;

        Some(calculate_price(
            sqft,
            coverage.multiplier,
            design.price_per_sqft,
            finish.price_add,
            install.price,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::options::{COVERAGE_OPTIONS, DESIGN_TIERS, FINISH_OPTIONS, INSTALL_OPTIONS};

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn selection(coverage: &str) -> QuoteSelection {
        QuoteSelection {
            sqft: Some(d(270)),
            coverage: Some(coverage.to_string()),
            design: Some("fullcustom".to_string()),
            finish: Some("gloss".to_string()),
            install: Some("ship".to_string()),
        }
    }

    #[test]
    fn test_full_custom_full_wrap() {
        let quote = selection("full").price().expect("complete selection");
        assert_eq!(quote.effective_sqft, 270);
        assert_eq!(quote.subtotal, d(4050));
        assert_eq!(quote.design_fee, d(99));
        assert_eq!(quote.total, d(4149));
        assert_eq!(quote.milestones().deposit, d(1037));
    }

    #[test]
    fn test_hood_only() {
        let quote = selection("hood").price().expect("complete selection");
        assert_eq!(quote.effective_sqft, 27);
        assert_eq!(quote.subtotal, d(405));
        assert_eq!(quote.total, d(504));
    }

    #[test]
    fn test_effective_sqft_rounds_half_up() {
        // 270 × 0.55 = 148.5
        let quote = calculate_price(d(270), Decimal::new(55, 2), d(5), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(quote.effective_sqft, 149);
        // 225 × 0.12 = 27.0
        let quote = calculate_price(d(225), Decimal::new(12, 2), d(5), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(quote.effective_sqft, 27);
    }

    #[test]
    fn test_missing_selection_yields_none() {
        let mut partial = selection("full");
        partial.install = None;
        assert!(partial.price().is_none());

        let mut zero_area = selection("full");
        zero_area.sqft = Some(Decimal::ZERO);
        assert!(zero_area.price().is_none());

        let mut unknown = selection("full");
        unknown.design = Some("deluxe".to_string());
        assert!(unknown.price().is_none());

        assert!(QuoteSelection::default().price().is_none());
    }

    #[test]
    fn test_area_above_limit_yields_none() {
        let mut at_limit = selection("full");
        at_limit.sqft = Some(d(MAX_SQFT));
        assert!(at_limit.price().is_some());

        let mut absurd = selection("full");
        absurd.sqft = Some(Decimal::from_str_exact("70000000000000000000000000000").expect("decimal"));
        assert!(absurd.price().is_none());
    }

    #[test]
    fn test_sum_invariant_over_all_options() {
        for coverage in COVERAGE_OPTIONS.iter() {
            for design in DESIGN_TIERS.iter() {
                for finish in FINISH_OPTIONS.iter() {
                    for install in INSTALL_OPTIONS.iter() {
                        let q = calculate_price(
                            d(333),
                            coverage.multiplier,
                            design.price_per_sqft,
                            finish.price_add,
                            install.price,
                        );
                        assert_eq!(q.subtotal + install.price + q.design_fee, q.total);
                        assert_eq!(
                            q.subtotal,
                            Decimal::from(q.effective_sqft) * (design.price_per_sqft + finish.price_add)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_higher_rate_never_lowers_total() {
        let mut previous = Decimal::MIN;
        for rate in 1..40 {
            let q = calculate_price(d(290), Decimal::new(35, 2), d(rate), d(2), d(600));
            assert!(q.total >= previous);
            previous = q.total;
        }
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let a = calculate_price(d(305), Decimal::new(40, 2), d(9), d(2), d(800));
        let b = calculate_price(d(305), Decimal::new(40, 2), d(9), d(2), d(800));
        assert_eq!(a, b);
    }

    #[test]
    fn test_milestone_drift_is_reported_not_corrected() {
        // 4149: 1037.25 -> 1037, 1037.25 -> 1037, 2074.5 -> 2075
        let m = PaymentMilestones::from_total(d(4149));
        assert_eq!(m.deposit, d(1037));
        assert_eq!(m.design_approval, d(1037));
        assert_eq!(m.print_ship, d(2075));
        assert_eq!(m.drift(d(4149)), Decimal::ZERO);

        // 102: 25.5 -> 26, 25.5 -> 26, 51 -> 51  => suma 103
        let m = PaymentMilestones::from_total(d(102));
        assert_eq!(m.sum(), d(103));
        assert_eq!(m.drift(d(102)), d(-1));
    }
}
