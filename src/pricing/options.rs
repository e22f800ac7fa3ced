//! Opciones del calculador: cobertura, nivel de diseño, acabado e instalación.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::Serialize;

/// Fracción de la superficie cubierta por el wrap
#[derive(Debug, Clone, Serialize)]
pub struct CoverageOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub multiplier: Decimal,
}

/// Nivel de personalización del arte
#[derive(Debug, Clone, Serialize)]
pub struct DesignTier {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub price_per_sqft: Decimal,
    pub turnaround: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinishOption {
    pub id: &'static str,
    pub label: &'static str,
    pub price_add: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallOption {
    pub id: &'static str,
    pub label: &'static str,
    pub price: Decimal,
}

/// Acabado por defecto del calculador
pub const DEFAULT_FINISH: &str = "gloss";

fn pct(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

lazy_static! {
    pub static ref COVERAGE_OPTIONS: Vec<CoverageOption> = vec![
        CoverageOption { id: "full", label: "Full Wrap", description: "Complete vehicle coverage", multiplier: pct(100) },
        CoverageOption { id: "half", label: "Half Wrap", description: "One side + hood or rear", multiplier: pct(55) },
        CoverageOption { id: "partial", label: "Partial Wrap", description: "Selected panels only", multiplier: pct(35) },
        CoverageOption { id: "hood-roof", label: "Hood + Roof", description: "Top surfaces only", multiplier: pct(20) },
        CoverageOption { id: "hood", label: "Hood Only", description: "Front hood panel", multiplier: pct(10) },
        CoverageOption { id: "rear", label: "Rear Only", description: "Trunk/tailgate area", multiplier: pct(12) },
        CoverageOption { id: "side-panels", label: "Side Panels", description: "Both door areas", multiplier: pct(40) },
    ];

    pub static ref DESIGN_TIERS: Vec<DesignTier> = vec![
        DesignTier {
            id: "premade",
            label: "Pre-Made Design",
            description: "Choose from our existing anime designs",
            price_per_sqft: Decimal::from(5),
            turnaround: "5-7 business days",
        },
        DesignTier {
            id: "semicustom",
            label: "Semi-Custom",
            description: "Modify an existing design with your preferences",
            price_per_sqft: Decimal::from(9),
            turnaround: "10-14 business days",
        },
        DesignTier {
            id: "fullcustom",
            label: "Fully Custom Itasha",
            description: "Original artwork designed specifically for your vehicle",
            price_per_sqft: Decimal::from(15),
            turnaround: "3-5 weeks",
        },
    ];

    pub static ref FINISH_OPTIONS: Vec<FinishOption> = vec![
        FinishOption { id: "gloss", label: "High Gloss", price_add: Decimal::ZERO },
        FinishOption { id: "matte", label: "Matte", price_add: Decimal::from(2) },
        FinishOption { id: "satin", label: "Satin", price_add: Decimal::from(2) },
    ];

    pub static ref INSTALL_OPTIONS: Vec<InstallOption> = vec![
        InstallOption { id: "ship", label: "Ship to Me (DIY)", price: Decimal::ZERO },
        InstallOption { id: "install-houston", label: "Professional Install (Houston, TX)", price: Decimal::from(800) },
        InstallOption { id: "install-partner", label: "Install via Partner Shop", price: Decimal::from(600) },
    ];
}

pub fn find_coverage(id: &str) -> Option<&'static CoverageOption> {
    COVERAGE_OPTIONS.iter().find(|o| o.id == id)
}

pub fn find_design_tier(id: &str) -> Option<&'static DesignTier> {
    DESIGN_TIERS.iter().find(|o| o.id == id)
}

pub fn find_finish(id: &str) -> Option<&'static FinishOption> {
    FINISH_OPTIONS.iter().find(|o| o.id == id)
}

pub fn find_install(id: &str) -> Option<&'static InstallOption> {
    INSTALL_OPTIONS.iter().find(|o| o.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_multipliers_in_unit_interval() {
        assert_eq!(COVERAGE_OPTIONS.len(), 7);
        for option in COVERAGE_OPTIONS.iter() {
            assert!(option.multiplier > Decimal::ZERO, "{}", option.id);
            assert!(option.multiplier <= Decimal::ONE, "{}", option.id);
        }
        assert_eq!(find_coverage("full").map(|c| c.multiplier), Some(Decimal::ONE));
        assert_eq!(find_coverage("hood").map(|c| c.multiplier), Some(Decimal::new(1, 1)));
    }

    #[test]
    fn test_design_tiers_strictly_increasing() {
        let rates: Vec<Decimal> = DESIGN_TIERS.iter().map(|t| t.price_per_sqft).collect();
        assert!(rates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fees_are_non_negative() {
        assert!(FINISH_OPTIONS.iter().all(|f| f.price_add >= Decimal::ZERO));
        assert!(INSTALL_OPTIONS.iter().all(|i| i.price >= Decimal::ZERO));
        assert!(find_finish(DEFAULT_FINISH).is_some());
    }

    #[test]
    fn test_unknown_ids() {
        assert!(find_coverage("roof-only").is_none());
        assert!(find_design_tier("").is_none());
        assert!(find_install("pickup").is_none());
    }
}
