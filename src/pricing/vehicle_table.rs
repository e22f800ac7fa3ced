//! Tabla estática de vehículos
//!
//! Superficie estimada de vinilo (sqft) para un full wrap por marca/modelo,
//! agrupada por tipo de carrocería. Datos de solo lectura: nunca se mutan
//! en runtime.

use serde::Serialize;
use std::collections::BTreeSet;

/// Modelo de vehículo con su superficie total estimada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VehicleModel {
    pub make: &'static str,
    pub model: &'static str,
    pub body_type: &'static str,
    pub total_sqft: u32,
}

/// Categoría de carrocería, usada para los atajos de "quick select"
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VehicleCategory {
    #[serde(rename = "type")]
    pub category_type: &'static str,
    pub avg_sqft: u32,
    pub models: &'static [VehicleModel],
}

const fn vm(make: &'static str, model: &'static str, body_type: &'static str, total_sqft: u32) -> VehicleModel {
    VehicleModel { make, model, body_type, total_sqft }
}

// Material total para un full wrap (incluye desperdicio/solape), rollos de 60"
pub static VEHICLE_DATABASE: &[VehicleCategory] = &[
    VehicleCategory {
        category_type: "Compact / Coupe",
        avg_sqft: 250,
        models: &[
            vm("Honda", "Civic Coupe", "Coupe", 250),
            vm("Toyota", "GR86", "Coupe", 225),
            vm("Subaru", "BRZ", "Coupe", 225),
            vm("Mazda", "MX-5 Miata", "Roadster", 200),
            vm("Nissan", "370Z / Z", "Coupe", 240),
            vm("BMW", "2 Series Coupe", "Coupe", 250),
            vm("Ford", "Mustang", "Coupe", 275),
            vm("Chevrolet", "Camaro", "Coupe", 270),
            vm("Dodge", "Challenger", "Coupe", 290),
            vm("Hyundai", "Veloster", "Hatchback", 230),
        ],
    },
    VehicleCategory {
        category_type: "Sedan",
        avg_sqft: 290,
        models: &[
            vm("Honda", "Civic Sedan", "Sedan", 275),
            vm("Honda", "Accord", "Sedan", 300),
            vm("Toyota", "Corolla", "Sedan", 270),
            vm("Toyota", "Camry", "Sedan", 300),
            vm("Nissan", "Altima", "Sedan", 295),
            vm("Nissan", "Sentra", "Sedan", 260),
            vm("Hyundai", "Elantra", "Sedan", 270),
            vm("Hyundai", "Sonata", "Sedan", 300),
            vm("Kia", "Forte", "Sedan", 265),
            vm("Mazda", "Mazda3", "Sedan", 260),
            vm("Subaru", "WRX", "Sedan", 270),
            vm("BMW", "3 Series", "Sedan", 290),
            vm("Tesla", "Model 3", "Sedan", 280),
            vm("Dodge", "Charger", "Sedan", 325),
            vm("Lexus", "IS", "Sedan", 275),
        ],
    },
    VehicleCategory {
        category_type: "Hatchback / Wagon",
        avg_sqft: 260,
        models: &[
            vm("Honda", "Civic Hatchback", "Hatchback", 265),
            vm("Toyota", "GR Corolla", "Hatchback", 270),
            vm("Mazda", "Mazda3 Hatchback", "Hatchback", 255),
            vm("Volkswagen", "Golf GTI", "Hatchback", 250),
            vm("Subaru", "Impreza", "Hatchback", 260),
            vm("Hyundai", "Elantra N", "Hatchback", 265),
        ],
    },
    VehicleCategory {
        category_type: "Compact SUV / Crossover",
        avg_sqft: 300,
        models: &[
            vm("Toyota", "RAV4", "SUV", 305),
            vm("Honda", "CR-V", "SUV", 300),
            vm("Mazda", "CX-5", "SUV", 290),
            vm("Subaru", "Crosstrek", "SUV", 275),
            vm("Subaru", "Forester", "SUV", 295),
            vm("Hyundai", "Tucson", "SUV", 300),
            vm("Kia", "Sportage", "SUV", 300),
            vm("Nissan", "Rogue", "SUV", 305),
            vm("Tesla", "Model Y", "SUV", 290),
        ],
    },
    VehicleCategory {
        category_type: "Full-Size SUV",
        avg_sqft: 375,
        models: &[
            vm("Toyota", "4Runner", "SUV", 350),
            vm("Toyota", "Highlander", "SUV", 340),
            vm("Toyota", "Land Cruiser", "SUV", 400),
            vm("Jeep", "Wrangler (4-door)", "SUV", 325),
            vm("Jeep", "Grand Cherokee", "SUV", 350),
            vm("Ford", "Bronco", "SUV", 330),
            vm("Ford", "Expedition", "SUV", 420),
            vm("Chevrolet", "Tahoe", "SUV", 400),
            vm("Chevrolet", "Suburban", "SUV", 450),
            vm("BMW", "X5", "SUV", 350),
        ],
    },
    VehicleCategory {
        category_type: "Truck",
        avg_sqft: 340,
        models: &[
            vm("Toyota", "Tacoma", "Truck", 290),
            vm("Toyota", "Tundra", "Truck", 370),
            vm("Ford", "F-150", "Truck", 360),
            vm("Ford", "Ranger", "Truck", 290),
            vm("Chevrolet", "Silverado 1500", "Truck", 365),
            vm("Chevrolet", "Colorado", "Truck", 285),
            vm("Ram", "1500", "Truck", 365),
            vm("Nissan", "Frontier", "Truck", 280),
            vm("Tesla", "Cybertruck", "Truck", 350),
        ],
    },
    VehicleCategory {
        category_type: "Sports / Exotic",
        avg_sqft: 240,
        models: &[
            vm("Chevrolet", "Corvette", "Sports", 250),
            vm("Porsche", "911", "Sports", 235),
            vm("Porsche", "Cayman", "Sports", 220),
            vm("Lamborghini", "Huracán", "Sports", 240),
            vm("Nissan", "GT-R", "Sports", 265),
            vm("Toyota", "Supra", "Sports", 240),
            vm("BMW", "M4", "Coupe", 265),
        ],
    },
    VehicleCategory {
        category_type: "Van / Minivan",
        avg_sqft: 400,
        models: &[
            vm("Honda", "Odyssey", "Minivan", 325),
            vm("Toyota", "Sienna", "Minivan", 325),
            vm("Ford", "Transit", "Van", 475),
            vm("Mercedes-Benz", "Sprinter", "Van", 550),
            vm("Ram", "ProMaster", "Van", 500),
        ],
    },
];

fn all_models() -> impl Iterator<Item = &'static VehicleModel> {
    VEHICLE_DATABASE.iter().flat_map(|category| category.models.iter())
}

/// Marcas distintas de todas las categorías, ordenadas ascendentemente
pub fn get_all_makes() -> Vec<&'static str> {
    all_models()
        .map(|m| m.make)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Modelos cuya marca coincide exactamente (sensible a mayúsculas), en el orden
/// del catálogo. Marca desconocida => vector vacío.
pub fn get_models_for_make(make: &str) -> Vec<&'static VehicleModel> {
    all_models().filter(|m| m.make == make).collect()
}

pub fn find_model(make: &str, model: &str) -> Option<&'static VehicleModel> {
    all_models().find(|m| m.make == make && m.model == model)
}

/// Superficie media de una categoría ("quick select")
pub fn category_avg_sqft(category_type: &str) -> Option<u32> {
    VEHICLE_DATABASE
        .iter()
        .find(|c| c.category_type == category_type)
        .map(|c| c.avg_sqft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_models_have_positive_sqft() {
        assert!(all_models().all(|m| m.total_sqft > 0));
    }

    #[test]
    fn test_get_all_makes_sorted_and_unique() {
        let makes = get_all_makes();
        let mut sorted = makes.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(makes, sorted);
        assert_eq!(makes.first(), Some(&"BMW"));
        assert!(makes.contains(&"Toyota"));
    }

    #[test]
    fn test_models_for_make_only_matching_and_stable() {
        let first = get_models_for_make("Toyota");
        assert!(!first.is_empty());
        assert!(first.iter().all(|m| m.make == "Toyota"));
        // Orden del catálogo: GR86 (coupe) antes que Corolla (sedan)
        assert_eq!(first[0].model, "GR86");
        assert_eq!(first[1].model, "Corolla");

        let second = get_models_for_make("Toyota");
        assert_eq!(first, second);
    }

    #[test]
    fn test_models_for_make_is_case_sensitive() {
        assert!(get_models_for_make("toyota").is_empty());
        assert!(get_models_for_make("Yugo").is_empty());
    }

    #[test]
    fn test_find_model_and_category_avg() {
        let camaro = find_model("Chevrolet", "Camaro").expect("camaro");
        assert_eq!(camaro.total_sqft, 270);
        assert_eq!(category_avg_sqft("Truck"), Some(340));
        assert_eq!(category_avg_sqft("Boat"), None);
    }
}
