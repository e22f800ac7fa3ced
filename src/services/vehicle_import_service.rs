//! Importación de la tabla de vehículos desde Excel
//!
//! Columnas: 0 marca, 1 modelo, 2 año, 3 trim, 4-6 sqft parciales
//! (25/50/75 %), 7 (columna H) sqft total. La primera fila es la cabecera.

use std::io::Cursor;
use std::str::FromStr;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::models::NewVehicle;
use crate::utils::errors::AppError;

const COLUMN_COUNT: usize = 8;

/// Resultado de leer la hoja
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub vehicles: Vec<NewVehicle>,
    pub warnings: Vec<String>,
}

/// Leer la primera hoja de un .xlsx en memoria. Las filas se devuelven por
/// posición absoluta: el índice 0 es la fila 1 de la hoja.
pub fn read_first_sheet(bytes: Vec<u8>) -> Result<Vec<Vec<Data>>, AppError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::BadRequest(format!("Could not read spreadsheet: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| AppError::BadRequest("Excel file has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| AppError::BadRequest(format!("Failed to read sheet: {}", e)))?;

    let Some((end_row, _)) = range.end() else {
        return Ok(Vec::new());
    };

    let rows = (0..=end_row)
        .map(|row| {
            (0..COLUMN_COUNT as u32)
                .map(|col| range.get_value((row, col)).cloned().unwrap_or(Data::Empty))
                .collect()
        })
        .collect();

    Ok(rows)
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Float(f)) if f.fract() == 0.0 => format!("{}", *f as i64),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Celda sin contenido: vacía o texto de longitud 0. Un texto con solo
/// espacios no cuenta como vacío.
fn cell_is_empty(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn cell_number(cell: Option<&Data>) -> Option<f64> {
    let number = match cell? {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n: &f64| n.is_finite())
}

fn cell_decimal(cell: Option<&Data>) -> Option<Decimal> {
    match cell? {
        Data::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => cell_number(cell).and_then(Decimal::from_f64).map(|d| d.round_dp(2)),
    }
}

/// Validar las filas de la hoja. La fila 0 (cabecera) se ignora; las filas
/// con la celda de marca vacía se saltan en silencio; el resto de filas
/// inválidas generan un aviso con el número de fila 1-based.
pub fn parse_vehicle_rows(rows: &[Vec<Data>]) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (index, row) in rows.iter().enumerate().skip(1) {
        let row_number = index + 1;
        if cell_is_empty(row.first()) {
            continue;
        }

        let make = cell_text(row.first());
        let model = cell_text(row.get(1));
        let year = cell_number(row.get(2))
            .filter(|y| *y != 0.0)
            .map(|y| y.trunc() as i32);

        let Some(year) = year.filter(|_| !make.is_empty() && !model.is_empty()) else {
            outcome.warnings.push(format!("Row {}: Missing make/model/year", row_number));
            continue;
        };

        let total_sqft = cell_decimal(row.get(7)).filter(|s| *s > Decimal::ZERO);
        let Some(total_sqft) = total_sqft else {
            outcome
                .warnings
                .push(format!("Row {}: Invalid sqft for {} {} {}", row_number, make, model, year));
            continue;
        };

        let trim = cell_text(row.get(3));
        outcome.vehicles.push(NewVehicle {
            make,
            model,
            year,
            trim: (!trim.is_empty()).then_some(trim),
            sqft_25: cell_decimal(row.get(4)),
            sqft_50: cell_decimal(row.get(5)),
            sqft_75: cell_decimal(row.get(6)),
            total_sqft,
        });
    }

    if !outcome.warnings.is_empty() {
        warn!("⚠️ {} filas omitidas en la importación", outcome.warnings.len());
    }
    info!("📊 {} vehículos válidos leídos de la hoja", outcome.vehicles.len());

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    fn f(v: f64) -> Data {
        Data::Float(v)
    }

    fn header() -> Vec<Data> {
        ["Brand", "Model", "Year", "Trim", "25%", "50%", "75%", "100%"]
            .iter()
            .map(|h| s(h))
            .collect()
    }

    fn row(make: Data, model: Data, year: Data, total: Data) -> Vec<Data> {
        vec![make, model, year, s("Base"), f(70.0), f(140.0), f(210.0), total]
    }

    #[test]
    fn test_valid_rows_are_imported() {
        let rows = vec![
            header(),
            row(s("Toyota"), s("GR86"), f(2023.0), f(270.0)),
            row(s("Honda"), s("Civic"), s("2021"), s("285.5")),
        ];

        let outcome = parse_vehicle_rows(&rows);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.vehicles.len(), 2);

        let gr86 = &outcome.vehicles[0];
        assert_eq!(gr86.make, "Toyota");
        assert_eq!(gr86.year, 2023);
        assert_eq!(gr86.trim.as_deref(), Some("Base"));
        assert_eq!(gr86.total_sqft, Decimal::from(270));
        assert_eq!(gr86.sqft_50, Some(Decimal::from(140)));

        assert_eq!(outcome.vehicles[1].total_sqft, Decimal::new(2855, 1));
    }

    #[test]
    fn test_non_numeric_year_is_skipped_with_warning() {
        let rows = vec![
            header(),
            row(s("Toyota"), s("GR86"), f(2023.0), f(270.0)),
            row(s("Mazda"), s("MX-5"), s("abc"), f(230.0)),
        ];

        let outcome = parse_vehicle_rows(&rows);
        assert_eq!(outcome.vehicles.len(), 1);
        assert_eq!(outcome.warnings, vec!["Row 3: Missing make/model/year".to_string()]);
    }

    #[test]
    fn test_invalid_sqft_warning_names_the_vehicle() {
        let rows = vec![
            header(),
            row(s("Ford"), s("F-150"), f(2022.0), Data::Empty),
            row(s("Ford"), s("Ranger"), f(2022.0), f(-5.0)),
            row(s("Ford"), s("Bronco"), f(2022.0), s("n/a")),
        ];

        let outcome = parse_vehicle_rows(&rows);
        assert!(outcome.vehicles.is_empty());
        assert_eq!(
            outcome.warnings,
            vec![
                "Row 2: Invalid sqft for Ford F-150 2022".to_string(),
                "Row 3: Invalid sqft for Ford Ranger 2022".to_string(),
                "Row 4: Invalid sqft for Ford Bronco 2022".to_string(),
            ]
        );
    }

    #[test]
    fn test_rows_with_empty_brand_cell_are_skipped_silently() {
        let rows = vec![
            header(),
            vec![Data::Empty; 8],
            row(s(""), s("Ghost"), f(2020.0), f(100.0)),
            vec![],
            row(s("Subaru"), s("WRX"), f(2022.0), f(280.0)),
        ];

        let outcome = parse_vehicle_rows(&rows);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.vehicles.len(), 1);
        assert_eq!(outcome.vehicles[0].make, "Subaru");
    }

    #[test]
    fn test_whitespace_brand_is_reported() {
        let rows = vec![header(), row(s("  "), s("Ghost"), f(2020.0), f(100.0))];

        let outcome = parse_vehicle_rows(&rows);
        assert!(outcome.vehicles.is_empty());
        assert_eq!(outcome.warnings, vec!["Row 2: Missing make/model/year".to_string()]);
    }

    #[test]
    fn test_missing_model_or_zero_year() {
        let rows = vec![
            header(),
            row(s("Kia"), Data::Empty, f(2022.0), f(250.0)),
            row(s("Kia"), s("Soul"), f(0.0), f(250.0)),
        ];

        let outcome = parse_vehicle_rows(&rows);
        assert!(outcome.vehicles.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[1].starts_with("Row 3:"));
    }

    #[test]
    fn test_header_only_sheet_yields_nothing() {
        let outcome = parse_vehicle_rows(&[header()]);
        assert!(outcome.vehicles.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_garbage_bytes_are_a_bad_request() {
        let result = read_first_sheet(b"definitely not a zip archive".to_vec());
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
