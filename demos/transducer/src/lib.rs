//! Vehicle inventory transform built from plain `Vec<Vehicle> -> Vec<Vehicle>`
//! steps folded with [`seqfold::reduce`].

use serde::{Deserialize, Serialize};

pub const SHOWROOM: &str = "Showroom";
pub const IN_TRANSIT: &str = "In Transit";

/// Bundled sample inventory.
pub const SAMPLE_VEHICLES: &str = include_str!("../data/vehicles.json");

/// Year as received (text) or after [`parse_years`] (number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i64),
    Text(String),
}

impl Year {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Year::Number(n) => Some(*n),
            Year::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_model: Option<String>,
}

pub type Inventory = Vec<Vehicle>;
pub type InventoryStep = fn(Inventory) -> Inventory;

pub fn load_inventory(raw: &str) -> serde_json::Result<Inventory> {
    serde_json::from_str(raw)
}

pub fn drop_showroom(vehicles: Inventory) -> Inventory {
    vehicles
        .into_iter()
        .filter(|v| v.location.as_deref() != Some(SHOWROOM))
        .collect()
}

pub fn uppercase_models(vehicles: Inventory) -> Inventory {
    vehicles
        .into_iter()
        .map(|v| Vehicle {
            model: v.model.to_uppercase(),
            ..v
        })
        .collect()
}

pub fn add_make_model(vehicles: Inventory) -> Inventory {
    vehicles
        .into_iter()
        .map(|v| Vehicle {
            make_model: Some(format!("{} {}", v.make, v.model)),
            ..v
        })
        .collect()
}

/// Missing or empty locations become [`IN_TRANSIT`].
pub fn default_location(vehicles: Inventory) -> Inventory {
    vehicles
        .into_iter()
        .map(|v| {
            let location = match v.location {
                Some(loc) if !loc.is_empty() => loc,
                _ => IN_TRANSIT.to_string(),
            };
            Vehicle {
                location: Some(location),
                ..v
            }
        })
        .collect()
}

/// Text years become numbers from their leading decimal digits. Text with
/// no leading digits is left untouched.
pub fn parse_years(vehicles: Inventory) -> Inventory {
    vehicles
        .into_iter()
        .map(|v| {
            let year = match v.year {
                Year::Text(text) => leading_int(&text).map_or(Year::Text(text), Year::Number),
                number => number,
            };
            Vehicle { year, ..v }
        })
        .collect()
}

fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Stable ascending sort by year; years that are still text go last.
pub fn sort_by_year(mut vehicles: Inventory) -> Inventory {
    vehicles.sort_by_key(|v| (v.year.as_number().is_none(), v.year.as_number()));
    vehicles
}

pub fn inventory_steps() -> [InventoryStep; 6] {
    [
        drop_showroom,
        uppercase_models,
        add_make_model,
        default_location,
        parse_years,
        sort_by_year,
    ]
}

pub fn transform(vehicles: Inventory) -> Inventory {
    seqfold::reduce(vehicles, &inventory_steps(), None)
}
