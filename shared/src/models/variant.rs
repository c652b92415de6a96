//! Variant Model
//!
//! A variant is one sellable combination of attribute values and a unit.
//! Variants are derived by the expansion engine and never created by hand.

use super::{Attribute, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute name → chosen value (sorted by attribute name)
pub type AttributeValues = BTreeMap<String, String>;

/// Product variant row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Surrogate key for list rendering, never reused within one engine
    pub row_id: u64,
    pub attribute_values: AttributeValues,
    /// `None` when the product defines no units
    pub unit_name: Option<String>,
    pub conversion_to_base: f64,
    /// Derived from prefix + values + unit, read-only
    pub code: String,
    #[serde(default)]
    pub barcode: String,
    pub cost_price: f64,
    pub price: f64,
    /// Only meaningful on base-unit rows; always 0 elsewhere
    pub stock: i64,
}

impl Variant {
    /// Identity of this row (survives regeneration)
    pub fn key(&self) -> VariantKey {
        VariantKey::new(&self.attribute_values, self.unit_name.as_deref())
    }

    /// Base-unit rows (and unit-less rows) carry authoritative stock
    pub fn is_base_unit(&self) -> bool {
        self.conversion_to_base == 1.0
    }

    pub fn value_of(&self, attribute: &str) -> Option<&str> {
        self.attribute_values.get(attribute).map(String::as_str)
    }
}

/// Content-addressed variant identity: sorted attribute-value tuple + unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantKey {
    pub attributes: Vec<(String, String)>,
    pub unit: Option<String>,
}

impl VariantKey {
    pub fn new(values: &AttributeValues, unit: Option<&str>) -> Self {
        Self {
            attributes: values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            unit: unit.map(str::to_string),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let combo = self
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("/");
        match &self.unit {
            Some(unit) => write!(f, "[{combo}] @ {unit}"),
            None => write!(f, "[{combo}]"),
        }
    }
}

/// Editable variant field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum VariantField {
    /// Auto-generated; edits are rejected
    Code(String),
    Barcode(String),
    CostPrice(f64),
    Price(f64),
    Stock(i64),
}

impl VariantField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code(_) => "code",
            Self::Barcode(_) => "barcode",
            Self::CostPrice(_) => "cost_price",
            Self::Price(_) => "price",
            Self::Stock(_) => "stock",
        }
    }
}

/// Product-level defaults used to seed new variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantDefaults {
    pub cost_price: f64,
    pub price: f64,
    pub stock: i64,
}

/// Everything the product form persists about its variants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantProperties {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl VariantProperties {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty() && self.attributes.is_empty() && self.variants.is_empty()
    }

    pub fn base_unit(&self) -> Option<&Unit> {
        self.units.iter().find(|u| u.is_base)
    }
}
