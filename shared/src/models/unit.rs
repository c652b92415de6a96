//! Unit Model

use serde::{Deserialize, Serialize};

/// Unit ID (unique within one product form)
pub type UnitId = i64;

/// Measurement / packaging level (e.g. Piece, Box of 12)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// How many base units one of this unit holds (base unit = 1)
    pub conversion_to_base: f64,
    pub is_base: bool,
    /// Own selling price; `None` = use the product/combination price
    pub price: Option<f64>,
    #[serde(default = "default_true")]
    pub allows_direct_sale: bool,
}

fn default_true() -> bool {
    true
}

/// Create/update unit payload
///
/// `id: None` creates a new unit, `Some(id)` updates the existing one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitInput {
    pub id: Option<UnitId>,
    pub name: String,
    pub conversion_to_base: f64,
    #[serde(default)]
    pub is_base: bool,
    pub price: Option<f64>,
    #[serde(default = "default_true")]
    pub allows_direct_sale: bool,
}

impl UnitInput {
    /// Payload for a new unit
    pub fn new(name: impl Into<String>, conversion_to_base: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            conversion_to_base,
            is_base: false,
            price: None,
            allows_direct_sale: true,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn as_base(mut self) -> Self {
        self.is_base = true;
        self
    }

    pub fn for_unit(mut self, id: UnitId) -> Self {
        self.id = Some(id);
        self
    }
}
