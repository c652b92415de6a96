//! Product Model
//!
//! `Product` is the current (v2) schema. Records written by older clients are
//! kept as [`LegacyProduct`] (v1) until they are upgraded; both live behind the
//! [`StoredProduct`] tag so a reader always knows which one it holds.

use super::{VariantDefaults, VariantProperties, Vertical};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current schema version written by this crate
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Product entity (current schema)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Category reference (String ID, required)
    pub category: String,
    /// Prefix for generated variant codes (e.g. "TSHIRT")
    #[serde(default)]
    pub code_prefix: String,
    #[serde(default)]
    pub vertical: Vertical,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Default cost for new variants (and the product itself when it has none)
    pub cost_price: f64,
    /// Default price for new variants
    pub price: f64,
    /// Default stock for new base-unit variants
    pub stock: i64,
    #[serde(default)]
    pub variant_properties: VariantProperties,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            code_prefix: String::new(),
            vertical: Vertical::default(),
            description: None,
            is_active: true,
            cost_price: 0.0,
            price: 0.0,
            stock: 0,
            variant_properties: VariantProperties::default(),
        }
    }

    pub fn defaults(&self) -> VariantDefaults {
        VariantDefaults {
            cost_price: self.cost_price,
            price: self.price,
            stock: self.stock,
        }
    }

    pub fn has_variants(&self) -> bool {
        !self.variant_properties.variants.is_empty()
    }
}

/// Product as returned by a store after a successful save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProduct {
    pub id: i64,
    #[serde(flatten)]
    pub product: Product,
    /// Username from the session that saved the product
    pub created_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Variant as written by v1 clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyVariant {
    #[serde(default)]
    pub attributes: Option<BTreeMap<String, String>>,
    pub unit: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub stock: Option<i64>,
}

/// Product as written by v1 clients: every field optional, several aliases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyProduct {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub business_type: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub cost: Option<f64>,
    pub cost_price: Option<f64>,
    pub stock: Option<i64>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<LegacyVariant>>,
    pub created_by: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Versioned stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema_version")]
pub enum StoredProduct {
    #[serde(rename = "1")]
    Legacy(LegacyProduct),
    #[serde(rename = "2")]
    Current(SavedProduct),
}

impl StoredProduct {
    pub fn version(&self) -> u32 {
        match self {
            Self::Legacy(_) => 1,
            Self::Current(_) => CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Product name regardless of schema
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Legacy(p) => p.name.as_deref(),
            Self::Current(p) => Some(p.product.name.as_str()),
        }
    }
}
