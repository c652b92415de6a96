//! Input validation helpers
//!
//! Centralized length/amount limits shared by the variant engine and the
//! product stores.

use crate::store::{PersistenceError, PersistenceResult};
use crate::utils::AppError;
use crate::variants::{VariantError, VariantResult};
use shared::models::{Product, VariantKey};
use std::collections::HashSet;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: product, attribute, unit
pub const MAX_NAME_LEN: usize = 200;

/// Categories, attribute values, barcodes; code prefixes are checked on save
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Maximum allowed price / cost per variant (1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum stock per base-unit variant
pub const MAX_STOCK: i64 = 1_000_000_000;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Short free text: at most [`MAX_SHORT_TEXT_LEN`] bytes
pub fn validate_short_text(value: &str, field: &'static str) -> VariantResult<()> {
    if value.len() > MAX_SHORT_TEXT_LEN {
        return Err(VariantError::TextTooLong {
            field,
            max: MAX_SHORT_TEXT_LEN,
        });
    }
    Ok(())
}

// ── Amounts ─────────────────────────────────────────────────────────

/// Price / cost: finite, non-negative, at most [`MAX_PRICE`]
pub fn validate_price(value: f64, field: &'static str) -> VariantResult<()> {
    if !value.is_finite() || !(0.0..=MAX_PRICE).contains(&value) {
        return Err(VariantError::InvalidPrice {
            field,
            value,
            max: MAX_PRICE,
        });
    }
    Ok(())
}

/// Stock: non-negative, at most [`MAX_STOCK`]
pub fn validate_stock(value: i64) -> VariantResult<()> {
    if !(0..=MAX_STOCK).contains(&value) {
        return Err(VariantError::InvalidStock {
            value,
            max: MAX_STOCK,
        });
    }
    Ok(())
}

// ── Products ────────────────────────────────────────────────────────

/// Everything a store refuses to persist
///
/// Top-level fields and defaults, exactly one base unit when units exist,
/// and per row: a known unit, valid amounts, no stock off the base unit,
/// unique keys and barcodes.
pub fn validate_product(product: &Product) -> PersistenceResult<()> {
    validate_required_text(&product.name, "name", MAX_NAME_LEN).map_err(invalid)?;
    validate_required_text(&product.category, "category", MAX_SHORT_TEXT_LEN).map_err(invalid)?;
    validate_optional_text(&product.description, "description", MAX_NOTE_LEN).map_err(invalid)?;
    validate_short_text(&product.code_prefix, "code_prefix")?;

    validate_price(product.cost_price, "cost_price")?;
    validate_price(product.price, "price")?;
    validate_stock(product.stock)?;

    let units = &product.variant_properties.units;
    if !units.is_empty() && units.iter().filter(|u| u.is_base).count() != 1 {
        return Err(PersistenceError::Validation(
            "exactly one base unit is required".into(),
        ));
    }

    let mut keys: HashSet<VariantKey> = HashSet::new();
    let mut barcodes: HashSet<&str> = HashSet::new();
    for v in &product.variant_properties.variants {
        let key = v.key();
        let unit_ok = match v.unit_name.as_deref() {
            Some(name) => units.iter().any(|u| u.name == name),
            None => units.is_empty(),
        };
        if !unit_ok {
            return Err(PersistenceError::Validation(format!(
                "variant {} uses an unknown unit",
                key
            )));
        }
        validate_price(v.cost_price, "cost_price")?;
        validate_price(v.price, "price")?;
        validate_stock(v.stock)?;
        if !v.is_base_unit() && v.stock != 0 {
            return Err(VariantError::StockOnNonBaseUnit(key).into());
        }
        if !v.barcode.is_empty() && !barcodes.insert(v.barcode.as_str()) {
            return Err(VariantError::DuplicateBarcode(v.barcode.clone()).into());
        }
        if !keys.insert(key.clone()) {
            return Err(PersistenceError::Validation(format!(
                "duplicate variant {}",
                key
            )));
        }
    }
    Ok(())
}

fn invalid(err: AppError) -> PersistenceError {
    PersistenceError::Validation(err.message)
}
