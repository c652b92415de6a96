//! Variant table view model
//!
//! Rows are addressed by `row_id` for rendering; edits resolve the row to
//! its [`VariantKey`] and go through the engine.

use super::engine::VariantEngine;
use super::{VariantError, VariantResult};
use crate::utils::money::{line_value, to_f64, units_available};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{AttributeValues, Variant, VariantField, VariantKey};
use std::collections::HashMap;

/// One rendered row of the variant grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRow {
    pub row_id: u64,
    /// Values in attribute order; `None` where the row has no value for that column
    pub values: Vec<Option<String>>,
    pub unit_name: Option<String>,
    pub conversion_to_base: f64,
    pub is_base_unit: bool,
    pub code: String,
    pub barcode: String,
    pub cost_price: f64,
    pub price: f64,
    pub stock: i64,
    /// Base rows: own stock. Other rows: whole packages the base stock fills.
    pub available: i64,
}

/// Stock value over base-unit rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TableTotals {
    pub rows: usize,
    pub stock: i64,
    pub value_at_cost: f64,
    pub value_at_price: f64,
}

/// Column headers: one per named attribute, then the fixed columns
pub fn columns(engine: &VariantEngine) -> Vec<String> {
    engine
        .attributes()
        .iter()
        .filter(|a| a.has_name())
        .map(|a| a.name.clone())
        .chain(
            ["Unit", "Code", "Barcode", "Cost", "Price", "Stock", "Available"]
                .into_iter()
                .map(String::from),
        )
        .collect()
}

fn base_stock_by_combo(variants: &[Variant]) -> HashMap<&AttributeValues, i64> {
    let mut stock = HashMap::new();
    for v in variants.iter().filter(|v| v.is_base_unit()) {
        stock.entry(&v.attribute_values).or_insert(v.stock);
    }
    stock
}

pub fn build_rows(engine: &VariantEngine) -> Vec<VariantRow> {
    let variants = engine.variants();
    let base_stock = base_stock_by_combo(variants);
    let names: Vec<&str> = engine
        .attributes()
        .iter()
        .filter(|a| a.has_name())
        .map(|a| a.name.as_str())
        .collect();

    variants
        .iter()
        .map(|v| {
            let is_base_unit = v.is_base_unit();
            let available = if is_base_unit {
                v.stock
            } else {
                let base = base_stock.get(&v.attribute_values).copied().unwrap_or(0);
                units_available(base, v.conversion_to_base)
            };
            VariantRow {
                row_id: v.row_id,
                values: names
                    .iter()
                    .map(|n| v.value_of(n).map(str::to_string))
                    .collect(),
                unit_name: v.unit_name.clone(),
                conversion_to_base: v.conversion_to_base,
                is_base_unit,
                code: v.code.clone(),
                barcode: v.barcode.clone(),
                cost_price: v.cost_price,
                price: v.price,
                stock: v.stock,
                available,
            }
        })
        .collect()
}

pub fn totals(engine: &VariantEngine) -> TableTotals {
    let mut stock = 0i64;
    let mut at_cost = Decimal::ZERO;
    let mut at_price = Decimal::ZERO;
    for v in engine.variants().iter().filter(|v| v.is_base_unit()) {
        stock += v.stock;
        at_cost += line_value(v.stock, v.cost_price);
        at_price += line_value(v.stock, v.price);
    }
    TableTotals {
        rows: engine.variants().len(),
        stock,
        value_at_cost: to_f64(at_cost),
        value_at_price: to_f64(at_price),
    }
}

/// Grid editor borrowing the engine for one editing pass
pub struct VariantTableEditor<'a> {
    engine: &'a mut VariantEngine,
}

impl<'a> VariantTableEditor<'a> {
    pub fn new(engine: &'a mut VariantEngine) -> Self {
        Self { engine }
    }

    pub fn columns(&self) -> Vec<String> {
        columns(&*self.engine)
    }

    pub fn rows(&self) -> Vec<VariantRow> {
        build_rows(&*self.engine)
    }

    pub fn totals(&self) -> TableTotals {
        totals(&*self.engine)
    }

    pub fn set(&mut self, row_id: u64, field: VariantField) -> VariantResult<()> {
        let key = self.resolve(row_id)?;
        self.engine.update_variant_field(&key, field)
    }

    pub fn apply_price_to_all(&mut self) -> usize {
        self.engine.apply_price_to_all()
    }

    pub fn delete(&mut self, row_id: u64) -> VariantResult<Variant> {
        let key = self.resolve(row_id)?;
        self.engine.delete_variant(&key)
    }

    fn resolve(&self, row_id: u64) -> VariantResult<VariantKey> {
        self.engine
            .key_for_row(row_id)
            .ok_or(VariantError::RowNotFound(row_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{UnitInput, VariantDefaults};

    fn engine() -> VariantEngine {
        let mut engine = VariantEngine::new(
            "TEE",
            VariantDefaults {
                cost_price: 40.0,
                price: 100.0,
                stock: 50,
            },
        );
        engine.add_or_update_unit(UnitInput::new("Piece", 1.0)).unwrap();
        engine
            .add_or_update_unit(UnitInput::new("Box", 12.0))
            .unwrap();
        let color = engine.add_attribute("Color").unwrap();
        engine.add_attribute_value(color, "Red").unwrap();
        engine
    }

    #[test]
    fn test_available_derives_from_base_stock() {
        let engine = engine();
        let rows = build_rows(&engine);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].available, 50);
        assert!(rows[0].is_base_unit);
        // floor(50 / 12)
        assert_eq!(rows[1].available, 4);
        assert_eq!(rows[1].stock, 0);
        assert_eq!(rows[0].values, vec![Some("Red".to_string())]);
    }

    #[test]
    fn test_totals_count_base_rows_only() {
        let engine = engine();
        let t = totals(&engine);
        assert_eq!(t.rows, 2);
        assert_eq!(t.stock, 50);
        assert_eq!(t.value_at_cost, 2000.0);
        assert_eq!(t.value_at_price, 5000.0);
    }

    #[test]
    fn test_columns_follow_attribute_order() {
        let mut engine = engine();
        engine.add_attribute("Size").unwrap();
        let cols = columns(&engine);
        assert_eq!(&cols[..2], &["Color".to_string(), "Size".to_string()]);
        assert_eq!(cols.last().map(String::as_str), Some("Available"));
    }

    #[test]
    fn test_editor_edits_by_row_id() {
        let mut engine = engine();
        let mut editor = VariantTableEditor::new(&mut engine);
        let rows = editor.rows();
        let (piece, boxed) = (rows[0].row_id, rows[1].row_id);

        editor.set(piece, VariantField::Stock(120)).unwrap();
        editor.set(boxed, VariantField::Price(1100.0)).unwrap();
        let rows = editor.rows();
        assert_eq!(rows[0].stock, 120);
        assert_eq!(rows[1].available, 10);
        assert_eq!(rows[1].price, 1100.0);

        assert_eq!(
            editor.set(boxed, VariantField::Stock(3)),
            Err(VariantError::StockOnNonBaseUnit(engine_key(&rows[1])))
        );
    }

    fn engine_key(row: &VariantRow) -> VariantKey {
        let values = AttributeValues::from([(
            "Color".to_string(),
            row.values[0].clone().unwrap_or_default(),
        )]);
        VariantKey::new(&values, row.unit_name.as_deref())
    }

    #[test]
    fn test_editor_unknown_row() {
        let mut engine = engine();
        let mut editor = VariantTableEditor::new(&mut engine);
        assert_eq!(editor.delete(999), Err(VariantError::RowNotFound(999)));
        assert_eq!(
            editor.set(999, VariantField::Price(1.0)),
            Err(VariantError::RowNotFound(999))
        );
    }

    #[test]
    fn test_editor_delete_and_apply_price() {
        let mut engine = engine();
        let mut editor = VariantTableEditor::new(&mut engine);
        let rows = editor.rows();
        editor.set(rows[1].row_id, VariantField::Price(999.0)).unwrap();
        assert_eq!(editor.apply_price_to_all(), 2);
        assert!(editor.rows().iter().all(|r| r.price == 100.0));

        let removed = editor.delete(rows[1].row_id).unwrap();
        assert_eq!(removed.unit_name.as_deref(), Some("Box"));
        assert_eq!(editor.rows().len(), 1);
        assert_eq!(engine.variants().len(), 1);
    }
}
