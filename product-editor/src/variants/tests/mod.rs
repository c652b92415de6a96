use super::*;
use shared::models::{AttributeId, AttributeValues, UnitInput, VariantDefaults, VariantField, VariantKey};

fn defaults() -> VariantDefaults {
    VariantDefaults {
        cost_price: 40.0,
        price: 100.0,
        stock: 50,
    }
}

fn create_test_engine() -> VariantEngine {
    VariantEngine::new("TEE", defaults())
}

fn key(values: &[(&str, &str)], unit: Option<&str>) -> VariantKey {
    let values: AttributeValues = values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    VariantKey::new(&values, unit)
}

fn add_values(engine: &mut VariantEngine, attribute: AttributeId, values: &[&str]) {
    for value in values {
        engine.add_attribute_value(attribute, value).unwrap();
    }
}

// ========================================================================
// Helper: Color{Red,Blue} × [Piece(base), Box(12)], price 100, stock 50
// ========================================================================

fn red_blue_piece_box() -> (VariantEngine, AttributeId) {
    let mut engine = create_test_engine();
    engine
        .add_or_update_unit(UnitInput::new("Piece", 1.0))
        .unwrap();
    engine
        .add_or_update_unit(UnitInput::new("Box", 12.0))
        .unwrap();
    let color = engine.add_attribute("Color").unwrap();
    add_values(&mut engine, color, &["Red", "Blue"]);
    (engine, color)
}

fn keys(engine: &VariantEngine) -> Vec<VariantKey> {
    engine.variants().iter().map(|v| v.key()).collect()
}

/// No two rows share a key and every row id is distinct
fn assert_unique(engine: &VariantEngine) {
    let mut ks = keys(engine);
    ks.sort();
    ks.dedup();
    assert_eq!(ks.len(), engine.variants().len(), "duplicate variant keys");

    let mut ids: Vec<u64> = engine.variants().iter().map(|v| v.row_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), engine.variants().len(), "duplicate row ids");
}

fn assert_non_base_stock_zero(engine: &VariantEngine) {
    for v in engine.variants() {
        if !v.is_base_unit() {
            assert_eq!(v.stock, 0, "non-base row {} carries stock", v.key());
        }
    }
}

mod test_editing;
mod test_units;
