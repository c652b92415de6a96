//! Schema migration - v1 记录升级为 v2
//!
//! `upgrade` is pure and total: every legacy record, however sparse, maps to
//! a valid current [`Product`].
//!
//! | v2 field | v1 fallback chain |
//! |----------|-------------------|
//! | `price` | `price` → `sale_price` → 0 |
//! | `cost_price` | `cost` → `cost_price` → 0 |
//! | `stock` | `stock` → `quantity` → 0 |
//! | `vertical` | lenient `business_type` → fashion |
//! | `code_prefix` | `sku` |

pub mod seed;

use crate::variants::variant_code;
use shared::models::{
    Attribute, AttributeValues, LegacyProduct, LegacyVariant, Product, SavedProduct,
    StoredProduct, Unit, Variant, VariantKey, VariantProperties, Vertical,
};
use std::collections::HashSet;

pub use seed::{demo_catalog, seed_demo_catalog};

/// Upgrade a v1 record to the current schema
pub fn upgrade(legacy: LegacyProduct) -> Product {
    let vertical = legacy
        .business_type
        .as_deref()
        .and_then(Vertical::parse_lenient)
        .unwrap_or_default();
    let cost_price = amount(legacy.cost.or(legacy.cost_price));
    let price = amount(legacy.price.or(legacy.sale_price));
    let stock = quantity(legacy.stock.or(legacy.quantity));
    let code_prefix = clean(legacy.sku.as_deref()).unwrap_or_default();

    let legacy_variants = legacy.variants.unwrap_or_default();
    // v1 有单一单位; 没有时取第一个带单位的 variant
    let unit_name = clean(legacy.unit.as_deref())
        .or_else(|| legacy_variants.iter().find_map(|v| clean(v.unit.as_deref())));
    let units: Vec<Unit> = unit_name
        .iter()
        .map(|name| Unit {
            id: 1,
            name: name.clone(),
            conversion_to_base: 1.0,
            is_base: true,
            price: None,
            allows_direct_sale: true,
        })
        .collect();

    let attributes = collect_attributes(&legacy_variants, vertical);
    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    for lv in &legacy_variants {
        let values = attribute_values(lv);
        if !seen.insert(VariantKey::new(&values, unit_name.as_deref())) {
            continue;
        }
        let row_id = variants.len() as u64 + 1;
        variants.push(Variant {
            row_id,
            code: variant_code(&code_prefix, &attributes, &values, unit_name.as_deref()),
            attribute_values: values,
            unit_name: unit_name.clone(),
            conversion_to_base: 1.0,
            barcode: clean(lv.barcode.as_deref()).unwrap_or_default(),
            cost_price: lv.cost.map_or(cost_price, |c| amount(Some(c))),
            price: lv.price.map_or(price, |p| amount(Some(p))),
            stock: quantity(lv.stock),
        });
    }
    for v in variants.iter_mut().filter(|v| !v.is_base_unit()) {
        v.stock = 0;
    }

    Product {
        name: clean(legacy.name.as_deref()).unwrap_or_default(),
        category: clean(legacy.category.as_deref()).unwrap_or_default(),
        code_prefix,
        vertical,
        description: clean(legacy.description.as_deref()),
        is_active: legacy.is_active.unwrap_or(true),
        cost_price,
        price,
        stock,
        variant_properties: VariantProperties {
            units,
            attributes,
            variants,
        },
    }
}

/// Upgrade a v1 record stored under `id`
///
/// Timestamps fall back to each other, then to 0.
pub fn upgrade_record(id: i64, legacy: LegacyProduct) -> SavedProduct {
    let created_at = legacy.created_at.or(legacy.updated_at).unwrap_or(0);
    let updated_at = legacy.updated_at.unwrap_or(created_at);
    let created_by = clean(legacy.created_by.as_deref());
    SavedProduct {
        id,
        product: upgrade(legacy),
        created_by,
        created_at,
        updated_at,
    }
}

/// Read any stored record as the current schema
pub fn resolve(id: i64, stored: StoredProduct) -> SavedProduct {
    match stored {
        StoredProduct::Legacy(legacy) => upgrade_record(id, legacy),
        StoredProduct::Current(saved) => saved,
    }
}

fn collect_attributes(variants: &[LegacyVariant], vertical: Vertical) -> Vec<Attribute> {
    let mut attributes: Vec<Attribute> = Vec::new();
    for lv in variants {
        for (name, value) in attribute_values(lv) {
            let idx = match attributes.iter().position(|a| a.name == name) {
                Some(idx) => idx,
                None => {
                    let id = attributes.len() as i64 + 1;
                    let is_custom = !vertical.is_preset(&name);
                    attributes.push(Attribute::new(id, name, is_custom));
                    attributes.len() - 1
                }
            };
            let attr = &mut attributes[idx];
            if !attr.has_value(&value) {
                attr.values.push(value);
            }
        }
    }
    attributes
}

/// Trimmed attribute map without blank keys or values
fn attribute_values(lv: &LegacyVariant) -> AttributeValues {
    lv.attributes
        .iter()
        .flatten()
        .filter_map(|(k, v)| Some((clean(Some(k.as_str()))?, clean(Some(v.as_str()))?)))
        .collect()
}

fn clean(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn amount(raw: Option<f64>) -> f64 {
    raw.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

fn quantity(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0).max(0)
}
