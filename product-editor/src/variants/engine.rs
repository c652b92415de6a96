//! Variant Expansion Engine
//!
//! Keeps the variant list a function of (attributes, units). Every edit is
//! validated before anything is mutated, so a rejected operation leaves the
//! engine exactly as it was.
//!
//! # Regeneration rules
//!
//! | Trigger | Effect |
//! |---------|--------|
//! | first value, no variants | one row per unit for `{name: value}` |
//! | value of a represented attribute | other combinations × `{name: value}` × units appended |
//! | first value of a new attribute | every existing row gains `{name: value}` |
//! | unit added/updated/deleted | represented combinations re-crossed with the new unit list |
//!
//! Rows of a regenerated combination take their prices from the first prior
//! row of that combination in list order and their stock from its prior base
//! row. Base-unit rows get that stock, other rows `stock = 0` and the unit's
//! own price if it has one. A renamed unit keeps its rows' ids and barcodes.

use super::code::variant_code;
use super::expansion::cartesian;
use super::registry::{AttributeRegistry, UnitSet, normalize_value};
use super::{VariantError, VariantResult};
use crate::utils::validation::{validate_price, validate_short_text, validate_stock};
use shared::models::{
    Attribute, AttributeId, AttributeValues, Unit, UnitId, UnitInput, Variant, VariantDefaults,
    VariantField, VariantKey, VariantProperties, Vertical,
};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Values a combination's new rows start from
#[derive(Debug, Clone, Copy)]
struct Seed {
    cost_price: f64,
    price: f64,
    stock: i64,
}

impl From<VariantDefaults> for Seed {
    fn from(d: VariantDefaults) -> Self {
        Self {
            cost_price: d.cost_price,
            price: d.price,
            stock: d.stock,
        }
    }
}

impl From<&Variant> for Seed {
    fn from(v: &Variant) -> Self {
        Self {
            cost_price: v.cost_price,
            price: v.price,
            stock: v.stock,
        }
    }
}

/// What a row keeps when its key survives regeneration
#[derive(Debug, Clone)]
struct Kept {
    row_id: u64,
    barcode: String,
}

/// One seed per distinct combination, in first-seen order
///
/// Prices come from the first row of the combination (first match wins),
/// stock from its base-unit row. After the base moves to a later unit the
/// first row is a demoted one with `stock = 0`.
fn combination_seeds(rows: &[Variant]) -> Vec<(AttributeValues, Seed)> {
    let mut index: HashMap<AttributeValues, (usize, bool)> = HashMap::new();
    let mut seeds: Vec<(AttributeValues, Seed)> = Vec::new();
    for row in rows {
        match index.entry(row.attribute_values.clone()) {
            Entry::Vacant(slot) => {
                slot.insert((seeds.len(), row.is_base_unit()));
                seeds.push((row.attribute_values.clone(), Seed::from(row)));
            }
            Entry::Occupied(mut slot) => {
                let (idx, from_base) = slot.get_mut();
                if !*from_base && row.is_base_unit() {
                    seeds[*idx].1.stock = row.stock;
                    *from_base = true;
                }
            }
        }
    }
    seeds
}

fn kept_rows(rows: &[Variant]) -> HashMap<VariantKey, Kept> {
    let mut kept = HashMap::with_capacity(rows.len());
    for row in rows {
        kept.entry(row.key()).or_insert_with(|| Kept {
            row_id: row.row_id,
            barcode: row.barcode.clone(),
        });
    }
    kept
}

#[derive(Debug, Clone)]
pub struct VariantEngine {
    vertical: Vertical,
    code_prefix: String,
    defaults: VariantDefaults,
    attributes: AttributeRegistry,
    units: UnitSet,
    variants: Vec<Variant>,
    next_row_id: u64,
}

impl Default for VariantEngine {
    fn default() -> Self {
        Self::new("", VariantDefaults::default())
    }
}

impl VariantEngine {
    pub fn new(code_prefix: impl Into<String>, defaults: VariantDefaults) -> Self {
        Self {
            vertical: Vertical::default(),
            code_prefix: code_prefix.into(),
            defaults,
            attributes: AttributeRegistry::default(),
            units: UnitSet::default(),
            variants: Vec::new(),
            next_row_id: 1,
        }
    }

    pub fn with_vertical(mut self, vertical: Vertical) -> Self {
        self.vertical = vertical;
        self
    }

    /// Resume editing a saved product
    pub fn from_properties(
        properties: VariantProperties,
        code_prefix: impl Into<String>,
        defaults: VariantDefaults,
        vertical: Vertical,
    ) -> Self {
        let next_row_id = properties
            .variants
            .iter()
            .map(|v| v.row_id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            vertical,
            code_prefix: code_prefix.into(),
            defaults,
            attributes: AttributeRegistry::from_attributes(properties.attributes),
            units: UnitSet::from_units(properties.units),
            variants: properties.variants,
            next_row_id,
        }
    }

    // ========== Accessors ==========

    pub fn vertical(&self) -> Vertical {
        self.vertical
    }

    pub fn code_prefix(&self) -> &str {
        &self.code_prefix
    }

    pub fn defaults(&self) -> VariantDefaults {
        self.defaults
    }

    pub fn attributes(&self) -> &[Attribute] {
        self.attributes.all()
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(id).ok()
    }

    pub fn units(&self) -> &[Unit] {
        self.units.all()
    }

    pub fn base_unit(&self) -> Option<&Unit> {
        self.units.base()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, key: &VariantKey) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.key() == key)
    }

    /// Resolve a rendered row back to its identity
    pub fn key_for_row(&self, row_id: u64) -> Option<VariantKey> {
        self.variants
            .iter()
            .find(|v| v.row_id == row_id)
            .map(Variant::key)
    }

    pub fn to_properties(&self) -> VariantProperties {
        VariantProperties {
            units: self.units.all().to_vec(),
            attributes: self.attributes.all().to_vec(),
            variants: self.variants.clone(),
        }
    }

    // ========== Product-level settings ==========

    /// Defaults only seed rows created from now on
    pub fn set_defaults(&mut self, defaults: VariantDefaults) -> VariantResult<()> {
        validate_price(defaults.cost_price, "cost_price")?;
        validate_price(defaults.price, "price")?;
        validate_stock(defaults.stock)?;
        self.defaults = defaults;
        Ok(())
    }

    pub fn set_code_prefix(&mut self, prefix: impl Into<String>) {
        self.code_prefix = prefix.into();
        self.refresh_codes();
    }

    // ========== Attributes ==========

    pub fn add_attribute(&mut self, name: &str) -> VariantResult<AttributeId> {
        self.attributes.add(name, self.vertical)
    }

    /// Rename an attribute and the matching key on every row
    pub fn rename_attribute(&mut self, attribute_id: AttributeId, name: &str) -> VariantResult<()> {
        let vertical = self.vertical;
        let old = self.attributes.rename(attribute_id, name, vertical)?;
        let new = self.attributes.get(attribute_id)?.name.clone();
        if old.is_empty() || old == new {
            return Ok(());
        }
        for row in self.variants.iter_mut() {
            if let Some(value) = row.attribute_values.remove(&old) {
                row.attribute_values.insert(new.clone(), value);
            }
        }
        self.refresh_codes();
        Ok(())
    }

    pub fn add_attribute_value(&mut self, attribute_id: AttributeId, value: &str) -> VariantResult<()> {
        let value = normalize_value(value)?.to_string();
        let attr = self.attributes.get(attribute_id)?;
        if !attr.has_name() {
            return Err(VariantError::AttributeNameRequired(attribute_id));
        }
        if attr.has_value(&value) {
            return Err(VariantError::DuplicateValue {
                attribute: attr.name.clone(),
                value,
            });
        }
        let name = attr.name.clone();
        self.attributes.get_mut(attribute_id)?.values.push(value.clone());

        let seed = Seed::from(self.defaults);
        let no_reuse = HashMap::new();
        if self.variants.is_empty() {
            let combo = AttributeValues::from([(name.clone(), value.clone())]);
            let rows = self.rows_for(&combo, seed, &no_reuse);
            self.variants.extend(rows);
        } else if self.is_represented(&name) {
            let existing: HashSet<VariantKey> = self.variants.iter().map(Variant::key).collect();
            for mut combo in self.combinations_without(&name) {
                combo.insert(name.clone(), value.clone());
                let rows = self.rows_for(&combo, seed, &no_reuse);
                self.variants
                    .extend(rows.into_iter().filter(|r| !existing.contains(&r.key())));
            }
        } else {
            for row in self.variants.iter_mut() {
                row.attribute_values.insert(name.clone(), value.clone());
            }
            self.refresh_codes();
        }

        tracing::debug!(
            attribute = %name,
            value = %value,
            variants = self.variants.len(),
            "Attribute value added"
        );
        Ok(())
    }

    /// Remove a value and every row carrying it; returns the rows removed
    pub fn remove_attribute_value(
        &mut self,
        attribute_id: AttributeId,
        value: &str,
    ) -> VariantResult<usize> {
        let value = value.trim();
        let attr = self.attributes.get_mut(attribute_id)?;
        attr.values.retain(|v| v != value);
        let name = attr.name.clone();

        let before = self.variants.len();
        self.variants.retain(|v| v.value_of(&name) != Some(value));
        let removed = before - self.variants.len();
        tracing::debug!(attribute = %name, value = %value, removed, "Attribute value removed");
        Ok(removed)
    }

    /// Delete an attribute and every row keyed by its name; returns the rows removed
    pub fn delete_attribute(&mut self, attribute_id: AttributeId) -> VariantResult<usize> {
        let attr = self.attributes.remove(attribute_id)?;
        if !attr.has_name() {
            return Ok(0);
        }
        let before = self.variants.len();
        self.variants
            .retain(|v| !v.attribute_values.contains_key(&attr.name));
        Ok(before - self.variants.len())
    }

    // ========== Units ==========

    pub fn add_or_update_unit(&mut self, unit: UnitInput) -> VariantResult<UnitId> {
        let previous_name = unit
            .id
            .and_then(|id| self.units.all().iter().find(|u| u.id == id))
            .map(|u| u.name.clone());
        let id = self.units.upsert(unit)?;
        if let Some(old) = previous_name {
            self.rename_unit_rows(&old, id);
        }
        self.regenerate_for_units();
        Ok(id)
    }

    /// Move rows of a renamed unit to its new name before regeneration
    fn rename_unit_rows(&mut self, old: &str, id: UnitId) {
        let Some(new) = self
            .units
            .all()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
        else {
            return;
        };
        if new == old {
            return;
        }
        for row in self
            .variants
            .iter_mut()
            .filter(|v| v.unit_name.as_deref() == Some(old))
        {
            row.unit_name = Some(new.clone());
        }
        tracing::debug!(from = %old, to = %new, "Unit renamed");
    }

    pub fn delete_unit(&mut self, unit_id: UnitId) -> VariantResult<Unit> {
        let removed = self.units.remove(unit_id)?;
        self.regenerate_for_units();
        Ok(removed)
    }

    /// Re-cross the represented combinations with the current unit list
    fn regenerate_for_units(&mut self) {
        let previous = std::mem::take(&mut self.variants);
        let kept = kept_rows(&previous);

        let mut combos = combination_seeds(&previous);
        if combos.is_empty() && !self.units.is_empty() && self.attributes.expandable().next().is_none()
        {
            combos.push((AttributeValues::new(), Seed::from(self.defaults)));
        }

        for (combo, seed) in &combos {
            let rows = self.rows_for(combo, *seed, &kept);
            self.variants.extend(rows);
        }
        tracing::debug!(
            combinations = combos.len(),
            units = self.units.len(),
            variants = self.variants.len(),
            "Variants regenerated for unit change"
        );
    }

    /// Full expansion of every named attribute's values × units
    ///
    /// Combinations that already had rows are seeded from them, new ones
    /// from the defaults.
    pub fn rebuild(&mut self) {
        let previous = std::mem::take(&mut self.variants);
        let kept = kept_rows(&previous);
        let seeds: HashMap<AttributeValues, Seed> =
            combination_seeds(&previous).into_iter().collect();

        let axes: Vec<(String, Vec<String>)> = self
            .attributes
            .expandable()
            .map(|a| (a.name.clone(), a.values.clone()))
            .collect();
        let combos = if axes.is_empty() {
            if self.units.is_empty() {
                Vec::new()
            } else {
                vec![AttributeValues::new()]
            }
        } else {
            cartesian(&axes)
        };

        for combo in &combos {
            let seed = seeds
                .get(combo)
                .copied()
                .unwrap_or_else(|| Seed::from(self.defaults));
            let rows = self.rows_for(combo, seed, &kept);
            self.variants.extend(rows);
        }
        tracing::debug!(variants = self.variants.len(), "Variants rebuilt");
    }

    // ========== Variant edits ==========

    pub fn update_variant_field(&mut self, key: &VariantKey, field: VariantField) -> VariantResult<()> {
        let idx = self.index_of(key)?;
        match field {
            VariantField::Code(_) => return Err(VariantError::ReadOnlyField("code")),
            VariantField::Barcode(barcode) => {
                let barcode = barcode.trim().to_string();
                validate_short_text(&barcode, "barcode")?;
                let taken = !barcode.is_empty()
                    && self
                        .variants
                        .iter()
                        .enumerate()
                        .any(|(i, v)| i != idx && v.barcode == barcode);
                if taken {
                    return Err(VariantError::DuplicateBarcode(barcode));
                }
                self.variants[idx].barcode = barcode;
            }
            VariantField::CostPrice(value) => {
                validate_price(value, "cost_price")?;
                self.variants[idx].cost_price = value;
            }
            VariantField::Price(value) => {
                validate_price(value, "price")?;
                self.variants[idx].price = value;
            }
            VariantField::Stock(value) => {
                validate_stock(value)?;
                let row = &mut self.variants[idx];
                if !row.is_base_unit() && value != 0 {
                    return Err(VariantError::StockOnNonBaseUnit(key.clone()));
                }
                row.stock = value;
            }
        }
        Ok(())
    }

    /// Copy the first row's price to every row; returns the rows touched
    pub fn apply_price_to_all(&mut self) -> usize {
        let Some(price) = self.variants.first().map(|v| v.price) else {
            return 0;
        };
        for row in self.variants.iter_mut() {
            row.price = price;
        }
        self.variants.len()
    }

    pub fn delete_variant(&mut self, key: &VariantKey) -> VariantResult<Variant> {
        let idx = self.index_of(key)?;
        Ok(self.variants.remove(idx))
    }

    // ========== Internals ==========

    fn index_of(&self, key: &VariantKey) -> VariantResult<usize> {
        self.variants
            .iter()
            .position(|v| &v.key() == key)
            .ok_or_else(|| VariantError::VariantNotFound(key.clone()))
    }

    fn is_represented(&self, attribute: &str) -> bool {
        self.variants
            .iter()
            .any(|v| v.attribute_values.contains_key(attribute))
    }

    /// Distinct combinations of the other attributes, first-seen order
    fn combinations_without(&self, attribute: &str) -> Vec<AttributeValues> {
        let mut seen = HashSet::new();
        let mut combos = Vec::new();
        for row in &self.variants {
            let mut combo = row.attribute_values.clone();
            combo.remove(attribute);
            if seen.insert(combo.clone()) {
                combos.push(combo);
            }
        }
        combos
    }

    /// One row per unit (or a single unit-less row) for a combination
    fn rows_for(
        &mut self,
        combo: &AttributeValues,
        seed: Seed,
        kept: &HashMap<VariantKey, Kept>,
    ) -> Vec<Variant> {
        let units = self.units.all().to_vec();
        if units.is_empty() {
            return vec![self.make_row(combo, None, seed, kept)];
        }
        units
            .iter()
            .map(|unit| self.make_row(combo, Some(unit), seed, kept))
            .collect()
    }

    fn make_row(
        &mut self,
        combo: &AttributeValues,
        unit: Option<&Unit>,
        seed: Seed,
        kept: &HashMap<VariantKey, Kept>,
    ) -> Variant {
        let unit_name = unit.map(|u| u.name.clone());
        let key = VariantKey::new(combo, unit_name.as_deref());
        let (row_id, barcode) = match kept.get(&key) {
            Some(k) => (k.row_id, k.barcode.clone()),
            None => (self.allocate_row_id(), String::new()),
        };
        let is_base = unit.is_none_or(|u| u.is_base);
        let price = match unit {
            Some(u) if !u.is_base => u.price.unwrap_or(seed.price),
            _ => seed.price,
        };
        Variant {
            row_id,
            code: variant_code(
                &self.code_prefix,
                self.attributes.all(),
                combo,
                unit_name.as_deref(),
            ),
            attribute_values: combo.clone(),
            unit_name,
            conversion_to_base: unit.map_or(1.0, |u| u.conversion_to_base),
            barcode,
            cost_price: seed.cost_price,
            price,
            stock: if is_base { seed.stock } else { 0 },
        }
    }

    fn allocate_row_id(&mut self) -> u64 {
        let id = self.next_row_id;
        self.next_row_id = self.next_row_id.saturating_add(1);
        id
    }

    fn refresh_codes(&mut self) {
        let attributes = self.attributes.all();
        for row in self.variants.iter_mut() {
            row.code = variant_code(
                &self.code_prefix,
                attributes,
                &row.attribute_values,
                row.unit_name.as_deref(),
            );
        }
    }
}
