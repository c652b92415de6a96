//! Attribute / unit registry
//!
//! Holds the product form's attribute and unit definitions and enforces their
//! own invariants (unique names, exactly one base unit). Variant regeneration
//! is the engine's job.

use super::{VariantError, VariantResult};
use crate::utils::validation::{MAX_NAME_LEN, validate_price, validate_short_text};
use shared::models::{Attribute, AttributeId, Unit, UnitId, UnitInput, Vertical};

// =============================================================================
// Attributes
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    attributes: Vec<Attribute>,
    next_id: AttributeId,
}

impl AttributeRegistry {
    pub fn from_attributes(attributes: Vec<Attribute>) -> Self {
        let next_id = attributes.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Self {
            attributes,
            next_id,
        }
    }

    pub fn all(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, id: AttributeId) -> VariantResult<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.id == id)
            .ok_or(VariantError::AttributeNotFound(id))
    }

    pub fn get_mut(&mut self, id: AttributeId) -> VariantResult<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(VariantError::AttributeNotFound(id))
    }

    /// Add an attribute; an empty name is allowed until values are added
    pub fn add(&mut self, name: &str, vertical: Vertical) -> VariantResult<AttributeId> {
        let name = name.trim();
        if !name.is_empty() {
            self.check_name(name, None)?;
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.attributes.push(Attribute::new(
            id,
            name,
            !name.is_empty() && !vertical.is_preset(name),
        ));
        Ok(id)
    }

    /// Rename; returns the previous name
    pub fn rename(
        &mut self,
        id: AttributeId,
        name: &str,
        vertical: Vertical,
    ) -> VariantResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VariantError::AttributeNameRequired(id));
        }
        self.get(id)?;
        self.check_name(name, Some(id))?;
        let attr = self.get_mut(id)?;
        attr.is_custom = !vertical.is_preset(name);
        Ok(std::mem::replace(&mut attr.name, name.to_string()))
    }

    pub fn remove(&mut self, id: AttributeId) -> VariantResult<Attribute> {
        let idx = self
            .attributes
            .iter()
            .position(|a| a.id == id)
            .ok_or(VariantError::AttributeNotFound(id))?;
        Ok(self.attributes.remove(idx))
    }

    /// Attributes that take part in expansion (named, with values)
    pub fn expandable(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.has_name() && !a.values.is_empty())
    }

    fn check_name(&self, name: &str, except: Option<AttributeId>) -> VariantResult<()> {
        let taken = self
            .attributes
            .iter()
            .any(|a| Some(a.id) != except && a.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(VariantError::DuplicateAttributeName(name.to_string()));
        }
        Ok(())
    }
}

/// Trim and check a value before it is added to an attribute
pub fn normalize_value(value: &str) -> VariantResult<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(VariantError::EmptyValue);
    }
    validate_short_text(value, "attribute value")?;
    Ok(value)
}

// =============================================================================
// Units
// =============================================================================

/// Unit set with exactly one base unit (when non-empty)
#[derive(Debug, Clone, Default)]
pub struct UnitSet {
    units: Vec<Unit>,
    next_id: UnitId,
}

impl UnitSet {
    pub fn from_units(units: Vec<Unit>) -> Self {
        let next_id = units.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let mut set = Self { units, next_id };
        set.ensure_base();
        set
    }

    pub fn all(&self) -> &[Unit] {
        &self.units
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn base(&self) -> Option<&Unit> {
        self.units.iter().find(|u| u.is_base)
    }

    pub fn get(&self, id: UnitId) -> VariantResult<&Unit> {
        self.units
            .iter()
            .find(|u| u.id == id)
            .ok_or(VariantError::UnitNotFound(id))
    }

    /// Create or update a unit
    ///
    /// - the first unit is always base
    /// - `is_base = true` on another unit moves the base there and rescales
    ///   every conversion so the new base is 1
    /// - the current base cannot be demoted by an update
    /// - non-base conversions must be finite, > 0 and != 1
    pub fn upsert(&mut self, input: UnitInput) -> VariantResult<UnitId> {
        let name = input.name.trim().to_string();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(VariantError::UnitNameRequired);
        }
        let existing = match input.id {
            Some(id) => Some(self.get(id)?.clone()),
            None => None,
        };
        let id = existing.as_ref().map(|u| u.id);
        if self
            .units
            .iter()
            .any(|u| Some(u.id) != id && u.name.eq_ignore_ascii_case(&name))
        {
            return Err(VariantError::DuplicateUnitName(name));
        }
        if let Some(price) = input.price {
            validate_price(price, "unit price")?;
        }

        let was_base = existing.as_ref().is_some_and(|u| u.is_base);
        let becomes_base = was_base || input.is_base || self.units.is_empty();
        let conversion = if becomes_base {
            1.0
        } else {
            input.conversion_to_base
        };
        if !conversion.is_finite() || conversion <= 0.0 || (!becomes_base && conversion == 1.0) {
            return Err(VariantError::InvalidConversion {
                unit: name,
                value: input.conversion_to_base,
            });
        }

        // Moving the base: every other conversion is re-expressed in the new base.
        let rebase_factor = if becomes_base && !was_base && !self.units.is_empty() {
            let factor = input.conversion_to_base;
            if !factor.is_finite() || factor <= 0.0 {
                return Err(VariantError::InvalidConversion {
                    unit: name,
                    value: factor,
                });
            }
            let collides = self
                .units
                .iter()
                .any(|u| Some(u.id) != id && u.conversion_to_base / factor == 1.0);
            if collides {
                return Err(VariantError::InvalidConversion {
                    unit: name,
                    value: factor,
                });
            }
            Some(factor)
        } else {
            None
        };

        if let Some(factor) = rebase_factor {
            for unit in self.units.iter_mut() {
                unit.conversion_to_base /= factor;
                unit.is_base = false;
            }
        }

        let unit = Unit {
            id: id.unwrap_or_else(|| self.allocate_id()),
            name,
            conversion_to_base: conversion,
            is_base: becomes_base,
            price: input.price,
            allows_direct_sale: input.allows_direct_sale,
        };
        let unit_id = unit.id;
        match self.units.iter_mut().find(|u| u.id == unit_id) {
            Some(slot) => *slot = unit,
            None => self.units.push(unit),
        }
        Ok(unit_id)
    }

    /// Remove a unit, promoting the first remaining unit when the base goes
    pub fn remove(&mut self, id: UnitId) -> VariantResult<Unit> {
        let idx = self
            .units
            .iter()
            .position(|u| u.id == id)
            .ok_or(VariantError::UnitNotFound(id))?;
        if self.units[idx].is_base && self.units.len() == 1 {
            return Err(VariantError::SoleBaseUnit(self.units[idx].name.clone()));
        }
        let removed = self.units.remove(idx);
        if removed.is_base {
            self.ensure_base();
        }
        Ok(removed)
    }

    fn ensure_base(&mut self) {
        if self.units.is_empty() {
            return;
        }
        if self.units.iter().filter(|u| u.is_base).count() != 1 {
            for unit in self.units.iter_mut() {
                unit.is_base = false;
            }
            self.units[0].is_base = true;
        }
        for unit in self.units.iter_mut().filter(|u| u.is_base) {
            unit.conversion_to_base = 1.0;
        }
    }

    fn allocate_id(&mut self) -> UnitId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_unit_becomes_base() {
        let mut units = UnitSet::default();
        let id = units.upsert(UnitInput::new("Piece", 3.0)).unwrap();
        let piece = units.get(id).unwrap();
        assert!(piece.is_base);
        assert_eq!(piece.conversion_to_base, 1.0);
    }

    #[test]
    fn test_non_base_conversion_rules() {
        let mut units = UnitSet::default();
        units.upsert(UnitInput::new("Piece", 1.0)).unwrap();
        assert!(matches!(
            units.upsert(UnitInput::new("Each", 1.0)),
            Err(VariantError::InvalidConversion { .. })
        ));
        assert!(matches!(
            units.upsert(UnitInput::new("Box", 0.0)),
            Err(VariantError::InvalidConversion { .. })
        ));
        assert!(matches!(
            units.upsert(UnitInput::new("piece", 6.0)),
            Err(VariantError::DuplicateUnitName(_))
        ));
        assert!(matches!(
            units.upsert(UnitInput::new("  ", 6.0)),
            Err(VariantError::UnitNameRequired)
        ));
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_update_keeps_base() {
        let mut units = UnitSet::default();
        let piece = units.upsert(UnitInput::new("Piece", 1.0)).unwrap();
        units
            .upsert(UnitInput::new("Pc", 1.0).for_unit(piece))
            .unwrap();
        let unit = units.get(piece).unwrap();
        assert_eq!(unit.name, "Pc");
        assert!(unit.is_base);
    }

    #[test]
    fn test_moving_base_rescales_conversions() {
        let mut units = UnitSet::default();
        let piece = units.upsert(UnitInput::new("Piece", 1.0)).unwrap();
        let pack = units.upsert(UnitInput::new("Pack", 6.0)).unwrap();
        let case = units.upsert(UnitInput::new("Case", 24.0)).unwrap();

        units
            .upsert(UnitInput::new("Pack", 6.0).for_unit(pack).as_base())
            .unwrap();

        assert!(units.get(pack).unwrap().is_base);
        assert_eq!(units.get(pack).unwrap().conversion_to_base, 1.0);
        assert!(!units.get(piece).unwrap().is_base);
        assert!((units.get(piece).unwrap().conversion_to_base - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(units.get(case).unwrap().conversion_to_base, 4.0);
        assert_eq!(units.all().iter().filter(|u| u.is_base).count(), 1);
    }

    #[test]
    fn test_remove_base_promotes_first_remaining() {
        let mut units = UnitSet::default();
        let piece = units.upsert(UnitInput::new("Piece", 1.0)).unwrap();
        let box_id = units.upsert(UnitInput::new("Box", 12.0)).unwrap();
        units.upsert(UnitInput::new("Carton", 144.0)).unwrap();

        units.remove(piece).unwrap();
        let promoted = units.get(box_id).unwrap();
        assert!(promoted.is_base);
        assert_eq!(promoted.conversion_to_base, 1.0);
        assert_eq!(units.all().iter().filter(|u| u.is_base).count(), 1);
    }

    #[test]
    fn test_remove_sole_base_is_rejected() {
        let mut units = UnitSet::default();
        let piece = units.upsert(UnitInput::new("Piece", 1.0)).unwrap();
        assert_eq!(
            units.remove(piece),
            Err(VariantError::SoleBaseUnit("Piece".into()))
        );
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn test_attribute_names_are_unique() {
        let mut attrs = AttributeRegistry::default();
        let color = attrs.add("Color", Vertical::Fashion).unwrap();
        assert!(!attrs.get(color).unwrap().is_custom);
        assert!(matches!(
            attrs.add("color", Vertical::Fashion),
            Err(VariantError::DuplicateAttributeName(_))
        ));
        let blank = attrs.add("", Vertical::Fashion).unwrap();
        let other_blank = attrs.add("", Vertical::Fashion).unwrap();
        assert_ne!(blank, other_blank);

        let old = attrs.rename(blank, "Fit", Vertical::Fashion).unwrap();
        assert_eq!(old, "");
        assert!(attrs.get(blank).unwrap().is_custom);
        assert!(matches!(
            attrs.rename(other_blank, "FIT", Vertical::Fashion),
            Err(VariantError::DuplicateAttributeName(_))
        ));
        assert!(matches!(
            attrs.rename(other_blank, " ", Vertical::Fashion),
            Err(VariantError::AttributeNameRequired(_))
        ));
    }
}
