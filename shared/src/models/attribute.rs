//! Attribute Model

use serde::{Deserialize, Serialize};

/// Attribute ID (unique within one product form)
pub type AttributeId = i64;

/// Product dimension (e.g. Color: Red/Blue)
///
/// `name` doubles as the key in every variant's `attribute_values`, so it is
/// unique within a product. It may be empty while the operator has not picked
/// one yet; values can only be added once it is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    /// false = picked from the vertical's presets
    #[serde(default)]
    pub is_custom: bool,
    /// Selectable values, in the order the operator added them
    #[serde(default)]
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new(id: AttributeId, name: impl Into<String>, is_custom: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_custom,
            values: Vec::new(),
        }
    }

    /// Name chosen and non-blank
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}
