//! Business vertical

use serde::{Deserialize, Serialize};

/// Store vertical a tenant operates in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    #[default]
    Fashion,
    Spa,
    FoodBeverage,
    Convenience,
}

impl Vertical {
    pub const ALL: [Vertical; 4] = [
        Vertical::Fashion,
        Vertical::Spa,
        Vertical::FoodBeverage,
        Vertical::Convenience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fashion => "fashion",
            Self::Spa => "spa",
            Self::FoodBeverage => "food_beverage",
            Self::Convenience => "convenience",
        }
    }

    /// Preset attribute names offered by the product form (`is_custom = false`)
    pub fn preset_attributes(&self) -> &'static [&'static str] {
        match self {
            Self::Fashion => &["Color", "Size", "Material", "Style"],
            Self::Spa => &["Duration", "Therapist Level", "Package"],
            Self::FoodBeverage => &["Size", "Temperature", "Sugar Level", "Ice Level"],
            Self::Convenience => &["Flavor", "Volume", "Pack Size"],
        }
    }

    pub fn is_preset(&self, attribute_name: &str) -> bool {
        self.preset_attributes()
            .iter()
            .any(|p| p.eq_ignore_ascii_case(attribute_name.trim()))
    }

    /// Lenient parse for legacy records (`"f&b"`, `"restaurant"`, ...)
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fashion" | "retail" | "clothing" => Some(Self::Fashion),
            "spa" | "salon" | "beauty" => Some(Self::Spa),
            "food_beverage" | "fnb" | "f&b" | "restaurant" | "cafe" => Some(Self::FoodBeverage),
            "convenience" | "grocery" | "mart" => Some(Self::Convenience),
            _ => None,
        }
    }
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
