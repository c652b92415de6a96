//! 错误分类 - 按错误码区间划分

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error domain, derived from the code range
///
/// The catalog ranges (60xx..64xx) are split per editor concept so a
/// caller can tell a bad unit from a bad attribute without matching every
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx
    Auth,
    /// 2xxx
    Permission,
    /// 60xx-61xx: product-level fields
    Product,
    /// 62xx
    Variant,
    /// 63xx
    Attribute,
    /// 64xx
    Unit,
    /// 94xx: local store quota and decoding
    Storage,
    /// 9xxx and anything unassigned
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            6000..6200 => Self::Product,
            6200..6300 => Self::Variant,
            6300..6400 => Self::Attribute,
            6400..6500 => Self::Unit,
            9400..9500 => Self::Storage,
            _ => Self::System,
        }
    }

    /// Errors the operator fixes by correcting the product being edited
    pub fn is_catalog(&self) -> bool {
        matches!(
            self,
            Self::Product | Self::Variant | Self::Attribute | Self::Unit
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Attribute => "attribute",
            Self::Unit => "unit",
            Self::Storage => "storage",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
