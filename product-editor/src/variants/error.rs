//! Variant engine errors

use shared::error::{AppError, ErrorCode};
use shared::models::{AttributeId, UnitId, VariantKey};
use thiserror::Error;

/// Rejected editor operation; state is left unchanged
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariantError {
    #[error("attribute name required (attribute {0})")]
    AttributeNameRequired(AttributeId),

    #[error("attribute {0} not found")]
    AttributeNotFound(AttributeId),

    #[error("attribute name '{0}' already used")]
    DuplicateAttributeName(String),

    #[error("attribute value must not be empty")]
    EmptyValue,

    #[error("value '{value}' already exists on attribute '{attribute}'")]
    DuplicateValue { attribute: String, value: String },

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit name required")]
    UnitNameRequired,

    #[error("unit name '{0}' already used")]
    DuplicateUnitName(String),

    #[error("invalid conversion {value} for unit '{unit}'")]
    InvalidConversion { unit: String, value: f64 },

    #[error("{field} must be a finite number between 0 and {max}, got {value}")]
    InvalidPrice {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("stock must be between 0 and {max}, got {value}")]
    InvalidStock { value: i64, max: i64 },

    #[error("'{0}' is the only base unit and cannot be removed")]
    SoleBaseUnit(String),

    #[error("variant {0} not found")]
    VariantNotFound(VariantKey),

    #[error("row {0} not found")]
    RowNotFound(u64),

    #[error("{0} is read-only")]
    ReadOnlyField(&'static str),

    #[error("stock is tracked on the base unit, not on {0}")]
    StockOnNonBaseUnit(VariantKey),

    #[error("barcode '{0}' already used by another variant")]
    DuplicateBarcode(String),

    #[error("{field} is longer than {max} characters")]
    TextTooLong { field: &'static str, max: usize },
}

pub type VariantResult<T> = Result<T, VariantError>;

impl From<VariantError> for AppError {
    fn from(err: VariantError) -> Self {
        let code = match &err {
            VariantError::AttributeNameRequired(_) => ErrorCode::AttributeNameRequired,
            VariantError::AttributeNotFound(_) => ErrorCode::AttributeNotFound,
            VariantError::DuplicateAttributeName(_) => ErrorCode::AttributeNameExists,
            VariantError::EmptyValue => ErrorCode::AttributeValueEmpty,
            VariantError::DuplicateValue { .. } => ErrorCode::AttributeValueExists,
            VariantError::UnitNotFound(_) => ErrorCode::UnitNotFound,
            VariantError::UnitNameRequired => ErrorCode::RequiredField,
            VariantError::DuplicateUnitName(_) => ErrorCode::UnitNameExists,
            VariantError::InvalidConversion { .. } => ErrorCode::UnitInvalidConversion,
            VariantError::InvalidPrice { .. } => ErrorCode::ProductInvalidPrice,
            VariantError::InvalidStock { .. } => ErrorCode::ProductInvalidStock,
            VariantError::SoleBaseUnit(_) => ErrorCode::BaseUnitRequired,
            VariantError::VariantNotFound(_) | VariantError::RowNotFound(_) => {
                ErrorCode::VariantNotFound
            }
            VariantError::ReadOnlyField(_) => ErrorCode::VariantFieldReadOnly,
            VariantError::StockOnNonBaseUnit(_) => ErrorCode::VariantStockNotOnBase,
            VariantError::DuplicateBarcode(_) => ErrorCode::VariantBarcodeExists,
            VariantError::TextTooLong { .. } => ErrorCode::ValidationFailed,
        };
        AppError::with_message(code, err.to_string())
    }
}
