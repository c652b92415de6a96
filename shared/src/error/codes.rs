//! 错误码
//!
//! Numeric codes travel in the `code` field of [`super::ApiResponse`], so
//! values are stable: new codes get new numbers, retired numbers are not
//! reused.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ── 0xxx 通用 ──
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    RequiredField = 7,

    // ── 1xxx 认证 ──
    NotAuthenticated = 1001,

    // ── 2xxx 权限 ──
    PermissionDenied = 2001,

    // ── 60xx 产品 ──
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    ProductInvalidStock = 6003,

    // ── 62xx 变体 ──
    VariantNotFound = 6201,
    /// `code` is derived and cannot be edited
    VariantFieldReadOnly = 6202,
    /// Stock is only tracked on base-unit rows
    VariantStockNotOnBase = 6203,
    VariantBarcodeExists = 6204,

    // ── 63xx 属性 ──
    AttributeNotFound = 6301,
    /// Values cannot be added before the attribute is named
    AttributeNameRequired = 6302,
    AttributeNameExists = 6303,
    AttributeValueExists = 6304,
    AttributeValueEmpty = 6305,

    // ── 64xx 单位 ──
    UnitNotFound = 6401,
    UnitNameExists = 6402,
    UnitInvalidConversion = 6403,
    /// The sole base unit cannot be deleted
    BaseUnitRequired = 6404,

    // ── 90xx 系统 ──
    InternalError = 9001,
    DatabaseError = 9002,
    NetworkError = 9003,

    // ── 94xx 存储 ──
    StorageFull = 9401,
    StorageCorrupted = 9403,
}

/// Every code, in numeric order
const ALL: &[ErrorCode] = &[
    ErrorCode::Success,
    ErrorCode::Unknown,
    ErrorCode::ValidationFailed,
    ErrorCode::NotFound,
    ErrorCode::AlreadyExists,
    ErrorCode::RequiredField,
    ErrorCode::NotAuthenticated,
    ErrorCode::PermissionDenied,
    ErrorCode::ProductNotFound,
    ErrorCode::ProductInvalidPrice,
    ErrorCode::ProductInvalidStock,
    ErrorCode::VariantNotFound,
    ErrorCode::VariantFieldReadOnly,
    ErrorCode::VariantStockNotOnBase,
    ErrorCode::VariantBarcodeExists,
    ErrorCode::AttributeNotFound,
    ErrorCode::AttributeNameRequired,
    ErrorCode::AttributeNameExists,
    ErrorCode::AttributeValueExists,
    ErrorCode::AttributeValueEmpty,
    ErrorCode::UnitNotFound,
    ErrorCode::UnitNameExists,
    ErrorCode::UnitInvalidConversion,
    ErrorCode::BaseUnitRequired,
    ErrorCode::InternalError,
    ErrorCode::DatabaseError,
    ErrorCode::NetworkError,
    ErrorCode::StorageFull,
    ErrorCode::StorageCorrupted,
];

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default operator-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "OK",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "The product is not valid",
            ErrorCode::NotFound => "Not found",
            ErrorCode::AlreadyExists => "Already exists",
            ErrorCode::RequiredField => "A required field is empty",
            ErrorCode::NotAuthenticated => "Sign in required",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Price must be between 0 and 1,000,000",
            ErrorCode::ProductInvalidStock => "Stock must not be negative",
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::VariantFieldReadOnly => "Variant code is generated and read-only",
            ErrorCode::VariantStockNotOnBase => "Stock is tracked on the base unit only",
            ErrorCode::VariantBarcodeExists => "Barcode already used by another variant",
            ErrorCode::AttributeNotFound => "Attribute not found",
            ErrorCode::AttributeNameRequired => "Attribute name required",
            ErrorCode::AttributeNameExists => "Attribute name already used",
            ErrorCode::AttributeValueExists => "Attribute value already added",
            ErrorCode::AttributeValueEmpty => "Attribute value is empty",
            ErrorCode::UnitNotFound => "Unit not found",
            ErrorCode::UnitNameExists => "Unit name already used",
            ErrorCode::UnitInvalidConversion => "Unit conversion must be a positive number",
            ErrorCode::BaseUnitRequired => "The only base unit cannot be deleted",
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Local store error",
            ErrorCode::NetworkError => "Product API unreachable",
            ErrorCode::StorageFull => "Storage quota exceeded",
            ErrorCode::StorageCorrupted => "Stored product cannot be read",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` that is not a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ALL.iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
