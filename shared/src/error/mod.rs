//! 错误体系
//!
//! ```text
//! VariantError / PersistenceError ──From──▶ AppError ──▶ ApiResponse (wire)
//!                                              ▲              │
//!                                              └── to_error ──┘
//! ```
//!
//! | 区间 | 分类 |
//! |------|------|
//! | 0xxx | General |
//! | 1xxx | Auth |
//! | 2xxx | Permission |
//! | 60xx / 62xx / 63xx / 64xx | Product / Variant / Attribute / Unit |
//! | 94xx | Storage |
//! | 9xxx | System |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::BaseUnitRequired);
//! assert_eq!(err.category(), ErrorCategory::Unit);
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(6404));
//! ```

mod app_error;
mod category;
mod codes;
mod envelope;
mod http;

pub use app_error::{AppError, AppResult};
pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use envelope::ApiResponse;
