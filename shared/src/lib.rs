//! Shared types for the product editor
//!
//! Common types used by the editor core, the stores and any outer
//! application: the product/variant data model, the session context,
//! error types and response envelopes.

pub mod error;
pub mod models;
pub mod session;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use session::{Permission, Session};
