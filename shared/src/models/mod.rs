//! Data models
//!
//! Shared between the variant engine, the product stores and the frontend
//! (via JSON). All persisted IDs are `i64` snowflakes; variant rows carry a
//! `u64` surrogate key that is only meaningful inside one editing session.

pub mod attribute;
pub mod product;
pub mod unit;
pub mod variant;
pub mod vertical;

// Re-exports
pub use attribute::*;
pub use product::*;
pub use unit::*;
pub use variant::*;
pub use vertical::*;
