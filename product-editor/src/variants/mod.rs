//! Variants - 属性 × 单位 展开
//!
//! # 模块结构
//!
//! ```text
//! variants/
//! ├── registry.rs   # AttributeRegistry, UnitSet (唯一 base unit)
//! ├── expansion.rs  # 笛卡尔积
//! ├── code.rs       # {PREFIX}-{VALUES}-{UNIT}
//! ├── engine.rs     # VariantEngine: 增量再生 + 编辑
//! ├── table.rs      # VariantTableEditor 视图模型
//! └── error.rs      # VariantError
//! ```
//!
//! Identity of a variant is its [`VariantKey`](shared::models::VariantKey)
//! (sorted attribute values + unit); `row_id` only addresses rendered rows.

pub mod code;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod registry;
pub mod table;

pub use code::variant_code;
pub use engine::VariantEngine;
pub use error::{VariantError, VariantResult};
pub use expansion::{cartesian, expected_variant_count};
pub use registry::{AttributeRegistry, UnitSet};
pub use table::{TableTotals, VariantRow, VariantTableEditor};

#[cfg(test)]
mod tests;
