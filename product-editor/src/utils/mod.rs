//! 工具模块 - 通用工具函数和类型
//!
//! - [`validation`] - 文本长度和金额/库存校验
//! - [`money`] - rust_decimal 精确计算
//! - 日志初始化

pub mod logger;
pub mod money;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
