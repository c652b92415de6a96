//! Product Editor - 多行业 POS 产品编辑核心
//!
//! # 架构概述
//!
//! - **变体展开** (`variants`): 属性值 × 单位 的笛卡尔积, 增量再生保留编辑
//! - **产品表单** (`form`): 顶层字段 + 变体引擎, 带 Session 提交
//! - **存储** (`store`): redb 本地存储 / HTTP 远程存储
//! - **迁移** (`migration`): v1 → v2 升级, 演示数据
//!
//! # 模块结构
//!
//! ```text
//! product-editor/src/
//! ├── core/          # 配置
//! ├── variants/      # 属性/单位注册表, 展开引擎, 表格视图
//! ├── form.rs        # ProductForm
//! ├── store/         # ProductStore trait + 实现
//! ├── migration/     # upgrade, seed
//! └── utils/         # 日志, 校验, 金额
//! ```

pub mod core;
pub mod form;
pub mod migration;
pub mod store;
pub mod utils;
pub mod variants;

// Re-export 公共类型
pub use crate::core::Config;
pub use form::ProductForm;
pub use migration::{seed_demo_catalog, upgrade};
pub use store::{
    LocalProductStore, PersistenceError, PersistenceResult, ProductStore, RemoteProductStore,
    SaveProduct,
};
pub use variants::{VariantEngine, VariantError, VariantResult, VariantTableEditor};

pub use utils::logger::{init_logger, init_logger_with_file};
