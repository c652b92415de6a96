//! Persistence adapter - 产品存储
//!
//! | 实现 | 后端 | 用途 |
//! |------|------|------|
//! | [`LocalProductStore`] | redb 文件 | 单机 / 离线 |
//! | [`RemoteProductStore`] | HTTP JSON (`/api/products`) | 托管后端 |
//!
//! Both return [`SavedProduct`] in the current schema; legacy records are
//! upgraded on read.

pub mod error;
pub mod local;
pub mod remote;

pub use error::{PersistenceError, PersistenceResult};
pub use local::LocalProductStore;
pub use remote::RemoteProductStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::models::{Product, SavedProduct};

/// Save payload
///
/// `id: None` creates a product, `Some(id)` replaces an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProduct {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub product: Product,
    pub created_by: Option<String>,
}

impl SaveProduct {
    pub fn create(product: Product, created_by: Option<String>) -> Self {
        Self {
            id: None,
            product,
            created_by,
        }
    }

    pub fn update(id: i64, product: Product, created_by: Option<String>) -> Self {
        Self {
            id: Some(id),
            product,
            created_by,
        }
    }
}

/// 产品存储接口
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 创建或更新
    async fn save(&self, request: SaveProduct) -> PersistenceResult<SavedProduct>;

    async fn load(&self, id: i64) -> PersistenceResult<SavedProduct>;

    async fn list(&self) -> PersistenceResult<Vec<SavedProduct>>;

    async fn delete(&self, id: i64) -> PersistenceResult<()>;
}
