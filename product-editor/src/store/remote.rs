//! 远程产品存储 (HTTP JSON)
//!
//! | 操作 | 请求 |
//! |------|------|
//! | save | `POST {base}/api/products` |
//! | load | `GET {base}/api/products/{id}` |
//! | list | `GET {base}/api/products` |
//! | delete | `DELETE {base}/api/products/{id}` |
//!
//! Products are validated before they are sent. Every response is an
//! [`ApiResponse`] envelope. No retries.

use super::error::{PersistenceError, PersistenceResult};
use super::{ProductStore, SaveProduct};
use crate::core::Config;
use crate::utils::validation::validate_product;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
use shared::models::SavedProduct;
use std::time::Duration;

const PRODUCTS_PATH: &str = "/api/products";

#[derive(Debug, Clone)]
pub struct RemoteProductStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteProductStore {
    pub fn new(base_url: &str, timeout: Duration) -> PersistenceResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `None` when no remote API is configured
    pub fn from_config(config: &Config) -> PersistenceResult<Option<Self>> {
        config
            .remote_api_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_millis(config.request_timeout_ms)))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, id: Option<i64>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, PRODUCTS_PATH, id),
            None => format!("{}{}", self.base_url, PRODUCTS_PATH),
        }
    }

    /// Map a non-success status or envelope to a store error
    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
        id: Option<i64>,
    ) -> PersistenceResult<Option<T>> {
        let status = resp.status();
        let text = resp.text().await?;

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(body) => body.into_result().map_err(|err| from_app_error(err, id)),
            Err(_) if status.is_success() => Err(PersistenceError::Remote(format!(
                "unexpected response body: {}",
                text
            ))),
            // 非信封响应 (代理, 网关), 只能按状态码判断
            Err(_) => Err(match (status, id) {
                (StatusCode::NOT_FOUND, Some(id)) => PersistenceError::NotFound(id),
                (StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED, _) => {
                    PersistenceError::PermissionDenied(text)
                }
                (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
                    PersistenceError::Validation(text)
                }
                _ => PersistenceError::Remote(format!("HTTP {}: {}", status, text)),
            }),
        }
    }

    async fn expect_data<T: DeserializeOwned>(
        resp: reqwest::Response,
        id: Option<i64>,
    ) -> PersistenceResult<T> {
        Self::handle_response(resp, id)
            .await?
            .ok_or_else(|| PersistenceError::Remote("response carried no data".into()))
    }
}

#[async_trait]
impl ProductStore for RemoteProductStore {
    async fn save(&self, request: SaveProduct) -> PersistenceResult<SavedProduct> {
        validate_product(&request.product)?;
        let id = request.id;
        let resp = self.client.post(self.url(None)).json(&request).send().await?;
        let saved: SavedProduct = Self::expect_data(resp, id).await?;
        tracing::info!(id = saved.id, product = %saved.product.name, "Product saved remotely");
        Ok(saved)
    }

    async fn load(&self, id: i64) -> PersistenceResult<SavedProduct> {
        let resp = self.client.get(self.url(Some(id))).send().await?;
        Self::expect_data(resp, Some(id)).await
    }

    async fn list(&self) -> PersistenceResult<Vec<SavedProduct>> {
        let resp = self.client.get(self.url(None)).send().await?;
        Ok(Self::handle_response(resp, None).await?.unwrap_or_default())
    }

    async fn delete(&self, id: i64) -> PersistenceResult<()> {
        let resp = self.client.delete(self.url(Some(id))).send().await?;
        Self::handle_response::<serde_json::Value>(resp, Some(id)).await?;
        tracing::info!(id, "Product deleted remotely");
        Ok(())
    }
}

fn from_app_error(err: AppError, id: Option<i64>) -> PersistenceError {
    match (err.code, id) {
        (ErrorCode::ProductNotFound | ErrorCode::NotFound, Some(id)) => {
            PersistenceError::NotFound(id)
        }
        (ErrorCode::ValidationFailed | ErrorCode::RequiredField, _) => {
            PersistenceError::Validation(err.message)
        }
        _ if err.category() == ErrorCategory::Permission => {
            PersistenceError::PermissionDenied(err.message)
        }
        _ if err.category().is_catalog() => PersistenceError::Validation(err.message),
        _ => PersistenceError::Remote(err.message),
    }
}
