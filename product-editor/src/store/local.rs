//! redb-based local product store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `products` | `id` | `StoredProduct` (JSON) | v1 and v2 records |
//!
//! The byte quota counts serialized record sizes, not file size: a write is
//! rejected when the records after the write would exceed it.

use super::error::{PersistenceError, PersistenceResult};
use super::{ProductStore, SaveProduct};
use crate::migration::{resolve, upgrade_record};
use crate::utils::validation::validate_product;
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{SavedProduct, StoredProduct};
use shared::util::{now_millis, snowflake_id};
use std::path::Path;
use std::sync::Arc;

/// key = product id, value = JSON-serialized StoredProduct
const PRODUCTS_TABLE: TableDefinition<i64, &[u8]> = TableDefinition::new("products");

/// Product store backed by redb
#[derive(Clone)]
pub struct LocalProductStore {
    db: Arc<Database>,
    quota_bytes: u64,
}

impl LocalProductStore {
    /// Open or create the store at the given path
    pub fn open(path: impl AsRef<Path>, quota_bytes: u64) -> PersistenceResult<Self> {
        let db = Database::create(path)?;
        Self::init(db, quota_bytes)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory(quota_bytes: u64) -> PersistenceResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, quota_bytes)
    }

    fn init(db: Database, quota_bytes: u64) -> PersistenceResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            quota_bytes,
        })
    }

    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    /// Serialized size of every stored record
    pub fn used_bytes(&self) -> PersistenceResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;
        let mut used = 0u64;
        for result in table.iter()? {
            let (_key, value) = result?;
            used += value.value().len() as u64;
        }
        Ok(used)
    }

    // ========== Products ==========

    /// Create or replace a product
    ///
    /// The product is validated before the write transaction opens.
    pub fn save_product(&self, request: SaveProduct) -> PersistenceResult<SavedProduct> {
        if let Err(e) = validate_product(&request.product) {
            tracing::warn!(product = %request.product.name, error = %e, "Product save rejected");
            return Err(e);
        }
        let now = now_millis();
        let txn = self.db.begin_write()?;
        let saved = {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            let saved = match request.id {
                Some(id) => {
                    let existing = match table.get(id)? {
                        Some(value) => {
                            let stored: StoredProduct = serde_json::from_slice(value.value())?;
                            resolve(id, stored)
                        }
                        None => return Err(PersistenceError::NotFound(id)),
                    };
                    SavedProduct {
                        id,
                        product: request.product,
                        created_by: existing.created_by.or(request.created_by),
                        created_at: existing.created_at,
                        updated_at: now,
                    }
                }
                None => SavedProduct {
                    id: fresh_id(&table)?,
                    product: request.product,
                    created_by: request.created_by,
                    created_at: now,
                    updated_at: now,
                },
            };

            let bytes = serde_json::to_vec(&StoredProduct::Current(saved.clone()))?;
            let required = used_except(&table, saved.id)? + bytes.len() as u64;
            if required > self.quota_bytes {
                tracing::warn!(
                    product = %saved.product.name,
                    required,
                    quota = self.quota_bytes,
                    "Product save rejected: storage quota exceeded"
                );
                return Err(PersistenceError::QuotaExceeded {
                    required,
                    quota: self.quota_bytes,
                });
            }
            table.insert(saved.id, bytes.as_slice())?;
            saved
        };
        txn.commit()?;

        tracing::info!(
            id = saved.id,
            product = %saved.product.name,
            variants = saved.product.variant_properties.variants.len(),
            "Product saved"
        );
        Ok(saved)
    }

    /// Get a product, upgrading a legacy record on the fly
    pub fn get_product(&self, id: i64) -> PersistenceResult<Option<SavedProduct>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let stored: StoredProduct = serde_json::from_slice(value.value())?;
                Ok(Some(resolve(id, stored)))
            }
            None => Ok(None),
        }
    }

    /// All products in id order
    pub fn list_products(&self) -> PersistenceResult<Vec<SavedProduct>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;

        let mut products = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            let stored: StoredProduct = serde_json::from_slice(value.value())?;
            products.push(resolve(key.value(), stored));
        }
        Ok(products)
    }

    /// Remove a product; returns whether it existed
    pub fn remove_product(&self, id: i64) -> PersistenceResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        if removed {
            tracing::info!(id, "Product deleted");
        }
        Ok(removed)
    }

    /// Rewrite every v1 record as v2 in place; returns the records upgraded
    ///
    /// Upgraded records are not checked against the quota.
    pub fn migrate_legacy(&self) -> PersistenceResult<usize> {
        let txn = self.db.begin_write()?;
        let migrated = {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            let mut legacy = Vec::new();
            for result in table.iter()? {
                let (key, value) = result?;
                let stored: StoredProduct = serde_json::from_slice(value.value())?;
                if let StoredProduct::Legacy(record) = stored {
                    legacy.push(upgrade_record(key.value(), record));
                }
            }
            for saved in &legacy {
                let bytes = serde_json::to_vec(&StoredProduct::Current(saved.clone()))?;
                table.insert(saved.id, bytes.as_slice())?;
            }
            legacy.len()
        };
        txn.commit()?;

        if migrated > 0 {
            tracing::info!(migrated, "Legacy products upgraded");
        }
        Ok(migrated)
    }

    #[cfg(test)]
    pub(crate) fn put_record(&self, id: i64, record: &StoredProduct) -> PersistenceResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PRODUCTS_TABLE)?;
            let bytes = serde_json::to_vec(record)?;
            table.insert(id, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn get_record(&self, id: i64) -> PersistenceResult<Option<StoredProduct>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PRODUCTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

fn fresh_id(table: &impl ReadableTable<i64, &'static [u8]>) -> PersistenceResult<i64> {
    loop {
        let id = snowflake_id();
        if table.get(id)?.is_none() {
            return Ok(id);
        }
    }
}

fn used_except(table: &impl ReadableTable<i64, &'static [u8]>, id: i64) -> PersistenceResult<u64> {
    let mut used = 0u64;
    for result in table.iter()? {
        let (key, value) = result?;
        if key.value() != id {
            used += value.value().len() as u64;
        }
    }
    Ok(used)
}

#[async_trait]
impl ProductStore for LocalProductStore {
    async fn save(&self, request: SaveProduct) -> PersistenceResult<SavedProduct> {
        self.save_product(request)
    }

    async fn load(&self, id: i64) -> PersistenceResult<SavedProduct> {
        self.get_product(id)?.ok_or(PersistenceError::NotFound(id))
    }

    async fn list(&self) -> PersistenceResult<Vec<SavedProduct>> {
        self.list_products()
    }

    async fn delete(&self, id: i64) -> PersistenceResult<()> {
        if self.remove_product(id)? {
            Ok(())
        } else {
            Err(PersistenceError::NotFound(id))
        }
    }
}
