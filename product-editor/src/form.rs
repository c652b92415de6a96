//! Product form - 产品编辑表单
//!
//! Owns the top-level product fields and the variant engine. Discarding the
//! form discards its attributes, units and variants.

use crate::store::{PersistenceError, PersistenceResult, ProductStore, SaveProduct};
use crate::utils::validation::validate_product;
use crate::variants::{VariantEngine, VariantError, VariantTableEditor};
use shared::Session;
use shared::models::{Product, SavedProduct, VariantDefaults, Vertical};
use shared::session::PRODUCTS_WRITE;

#[derive(Debug, Clone)]
pub struct ProductForm {
    id: Option<i64>,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub is_active: bool,
    engine: VariantEngine,
}

impl ProductForm {
    /// Empty form for a new product
    pub fn new(vertical: Vertical) -> Self {
        Self {
            id: None,
            name: String::new(),
            category: String::new(),
            description: None,
            is_active: true,
            engine: VariantEngine::default().with_vertical(vertical),
        }
    }

    /// Resume editing a saved product
    pub fn edit(saved: SavedProduct) -> Self {
        let product = saved.product;
        let defaults = product.defaults();
        Self {
            id: Some(saved.id),
            engine: VariantEngine::from_properties(
                product.variant_properties,
                product.code_prefix,
                defaults,
                product.vertical,
            ),
            name: product.name,
            category: product.category,
            description: product.description,
            is_active: product.is_active,
        }
    }

    /// Id of the saved product; `None` until the first successful submit
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn engine(&self) -> &VariantEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut VariantEngine {
        &mut self.engine
    }

    pub fn table(&mut self) -> VariantTableEditor<'_> {
        VariantTableEditor::new(&mut self.engine)
    }

    pub fn set_code_prefix(&mut self, prefix: impl Into<String>) {
        self.engine.set_code_prefix(prefix);
    }

    pub fn set_defaults(&mut self, defaults: VariantDefaults) -> Result<(), VariantError> {
        self.engine.set_defaults(defaults)
    }

    pub fn to_product(&self) -> Product {
        let defaults = self.engine.defaults();
        Product {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            code_prefix: self.engine.code_prefix().to_string(),
            vertical: self.engine.vertical(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            is_active: self.is_active,
            cost_price: defaults.cost_price,
            price: defaults.price,
            stock: defaults.stock,
            variant_properties: self.engine.to_properties(),
        }
    }

    /// Check everything a store would refuse
    pub fn validate(&self) -> PersistenceResult<()> {
        validate_product(&self.to_product())
    }

    /// Validate and save with the caller's session
    ///
    /// Requires `products:write`. On failure the form is left as it was.
    pub async fn submit(
        &mut self,
        session: &Session,
        store: &dyn ProductStore,
    ) -> PersistenceResult<SavedProduct> {
        if !session.has_permission(PRODUCTS_WRITE) {
            tracing::warn!(user = %session.username, "Product save denied: missing {}", PRODUCTS_WRITE);
            return Err(PersistenceError::PermissionDenied(PRODUCTS_WRITE.to_string()));
        }
        if let Err(e) = self.validate() {
            tracing::warn!(user = %session.username, error = %e, "Product save rejected");
            return Err(e);
        }

        let request = SaveProduct {
            id: self.id,
            product: self.to_product(),
            created_by: Some(session.username.clone()),
        };
        let saved = store.save(request).await?;
        self.id = Some(saved.id);
        Ok(saved)
    }
}
