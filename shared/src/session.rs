//! Session context
//!
//! The current user/role is resolved once at bootstrap and handed to every
//! operation that needs it. Nothing in the workspace reads it from ambient
//! storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Permission required to create or update products
pub const PRODUCTS_WRITE: &str = "products:write";
/// Permission required to delete products
pub const PRODUCTS_DELETE: &str = "products:delete";

/// Permission pattern: exact (`products:write`), resource wildcard
/// (`products:*`) or everything (`*`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(pub String);

impl Permission {
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" {
            return true;
        }
        match self.0.strip_suffix(":*") {
            // `products:*` must not match `products_archive:write`
            Some(resource) => action
                .strip_prefix(resource)
                .is_some_and(|rest| rest.starts_with(':')),
            None => self.0 == action,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current user context
///
/// # Example
///
/// ```
/// use shared::Session;
///
/// let session = Session::new("u-1", "alice", "manager")
///     .with_permissions(["products:*"]);
/// assert!(session.has_permission("products:write"));
/// assert!(!session.has_permission("orders:void"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// User ID
    pub user_id: String,
    /// Username
    pub username: String,
    /// Role name
    pub role: String,
    /// Permission list
    #[serde(default)]
    pub permissions: Vec<Permission>,
    /// Tenant (store) the user is working in
    pub tenant_id: Option<String>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role: role.into(),
            permissions: Vec::new(),
            tenant_id: None,
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions
            .into_iter()
            .map(|p| Permission(p.into()))
            .collect();
        self
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Built-in session used by seeding and migration jobs
    pub fn system() -> Self {
        Self::new("system", "system", "admin")
    }

    /// 管理员拥有所有权限
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// 检查是否拥有指定权限
    ///
    /// 1. 管理员拥有所有权限
    /// 2. `"*"` 拥有所有权限
    /// 3. 精确匹配或前缀匹配 (`:*` 通配符)
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.iter().any(|p| p.grants(permission))
    }
}
