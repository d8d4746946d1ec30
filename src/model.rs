//! Host-facing resource contract: the generic [`Model`] every resource implements,
//! the transaction context handed to it, and the store seams behind that context.

use std::sync::Arc;

use crate::error::AppResult;
use crate::hashing::SlowHash;
use crate::schema::{Object, PermissionSet, Resource, ResourcePath};

mod std_model;

pub use std_model::StdModel;

/// Create/Update/Patch against a record store.
pub trait Model: Send + Sync {
    /// `path` addresses the collection (`/accounts/*`).
    fn create(&self, txn: &Txn, path: &ResourcePath, payload: &mut Resource) -> AppResult<()>;

    /// Full replace of `existing`, the object previously fetched for update.
    fn update(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()>;

    /// Partial update of `existing`.
    fn patch(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()>;
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn create(&self, txn: &Txn, path: &ResourcePath, payload: &mut Resource) -> AppResult<()> {
        (**self).create(txn, path, payload)
    }

    fn update(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        (**self).update(txn, path, existing, payload)
    }

    fn patch(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        (**self).patch(txn, path, existing, payload)
    }
}

/// Object storage. Implementations own their own locking.
pub trait Store: Send + Sync {
    /// Insert a new object; `Conflict` when the path is taken.
    fn create(&self, path: &ResourcePath, obj: &Object) -> AppResult<()>;
    /// `NotFound` when absent.
    fn get(&self, path: &ResourcePath) -> AppResult<Object>;
    /// Overwrite an existing object; `NotFound` when absent.
    fn update(&self, path: &ResourcePath, obj: &Object) -> AppResult<()>;
}

/// Per-path permission storage.
pub trait PermStore: Send + Sync {
    fn get_permissions(&self, path: &ResourcePath) -> AppResult<PermissionSet>;
    /// Replace whatever is stored at `path`.
    fn set_permissions(&self, path: &ResourcePath, perms: &PermissionSet) -> AppResult<()>;
    /// Union into whatever is stored at `path`.
    fn merge_permissions(&self, path: &ResourcePath, perms: &PermissionSet) -> AppResult<()>;
}

/// Host capabilities available to models during a transaction.
#[derive(Clone)]
pub struct Helpers {
    hasher: Arc<dyn SlowHash>,
}

impl Helpers {
    pub fn new(hasher: Arc<dyn SlowHash>) -> Self { Self { hasher } }

    pub fn slow_hash(&self, plaintext: &str) -> anyhow::Result<String> {
        self.hasher.hash(plaintext)
    }
}

/// Transaction context passed through every model call.
#[derive(Clone)]
pub struct Txn {
    pub store: Arc<dyn Store>,
    pub perms: Arc<dyn PermStore>,
    pub helpers: Helpers,
}

impl Txn {
    pub fn new(store: Arc<dyn Store>, perms: Arc<dyn PermStore>, helpers: Helpers) -> Self {
        Self { store, perms, helpers }
    }
}
