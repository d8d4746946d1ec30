//! In-memory host collaborators for tests and benches: object store, permission
//! store, a cheap Argon2 hasher and a recording route table.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SlowHashSettings;
use crate::error::{AppError, AppResult};
use crate::hashing::{Argon2Hasher, SlowHash};
use crate::model::{Helpers, Model, PermStore, Store, Txn};
use crate::plugin::Routes;
use crate::schema::{Object, PermissionSet, ResourcePath};

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ResourcePath, Object>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.objects.read().len() }
    pub fn is_empty(&self) -> bool { self.objects.read().is_empty() }
}

impl Store for MemoryStore {
    fn create(&self, path: &ResourcePath, obj: &Object) -> AppResult<()> {
        let mut m = self.objects.write();
        if m.contains_key(path) {
            return Err(AppError::conflict(path.as_str()));
        }
        m.insert(path.clone(), obj.clone());
        crate::tprintln!("mock.store create {}", path);
        Ok(())
    }

    fn get(&self, path: &ResourcePath) -> AppResult<Object> {
        self.objects.read().get(path).cloned().ok_or_else(|| AppError::not_found(path.as_str()))
    }

    fn update(&self, path: &ResourcePath, obj: &Object) -> AppResult<()> {
        let mut m = self.objects.write();
        let Some(slot) = m.get_mut(path) else { return Err(AppError::not_found(path.as_str())); };
        *slot = obj.clone();
        crate::tprintln!("mock.store update {}", path);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPerms {
    sets: RwLock<HashMap<ResourcePath, PermissionSet>>,
}

impl MemoryPerms {
    pub fn new() -> Self { Self::default() }
}

impl PermStore for MemoryPerms {
    fn get_permissions(&self, path: &ResourcePath) -> AppResult<PermissionSet> {
        Ok(self.sets.read().get(path).cloned().unwrap_or_default())
    }

    fn set_permissions(&self, path: &ResourcePath, perms: &PermissionSet) -> AppResult<()> {
        self.sets.write().insert(path.clone(), perms.clone());
        Ok(())
    }

    fn merge_permissions(&self, path: &ResourcePath, perms: &PermissionSet) -> AppResult<()> {
        self.sets.write().entry(path.clone()).or_default().merge(perms);
        Ok(())
    }
}

/// Lowest Argon2id cost argon2 accepts; only fit for tests.
pub fn cheap_hash_settings() -> SlowHashSettings {
    SlowHashSettings { m_cost: 32, t_cost: 1, p_cost: 1, output_len: None }
}

/// Panics if argon2 rejects the cheap parameters; test support only.
pub fn hasher() -> Argon2Hasher {
    Argon2Hasher::new(&cheap_hash_settings()).expect("cheap argon2 params")
}

/// Fresh transaction over empty in-memory stores with the cheap hasher.
pub fn txn() -> Txn {
    txn_with_hasher(Arc::new(hasher()))
}

pub fn txn_with_hasher(hasher: Arc<dyn SlowHash>) -> Txn {
    Txn::new(Arc::new(MemoryStore::new()), Arc::new(MemoryPerms::new()), Helpers::new(hasher))
}

/// Route table that just remembers what was mounted.
#[derive(Default)]
pub struct RouteTable {
    resources: HashMap<String, Arc<dyn Model>>,
}

impl RouteTable {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, path: &str) -> Option<Arc<dyn Model>> { self.resources.get(path).cloned() }

    pub fn paths(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }
}

impl Routes for RouteTable {
    fn resource(&mut self, path: &str, model: Arc<dyn Model>) {
        self.resources.insert(path.to_string(), model);
    }
}
