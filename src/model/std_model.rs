use serde_json::Value as JsonValue;
use tracing::debug;

use super::{Model, PermStore, Store, Txn};
use crate::error::{AppError, AppResult};
use crate::schema::{Object, Resource, ResourcePath};

/// Generic read-modify-write model with no domain rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdModel;

impl StdModel {
    pub fn new() -> Self { Self }
}

fn now_ms() -> i64 { chrono::Utc::now().timestamp_millis() }

/// Object path for `existing`: the request path when it already names the object,
/// else the collection path joined with the object id.
fn object_path(path: &ResourcePath, id: &str) -> ResourcePath {
    match path.object_id() {
        Some(cur) if cur == id => path.clone(),
        _ => path.with_object_id(id),
    }
}

/// RFC 7396 merge of `patch` into `target`; `null` removes a key.
fn merge_json(target: &mut JsonValue, patch: JsonValue) {
    match patch {
        JsonValue::Object(entries) => {
            if !target.is_object() { *target = JsonValue::Object(Default::default()); }
            if let JsonValue::Object(map) = target {
                for (k, v) in entries {
                    if v.is_null() {
                        map.remove(&k);
                    } else {
                        merge_json(map.entry(k).or_insert(JsonValue::Null), v);
                    }
                }
            }
        }
        other => *target = other,
    }
}

fn decode_json(bytes: &[u8]) -> AppResult<JsonValue> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonValue::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(AppError::BadRequest)
}

impl Model for StdModel {
    fn create(&self, txn: &Txn, path: &ResourcePath, payload: &mut Resource) -> AppResult<()> {
        if payload.data.id.is_empty() {
            return Err(AppError::required("data.id"));
        }
        let obj_path = path.with_object_id(&payload.data.id);
        payload.data.modified = now_ms();
        txn.store.create(&obj_path, &payload.data)?;
        if let Some(perms) = payload.permissions.as_ref() {
            txn.perms.set_permissions(&obj_path, perms)?;
        }
        debug!(target: "accounts::store", "create {}", obj_path);
        Ok(())
    }

    fn update(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        let obj_path = object_path(path, &existing.id);
        let mut next = existing.clone();
        next.extra = payload.data.extra.clone();
        next.deleted = false;
        next.modified = now_ms();
        txn.store.update(&obj_path, &next)?;
        if let Some(perms) = payload.permissions.as_ref() {
            txn.perms.set_permissions(&obj_path, perms)?;
        }
        *existing = next;
        payload.data = existing.clone();
        debug!(target: "accounts::store", "update {}", obj_path);
        Ok(())
    }

    fn patch(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        let obj_path = object_path(path, &existing.id);
        let patch = decode_json(&payload.data.extra)?;
        let mut next = existing.clone();
        // an empty patch leaves stored bytes as they are
        if !matches!(&patch, JsonValue::Object(m) if m.is_empty()) {
            let mut merged = decode_json(&existing.extra)?;
            merge_json(&mut merged, patch);
            next.extra = serde_json::to_vec(&merged).map_err(AppError::internal)?;
        }
        next.modified = now_ms();
        txn.store.update(&obj_path, &next)?;
        if let Some(perms) = payload.permissions.as_ref() {
            txn.perms.merge_permissions(&obj_path, perms)?;
        }
        *existing = next;
        payload.data = existing.clone();
        debug!(target: "accounts::store", "patch {}", obj_path);
        Ok(())
    }
}
