//! Record envelope shared with the host store: a generic object with an opaque
//! `extra` JSON blob, optional permission sets, and resource paths.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

/// Generic stored object. Fields outside the generic schema live in `extra` as raw
/// JSON bytes and are only ever decoded by the model that owns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub id: String,
    /// Last modification, epoch milliseconds.
    pub modified: i64,
    pub deleted: bool,
    pub extra: Vec<u8>,
}

impl Object {
    pub fn new<S: Into<String>>(id: S, extra: &[u8]) -> Self {
        Self { id: id.into(), extra: extra.to_vec(), ..Default::default() }
    }

    /// Decode `extra`. Empty bytes and JSON `null` decode as `T::default()`.
    pub fn decode_extra<T: DeserializeOwned + Default>(&self) -> serde_json::Result<T> {
        if self.extra.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        let v: Option<T> = serde_json::from_slice(&self.extra)?;
        Ok(v.unwrap_or_default())
    }

    pub fn encode_extra<T: Serialize>(&mut self, v: &T) -> serde_json::Result<()> {
        self.extra = serde_json::to_vec(v)?;
        Ok(())
    }
}

/// Permission kind (`write`, `read`, ...) to the principals holding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashMap<String, HashSet<String>>);

impl PermissionSet {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(n: usize) -> Self { Self(HashMap::with_capacity(n)) }

    /// Grant `kind` to `principal`. Returns false when already granted.
    pub fn add(&mut self, kind: &str, principal: &str) -> bool {
        self.0.entry(kind.to_string()).or_default().insert(principal.to_string())
    }

    pub fn get(&self, kind: &str) -> Option<&HashSet<String>> { self.0.get(kind) }

    pub fn contains(&self, kind: &str, principal: &str) -> bool {
        self.0.get(kind).is_some_and(|s| s.contains(principal))
    }

    /// Union `other` into self.
    pub fn merge(&mut self, other: &PermissionSet) {
        for (kind, principals) in other.iter() {
            let set = self.0.entry(kind.clone()).or_default();
            set.extend(principals.iter().cloned());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HashSet<String>)> { self.0.iter() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K, P, I> FromIterator<(K, I)> for PermissionSet
where
    K: Into<String>,
    P: Into<String>,
    I: IntoIterator<Item = P>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        for (kind, principals) in iter {
            let entry = set.0.entry(kind.into()).or_default();
            entry.extend(principals.into_iter().map(Into::into));
        }
        set
    }
}

/// Mutation request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub data: Object,
    /// `None` means the caller did not touch permissions.
    pub permissions: Option<PermissionSet>,
}

impl Resource {
    pub fn new(data: Object) -> Self { Self { data, permissions: None } }

    pub fn with_permissions(mut self, perms: PermissionSet) -> Self {
        self.permissions = Some(perms);
        self
    }
}

/// Slash-separated resource path, e.g. `/accounts/alice`, or `/accounts/*` for a
/// collection-level request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new<S: Into<String>>(s: S) -> Self { Self(s.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Last segment, unless it is the `*` placeholder.
    pub fn object_id(&self) -> Option<&str> {
        match self.0.rsplit_once('/') {
            Some((_, "*")) | Some((_, "")) => None,
            Some((_, id)) => Some(id),
            None => None,
        }
    }

    /// Replace the last segment with `id`.
    pub fn with_object_id(&self, id: &str) -> ResourcePath {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => ResourcePath(format!("{}/{}", parent, id)),
            None => ResourcePath(format!("{}/{}", self.0, id)),
        }
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn add_is_idempotent() {
        let mut perms = PermissionSet::with_capacity(1);
        assert!(perms.add("write", "account:alice"));
        assert!(!perms.add("write", "account:alice"));
        assert_eq!(perms.get("write").map(|s| s.len()), Some(1));
        assert!(perms.contains("write", "account:alice"));
        assert!(!perms.contains("read", "account:alice"));
    }

    #[test]
    fn merge_keeps_existing_entries() {
        let mut perms: PermissionSet = [("read", vec!["account:bob"])].into_iter().collect();
        let other: PermissionSet = [("read", vec!["account:carol"]), ("write", vec!["account:bob"])].into_iter().collect();
        perms.merge(&other);
        let want: PermissionSet = [
            ("read", vec!["account:bob", "account:carol"]),
            ("write", vec!["account:bob"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(perms, want);
    }

    #[test]
    fn permission_set_serializes_as_map() {
        let perms: PermissionSet = [("write", vec!["account:alice"])].into_iter().collect();
        let v = serde_json::to_value(&perms).unwrap();
        assert_eq!(v, serde_json::json!({"write": ["account:alice"]}));
    }

    #[test]
    fn decode_extra_treats_empty_and_null_as_default() {
        assert_eq!(Object::new("a", b"").decode_extra::<Probe>().unwrap(), Probe::default());
        assert_eq!(Object::new("a", b" null ").decode_extra::<Probe>().unwrap(), Probe::default());
        let p: Probe = Object::new("a", br#"{"name":"x"}"#).decode_extra().unwrap();
        assert_eq!(p.name.as_deref(), Some("x"));
        assert!(Object::new("a", b"[1,2]").decode_extra::<Probe>().is_err());
    }

    #[test]
    fn resource_path_object_ids() {
        let coll = ResourcePath::from("/accounts/*");
        assert_eq!(coll.object_id(), None);
        let obj = coll.with_object_id("alice");
        assert_eq!(obj.as_str(), "/accounts/alice");
        assert_eq!(obj.object_id(), Some("alice"));
    }
}
