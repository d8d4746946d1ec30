use crate::schema::PermissionSet;

pub const PRINCIPAL_PREFIX: &str = "account:";
pub const WRITE: &str = "write";

/// Principal an account acts as, e.g. `account:alice`.
pub fn account_principal(id: &str) -> String {
    format!("{}{}", PRINCIPAL_PREFIX, id)
}

/// Add `write -> account:<id>` to `permissions` when the caller supplied a set.
/// Returns true when the grant was newly added.
pub fn grant_self_write(permissions: &mut Option<PermissionSet>, id: &str) -> bool {
    let Some(perms) = permissions.as_mut() else { return false; };
    perms.add(WRITE, &account_principal(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Object, Resource};

    #[test]
    fn merges_into_caller_permissions() {
        let perms: PermissionSet = [("read", vec!["account:bob"])].into_iter().collect();
        let mut p = Resource::new(Object::new("alice", b"{}")).with_permissions(perms);
        assert!(grant_self_write(&mut p.permissions, &p.data.id));
        assert!(!grant_self_write(&mut p.permissions, &p.data.id));
        let want: PermissionSet = [("read", vec!["account:bob"]), ("write", vec!["account:alice"])].into_iter().collect();
        assert_eq!(p.permissions, Some(want));
    }

    #[test]
    fn keeps_existing_writers() {
        let perms: PermissionSet = [("write", vec!["system.Authenticated"])].into_iter().collect();
        let mut p = Resource::new(Object::new("alice", b"{}")).with_permissions(perms);
        grant_self_write(&mut p.permissions, &p.data.id);
        let writers = p.permissions.as_ref().and_then(|s| s.get(WRITE)).unwrap();
        assert_eq!(writers.len(), 2);
        assert!(writers.contains("account:alice"));
        assert!(writers.contains("system.Authenticated"));
    }

    #[test]
    fn absent_set_is_not_fabricated() {
        let mut p = Resource::new(Object::new("alice", b"{}"));
        assert!(!grant_self_write(&mut p.permissions, &p.data.id));
        assert!(p.permissions.is_none());
    }
}
