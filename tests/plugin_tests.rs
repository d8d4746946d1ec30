use anyhow::Result;
use serde_json::Value;

use accounts::mock::{self, RouteTable};
use accounts::model::{Model, PermStore, Store};
use accounts::plugin;
use accounts::schema::{Object, PermissionSet, Resource, ResourcePath};

#[test]
fn registers_account_model_on_accounts_collection() -> Result<()> {
    let mut routes = RouteTable::new();
    let info = plugin::register(&mut routes);

    assert_eq!(info.name, "accounts");
    assert_eq!(info.meta.get("description").map(String::as_str), Some("Manage user accounts."));
    assert_eq!(info.meta.get("url").map(String::as_str), Some("https://github.com/riposo/accounts"));
    assert_eq!(info.meta.len(), 2);
    assert_eq!(routes.paths(), vec!["/accounts"]);

    let meta = serde_json::to_value(&info)?;
    assert_eq!(meta["name"], Value::from("accounts"));
    assert_eq!(meta["meta"]["url"], Value::from(plugin::URL));
    Ok(())
}

#[test]
fn mounted_model_applies_account_rules() -> Result<()> {
    let mut routes = RouteTable::new();
    plugin::register(&mut routes);
    let model = routes.get(plugin::COLLECTION).expect("mounted");
    let txn = mock::txn();
    let coll = ResourcePath::from("/accounts/*");

    let err = model.create(&txn, &coll, &mut Resource::new(Object::new("", b"{}"))).unwrap_err();
    assert_eq!(err.field(), Some("data.id"));

    model.create(&txn, &coll, &mut Resource::new(Object::new("alice", br#"{"password":"s3cret"}"#)))?;
    let stored = txn.store.get(&"/accounts/alice".into())?;
    let v: Value = serde_json::from_slice(&stored.extra)?;
    assert_ne!(v["password"], Value::from("s3cret"));

    let want: PermissionSet = [("write", vec!["account:alice"])].into_iter().collect();
    assert_eq!(txn.perms.get_permissions(&"/accounts/alice".into())?, want);
    Ok(())
}
