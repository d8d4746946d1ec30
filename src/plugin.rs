//! Registration of the account resource with the host router.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::accounts::AccountModel;
use crate::model::Model;

pub const NAME: &str = "accounts";
pub const URL: &str = "https://github.com/riposo/accounts";
/// Collection the account model is mounted on.
pub const COLLECTION: &str = "/accounts";

/// Host router seam: maps a collection path to the model serving it.
pub trait Routes {
    fn resource(&mut self, path: &str, model: Arc<dyn Model>);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub meta: BTreeMap<String, String>,
}

/// Mount [`AccountModel`] on `/accounts` and describe the plugin.
pub fn register(routes: &mut dyn Routes) -> PluginInfo {
    routes.resource(COLLECTION, Arc::new(AccountModel::new()));
    tracing::info!(target: "accounts::plugin", "registered {} on {}", NAME, COLLECTION);

    let mut meta = BTreeMap::new();
    meta.insert("description".to_string(), "Manage user accounts.".to_string());
    meta.insert("url".to_string(), URL.to_string());
    PluginInfo { name: NAME.to_string(), meta }
}
