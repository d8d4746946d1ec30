//! Account resource model.
//!
//! Wraps a generic [`Model`] and, before delegating any write:
//! - requires an explicit, caller-chosen id on create;
//! - replaces the plaintext password in `extra` with a slow hash
//!   (mandatory on create and update, only when supplied on patch);
//! - grants the account itself `write` on its own record.
//!
//! Nothing reaches the inner model unless all of the above succeeded.

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::model::{Model, StdModel, Txn};
use crate::schema::{Object, PermissionSet, Resource, ResourcePath};

pub mod credentials;
pub mod permissions;

pub use credentials::{Credentials, HashPolicy};
pub use permissions::account_principal;

pub const ID_FIELD: &str = "data.id";

#[derive(Debug, Clone, Default)]
pub struct AccountModel<M = StdModel> {
    inner: M,
}

impl AccountModel<StdModel> {
    pub fn new() -> Self { Self { inner: StdModel::new() } }
}

impl<M: Model> AccountModel<M> {
    pub fn wrap(inner: M) -> Self { Self { inner } }

    pub fn inner(&self) -> &M { &self.inner }
}

impl<M: Model> Model for AccountModel<M> {
    fn create(&self, txn: &Txn, path: &ResourcePath, payload: &mut Resource) -> AppResult<()> {
        // ids are chosen by the caller, never generated
        if payload.data.id.is_empty() {
            return Err(AppError::required(ID_FIELD));
        }

        credentials::process(&txn.helpers, payload, HashPolicy::Mandatory)?;

        // a new account always starts out as its own writer
        payload.permissions.get_or_insert_with(|| PermissionSet::with_capacity(1));
        permissions::grant_self_write(&mut payload.permissions, &payload.data.id);

        debug!(target: "accounts::model", "create account id={} path={}", payload.data.id, path);
        self.inner.create(txn, path, payload)
    }

    fn update(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        credentials::process(&txn.helpers, payload, HashPolicy::Mandatory)?;
        let granted = permissions::grant_self_write(&mut payload.permissions, &existing.id);

        debug!(target: "accounts::model", "update account id={} path={} self_write_added={}", existing.id, path, granted);
        self.inner.update(txn, path, existing, payload)
    }

    fn patch(&self, txn: &Txn, path: &ResourcePath, existing: &mut Object, payload: &mut Resource) -> AppResult<()> {
        credentials::process(&txn.helpers, payload, HashPolicy::Optional)?;
        let granted = permissions::grant_self_write(&mut payload.permissions, &existing.id);

        debug!(target: "accounts::model", "patch account id={} path={} self_write_added={}", existing.id, path, granted);
        self.inner.patch(txn, path, existing, payload)
    }
}
