//! Password handling for account payloads.
//!
//! The credential fields travel inside the object's opaque `extra` JSON. Every
//! mutation decodes them, hashes a supplied password through the host's slow hash,
//! and writes them back; keys other than `password` are carried through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{AppError, AppResult};
use crate::model::Helpers;
use crate::schema::Resource;

pub const PASSWORD_FIELD: &str = "data.password";

/// Whether a write must carry a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashPolicy {
    /// Full writes: the password must be present and is always re-hashed.
    Mandatory,
    /// Partial writes: hash only when the payload includes a password.
    Optional,
}

/// Account fields decoded from `extra`.
///
/// `password` is `None` when the key is absent and `Some(None)` when it is an
/// explicit `null`; a patch treats the latter as a password to validate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub password: Option<Option<String>>,
    #[serde(flatten)]
    pub rest: Map<String, JsonValue>,
}

fn present<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(de).map(Some)
}

impl Credentials {
    pub fn password(&self) -> &str {
        self.password.as_ref().and_then(|p| p.as_deref()).unwrap_or("")
    }

    fn hash_password(&mut self, helpers: &Helpers) -> AppResult<()> {
        let pass = self.password();
        if pass.is_empty() {
            return Err(AppError::required(PASSWORD_FIELD));
        }
        let hashed = helpers.slow_hash(pass).map_err(AppError::Internal)?;
        self.password = Some(Some(hashed));
        Ok(())
    }
}

/// Validate and hash the payload password according to `policy`.
///
/// With [`HashPolicy::Optional`] and no `password` key in the payload, `extra` is
/// left byte-for-byte as supplied. A `null` password counts as supplied and fails
/// as required, so a patch cannot clear the stored credential.
pub fn process(helpers: &Helpers, payload: &mut Resource, policy: HashPolicy) -> AppResult<()> {
    let mut creds: Credentials = payload.data.decode_extra().map_err(AppError::BadRequest)?;

    if policy == HashPolicy::Optional && creds.password.is_none() {
        return Ok(());
    }

    creds.hash_password(helpers)?;
    payload.data.encode_extra(&creds).map_err(AppError::internal)?;
    Ok(())
}
