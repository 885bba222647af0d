use serde::{Deserialize, Serialize};

use super::Entity;
use crate::database::Collection;

/// Login identity. Only the bcrypt hash of the secret is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}

impl Entity for Credential {
    const COLLECTION: Collection = Collection::Credentials;

    fn key(&self) -> String {
        self.username.clone()
    }
}
