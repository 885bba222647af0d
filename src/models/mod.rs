pub mod credential;
pub mod enrollment;
pub mod student;
pub mod subject;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::database::{Collection, Document};
use crate::validation::Schema;

pub use credential::Credential;
pub use enrollment::Enrollment;
pub use student::{CivilStatus, Sex, Student, StudentStatus};
pub use subject::Subject;

/// A typed document kept in one collection under a string key.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn key(&self) -> String;
}

/// An entity exposed through the generic CRUD routes, identified by an integer id.
pub trait Resource: Entity + Clone {
    /// Singular name used in messages ("Student not found").
    const LABEL: &'static str;
    /// Field holding the identifier, also the `:id` path segment.
    const ID_FIELD: &'static str;

    fn id(&self) -> i64;

    fn schema() -> &'static Schema;
}

/// Entity plus store-assigned timestamps; this is what the API returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub fn to_document<T: Serialize>(entity: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(entity)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(doc))
}
