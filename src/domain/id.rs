use {
    super::error::StoreError,
    derive_more::Display,
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Audit record identifier. UUIDv7, so ids generated later sort later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn new(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        if Uuid::parse_str(&id).is_err() {
            return Err(StoreError::Serialization(format!(
                "RecordId must be a UUID, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
