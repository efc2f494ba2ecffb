use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROTATED_STATUS: &str = "rotated";

/// A freshly issued access key, including its secret material.
///
/// The secret is only available at creation time, so this is the one value
/// that must reach the secret store intact. `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKeyPair {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for AccessKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeyPair")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKeyStatus {
    Active,
    Inactive,
}

impl AccessKeyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// One entry from the identity service's key listing. Never carries secret
/// material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKeySummary {
    pub access_key_id: String,
    pub status: Option<AccessKeyStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AccessKeySummary {
    pub fn new(access_key_id: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            status: None,
            created_at: None,
        }
    }

    /// Whole days between creation and `now`, when the creation date is known.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.created_at
            .map(|created_at| now.signed_duration_since(created_at).num_days())
    }
}

/// The JSON envelope written as the full secret string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialRecord {
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
}

impl CredentialRecord {
    pub fn to_secret_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&AccessKeyPair> for CredentialRecord {
    fn from(pair: &AccessKeyPair) -> Self {
        Self {
            aws_access_key_id: pair.access_key_id.clone(),
            aws_secret_access_key: pair.secret_access_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RotationResponse {
    pub status: String,
    pub new_key: String,
}

impl RotationResponse {
    pub fn rotated(new_key: impl Into<String>) -> Self {
        Self {
            status: ROTATED_STATUS.to_string(),
            new_key: new_key.into(),
        }
    }
}
