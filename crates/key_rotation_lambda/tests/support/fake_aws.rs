use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use key_rotation_core::config::RotationConfig;
use key_rotation_core::contract::{AccessKeyPair, AccessKeySummary};
use key_rotation_lambda::adapters::identity::IdentityService;
use key_rotation_lambda::adapters::secret_store::SecretStore;

pub const USER: &str = "svc-bot";
pub const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:svc-bot";

pub fn config() -> RotationConfig {
    RotationConfig {
        iam_user: USER.to_string(),
        secret_arn: SECRET_ARN.to_string(),
    }
}

/// In-memory IAM: users own ordered key lists, ids are issued from a fixed
/// sequence so tests can predict them.
pub struct InMemoryIam {
    keys: Mutex<BTreeMap<String, Vec<String>>>,
    issued_ids: Mutex<Vec<String>>,
    deletions: Mutex<Vec<String>>,
    key_limit: Option<usize>,
    fail_create: bool,
    fail_list: bool,
    fail_delete_of: Option<String>,
}

impl InMemoryIam {
    pub fn with_keys(user: &str, existing: &[&str]) -> Self {
        Self {
            keys: Mutex::new(BTreeMap::from([(
                user.to_string(),
                existing.iter().map(|id| id.to_string()).collect(),
            )])),
            issued_ids: Mutex::new(vec!["AKIANEW2".to_string(), "AKIANEW3".to_string()]),
            deletions: Mutex::new(Vec::new()),
            key_limit: None,
            fail_create: false,
            fail_list: false,
            fail_delete_of: None,
        }
    }

    pub fn key_limit(mut self, limit: usize) -> Self {
        self.key_limit = Some(limit);
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_delete_of(mut self, access_key_id: &str) -> Self {
        self.fail_delete_of = Some(access_key_id.to_string());
        self
    }

    pub fn keys_of(&self, user: &str) -> Vec<String> {
        self.keys
            .lock()
            .expect("poisoned mutex")
            .get(user)
            .cloned()
            .unwrap_or_default()
    }

    pub fn deletions(&self) -> Vec<String> {
        self.deletions.lock().expect("poisoned mutex").clone()
    }
}

impl IdentityService for InMemoryIam {
    fn create_access_key(&self, user: &str) -> Result<AccessKeyPair, String> {
        if self.fail_create {
            return Err("ServiceFailure: simulated outage".to_string());
        }

        let mut keys = self.keys.lock().expect("poisoned mutex");
        let owned = keys
            .get_mut(user)
            .ok_or_else(|| format!("NoSuchEntity: user {user} not found"))?;
        if self.key_limit.is_some_and(|limit| owned.len() >= limit) {
            return Err("LimitExceeded: Cannot exceed quota for AccessKeysPerUser".to_string());
        }

        let mut issued = self.issued_ids.lock().expect("poisoned mutex");
        if issued.is_empty() {
            return Err("fake IAM ran out of key ids".to_string());
        }
        let access_key_id = issued.remove(0);
        owned.push(access_key_id.clone());

        Ok(AccessKeyPair {
            secret_access_key: format!("secret-for-{access_key_id}"),
            access_key_id,
        })
    }

    fn list_access_keys(&self, user: &str) -> Result<Vec<AccessKeySummary>, String> {
        if self.fail_list {
            return Err("Throttling: Rate exceeded".to_string());
        }

        let keys = self.keys.lock().expect("poisoned mutex");
        let owned = keys
            .get(user)
            .ok_or_else(|| format!("NoSuchEntity: user {user} not found"))?;
        Ok(owned.iter().map(AccessKeySummary::new).collect())
    }

    fn delete_access_key(&self, user: &str, access_key_id: &str) -> Result<(), String> {
        if self.fail_delete_of.as_deref() == Some(access_key_id) {
            return Err("AccessDenied: not authorized to delete".to_string());
        }

        let mut keys = self.keys.lock().expect("poisoned mutex");
        let owned = keys
            .get_mut(user)
            .ok_or_else(|| format!("NoSuchEntity: user {user} not found"))?;
        let before = owned.len();
        owned.retain(|id| id != access_key_id);
        if owned.len() == before {
            return Err(format!("NoSuchEntity: access key {access_key_id} not found"));
        }

        self.deletions
            .lock()
            .expect("poisoned mutex")
            .push(access_key_id.to_string());
        Ok(())
    }
}

/// In-memory Secrets Manager. Only secrets seeded up front accept writes.
pub struct InMemorySecrets {
    values: Mutex<HashMap<String, String>>,
}

impl InMemorySecrets {
    pub fn with_secret(secret_id: &str) -> Self {
        Self {
            values: Mutex::new(HashMap::from([(
                secret_id.to_string(),
                "{}".to_string(),
            )])),
        }
    }

    pub fn empty() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }

    pub fn value_of(&self, secret_id: &str) -> Option<String> {
        self.values
            .lock()
            .expect("poisoned mutex")
            .get(secret_id)
            .cloned()
    }
}

impl SecretStore for InMemorySecrets {
    fn put_secret_value(&self, secret_id: &str, secret_string: &str) -> Result<(), String> {
        let mut values = self.values.lock().expect("poisoned mutex");
        let slot = values.get_mut(secret_id).ok_or_else(|| {
            format!("ResourceNotFoundException: Secrets Manager can't find {secret_id}")
        })?;
        *slot = secret_string.to_string();
        Ok(())
    }
}
