use key_rotation_core::contract::{AccessKeyPair, AccessKeySummary};

/// The slice of the IAM API the rotator needs.
pub trait IdentityService {
    fn create_access_key(&self, user: &str) -> Result<AccessKeyPair, String>;

    fn list_access_keys(&self, user: &str) -> Result<Vec<AccessKeySummary>, String>;

    fn delete_access_key(&self, user: &str, access_key_id: &str) -> Result<(), String>;
}
