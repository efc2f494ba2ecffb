pub trait SecretStore {
    /// Replaces the whole secret value of `secret_id` with `secret_string`.
    fn put_secret_value(&self, secret_id: &str, secret_string: &str) -> Result<(), String>;
}
