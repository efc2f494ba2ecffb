use crate::contract::AccessKeySummary;

/// Selects every listed key other than `new_key_id`, preserving listing order.
///
/// An empty plan is valid: it means the new key is the only one left.
pub fn plan_retirement(existing: &[AccessKeySummary], new_key_id: &str) -> Vec<AccessKeySummary> {
    existing
        .iter()
        .filter(|key| key.access_key_id != new_key_id)
        .cloned()
        .collect()
}
