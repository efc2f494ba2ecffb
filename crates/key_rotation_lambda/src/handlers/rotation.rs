use std::time::Instant;

use chrono::Utc;
use key_rotation_core::config::RotationConfig;
use key_rotation_core::contract::{
    AccessKeyStatus, AccessKeySummary, CredentialRecord, RotationResponse,
};
use key_rotation_core::retirement::plan_retirement;
use tracing::{error, info};

use crate::adapters::identity::IdentityService;
use crate::adapters::secret_store::SecretStore;
use crate::error::{RotationError, RotationStep, UpstreamError};

const COMPONENT: &str = "rotation_handler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOutcome {
    pub new_key_id: String,
    pub retired_keys: Vec<AccessKeySummary>,
}

/// Issues a new key for the configured user, stores it in the configured
/// secret, then deletes every other key the user holds.
///
/// The sequence stops at the first failing call. A failed secret write leaves
/// the new key live and unrecorded; a failed deletion leaves the remaining
/// stale keys in place.
pub fn handle_rotation(
    config: &RotationConfig,
    identity: &impl IdentityService,
    secrets: &impl SecretStore,
) -> Result<RotationResponse, RotationError> {
    let started_at = Instant::now();
    info!(
        component = COMPONENT,
        event = "rotation_started",
        iam_user = %config.iam_user,
        secret_id = %config.secret_arn,
    );

    match rotate(config, identity, secrets) {
        Ok(outcome) => {
            info!(
                component = COMPONENT,
                event = "rotation_completed",
                iam_user = %config.iam_user,
                new_key = %outcome.new_key_id,
                retired_keys = outcome.retired_keys.len(),
                duration_ms = started_at.elapsed().as_millis() as u64,
            );
            Ok(RotationResponse::rotated(outcome.new_key_id))
        }
        Err(rotation_error) => {
            error!(
                component = COMPONENT,
                event = "rotation_failed",
                iam_user = %config.iam_user,
                step = rotation_error
                    .step()
                    .map(RotationStep::as_str)
                    .unwrap_or("encode_credential_record"),
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %rotation_error,
            );
            Err(rotation_error)
        }
    }
}

pub fn rotate(
    config: &RotationConfig,
    identity: &impl IdentityService,
    secrets: &impl SecretStore,
) -> Result<RotationOutcome, RotationError> {
    let user = config.iam_user.as_str();

    let new_key = identity
        .create_access_key(user)
        .map_err(|message| UpstreamError::new(RotationStep::CreateAccessKey, message))?;
    info!(
        component = COMPONENT,
        event = "access_key_created",
        access_key_id = %new_key.access_key_id,
    );

    let secret_string = CredentialRecord::from(&new_key).to_secret_string()?;
    secrets
        .put_secret_value(&config.secret_arn, &secret_string)
        .map_err(|message| UpstreamError::new(RotationStep::PutSecretValue, message))?;
    info!(
        component = COMPONENT,
        event = "secret_updated",
        secret_id = %config.secret_arn,
        access_key_id = %new_key.access_key_id,
    );

    let listed = identity
        .list_access_keys(user)
        .map_err(|message| UpstreamError::new(RotationStep::ListAccessKeys, message))?;
    let plan = plan_retirement(&listed, &new_key.access_key_id);

    let now = Utc::now();
    for key in &plan {
        identity
            .delete_access_key(user, &key.access_key_id)
            .map_err(|message| {
                UpstreamError::new(
                    RotationStep::DeleteAccessKey,
                    format!("{}: {message}", key.access_key_id),
                )
            })?;
        info!(
            component = COMPONENT,
            event = "access_key_retired",
            access_key_id = %key.access_key_id,
            key_status = key.status.map(AccessKeyStatus::as_str),
            age_days = key.age_days(now),
        );
    }

    Ok(RotationOutcome {
        new_key_id: new_key.access_key_id,
        retired_keys: plan,
    })
}
