use aws_sdk_iam::types::{AccessKeyMetadata, StatusType};
use chrono::{DateTime, Utc};
use key_rotation_core::config::RotationConfig;
use key_rotation_core::contract::{
    AccessKeyPair, AccessKeyStatus, AccessKeySummary, RotationResponse,
};
use key_rotation_lambda::adapters::identity::IdentityService;
use key_rotation_lambda::adapters::secret_store::SecretStore;
use key_rotation_lambda::handlers::rotation::handle_rotation;
use key_rotation_lambda::logging::init_json_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

const COMPONENT: &str = "rotate_access_key";

struct IamIdentityService {
    iam_client: aws_sdk_iam::Client,
}

impl IdentityService for IamIdentityService {
    fn create_access_key(&self, user: &str) -> Result<AccessKeyPair, String> {
        let client = self.iam_client.clone();
        let user_name = user.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .create_access_key()
                    .user_name(user_name)
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to create access key: {}",
                            aws_sdk_iam::error::DisplayErrorContext(&error)
                        )
                    })?;
                let access_key = output
                    .access_key()
                    .ok_or_else(|| "create access key response had no access key".to_string())?;

                Ok(AccessKeyPair {
                    access_key_id: access_key.access_key_id().to_string(),
                    secret_access_key: access_key.secret_access_key().to_string(),
                })
            })
        })
    }

    fn list_access_keys(&self, user: &str) -> Result<Vec<AccessKeySummary>, String> {
        let client = self.iam_client.clone();
        let user_name = user.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut summaries = Vec::new();
                let mut marker: Option<String> = None;
                loop {
                    let output = client
                        .list_access_keys()
                        .user_name(user_name.clone())
                        .set_marker(marker.take())
                        .send()
                        .await
                        .map_err(|error| {
                            format!(
                                "failed to list access keys: {}",
                                aws_sdk_iam::error::DisplayErrorContext(&error)
                            )
                        })?;

                    summaries.extend(
                        output
                            .access_key_metadata()
                            .iter()
                            .filter_map(summary_from_metadata),
                    );

                    if !output.is_truncated() {
                        break;
                    }
                    match output.marker() {
                        Some(next) => marker = Some(next.to_string()),
                        None => break,
                    }
                }
                Ok(summaries)
            })
        })
    }

    fn delete_access_key(&self, user: &str, access_key_id: &str) -> Result<(), String> {
        let client = self.iam_client.clone();
        let user_name = user.to_string();
        let key_id = access_key_id.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .delete_access_key()
                    .user_name(user_name)
                    .access_key_id(key_id)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to delete access key: {}",
                            aws_sdk_iam::error::DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

struct SecretsManagerStore {
    secrets_client: aws_sdk_secretsmanager::Client,
}

impl SecretStore for SecretsManagerStore {
    fn put_secret_value(&self, secret_id: &str, secret_string: &str) -> Result<(), String> {
        let client = self.secrets_client.clone();
        let target_secret = secret_id.to_string();
        let value = secret_string.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_secret_value()
                    .secret_id(target_secret)
                    .secret_string(value)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| {
                        format!(
                            "failed to put secret value: {}",
                            aws_sdk_secretsmanager::error::DisplayErrorContext(&error)
                        )
                    })
            })
        })
    }
}

fn summary_from_metadata(metadata: &AccessKeyMetadata) -> Option<AccessKeySummary> {
    let access_key_id = metadata.access_key_id()?;
    Some(AccessKeySummary {
        access_key_id: access_key_id.to_string(),
        status: metadata.status().and_then(|status| match status {
            StatusType::Active => Some(AccessKeyStatus::Active),
            StatusType::Inactive => Some(AccessKeyStatus::Inactive),
            _ => None,
        }),
        created_at: metadata
            .create_date()
            .and_then(|date| DateTime::<Utc>::from_timestamp(date.secs(), date.subsec_nanos())),
    })
}

/// SDK config loader for both clients. Standard retries are switched off so
/// each upstream call is attempted exactly once.
fn sdk_config_loader() -> aws_config::ConfigLoader {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .retry_config(aws_config::retry::RetryConfig::disabled())
}

struct RuntimeDependencies {
    config: RotationConfig,
    identity: IamIdentityService,
    secrets: SecretsManagerStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<RotationResponse, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    span.in_scope(|| handle_rotation(&deps.config, &deps.identity, &deps.secrets))
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_json_logging();

    let config = RotationConfig::from_env()?;
    let aws_config = sdk_config_loader().load().await;
    let deps = RuntimeDependencies {
        identity: IamIdentityService {
            iam_client: aws_sdk_iam::Client::new(&aws_config),
        },
        secrets: SecretsManagerStore {
            secrets_client: aws_sdk_secretsmanager::Client::new(&aws_config),
        },
        config,
    };
    info!(
        component = COMPONENT,
        event = "runtime_ready",
        iam_user = %deps.config.iam_user,
        secret_id = %deps.config.secret_arn,
    );

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
