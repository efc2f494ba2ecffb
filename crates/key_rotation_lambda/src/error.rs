use thiserror::Error;

/// The upstream call a rotation was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    CreateAccessKey,
    PutSecretValue,
    ListAccessKeys,
    DeleteAccessKey,
}

impl RotationStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateAccessKey => "create_access_key",
            Self::PutSecretValue => "put_secret_value",
            Self::ListAccessKeys => "list_access_keys",
            Self::DeleteAccessKey => "delete_access_key",
        }
    }
}

impl std::fmt::Display for RotationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any rejection from IAM or Secrets Manager. Never retried locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} failed: {message}")]
pub struct UpstreamError {
    pub step: RotationStep,
    pub message: String,
}

impl UpstreamError {
    pub fn new(step: RotationStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RotationError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error("failed to encode credential record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RotationError {
    pub fn step(&self) -> Option<RotationStep> {
        match self {
            Self::Upstream(error) => Some(error.step),
            Self::Encode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_message_names_the_step() {
        let error = RotationError::from(UpstreamError::new(
            RotationStep::PutSecretValue,
            "ResourceNotFoundException: secret not found",
        ));

        assert_eq!(error.step(), Some(RotationStep::PutSecretValue));
        assert_eq!(
            error.to_string(),
            "put_secret_value failed: ResourceNotFoundException: secret not found"
        );
    }
}
