use thiserror::Error;

pub const IAM_USER_ENV: &str = "IAM_USER";
pub const SECRET_ARN_ENV: &str = "SECRET_ARN";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{0} must not be blank")]
    Blank(&'static str),
}

/// Process-scoped rotation target, read once before the runtime loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// IAM user whose access keys are rotated.
    pub iam_user: String,
    /// Secrets Manager secret id or ARN that receives the new credential.
    pub secret_arn: String,
}

impl RotationConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            iam_user: required(&lookup, IAM_USER_ENV)?,
            secret_arn: required(&lookup, SECRET_ARN_ENV)?,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or(ConfigError::Missing(name))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Blank(name));
    }
    Ok(trimmed.to_string())
}
