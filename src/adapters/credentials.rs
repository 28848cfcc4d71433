use crate::core::{CredentialProvider, Secret};
use crate::utils::error::{DealError, Result};

fn non_empty(value: String, source: &str) -> Result<Secret> {
    if value.is_empty() {
        return Err(DealError::CredentialError {
            message: format!("{} gave an empty password", source),
        });
    }
    Ok(Secret::new(value))
}

/// Ask on the terminal without echoing what is typed.
#[cfg(feature = "cli")]
pub struct PromptCredentials {
    prompt: String,
}

#[cfg(feature = "cli")]
impl PromptCredentials {
    pub fn new() -> Self {
        Self {
            prompt: "Type your mail server password and press enter: ".to_string(),
        }
    }
}

#[cfg(feature = "cli")]
impl Default for PromptCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
impl CredentialProvider for PromptCredentials {
    fn get_secret(&self) -> Result<Secret> {
        let password = rpassword::prompt_password(&self.prompt).map_err(|e| DealError::CredentialError {
            message: format!("could not read password from terminal: {}", e),
        })?;
        non_empty(password, "terminal prompt")
    }
}

pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredentials {
    fn get_secret(&self) -> Result<Secret> {
        let password = std::env::var(&self.var).map_err(|_| DealError::CredentialError {
            message: format!("environment variable {} is not set", self.var),
        })?;
        non_empty(password, &self.var)
    }
}

pub struct StaticCredentials(Secret);

impl StaticCredentials {
    pub fn new(password: impl Into<String>) -> Self {
        Self(Secret::new(password))
    }
}

impl CredentialProvider for StaticCredentials {
    fn get_secret(&self) -> Result<Secret> {
        Ok(self.0.clone())
    }
}
