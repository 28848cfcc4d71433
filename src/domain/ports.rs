use crate::domain::model::MailMessage;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Mail server password. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

pub trait ConfigProvider: Send + Sync {
    fn players(&self) -> &[String];
    fn continue_on_error(&self) -> bool;
    fn verify_before_send(&self) -> bool;
}

pub trait CredentialProvider: Send + Sync {
    fn get_secret(&self) -> Result<Secret>;
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submit one message. Sender and credentials are bound to the transport.
    async fn send(&self, message: &MailMessage) -> Result<()>;

    /// Connect and authenticate without sending anything.
    async fn verify(&self) -> Result<()> {
        Ok(())
    }
}
