use crate::config::{DealConfig, TlsMode};
use crate::core::{MailMessage, MailTransport, Secret};
use crate::utils::error::{DealError, Result};
use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::{Category, Code, Detail, Severity};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP submission through lettre. One connection per send; the login is the sender address.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailTransport {
    pub fn new(config: &DealConfig, password: Secret) -> Result<Self> {
        let sender: Mailbox = config.smtp.sender.parse().map_err(|e: AddressError| {
            DealError::InvalidConfigValueError {
                field: "smtp.sender".to_string(),
                value: config.smtp.sender.clone(),
                reason: e.to_string(),
            }
        })?;

        let builder = match config.tls_mode() {
            TlsMode::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp.server),
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.server)
            }
        }
        .map_err(|e| DealError::InvalidConfigValueError {
            field: "smtp.server".to_string(),
            value: config.smtp.server.clone(),
            reason: e.to_string(),
        })?;

        let transport = builder
            .port(config.smtp_port())
            .credentials(Credentials::new(
                config.smtp.sender.clone(),
                password.expose().to_string(),
            ))
            .build();

        tracing::debug!(
            server = %config.smtp.server,
            port = config.smtp_port(),
            tls = ?config.tls_mode(),
            "SMTP transport configured"
        );

        Ok(Self { transport, sender })
    }

    pub fn build_message(&self, message: &MailMessage) -> Result<Message> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e: AddressError| DealError::delivery(&message.to, e.to_string()))?;

        Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| DealError::delivery(&message.to, e.to_string()))
    }
}

/// 530 authentication required, 534 mechanism too weak, 535 credentials invalid.
fn is_auth_rejection(code: Option<Code>) -> bool {
    matches!(
        code,
        Some(Code {
            severity: Severity::PermanentNegativeCompletion,
            category: Category::Unspecified3,
            detail: Detail::Zero | Detail::Four | Detail::Five,
        })
    )
}

fn classify(recipient: &str, err: lettre::transport::smtp::Error) -> DealError {
    if is_auth_rejection(err.status()) {
        DealError::AuthenticationError {
            message: err.to_string(),
        }
    } else {
        DealError::delivery(recipient, err.to_string())
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let email = self.build_message(message)?;
        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| classify(&message.to, e))?;

        tracing::debug!(recipient = %message.to, code = %response.code(), "Message accepted");
        Ok(())
    }

    async fn verify(&self) -> Result<()> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DealError::delivery(
                self.sender.email.to_string(),
                "mail server did not answer the connection check",
            )),
            Err(e) => Err(classify(&self.sender.email.to_string(), e)),
        }
    }
}
