// Adapters layer: concrete implementations of the domain ports (mail server, password source).

pub mod credentials;
pub mod smtp;

#[cfg(feature = "cli")]
pub use credentials::PromptCredentials;
pub use credentials::{EnvCredentials, StaticCredentials};
pub use smtp::SmtpMailTransport;
