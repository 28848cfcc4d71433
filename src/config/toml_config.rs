use crate::core::ConfigProvider;
use crate::utils::error::{DealError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_players, validate_positive_number, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

pub const SMTPS_PORT: u16 = 465;
pub const SUBMISSION_PORT: u16 = 587;

#[derive(Debug, Clone, Deserialize)]
pub struct DealConfig {
    pub game: GameConfig,
    pub smtp: SmtpConfig,
    pub delivery: Option<DeliveryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    /// Defaults to 465 for `wrapper`, 587 for `starttls`.
    pub port: Option<u16>,
    pub sender: String,
    pub tls: Option<TlsMode>,
    /// Environment variable holding the password. Prompted for when unset.
    pub password_env: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// TLS from the first byte (SMTPS, usually port 465).
    #[default]
    Wrapper,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    Starttls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryConfig {
    pub continue_on_error: Option<bool>,
    pub verify_before_send: Option<bool>,
}

impl DealConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DealError::ConfigParseError {
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DealError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DealError::ConfigParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_players("game.players", &self.game.players)?;
        validate_non_empty_string("smtp.server", &self.smtp.server)?;
        validate_non_empty_string("smtp.sender", &self.smtp.sender)?;
        validate_positive_number("smtp.port", usize::from(self.smtp_port()), 1)?;

        if let Some(var) = &self.smtp.password_env {
            validate_non_empty_string("smtp.password_env", var)?;
        }

        Ok(())
    }

    /// Configured port, or the standard one for the TLS mode.
    pub fn smtp_port(&self) -> u16 {
        self.smtp.port.unwrap_or(match self.tls_mode() {
            TlsMode::Wrapper => SMTPS_PORT,
            TlsMode::Starttls => SUBMISSION_PORT,
        })
    }

    pub fn tls_mode(&self) -> TlsMode {
        self.smtp.tls.unwrap_or_default()
    }

    pub fn set_continue_on_error(&mut self, value: bool) {
        self.delivery
            .get_or_insert_with(DeliveryConfig::default)
            .continue_on_error = Some(value);
    }
}

impl ConfigProvider for DealConfig {
    fn players(&self) -> &[String] {
        &self.game.players
    }

    fn continue_on_error(&self) -> bool {
        self.delivery
            .as_ref()
            .and_then(|d| d.continue_on_error)
            .unwrap_or(false)
    }

    fn verify_before_send(&self) -> bool {
        self.delivery
            .as_ref()
            .and_then(|d| d.verify_before_send)
            .unwrap_or(true)
    }
}

impl Validate for DealConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
