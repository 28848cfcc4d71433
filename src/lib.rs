pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use adapters::PromptCredentials;
pub use adapters::{EnvCredentials, SmtpMailTransport, StaticCredentials};
pub use config::DealConfig;

pub use self::core::{
    dealer::{dry_run, DealReport, Dealer},
    notifier::Notifier,
    partition::partition,
};
pub use domain::model::{DominoSet, Hand, PlayerCount};
pub use utils::error::{DealError, Result};
