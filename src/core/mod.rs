pub mod dealer;
pub mod notifier;
pub mod partition;

pub use crate::domain::model::{DominoSet, DominoSymbol, Hand, MailMessage, Player, PlayerCount};
pub use crate::domain::ports::{ConfigProvider, CredentialProvider, MailTransport, Secret};
pub use crate::utils::error::Result;
