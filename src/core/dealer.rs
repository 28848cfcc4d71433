use crate::core::notifier::Notifier;
use crate::core::partition::deal_all;
use crate::domain::model::{DominoSet, Player, PlayerCount};
use crate::domain::ports::{ConfigProvider, MailTransport};
use crate::utils::error::{DealError, Result};

/// Outcome of one deal. Failures are only recorded when the run continues past them.
#[derive(Debug, Default)]
pub struct DealReport {
    pub delivered: Vec<Player>,
    pub failed: Vec<(Player, DealError)>,
}

impl DealReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_addresses(&self) -> Vec<&str> {
        self.failed
            .iter()
            .map(|(player, _)| player.address.as_str())
            .collect()
    }
}

pub struct Dealer<T: MailTransport, C: ConfigProvider> {
    notifier: Notifier<T>,
    config: C,
}

impl<T: MailTransport, C: ConfigProvider> Dealer<T, C> {
    pub fn new(notifier: Notifier<T>, config: C) -> Self {
        Self { notifier, config }
    }

    /// Deal every configured player from `set` and mail each hand, in player order.
    pub async fn run(&self, set: &DominoSet, timestamp_label: &str) -> Result<DealReport> {
        let (players, count) = seat_players(&self.config)?;
        let hands = deal_all(set, count)?;

        if self.config.verify_before_send() {
            tracing::info!("Verifying mail server login");
            self.notifier.verify().await?;
        }

        tracing::info!(players = players.len(), "Dealing hands");
        let mut report = DealReport::default();

        for (player, hand) in players.into_iter().zip(hands) {
            match self
                .notifier
                .notify(&player.address, &hand.to_string(), timestamp_label)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        recipient = %player.address,
                        order = player.order,
                        tiles = hand.tile_count(),
                        "Hand delivered"
                    );
                    println!("Email sent to: {}", player.address);
                    report.delivered.push(player);
                }
                Err(e) if self.config.continue_on_error() && !e.aborts_run() => {
                    tracing::warn!(
                        recipient = %player.address,
                        order = player.order,
                        error = %e,
                        "Hand not delivered, continuing with remaining players"
                    );
                    report.failed.push((player, e));
                }
                Err(e) => {
                    tracing::error!(
                        recipient = %player.address,
                        order = player.order,
                        delivered = ?report
                            .delivered
                            .iter()
                            .map(|p| p.address.as_str())
                            .collect::<Vec<_>>(),
                        error = %e,
                        "Deal aborted"
                    );
                    return Err(e);
                }
            }
        }

        if report.is_complete() {
            tracing::info!(delivered = report.delivered.len(), "All hands delivered");
        } else {
            tracing::warn!(
                delivered = report.delivered.len(),
                failed = ?report.failed_addresses(),
                "Some hands were not delivered"
            );
        }

        Ok(report)
    }
}

fn seat_players<C: ConfigProvider>(config: &C) -> Result<(Vec<Player>, PlayerCount)> {
    let players = Player::from_addresses(config.players());
    let count = PlayerCount::try_from(players.len())?;
    Ok((players, count))
}

/// Compute every hand without sending anything. Returns each player with their tile count;
/// hand contents stay hidden.
pub fn dry_run<C: ConfigProvider>(config: &C, set: &DominoSet) -> Result<Vec<(Player, usize)>> {
    let (players, count) = seat_players(config)?;
    let hands = deal_all(set, count)?;

    let plan: Vec<(Player, usize)> = players
        .into_iter()
        .zip(hands)
        .map(|(player, hand)| {
            tracing::info!(
                recipient = %player.address,
                order = player.order,
                tiles = hand.tile_count(),
                shared_tile = hand.shared.is_some(),
                "Would send hand"
            );
            (player, hand.tile_count())
        })
        .collect();

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::MailMessage;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct TestConfig {
        players: Vec<String>,
        continue_on_error: bool,
    }

    impl TestConfig {
        fn new(players: &[&str], continue_on_error: bool) -> Self {
            Self {
                players: players.iter().map(|p| p.to_string()).collect(),
                continue_on_error,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn players(&self) -> &[String] {
            &self.players
        }

        fn continue_on_error(&self) -> bool {
            self.continue_on_error
        }

        fn verify_before_send(&self) -> bool {
            true
        }
    }

    #[derive(Clone, Default)]
    struct FlakyTransport {
        sent: Arc<Mutex<Vec<MailMessage>>>,
        verified: Arc<Mutex<bool>>,
        reject_login: bool,
        unreachable: Vec<String>,
    }

    #[async_trait]
    impl MailTransport for FlakyTransport {
        async fn send(&self, message: &MailMessage) -> Result<()> {
            if self.unreachable.contains(&message.to) {
                return Err(DealError::delivery(&message.to, "mailbox unavailable"));
            }
            self.sent.lock().await.push(message.clone());
            Ok(())
        }

        async fn verify(&self) -> Result<()> {
            if self.reject_login {
                return Err(DealError::AuthenticationError {
                    message: "535 authentication failed".to_string(),
                });
            }
            *self.verified.lock().await = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_delivers_in_player_order() {
        let transport = FlakyTransport::default();
        let dealer = Dealer::new(
            Notifier::new(transport.clone()),
            TestConfig::new(&["a@x", "b@x", "c@x", "d@x"], false),
        );

        let report = dealer.run(&DominoSet::standard(), "L").await.unwrap();

        assert!(report.is_complete());
        assert!(*transport.verified.lock().await);
        let sent = transport.sent.lock().await;
        let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        assert_eq!(recipients, vec!["a@x", "b@x", "c@x", "d@x"]);
    }

    #[tokio::test]
    async fn test_run_aborts_on_first_failure_by_default() {
        let transport = FlakyTransport {
            unreachable: vec!["b@x".to_string()],
            ..Default::default()
        };
        let dealer = Dealer::new(
            Notifier::new(transport.clone()),
            TestConfig::new(&["a@x", "b@x", "c@x"], false),
        );

        let err = dealer.run(&DominoSet::standard(), "L").await.unwrap_err();

        assert!(matches!(err, DealError::DeliveryError { ref recipient, .. } if recipient == "b@x"));
        assert_eq!(transport.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_run_continues_past_delivery_failure_when_configured() {
        let transport = FlakyTransport {
            unreachable: vec!["b@x".to_string()],
            ..Default::default()
        };
        let dealer = Dealer::new(
            Notifier::new(transport.clone()),
            TestConfig::new(&["a@x", "b@x", "c@x"], true),
        );

        let report = dealer.run(&DominoSet::standard(), "L").await.unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.failed_addresses(), vec!["b@x"]);
        assert_eq!(report.delivered.len(), 2);
        assert_eq!(transport.sent.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_login_stops_before_any_send() {
        let transport = FlakyTransport {
            reject_login: true,
            ..Default::default()
        };
        let dealer = Dealer::new(
            Notifier::new(transport.clone()),
            TestConfig::new(&["a@x", "b@x", "c@x"], true),
        );

        let err = dealer.run(&DominoSet::standard(), "L").await.unwrap_err();

        assert!(matches!(err, DealError::AuthenticationError { .. }));
        assert!(transport.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_player_count_sends_nothing() {
        let transport = FlakyTransport::default();
        let dealer = Dealer::new(
            Notifier::new(transport.clone()),
            TestConfig::new(&["a@x", "b@x"], false),
        );

        let err = dealer.run(&DominoSet::standard(), "L").await.unwrap_err();

        assert!(matches!(err, DealError::InvalidConfiguration { .. }));
        assert!(transport.sent.lock().await.is_empty());
        assert!(!*transport.verified.lock().await);
    }

    #[test]
    fn test_dry_run_reports_tile_counts() {
        let config = TestConfig::new(&["a@x", "b@x", "c@x"], false);

        let plan = dry_run(&config, &DominoSet::standard()).unwrap();

        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|(_, tiles)| *tiles == 9));
        assert_eq!(plan[2].0.order, 2);
    }
}
