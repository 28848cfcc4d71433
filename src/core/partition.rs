use crate::domain::model::{DominoSet, Hand, PlayerCount};
use crate::utils::error::{DealError, Result};

/// Tiles available for private hands. In a 3-player game the last tile is held back as the
/// shared opening tile.
fn dealable(set: &DominoSet, players: PlayerCount) -> usize {
    if players.has_shared_tile() {
        set.len().saturating_sub(1)
    } else {
        set.len()
    }
}

/// Slice the player's contiguous block out of an already-shuffled set.
pub fn deal_hand(set: &DominoSet, order_index: usize, players: PlayerCount) -> Result<Hand> {
    let hand_size = players.hand_size();
    let available = dealable(set, players);
    let out_of_range = || {
        DealError::invalid_configuration(format!(
            "player {} is past the last hand; only {} tiles can be dealt to {} players",
            order_index,
            available,
            players.get()
        ))
    };

    let start = order_index.checked_mul(hand_size).ok_or_else(out_of_range)?;
    let end = start.checked_add(hand_size).ok_or_else(out_of_range)?;
    if end > available {
        return Err(out_of_range());
    }

    let shared = if players.has_shared_tile() {
        set.last().cloned()
    } else {
        None
    };

    Ok(Hand {
        tiles: set.symbols()[start..end].to_vec(),
        shared,
    })
}

/// Render the hand of the player at `order_index` as mail-ready text.
pub fn partition(set: &DominoSet, order_index: usize, player_count: usize) -> Result<String> {
    let players = PlayerCount::try_from(player_count)?;
    Ok(deal_hand(set, order_index, players)?.to_string())
}

pub fn deal_all(set: &DominoSet, players: PlayerCount) -> Result<Vec<Hand>> {
    (0..players.get())
        .map(|order| deal_hand(set, order, players))
        .collect()
}
