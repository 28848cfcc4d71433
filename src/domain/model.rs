use crate::utils::error::{DealError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// Number of tiles in a double-six set.
pub const SET_SIZE: usize = 28;

const HORIZONTAL_BASE: u32 = 0x1F031;
const VERTICAL_BASE: u32 = 0x1F063;

/// Display token for one physical tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DominoSymbol(String);

impl DominoSymbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Both horizontal orientations back to back, or a single vertical glyph for a double.
    fn for_tile(high: u32, low: u32) -> Self {
        let glyph = |code: u32| char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
        if high == low {
            Self(glyph(VERTICAL_BASE + 8 * high).to_string())
        } else {
            let mut token = String::with_capacity(8);
            token.push(glyph(HORIZONTAL_BASE + 7 * high + low));
            token.push(glyph(HORIZONTAL_BASE + 7 * low + high));
            Self(token)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DominoSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The 28 tiles of a double-six set, in dealing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominoSet {
    tiles: Vec<DominoSymbol>,
}

impl DominoSet {
    pub fn standard() -> Self {
        let tiles = (0..=6u32)
            .flat_map(|high| (high..=6).map(move |low| DominoSymbol::for_tile(high, low)))
            .collect();
        Self { tiles }
    }

    pub fn from_symbols<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tiles: Vec<DominoSymbol> = symbols.into_iter().map(DominoSymbol::new).collect();
        if tiles.len() != SET_SIZE {
            return Err(DealError::invalid_configuration(format!(
                "a domino set needs exactly {} tiles, got {}",
                SET_SIZE,
                tiles.len()
            )));
        }

        let mut seen = HashSet::with_capacity(SET_SIZE);
        if let Some(duplicate) = tiles.iter().find(|tile| !seen.insert(*tile)) {
            return Err(DealError::invalid_configuration(format!(
                "domino set contains '{}' more than once",
                duplicate
            )));
        }

        Ok(Self { tiles })
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.shuffle(rng);
    }

    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.shuffle(rng);
        self
    }

    pub fn symbols(&self) -> &[DominoSymbol] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile left over in a 3-player deal.
    pub fn last(&self) -> Option<&DominoSymbol> {
        self.tiles.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCount {
    Three,
    Four,
}

impl PlayerCount {
    pub fn hand_size(self) -> usize {
        match self {
            Self::Three => 9,
            Self::Four => 7,
        }
    }

    pub fn has_shared_tile(self) -> bool {
        matches!(self, Self::Three)
    }

    pub fn get(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = DealError;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(DealError::invalid_configuration(format!(
                "player count must be 3 or 4, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub address: String,
    pub order: usize,
}

impl Player {
    pub fn from_addresses(addresses: &[String]) -> Vec<Self> {
        addresses
            .iter()
            .enumerate()
            .map(|(order, address)| Self {
                address: address.clone(),
                order,
            })
            .collect()
    }
}

/// Tiles dealt to one player, plus the opening tile in a 3-player game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub tiles: Vec<DominoSymbol>,
    pub shared: Option<DominoSymbol>,
}

impl Hand {
    /// Tiles owned by this player alone.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.tiles {
            write!(f, "[{}]", tile)?;
        }
        if let Some(shared) = &self.shared {
            write!(f, "<<<{}>>>", shared)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_set_is_complete_and_unique() {
        let set = DominoSet::standard();
        assert_eq!(set.len(), SET_SIZE);

        let unique: HashSet<_> = set.symbols().iter().collect();
        assert_eq!(unique.len(), SET_SIZE);
    }

    #[test]
    fn test_standard_set_glyphs() {
        let set = DominoSet::standard();
        let symbols = set.symbols();

        // 0|0 is a single vertical glyph
        assert_eq!(symbols[0].as_str(), "\u{1F063}");
        // 0|1 carries both orientations
        assert_eq!(symbols[1].as_str(), "\u{1F032}\u{1F038}");
        assert_eq!(symbols[1].as_str().chars().count(), 2);
        // 6|6 closes the set
        assert_eq!(set.last().map(DominoSymbol::as_str), Some("\u{1F093}"));

        let doubles = symbols
            .iter()
            .filter(|s| s.as_str().chars().count() == 1)
            .count();
        assert_eq!(doubles, 7);
    }

    #[test]
    fn test_from_symbols_rejects_wrong_size_and_duplicates() {
        let short: Vec<String> = (0..27).map(|i| format!("T{}", i)).collect();
        assert!(DominoSet::from_symbols(short).is_err());

        let mut dup: Vec<String> = (0..28).map(|i| format!("T{}", i)).collect();
        dup[27] = "T0".to_string();
        let err = DominoSet::from_symbols(dup).unwrap_err();
        assert!(matches!(err, DealError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_shuffle_keeps_every_tile() {
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = DominoSet::standard().shuffled(&mut rng);

        let original: HashSet<_> = DominoSet::standard().symbols().to_vec().into_iter().collect();
        let after: HashSet<_> = shuffled.symbols().iter().cloned().collect();
        assert_eq!(original, after);
    }

    #[test]
    fn test_player_count() {
        assert_eq!(PlayerCount::try_from(3).unwrap().hand_size(), 9);
        assert_eq!(PlayerCount::try_from(4).unwrap().hand_size(), 7);
        assert!(PlayerCount::Three.has_shared_tile());
        assert!(!PlayerCount::Four.has_shared_tile());
        assert!(PlayerCount::try_from(2).is_err());
        assert!(PlayerCount::try_from(5).is_err());
    }

    #[test]
    fn test_hand_display() {
        let hand = Hand {
            tiles: vec![DominoSymbol::new("A"), DominoSymbol::new("B")],
            shared: Some(DominoSymbol::new("Z")),
        };
        assert_eq!(hand.to_string(), "[A][B]<<<Z>>>");
        assert_eq!(hand.tile_count(), 2);
    }
}
