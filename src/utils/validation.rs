use crate::utils::error::{DealError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DealError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DealError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Player list must hold 3 or 4 distinct, non-empty addresses.
pub fn validate_players(field_name: &str, players: &[String]) -> Result<()> {
    if !(3..=4).contains(&players.len()) {
        return Err(DealError::invalid_configuration(format!(
            "{} lists {} players; a game needs 3 or 4",
            field_name,
            players.len()
        )));
    }

    let mut seen = HashSet::new();
    for (i, address) in players.iter().enumerate() {
        validate_non_empty_string(&format!("{}[{}]", field_name, i), address)?;
        if !seen.insert(address.trim().to_lowercase()) {
            return Err(DealError::invalid_configuration(format!(
                "{} lists {} more than once",
                field_name, address
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_players() {
        assert!(validate_players("game.players", &addresses(&["a@x", "b@x", "c@x"])).is_ok());
        assert!(validate_players("game.players", &addresses(&["a@x", "b@x", "c@x", "d@x"])).is_ok());
        assert!(validate_players("game.players", &addresses(&["a@x", "b@x"])).is_err());
        assert!(
            validate_players("game.players", &addresses(&["a@x", "b@x", "c@x", "d@x", "e@x"]))
                .is_err()
        );
    }

    #[test]
    fn test_validate_players_rejects_duplicates_and_blanks() {
        let err = validate_players("game.players", &addresses(&["a@x", "A@x", "c@x"])).unwrap_err();
        assert!(matches!(err, DealError::InvalidConfiguration { .. }));

        let err = validate_players("game.players", &addresses(&["a@x", " ", "c@x"])).unwrap_err();
        assert!(matches!(err, DealError::InvalidConfigValueError { ref field, .. } if field == "game.players[1]"));
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("smtp.port", 465, 1).is_ok());
        assert!(validate_positive_number("smtp.port", 0, 1).is_err());
    }
}
