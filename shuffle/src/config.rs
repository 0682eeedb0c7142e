use modular::{ModularError, check_modulus};
use thiserror::Error;

/// Puzzle instance: 119315717514047 cards, shuffled 101741582076661 times,
/// asking which card ends at position 2020.
pub const DECK_SIZE: i128 = 119315717514047;
pub const REPS: u64 = 101741582076661;
pub const POSITION: i128 = 2020;

/// Upper bound on `deck_size * reps` for card-by-card simulation.
pub const SIMULATION_LIMIT: u128 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid deck size: {0}")]
    DeckSize(#[from] ModularError),
    #[error("position {position} is outside a deck of {deck_size} cards")]
    Position { position: i128, deck_size: i128 },
    #[error("{deck_size} cards shuffled {reps} times is too large to simulate")]
    Simulation { deck_size: i128, reps: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    deck_size: i128,
    reps: u64,
    position: i128,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            deck_size: DECK_SIZE,
            reps: REPS,
            position: POSITION,
        }
    }
}

impl Config {
    pub fn new(deck_size: i128, reps: u64, position: i128) -> Result<Self, ConfigError> {
        let deck_size = check_modulus(deck_size)?;
        let config = Config {
            deck_size,
            reps,
            position,
        };
        config.check_position(position)?;
        Ok(config)
    }

    pub fn deck_size(&self) -> i128 {
        self.deck_size
    }

    pub fn reps(&self) -> u64 {
        self.reps
    }

    pub fn position(&self) -> i128 {
        self.position
    }

    pub fn check_position(&self, position: i128) -> Result<i128, ConfigError> {
        if (0..self.deck_size).contains(&position) {
            Ok(position)
        } else {
            Err(ConfigError::Position {
                position,
                deck_size: self.deck_size,
            })
        }
    }

    /// Deck size as `usize`, if the deck is small enough to lay out card by card.
    pub fn simulated_size(&self) -> Result<usize, ConfigError> {
        let too_large = ConfigError::Simulation {
            deck_size: self.deck_size,
            reps: self.reps,
        };
        let work = (self.deck_size as u128).saturating_mul(self.reps.max(1) as u128);
        if work > SIMULATION_LIMIT {
            return Err(too_large);
        }
        usize::try_from(self.deck_size).map_err(|_| too_large)
    }
}
