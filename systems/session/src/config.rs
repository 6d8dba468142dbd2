//! Knobs that shape a session, and the rules they must satisfy.

use serde::{Deserialize, Serialize};
use treasure_hunt_core::{ConfigError, MapError, PlayerError, TeamError};
use treasure_hunt_map::{MapCreator, DEFAULT_GENERATION_SEED};

/// Fewest players a session accepts.
pub const MIN_PLAYERS: u8 = 2;
/// Most players a session accepts.
pub const MAX_PLAYERS: u8 = 8;
/// Smallest map side length for small groups.
pub const MIN_MAP_SIZE: i32 = 5;
/// Smallest map side length once a session is crowded.
pub const CROWDED_MIN_MAP_SIZE: i32 = 8;
/// Player count from which the crowded minimum applies.
pub const CROWDED_PLAYERS: u8 = 5;
/// Largest map side length.
pub const MAX_MAP_SIZE: i32 = 50;
/// Number of layouts drawn before giving up on finding a playable map.
pub const MAP_GENERATION_ATTEMPTS: u32 = 1_000;

/// Parameters of a single treasure hunt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of players taking part.
    pub players: u8,
    /// Side length of the square map.
    pub map_size: i32,
    /// Map configuration string understood by [`MapCreator`].
    pub map: String,
    /// Number of teams to split the players into; every player plays alone
    /// when absent.
    pub teams: Option<u8>,
    /// Seed for map generation, start positions and team allocation.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            players: MIN_PLAYERS,
            map_size: 10,
            map: "basic".to_owned(),
            teams: None,
            seed: DEFAULT_GENERATION_SEED,
        }
    }
}

impl SessionConfig {
    /// Smallest map side length allowed for the configured player count.
    #[must_use]
    pub const fn minimum_map_size(&self) -> i32 {
        if self.players >= CROWDED_PLAYERS {
            CROWDED_MIN_MAP_SIZE
        } else {
            MIN_MAP_SIZE
        }
    }

    /// Checks every rule a session imposes on its configuration.
    pub fn validate(&self) -> Result<(), SetupError> {
        self.validate_participants()?;

        let minimum = self.minimum_map_size();
        if self.map_size < minimum || self.map_size > MAX_MAP_SIZE {
            return Err(SetupError::InvalidMapSize {
                requested: self.map_size,
                minimum,
            });
        }

        let _ = MapCreator::parse_kind(&self.map)?;
        Ok(())
    }

    /// Checks the player and team counts only.
    pub(crate) fn validate_participants(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(SetupError::InvalidPlayerCount {
                requested: self.players,
            });
        }

        if let Some(teams) = self.teams {
            if teams < 2 || teams >= self.players {
                return Err(SetupError::InvalidTeamCount {
                    requested: teams,
                    players: self.players,
                });
            }
        }

        Ok(())
    }
}

/// Failures that prevent a session from starting.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Player count outside the supported range.
    #[error("cannot have {requested} players, the minimum is {MIN_PLAYERS} and the maximum is {MAX_PLAYERS}")]
    InvalidPlayerCount {
        /// Requested number of players.
        requested: u8,
    },
    /// Map side length outside the range allowed for the player count.
    #[error("cannot have a map of size {requested}x{requested}, sizes range from {minimum} to {MAX_MAP_SIZE}")]
    InvalidMapSize {
        /// Requested side length.
        requested: i32,
        /// Smallest side length allowed for the player count.
        minimum: i32,
    },
    /// Team count that cannot split the players into at least two groups.
    #[error("cannot split {players} players into {requested} teams")]
    InvalidTeamCount {
        /// Requested number of teams.
        requested: u8,
        /// Configured number of players.
        players: u8,
    },
    /// Every generated layout failed the reachability requirement.
    #[error("no playable map found after {attempts} attempts")]
    UnplayableMap {
        /// Number of layouts drawn.
        attempts: u32,
    },
    /// The map offers no tile from which the treasure can be reached.
    #[error("the map has no winnable start position")]
    NoWinnableStart,
    /// The map configuration string was not recognised.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The map rejected an operation during setup.
    #[error(transparent)]
    Map(#[from] MapError),
    /// A player rejected an operation during setup.
    #[error(transparent)]
    Player(#[from] PlayerError),
    /// A team rejected a player during setup.
    #[error(transparent)]
    Team(#[from] TeamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: u8, map_size: i32) -> SessionConfig {
        SessionConfig {
            players,
            map_size,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn player_count_must_lie_between_two_and_eight() {
        for players in [0, 1, 9, u8::MAX] {
            assert_eq!(
                config(players, 10).validate(),
                Err(SetupError::InvalidPlayerCount { requested: players })
            );
        }
        for players in MIN_PLAYERS..=MAX_PLAYERS {
            assert_eq!(config(players, 10).validate(), Ok(()));
        }
    }

    #[test]
    fn map_size_bounds_depend_on_player_count() {
        assert_eq!(config(4, 5).validate(), Ok(()));
        assert_eq!(config(4, 50).validate(), Ok(()));
        assert_eq!(
            config(4, 4).validate(),
            Err(SetupError::InvalidMapSize {
                requested: 4,
                minimum: 5,
            })
        );
        assert_eq!(
            config(4, 51).validate(),
            Err(SetupError::InvalidMapSize {
                requested: 51,
                minimum: 5,
            })
        );
        assert_eq!(
            config(5, 7).validate(),
            Err(SetupError::InvalidMapSize {
                requested: 7,
                minimum: 8,
            })
        );
        assert_eq!(config(5, 8).validate(), Ok(()));
    }

    #[test]
    fn team_count_must_leave_at_least_one_team_with_company() {
        let with_teams = |teams| SessionConfig {
            players: 4,
            teams: Some(teams),
            ..SessionConfig::default()
        };
        assert_eq!(with_teams(2).validate(), Ok(()));
        assert_eq!(with_teams(3).validate(), Ok(()));
        for teams in [0, 1, 4, 5] {
            assert_eq!(
                with_teams(teams).validate(),
                Err(SetupError::InvalidTeamCount {
                    requested: teams,
                    players: 4,
                })
            );
        }
    }

    #[test]
    fn unknown_map_configuration_is_rejected() {
        let config = SessionConfig {
            map: "volcano".to_owned(),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SetupError::Config(ConfigError::InvalidConfiguration {
                config: "volcano".to_owned(),
            }))
        );
    }

    #[test]
    fn error_messages_name_the_limits() {
        let error = SetupError::InvalidMapSize {
            requested: 3,
            minimum: 5,
        };
        assert_eq!(
            error.to_string(),
            "cannot have a map of size 3x3, sizes range from 5 to 50"
        );
    }
}
