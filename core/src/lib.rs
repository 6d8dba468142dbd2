#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the treasure hunt engine.
//!
//! This crate defines the vocabulary every other crate speaks: coordinates,
//! move directions, tile kinds and the outcome a tile imposes on the player
//! who lands on it, identifiers, and the typed errors that cross the boundary
//! between the map, the players, and whatever drives the game loop.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single map tile expressed as `x` (column) and `y` (row).
///
/// Positions are plain values and may lie outside any map; range checks are
/// the map's responsibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from raw coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring position one unit away in `direction`, or
    /// `None` when that step leaves the range of `i32`.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions available to players.
///
/// Row 0 is the top of the map, so moving up decreases `y`.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction, in the order moves are listed to players.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Parses a move command character (`U`, `D`, `L`, `R`, any case).
    #[must_use]
    pub fn from_input(input: char) -> Option<Self> {
        match input.to_ascii_lowercase() {
            'u' => Some(Self::Up),
            'd' => Some(Self::Down),
            'l' => Some(Self::Left),
            'r' => Some(Self::Right),
            _ => None,
        }
    }

    /// Column and row delta applied by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Outcome of landing on a tile, consumed by the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PlayerStatus {
    /// The game continues as usual.
    Normal,
    /// The player found the treasure.
    Win,
    /// The player drowned and must start over.
    Death,
}

/// Kinds of tile a map is made of.
///
/// Variant names parse case-insensitively through [`std::str::FromStr`];
/// unknown names yield [`strum::ParseError::VariantNotFound`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum TileType {
    /// Safe, walkable ground.
    Grass,
    /// Deadly water that sends the player back to the start.
    Water,
    /// The single winning tile of a map.
    Treasure,
}

impl TileType {
    /// Status imposed on a player that lands on this tile.
    #[must_use]
    pub const fn status(self) -> PlayerStatus {
        match self {
            Self::Grass => PlayerStatus::Normal,
            Self::Water => PlayerStatus::Death,
            Self::Treasure => PlayerStatus::Win,
        }
    }
}

/// Closed set of map variants selectable through configuration strings.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    /// Sparse water, generous reachability requirement.
    #[default]
    Basic,
    /// Dense water, relaxed reachability requirement.
    Hazard,
}

/// Unique identifier assigned to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier assigned to a team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(u32);

impl TeamId {
    /// Creates a new team identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reasons a map size request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeRejection {
    /// The requested side length was zero or negative.
    NonPositive,
    /// The requested side length exceeds the largest supported map.
    TooLarge,
    /// The map already has a size.
    AlreadySet,
}

impl fmt::Display for SizeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive => f.write_str("size must be positive"),
            Self::TooLarge => f.write_str("size exceeds the largest supported map"),
            Self::AlreadySet => f.write_str("size was already set"),
        }
    }
}

/// Reasons a hand-built tile layout may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutRejection {
    /// The layout contains no rows.
    Empty,
    /// Some row length differs from the number of rows.
    NotSquare,
    /// A layout needs exactly one treasure tile; carries the number found.
    TreasureCount(usize),
}

impl fmt::Display for LayoutRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout is empty"),
            Self::NotSquare => f.write_str("layout rows must form a square"),
            Self::TreasureCount(found) => {
                write!(f, "layout must hold exactly one treasure, found {found}")
            }
        }
    }
}

/// Failures reported by map operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// `set_map_size` was called with an unusable value or more than once.
    #[error("map size {requested} rejected: {reason}")]
    InvalidSize {
        /// Side length supplied by the caller.
        requested: i32,
        /// Specific reason the size was refused.
        reason: SizeRejection,
    },
    /// A pre-built layout could not be turned into a map.
    #[error("invalid tile layout: {reason}")]
    InvalidLayout {
        /// Specific reason the layout was refused.
        reason: LayoutRejection,
    },
    /// Generation was requested before the map had a size.
    #[error("map size has not been set")]
    NotSized,
    /// A query that needs tiles ran before generation.
    #[error("map tiles have not been generated")]
    NotGenerated,
    /// Coordinates outside the generated grid, or any tile lookup before
    /// generation.
    #[error("position ({x}, {y}) is outside the generated map")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },
}

/// Failure reported when a map configuration string names no known variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The configuration string matched none of the [`MapKind`] variants.
    #[error("invalid map configuration `{config}`")]
    InvalidConfiguration {
        /// The rejected configuration string as supplied.
        config: String,
    },
}

/// Reasons a move command may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The character is not one of `U`, `D`, `L`, `R`.
    UnknownDirection(char),
    /// The player has not been placed on the map yet.
    NoPosition,
    /// The step would leave the coordinate range.
    Overflow,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDirection(input) => {
                write!(
                    f,
                    "`{input}` is not a direction, only [U|D|L|R] are allowed"
                )
            }
            Self::NoPosition => f.write_str("player has no position yet"),
            Self::Overflow => f.write_str("the step leaves the coordinate range"),
        }
    }
}

/// Failures reported by player operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// A position was required but none was supplied or initialised.
    #[error("player {player} does not have a position initialised")]
    NullPosition {
        /// Player that rejected the operation.
        player: PlayerId,
    },
    /// A move command could not be carried out.
    #[error("player {player} cannot move: {reason}")]
    InvalidMove {
        /// Player that rejected the move.
        player: PlayerId,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// `reset` was called before a start position existed.
    #[error("player {player} cannot reset without a start position")]
    UninitializedReset {
        /// Player that rejected the reset.
        player: PlayerId,
    },
}

/// Failures reported when assembling teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    /// Only placed players may join a team.
    #[error("player {player} cannot join a team without a start position")]
    MissingStartPosition {
        /// Player that attempted to join.
        player: PlayerId,
    },
    /// A player belongs to at most one team.
    #[error("player {player} already belongs to team {team}")]
    AlreadyInTeam {
        /// Player that attempted to join.
        player: PlayerId,
        /// Team the player already belongs to.
        team: TeamId,
    },
}
