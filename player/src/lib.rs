#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Players and teams of the treasure hunt.
//!
//! A [`Player`] knows where it started, where it stands, and every tile it
//! has stood on since its last reset. Players never see the map: bounds and
//! tile outcomes are checked by whoever drives the game. Identifiers come
//! from a process-wide counter so that every player ever constructed in a
//! process is distinguishable.

mod team;

use std::sync::atomic::{AtomicU32, Ordering};

use treasure_hunt_core::{Direction, MoveRejection, PlayerError, PlayerId, Position, TeamId};

pub use team::Team;

/// Identifier handed to the first player of a process.
pub const FIRST_PLAYER_ID: u32 = 0;

static NEXT_PLAYER_ID: AtomicU32 = AtomicU32::new(FIRST_PLAYER_ID);

/// Number of players constructed in this process since the counter was last
/// reset.
#[must_use]
pub fn global_player_count() -> u32 {
    NEXT_PLAYER_ID.load(Ordering::SeqCst) - FIRST_PLAYER_ID
}

/// Rewinds the process-wide player counter.
///
/// Teardown hook for tests only. Players constructed afterwards may reuse
/// identifiers of players that are still alive.
#[cfg(any(test, feature = "test-hooks"))]
pub fn reset_global_player_count() {
    NEXT_PLAYER_ID.store(FIRST_PLAYER_ID, Ordering::SeqCst);
}

/// Participant that moves across the map one tile at a time.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    position: Option<Position>,
    start_position: Option<Position>,
    history: Vec<Position>,
    team: Option<TeamId>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Creates an unplaced player with the next process-wide identifier.
    #[must_use]
    pub fn new() -> Self {
        let id = PlayerId::new(NEXT_PLAYER_ID.fetch_add(1, Ordering::SeqCst));
        Self {
            id,
            position: None,
            start_position: None,
            history: Vec::new(),
            team: None,
        }
    }

    /// Identifier assigned at construction.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Tile the player currently stands on.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Tile the player returns to on reset.
    #[must_use]
    pub const fn start_position(&self) -> Option<Position> {
        self.start_position
    }

    /// Every position occupied since the last reset, oldest first, ending
    /// with the current position.
    #[must_use]
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Team the player joined, if any.
    #[must_use]
    pub const fn team(&self) -> Option<TeamId> {
        self.team
    }

    /// Places the player and restarts its history from `start`.
    pub fn set_start_position(&mut self, start: Option<Position>) -> Result<(), PlayerError> {
        let start = start.ok_or(self.null_position())?;
        self.start_position = Some(start);
        self.position = Some(start);
        self.history.clear();
        self.history.push(start);
        Ok(())
    }

    /// Moves the player straight to `position`, recording it in the history.
    ///
    /// The player must have a start position. No bounds are checked.
    pub fn set_position(&mut self, position: Option<Position>) -> Result<(), PlayerError> {
        let position = position.ok_or(self.null_position())?;
        if self.start_position.is_none() {
            return Err(self.null_position());
        }
        self.position = Some(position);
        self.history.push(position);
        Ok(())
    }

    /// Position a move command would lead to, without moving.
    pub fn destination(&self, input: char) -> Result<Position, PlayerError> {
        let direction = Direction::from_input(input)
            .ok_or(self.invalid_move(MoveRejection::UnknownDirection(input)))?;
        self.destination_in(direction)
    }

    /// Position one step in `direction`, without moving.
    pub fn destination_in(&self, direction: Direction) -> Result<Position, PlayerError> {
        let position = self
            .position
            .ok_or(self.invalid_move(MoveRejection::NoPosition))?;
        position
            .offset(direction)
            .ok_or(self.invalid_move(MoveRejection::Overflow))
    }

    /// Carries out a move command character (`U`, `D`, `L`, `R`, any case).
    ///
    /// Up decreases `y`. Returns the new position, which is also appended to
    /// the history. Rejected commands leave the player untouched.
    pub fn move_by(&mut self, input: char) -> Result<Position, PlayerError> {
        let direction = Direction::from_input(input)
            .ok_or(self.invalid_move(MoveRejection::UnknownDirection(input)))?;
        self.move_in(direction)
    }

    /// Steps one tile in `direction` and records the new position.
    pub fn move_in(&mut self, direction: Direction) -> Result<Position, PlayerError> {
        let next = self.destination_in(direction)?;
        self.position = Some(next);
        self.history.push(next);
        Ok(next)
    }

    /// Sends the player back to its start and forgets the path taken.
    pub fn reset(&mut self) -> Result<(), PlayerError> {
        let start = self
            .start_position
            .ok_or(PlayerError::UninitializedReset { player: self.id })?;
        self.position = Some(start);
        self.history.truncate(1);
        Ok(())
    }

    pub(crate) fn assign_team(&mut self, team: TeamId) {
        self.team = Some(team);
    }

    const fn null_position(&self) -> PlayerError {
        PlayerError::NullPosition { player: self.id }
    }

    const fn invalid_move(&self, reason: MoveRejection) -> PlayerError {
        PlayerError::InvalidMove {
            player: self.id,
            reason,
        }
    }
}
