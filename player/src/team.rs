//! Teams share what their members have discovered.

use treasure_hunt_core::{PlayerId, Position, TeamError, TeamId};

use crate::Player;

/// Group of players whose visited tiles are pooled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    players: Vec<PlayerId>,
    discovered: Vec<Position>,
}

impl Team {
    /// Creates an empty team.
    #[must_use]
    pub const fn new(id: TeamId) -> Self {
        Self {
            id,
            players: Vec::new(),
            discovered: Vec::new(),
        }
    }

    /// Identifier of the team.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Members in the order they joined.
    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Every distinct tile any member has stood on, in discovery order.
    #[must_use]
    pub fn discovered(&self) -> &[Position] {
        &self.discovered
    }

    /// Reports whether a member has stood on `position`.
    #[must_use]
    pub fn has_discovered(&self, position: Position) -> bool {
        self.discovered.contains(&position)
    }

    /// Adds a placed player that is not yet on any team.
    ///
    /// The player's start position counts as discovered.
    pub fn join(&mut self, player: &mut Player) -> Result<(), TeamError> {
        let start = player
            .start_position()
            .ok_or(TeamError::MissingStartPosition {
                player: player.id(),
            })?;
        if let Some(team) = player.team() {
            return Err(TeamError::AlreadyInTeam {
                player: player.id(),
                team,
            });
        }

        self.players.push(player.id());
        self.record(start);
        player.assign_team(self.id);
        Ok(())
    }

    /// Marks `position` as discovered.
    pub fn record(&mut self, position: Position) {
        if !self.has_discovered(position) {
            self.discovered.push(position);
        }
    }
}
