#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-based treasure hunt session.
//!
//! A [`Session`] owns the map, the players and their teams. Drivers submit
//! one move per player and then resolve the round: players who walked into
//! water are sent back to their start, players standing on the treasure win.
//! The session performs no I/O beyond `tracing` events.

mod config;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use treasure_hunt_core::{MapError, PlayerError, PlayerId, PlayerStatus, Position, TeamId};
use treasure_hunt_map::{Map, MapCreator};
use treasure_hunt_player::{Player, Team};

pub use config::{
    SessionConfig, SetupError, CROWDED_MIN_MAP_SIZE, CROWDED_PLAYERS, MAP_GENERATION_ATTEMPTS,
    MAX_MAP_SIZE, MAX_PLAYERS, MIN_MAP_SIZE, MIN_PLAYERS,
};

/// Failures raised while playing a round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// No player with this identifier takes part in the session.
    #[error("player {player} is not part of this session")]
    UnknownPlayer {
        /// Identifier that was looked up.
        player: PlayerId,
    },
    /// The move would leave the map.
    #[error("player {player} cannot move to {destination}, which is outside the map")]
    OutsideMap {
        /// Player that attempted the move.
        player: PlayerId,
        /// Position the move would have led to.
        destination: Position,
    },
    /// The player rejected the move.
    #[error(transparent)]
    Player(#[from] PlayerError),
    /// The map rejected a lookup.
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Outcome of a resolved round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Round number, starting at one.
    pub round: u32,
    /// Players standing on the treasure.
    pub winners: Vec<PlayerId>,
    /// Players that stood on water and were sent back to their start.
    pub drowned: Vec<PlayerId>,
}

impl RoundReport {
    /// Reports whether somebody found the treasure this round.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        !self.winners.is_empty()
    }
}

/// A running treasure hunt.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    map: Map,
    players: Vec<Player>,
    teams: Vec<Team>,
    round: u32,
}

impl Session {
    /// Sets up a session on a freshly generated map.
    ///
    /// Layouts are drawn until one is playable, giving up after
    /// [`MAP_GENERATION_ATTEMPTS`] draws.
    pub fn new(config: SessionConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut map = MapCreator::create_map_with_seed(&config.map, rng.gen())?;
        map.set_map_size(config.map_size)?;
        generate_playable(&mut map)?;

        Self::assemble(config, map, rng)
    }

    /// Sets up a session on an already generated map.
    ///
    /// The map's own size and variant take precedence over the ones in
    /// `config`; only the player count, team count and seed are used.
    pub fn with_map(config: SessionConfig, map: Map) -> Result<Self, SetupError> {
        config.validate_participants()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::assemble(config, map, rng)
    }

    fn assemble(config: SessionConfig, map: Map, mut rng: ChaCha8Rng) -> Result<Self, SetupError> {
        let winnable = map.winnable_positions()?;
        let mut players: Vec<Player> = (0..config.players).map(|_| Player::new()).collect();
        for player in &mut players {
            let start = winnable
                .choose(&mut rng)
                .copied()
                .ok_or(SetupError::NoWinnableStart)?;
            player.set_start_position(Some(start))?;
        }

        let teams = form_teams(config.teams, &mut players, &mut rng)?;

        tracing::info!(
            players = players.len(),
            teams = teams.len(),
            map = %map.kind(),
            size = map.size(),
            "treasure hunt ready"
        );

        Ok(Self {
            config,
            map,
            players,
            teams,
            round: 0,
        })
    }

    /// Configuration the session was created from.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Map being explored.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Players in construction order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Teams in identifier order.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of rounds resolved so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Looks up a player by identifier.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    /// Team the player belongs to.
    #[must_use]
    pub fn team_of(&self, id: PlayerId) -> Option<&Team> {
        let team = self.player(id)?.team()?;
        self.team(team)
    }

    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id() == id)
    }

    /// Moves `player` one tile according to the command character `input`.
    ///
    /// Moves that would leave the map are rejected and change nothing. On
    /// success the tile reached is shared with the player's team and its
    /// status is returned. Drowning only takes effect when the round is
    /// resolved.
    pub fn submit_move(
        &mut self,
        player: PlayerId,
        input: char,
    ) -> Result<PlayerStatus, TurnError> {
        let mover = self
            .players
            .iter_mut()
            .find(|candidate| candidate.id() == player)
            .ok_or(TurnError::UnknownPlayer { player })?;

        let destination = mover.destination(input)?;
        if !self.map.contains(destination) {
            return Err(TurnError::OutsideMap {
                player,
                destination,
            });
        }
        let tile = self.map.tile_at(destination)?;
        let _ = mover.move_by(input)?;

        if let Some(team) = mover.team() {
            if let Some(team) = self.teams.iter_mut().find(|entry| entry.id() == team) {
                team.record(destination);
            }
        }

        tracing::debug!(%player, %destination, %tile, "move committed");
        Ok(tile.status())
    }

    /// Closes the current round.
    ///
    /// Every player standing on water returns to its start position; every
    /// player standing on the treasure is reported as a winner.
    pub fn resolve_round(&mut self) -> Result<RoundReport, TurnError> {
        let mut report = RoundReport {
            round: self.round + 1,
            ..RoundReport::default()
        };

        for player in &self.players {
            let Some(position) = player.position() else {
                continue;
            };
            match self.map.tile_at(position)?.status() {
                PlayerStatus::Normal => {}
                PlayerStatus::Death => {
                    if player.start_position().is_none() {
                        let player = player.id();
                        return Err(PlayerError::UninitializedReset { player }.into());
                    }
                    report.drowned.push(player.id());
                }
                PlayerStatus::Win => report.winners.push(player.id()),
            }
        }

        for player in &mut self.players {
            if report.drowned.contains(&player.id()) {
                player.reset()?;
                tracing::debug!(player = %player.id(), "player drowned");
            }
        }
        self.round = report.round;

        if report.is_decided() {
            tracing::info!(round = self.round, winners = ?report.winners, "treasure found");
        }
        Ok(report)
    }
}

fn generate_playable(map: &mut Map) -> Result<(), SetupError> {
    for attempt in 1..=MAP_GENERATION_ATTEMPTS {
        map.generate()?;
        if map.is_playable()? {
            return Ok(());
        }
        tracing::debug!(attempt, "generated map is not playable, drawing another");
    }
    Err(SetupError::UnplayableMap {
        attempts: MAP_GENERATION_ATTEMPTS,
    })
}

/// Splits players into teams.
///
/// Without a team count every player gets a team of its own. Otherwise the
/// players are shuffled and dealt into equally sized teams, with any
/// remainder going to the last one.
fn form_teams(
    count: Option<u8>,
    players: &mut [Player],
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Team>, SetupError> {
    let Some(count) = count else {
        let mut teams = Vec::with_capacity(players.len());
        for (id, player) in (0_u32..).zip(players.iter_mut()) {
            let mut team = Team::new(TeamId::new(id));
            team.join(player)?;
            teams.push(team);
        }
        return Ok(teams);
    };

    let mut teams: Vec<Team> = (0..count)
        .map(|id| Team::new(TeamId::new(u32::from(id))))
        .collect();
    let team_size = (players.len() / usize::from(count)).max(1);

    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);

    for (slot, index) in order.into_iter().enumerate() {
        let team = (slot / team_size).min(teams.len() - 1);
        teams[team].join(&mut players[index])?;
    }
    Ok(teams)
}
