//! Text rendering of what a team knows about the map.

use std::fmt::Write as _;

use treasure_hunt_core::{Position, TileType};
use treasure_hunt_map::Map;
use treasure_hunt_player::{Player, Team};

const UNKNOWN: char = '?';
const CURRENT: char = '@';

const fn symbol(tile: TileType) -> char {
    match tile {
        TileType::Grass => '.',
        TileType::Water => '~',
        TileType::Treasure => '$',
    }
}

/// Draws the map as seen by `player`: tiles the team has not discovered stay
/// hidden and the player's own tile is marked.
pub(crate) fn render(map: &Map, team: Option<&Team>, player: &Player) -> String {
    let size = map.size().unwrap_or(0);
    let mut out = String::with_capacity(usize::try_from(size * (size + 1)).unwrap_or(0));

    for y in 0..size {
        for x in 0..size {
            let position = Position::new(x, y);
            let shown = if player.position() == Some(position) {
                CURRENT
            } else if team.is_some_and(|team| team.has_discovered(position)) {
                map.tile_at(position).map_or(UNKNOWN, symbol)
            } else {
                UNKNOWN
            };
            out.push(shown);
        }
        out.push('\n');
    }
    out
}

/// One-line summary of a player's situation.
pub(crate) fn status_line(player: &Player) -> String {
    let mut line = format!("player {}", player.id());
    if let Some(team) = player.team() {
        let _ = write!(line, " (team {team})");
    }
    if let Some(position) = player.position() {
        let _ = write!(line, " at {position}");
    }
    line
}
