//! Tile layout generation and treasure reachability analysis.

use rand::{seq::SliceRandom, Rng};
use rand_chacha::ChaCha8Rng;
use treasure_hunt_core::{Direction, MapKind, Position, TileType};

/// Tuning knobs that distinguish one map variant from another.
///
/// Ratios are whole percentages of the total tile count; derived quotas
/// round down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationPolicy {
    water_percent: u32,
    minimum_winnable_percent: u32,
}

impl GenerationPolicy {
    /// Creates a policy from explicit percentages.
    #[must_use]
    pub const fn new(water_percent: u32, minimum_winnable_percent: u32) -> Self {
        Self {
            water_percent,
            minimum_winnable_percent,
        }
    }

    /// Policy used by the provided map variant.
    #[must_use]
    pub const fn for_kind(kind: MapKind) -> Self {
        match kind {
            MapKind::Basic => Self::new(10, 75),
            MapKind::Hazard => Self::new(25, 55),
        }
    }

    /// Share of all tiles that should become water.
    #[must_use]
    pub const fn water_percent(&self) -> u32 {
        self.water_percent
    }

    /// Share of all tiles from which the treasure must be reachable.
    #[must_use]
    pub const fn minimum_winnable_percent(&self) -> u32 {
        self.minimum_winnable_percent
    }

    /// Number of water tiles requested for a map `size` tiles across.
    ///
    /// Generation places fewer when not enough cells lie clear of the
    /// treasure.
    #[must_use]
    pub fn water_quota(&self, size: i32) -> usize {
        percent_of(cell_count(size), self.water_percent)
    }

    /// Number of winnable tiles a playable map `size` tiles across needs.
    #[must_use]
    pub fn minimum_winnable(&self, size: i32) -> usize {
        percent_of(cell_count(size), self.minimum_winnable_percent)
    }
}

/// Fully populated tile grid plus the reachability data derived from it.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    size: i32,
    tiles: Vec<TileType>,
    treasure: Position,
    winnable: Vec<bool>,
    winnable_count: usize,
}

impl Layout {
    /// Draws a fresh layout for a map `size` tiles across.
    pub(crate) fn generate(size: i32, policy: GenerationPolicy, rng: &mut ChaCha8Rng) -> Self {
        let mut tiles = vec![TileType::Grass; cell_count(size)];

        let treasure = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if let Some(slot) = index(size, treasure).and_then(|index| tiles.get_mut(index)) {
            *slot = TileType::Treasure;
        }

        let mut candidates: Vec<Position> = positions(size)
            .filter(|position| chebyshev_distance(*position, treasure) > 1)
            .collect();
        candidates.shuffle(rng);

        for position in candidates.into_iter().take(policy.water_quota(size)) {
            if let Some(slot) = index(size, position).and_then(|index| tiles.get_mut(index)) {
                *slot = TileType::Water;
            }
        }

        Self::from_tiles(size, tiles, treasure)
    }

    /// Wraps an already validated row-major tile vector.
    pub(crate) fn from_tiles(size: i32, tiles: Vec<TileType>, treasure: Position) -> Self {
        let winnable = reachable_from(size, &tiles, treasure);
        let winnable_count = winnable.iter().filter(|reachable| **reachable).count();
        Self {
            size,
            tiles,
            treasure,
            winnable,
            winnable_count,
        }
    }

    pub(crate) const fn size(&self) -> i32 {
        self.size
    }

    pub(crate) const fn treasure(&self) -> Position {
        self.treasure
    }

    #[cfg(test)]
    pub(crate) const fn winnable_count(&self) -> usize {
        self.winnable_count
    }

    /// Tiles connected to the treasure, the treasure included once at least
    /// one neighbour of it is reachable.
    pub(crate) const fn reachable_count(&self) -> usize {
        if self.winnable_count == 0 {
            0
        } else {
            self.winnable_count + 1
        }
    }

    pub(crate) fn tile(&self, position: Position) -> Option<TileType> {
        index(self.size, position).and_then(|index| self.tiles.get(index).copied())
    }

    pub(crate) fn is_winnable(&self, position: Position) -> Option<bool> {
        index(self.size, position).and_then(|index| self.winnable.get(index).copied())
    }

    pub(crate) fn winnable_positions(&self) -> Vec<Position> {
        positions(self.size)
            .filter(|position| self.is_winnable(*position).unwrap_or(false))
            .collect()
    }
}

/// Row-major index of `position` within a grid `size` tiles across.
pub(crate) fn index(size: i32, position: Position) -> Option<usize> {
    if position.x() < 0 || position.y() < 0 || position.x() >= size || position.y() >= size {
        return None;
    }
    let row = usize::try_from(position.y()).ok()?;
    let column = usize::try_from(position.x()).ok()?;
    let width = usize::try_from(size).ok()?;
    Some(row * width + column)
}

/// Every position of a grid `size` tiles across, row by row.
pub(crate) fn positions(size: i32) -> impl Iterator<Item = Position> {
    (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
}

fn cell_count(size: i32) -> usize {
    usize::try_from(size).map_or(0, |side| side.saturating_mul(side))
}

fn percent_of(total: usize, percent: u32) -> usize {
    let percent = usize::try_from(percent).unwrap_or(usize::MAX);
    total.saturating_mul(percent) / 100
}

fn chebyshev_distance(a: Position, b: Position) -> u32 {
    a.x().abs_diff(b.x()).max(a.y().abs_diff(b.y()))
}

/// Flood fill from the treasure across every tile that is not water.
///
/// The treasure itself is never marked: nobody may start on it.
fn reachable_from(size: i32, tiles: &[TileType], treasure: Position) -> Vec<bool> {
    let mut reachable = vec![false; tiles.len()];
    let mut visited = vec![false; tiles.len()];
    let Some(start) = index(size, treasure) else {
        return reachable;
    };
    visited[start] = true;

    let mut pending = vec![treasure];
    while let Some(current) = pending.pop() {
        for direction in Direction::ALL {
            let Some(next) = current.offset(direction) else {
                continue;
            };
            let Some(next_index) = index(size, next) else {
                continue;
            };
            if visited[next_index] || tiles[next_index] == TileType::Water {
                continue;
            }
            visited[next_index] = true;
            reachable[next_index] = true;
            pending.push(next);
        }
    }

    reachable
}
