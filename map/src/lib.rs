#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Square tile maps for the treasure hunt.
//!
//! A [`Map`] moves through three states: it is created without a size,
//! receives its side length exactly once through [`Map::set_map_size`], and
//! is populated by [`Map::generate`]. Every operation checks the state on
//! entry and fails instead of silently doing nothing when called out of
//! order. [`MapCreator`] turns configuration strings into fresh maps.

mod creator;
mod generation;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use treasure_hunt_core::{LayoutRejection, MapError, MapKind, Position, SizeRejection, TileType};

pub use creator::MapCreator;
pub use generation::GenerationPolicy;

use generation::Layout;

/// Largest side length [`Map::set_map_size`] accepts.
pub const MAX_MAP_SIZE: i32 = 1_024;

/// Seed used when the caller does not pick one.
pub const DEFAULT_GENERATION_SEED: u64 = 0x5eed_7ea5_0b0b;

#[derive(Clone, Debug)]
enum MapState {
    Unsized,
    Sized { size: i32 },
    Generated(Layout),
}

/// Square grid of tiles that players explore.
#[derive(Clone, Debug)]
pub struct Map {
    kind: MapKind,
    policy: GenerationPolicy,
    rng: ChaCha8Rng,
    state: MapState,
}

impl Map {
    /// Creates an unsized map of the provided variant using the default seed.
    #[must_use]
    pub fn new(kind: MapKind) -> Self {
        Self::with_seed(kind, DEFAULT_GENERATION_SEED)
    }

    /// Creates an unsized map whose generation is driven by `seed`.
    #[must_use]
    pub fn with_seed(kind: MapKind, seed: u64) -> Self {
        Self {
            kind,
            policy: GenerationPolicy::for_kind(kind),
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: MapState::Unsized,
        }
    }

    /// Builds an already generated map from hand-made rows.
    ///
    /// `rows[y][x]` is the tile at `(x, y)`. The rows must form a non-empty
    /// square holding exactly one treasure tile.
    pub fn from_rows(kind: MapKind, rows: Vec<Vec<TileType>>) -> Result<Self, MapError> {
        let invalid = |reason| MapError::InvalidLayout { reason };

        if rows.is_empty() {
            return Err(invalid(LayoutRejection::Empty));
        }
        let side = rows.len();
        if rows.iter().any(|row| row.len() != side) {
            return Err(invalid(LayoutRejection::NotSquare));
        }
        let size = i32::try_from(side).map_err(|_| invalid(LayoutRejection::NotSquare))?;

        let tiles: Vec<TileType> = rows.into_iter().flatten().collect();
        let treasures: Vec<Position> = generation::positions(size)
            .zip(tiles.iter())
            .filter(|(_, tile)| **tile == TileType::Treasure)
            .map(|(position, _)| position)
            .collect();
        let &[treasure] = treasures.as_slice() else {
            return Err(invalid(LayoutRejection::TreasureCount(treasures.len())));
        };

        let mut map = Self::new(kind);
        map.state = MapState::Generated(Layout::from_tiles(size, tiles, treasure));
        Ok(map)
    }

    /// Variant this map was created as.
    #[must_use]
    pub const fn kind(&self) -> MapKind {
        self.kind
    }

    /// Generation policy derived from the map variant.
    #[must_use]
    pub const fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// Side length of the map, once set.
    #[must_use]
    pub fn size(&self) -> Option<i32> {
        match &self.state {
            MapState::Unsized => None,
            MapState::Sized { size } => Some(*size),
            MapState::Generated(layout) => Some(layout.size()),
        }
    }

    /// Reports whether every tile has been assigned.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self.state, MapState::Generated(_))
    }

    /// Fixes the side length of the map.
    ///
    /// Only the first call with `n` in `1..=MAX_MAP_SIZE` succeeds; every
    /// rejection leaves the map untouched.
    pub fn set_map_size(&mut self, n: i32) -> Result<(), MapError> {
        let reject = |reason| MapError::InvalidSize {
            requested: n,
            reason,
        };

        if !matches!(self.state, MapState::Unsized) {
            return Err(reject(SizeRejection::AlreadySet));
        }
        if n <= 0 {
            return Err(reject(SizeRejection::NonPositive));
        }
        if n > MAX_MAP_SIZE {
            return Err(reject(SizeRejection::TooLarge));
        }

        self.state = MapState::Sized { size: n };
        Ok(())
    }

    /// Assigns a tile to every cell according to the variant's policy.
    ///
    /// Calling this on a generated map draws a new layout of the same size
    /// from the continuing random stream.
    pub fn generate(&mut self) -> Result<(), MapError> {
        let size = self.size().ok_or(MapError::NotSized)?;
        let layout = Layout::generate(size, self.policy, &mut self.rng);
        self.state = MapState::Generated(layout);
        Ok(())
    }

    /// Tile found at `(x, y)`.
    pub fn tile_type(&self, x: i32, y: i32) -> Result<TileType, MapError> {
        self.tile_at(Position::new(x, y))
    }

    /// Tile found at `position`.
    pub fn tile_at(&self, position: Position) -> Result<TileType, MapError> {
        self.layout()
            .and_then(|layout| layout.tile(position))
            .ok_or(MapError::OutOfBounds {
                x: position.x(),
                y: position.y(),
            })
    }

    /// Reports whether `(x, y)` lies on the map.
    ///
    /// Always false while the map has no size.
    #[must_use]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.size()
            .is_some_and(|size| generation::index(size, Position::new(x, y)).is_some())
    }

    /// Reports whether `position` lies on the map.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.is_valid_position(position.x(), position.y())
    }

    /// Location of the single treasure tile, once generated.
    #[must_use]
    pub fn treasure_position(&self) -> Option<Position> {
        self.layout().map(Layout::treasure)
    }

    /// Reports whether enough tiles can reach the treasure for a fair game.
    ///
    /// The treasure tile counts toward the threshold whenever it is
    /// connected to at least one other tile.
    pub fn is_playable(&self) -> Result<bool, MapError> {
        let layout = self.layout().ok_or(MapError::NotGenerated)?;
        let minimum = self.policy.minimum_winnable(layout.size());
        Ok(layout.reachable_count() >= minimum)
    }

    /// Reports whether a player starting at `position` can reach the
    /// treasure without crossing water.
    ///
    /// The treasure tile itself is never a winnable start.
    pub fn is_position_winnable(&self, position: Position) -> Result<bool, MapError> {
        let layout = self.layout().ok_or(MapError::NotGenerated)?;
        layout.is_winnable(position).ok_or(MapError::OutOfBounds {
            x: position.x(),
            y: position.y(),
        })
    }

    /// All winnable start positions, row by row.
    pub fn winnable_positions(&self) -> Result<Vec<Position>, MapError> {
        self.layout()
            .map(Layout::winnable_positions)
            .ok_or(MapError::NotGenerated)
    }

    fn layout(&self) -> Option<&Layout> {
        match &self.state {
            MapState::Generated(layout) => Some(layout),
            MapState::Unsized | MapState::Sized { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(size: i32) -> Map {
        let mut map = Map::new(MapKind::Basic);
        map.set_map_size(size).expect("size");
        map.generate().expect("generate");
        map
    }

    #[test]
    fn new_map_starts_unsized() {
        let map = Map::new(MapKind::Basic);
        assert_eq!(map.size(), None);
        assert!(!map.is_generated());
        assert!(!map.is_valid_position(0, 0));
    }

    #[test]
    fn set_map_size_rejects_non_positive_values() {
        let mut map = Map::new(MapKind::Basic);
        for n in [0, -1, i32::MIN] {
            assert_eq!(
                map.set_map_size(n),
                Err(MapError::InvalidSize {
                    requested: n,
                    reason: SizeRejection::NonPositive,
                })
            );
        }
        assert_eq!(map.size(), None);
    }

    #[test]
    fn set_map_size_rejects_sizes_beyond_the_limit() {
        let mut map = Map::new(MapKind::Basic);
        for n in [MAX_MAP_SIZE + 1, 1_000_000, i32::MAX] {
            assert_eq!(
                map.set_map_size(n),
                Err(MapError::InvalidSize {
                    requested: n,
                    reason: SizeRejection::TooLarge,
                })
            );
        }
        assert_eq!(map.size(), None);
        assert_eq!(map.generate(), Err(MapError::NotSized));

        map.set_map_size(MAX_MAP_SIZE).expect("largest size");
        assert_eq!(map.size(), Some(MAX_MAP_SIZE));
    }

    #[test]
    fn set_map_size_rejects_second_call() {
        let mut map = Map::new(MapKind::Basic);
        map.set_map_size(5).expect("first size");
        assert_eq!(
            map.set_map_size(7),
            Err(MapError::InvalidSize {
                requested: 7,
                reason: SizeRejection::AlreadySet,
            })
        );
        assert_eq!(map.size(), Some(5));
    }

    #[test]
    fn set_map_size_rejects_resizing_a_generated_map() {
        let mut map = generated(5);
        assert!(matches!(
            map.set_map_size(6),
            Err(MapError::InvalidSize {
                reason: SizeRejection::AlreadySet,
                ..
            })
        ));
        assert_eq!(map.size(), Some(5));
    }

    #[test]
    fn generate_requires_a_size() {
        let mut map = Map::new(MapKind::Basic);
        assert_eq!(map.generate(), Err(MapError::NotSized));
        assert!(!map.is_generated());
    }

    #[test]
    fn tile_lookup_before_generation_is_out_of_bounds() {
        let mut map = Map::new(MapKind::Basic);
        map.set_map_size(5).expect("size");
        assert_eq!(
            map.tile_type(0, 0),
            Err(MapError::OutOfBounds { x: 0, y: 0 })
        );
        assert!(map.is_valid_position(0, 0));
    }

    #[test]
    fn five_by_five_scenario() {
        let map = generated(5);
        assert!(map.tile_type(0, 0).is_ok());
        assert_eq!(
            map.tile_type(5, 0),
            Err(MapError::OutOfBounds { x: 5, y: 0 })
        );
        assert_eq!(
            map.tile_type(-1, 0),
            Err(MapError::OutOfBounds { x: -1, y: 0 })
        );
    }

    #[test]
    fn reachability_queries_need_generation() {
        let mut map = Map::new(MapKind::Basic);
        map.set_map_size(5).expect("size");
        assert_eq!(map.is_playable(), Err(MapError::NotGenerated));
        assert_eq!(
            map.is_position_winnable(Position::new(0, 0)),
            Err(MapError::NotGenerated)
        );
        assert_eq!(map.winnable_positions(), Err(MapError::NotGenerated));
        assert_eq!(map.treasure_position(), None);
    }

    #[test]
    fn winnable_query_rejects_positions_off_the_map() {
        let map = generated(5);
        assert_eq!(
            map.is_position_winnable(Position::new(5, 5)),
            Err(MapError::OutOfBounds { x: 5, y: 5 })
        );
    }

    #[test]
    fn regenerating_keeps_the_size() {
        let mut map = generated(6);
        map.generate().expect("regenerate");
        assert_eq!(map.size(), Some(6));
        assert!(map.tile_type(5, 5).is_ok());
    }
}
