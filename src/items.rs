use std::collections::HashSet;

use rand::Rng;

use crate::config::{GridSize, PLACEMENT_SAMPLE_ATTEMPTS};
use crate::snake::Position;

/// An order-irrelevant set of grid points, deduplicated by coordinate.
///
/// The game keeps two of these (food and poison) and guarantees they stay
/// disjoint from each other and from the snake body by only inserting
/// through [`ItemSet::place_random`].
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    points: HashSet<Position>,
}

impl ItemSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `position` is a member of this set.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.points.contains(&position)
    }

    /// Inserts `position` directly, returning whether it was newly added.
    ///
    /// Bypasses the open-cell check; the game only inserts through
    /// [`ItemSet::place_random`], but tests and scripted setups plant items
    /// at known coordinates with this.
    pub fn insert(&mut self, position: Position) -> bool {
        self.points.insert(position)
    }

    /// Removes `position`, returning whether it was present.
    pub fn remove(&mut self, position: Position) -> bool {
        self.points.remove(&position)
    }

    /// Returns the number of points in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.points.iter()
    }

    /// Inserts a uniformly random open cell and returns it, or `None` when
    /// no open cell exists.
    ///
    /// A cell is open when it is not already in this set and `is_open`
    /// accepts it; callers pass a predicate spanning the snake body and the
    /// other item set. Candidates are rejection-sampled first, which is fast
    /// while occupancy is sparse; after a bounded number of rejections the
    /// free cells are enumerated and one is chosen uniformly, so placement
    /// terminates even with a single open cell left on the board.
    pub fn place_random<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        is_open: F,
    ) -> Option<Position>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        for _ in 0..PLACEMENT_SAMPLE_ATTEMPTS {
            let candidate = Position {
                x: rng.gen_range(0..i32::from(bounds.width())),
                y: rng.gen_range(0..i32::from(bounds.height())),
            };
            if !self.points.contains(&candidate) && is_open(candidate) {
                self.points.insert(candidate);
                return Some(candidate);
            }
        }

        let free: Vec<Position> = (0..i32::from(bounds.height()))
            .flat_map(|y| (0..i32::from(bounds.width())).map(move |x| Position { x, y }))
            .filter(|cell| !self.points.contains(cell) && is_open(*cell))
            .collect();

        if free.is_empty() {
            return None;
        }

        let chosen = free[rng.gen_range(0..free.len())];
        self.points.insert(chosen);
        Some(chosen)
    }
}
