use alloc::vec::Vec;
use ndarray::Array2;
use rand::{Rng, RngExt};
use serde::{Deserialize, Serialize};

use crate::*;

/// Upper bound of concurrently active gold cells.
pub const MAX_GOLD: usize = 3;

/// A gold decoration reverts to a plain number after this long.
pub const GOLD_LIFETIME_MS: u64 = 10_000;

/// The 4x4 cell matrix plus gold-decoration bookkeeping. Created once per
/// round and mutated in place, never resized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    faces: Array2<CellFace>,
    gold_until_ms: Array2<Option<u64>>,
}

impl Grid {
    /// Fills every cell with a uniformly random value in [1, 9]. Pure
    /// re-initialization; no two calls share state.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self::from_faces_fn(|_| CellFace::Number(rng.random_range(MIN_VALUE..=MAX_VALUE)))
    }

    /// Deterministic construction from explicit row values.
    pub fn from_rows(rows: [[u8; COLS as usize]; ROWS as usize]) -> Self {
        Self::from_faces_fn(|(row, col)| CellFace::Number(rows[row][col]))
    }

    /// Deterministic construction from explicit faces, decorations included.
    pub fn from_faces(faces: [[CellFace; COLS as usize]; ROWS as usize]) -> Self {
        Self::from_faces_fn(|(row, col)| faces[row][col])
    }

    fn from_faces_fn(face: impl FnMut((usize, usize)) -> CellFace) -> Self {
        let dim = (ROWS as usize, COLS as usize);
        Self {
            faces: Array2::from_shape_fn(dim, face),
            gold_until_ms: Array2::default(dim),
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < ROWS && coords.1 < COLS {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn face_at(&self, coords: Coord2) -> CellFace {
        self.faces[coords.to_nd_index()]
    }

    /// Strips transient decorations from each given cell and rolls it a fresh
    /// face: a beach ball with probability `beach_ball_chance`, a random
    /// value in [1, 9] otherwise.
    pub fn regenerate<R: Rng>(&mut self, cells: &[Coord2], beach_ball_chance: f64, rng: &mut R) {
        for &coords in cells {
            self.gold_until_ms[coords.to_nd_index()] = None;
            let face = if beach_ball_chance > 0.0 && rng.random_bool(beach_ball_chance) {
                CellFace::BeachBall
            } else {
                CellFace::Number(rng.random_range(MIN_VALUE..=MAX_VALUE))
            };
            self.faces[coords.to_nd_index()] = face;
        }
    }

    pub fn gold_count(&self) -> usize {
        self.faces.iter().filter(|face| face.is_gold()).count()
    }

    /// Promotes one uniformly random plain cell to gold for
    /// [`GOLD_LIFETIME_MS`]. Cells already decorated are not eligible; at
    /// [`MAX_GOLD`] concurrent golds nothing spawns.
    pub fn spawn_gold<R: Rng>(&mut self, rng: &mut R, now_ms: u64) -> Option<Coord2> {
        if self.gold_count() >= MAX_GOLD {
            return None;
        }

        let eligible: Vec<Coord2> = iter_all()
            .filter(|&coords| matches!(self.face_at(coords), CellFace::Number(_)))
            .collect();
        if eligible.is_empty() {
            return None;
        }

        let coords = eligible[rng.random_range(0..eligible.len())];
        let CellFace::Number(value) = self.face_at(coords) else {
            return None;
        };
        self.faces[coords.to_nd_index()] = CellFace::Gold(value);
        self.gold_until_ms[coords.to_nd_index()] = Some(now_ms + GOLD_LIFETIME_MS);
        Some(coords)
    }

    /// Reverts every gold cell whose lifetime has elapsed.
    pub fn expire_gold(&mut self, now_ms: u64) {
        for coords in iter_all() {
            let Some(until) = self.gold_until_ms[coords.to_nd_index()] else {
                continue;
            };
            if until <= now_ms {
                self.gold_until_ms[coords.to_nd_index()] = None;
                if let CellFace::Gold(value) = self.face_at(coords) {
                    self.faces[coords.to_nd_index()] = CellFace::Number(value);
                }
            }
        }
    }

    /// Earliest pending gold expiry, if any.
    pub fn next_gold_expiry(&self) -> Option<u64> {
        self.gold_until_ms.iter().flatten().copied().min()
    }
}
