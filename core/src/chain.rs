use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Value and decorations captured at click time. Later cell mutations never
/// reach into an existing chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub coords: Coord2,
    pub value: u8,
    pub is_gold: bool,
    pub is_beach_ball: bool,
}

impl Snapshot {
    pub fn capture(coords: Coord2, face: CellFace) -> Self {
        Self {
            coords,
            value: face.value(),
            is_gold: face.is_gold(),
            is_beach_ball: face.is_beach_ball(),
        }
    }
}

/// What a click did to the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainMove {
    /// Snapshot appended at the tail.
    Extended,
    /// Last element popped off.
    Undone,
    /// Invalid selection, chain emptied atomically.
    Reset,
}

/// Ordered sequence of selected cells, insertion order = click order. Every
/// element except the first is 8-adjacent to its predecessor and no cell
/// appears twice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionChain {
    links: SmallVec<[Snapshot; 16]>,
}

impl SelectionChain {
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.links.iter().any(|snapshot| snapshot.coords == coords)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.links.iter()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.links.iter().map(|snapshot| snapshot.coords)
    }

    pub fn sum(&self) -> u32 {
        self.links.iter().map(|snapshot| u32::from(snapshot.value)).sum()
    }

    pub fn has_gold(&self) -> bool {
        self.links.iter().any(|snapshot| snapshot.is_gold)
    }

    pub fn has_beach_ball(&self) -> bool {
        self.links.iter().any(|snapshot| snapshot.is_beach_ball)
    }

    /// Applies the selection rules for a click on `coords` showing `face`:
    /// re-clicking the tail undoes one step, re-clicking any earlier element
    /// resets everything, and an unselected cell extends the chain only when
    /// adjacent to the tail (or the chain is empty).
    pub fn apply_click(&mut self, coords: Coord2, face: CellFace) -> ChainMove {
        if self.contains(coords) {
            if self.links.last().map(|tail| tail.coords) == Some(coords) {
                self.links.pop();
                ChainMove::Undone
            } else {
                self.clear();
                ChainMove::Reset
            }
        } else if self.links.last().map_or(true, |tail| is_adjacent(tail.coords, coords)) {
            self.links.push(Snapshot::capture(coords, face));
            ChainMove::Extended
        } else {
            self.clear();
            ChainMove::Reset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: u8) -> CellFace {
        CellFace::Number(value)
    }

    #[test]
    fn extends_from_empty_and_along_adjacent_cells() {
        let mut chain = SelectionChain::default();
        assert_eq!(chain.apply_click((0, 0), number(5)), ChainMove::Extended);
        assert_eq!(chain.apply_click((1, 1), number(7)), ChainMove::Extended);
        assert_eq!(chain.sum(), 12);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn non_adjacent_click_resets_to_empty() {
        let mut chain = SelectionChain::default();
        chain.apply_click((0, 0), number(5));
        assert_eq!(chain.apply_click((2, 2), number(3)), ChainMove::Reset);
        assert!(chain.is_empty());
    }

    #[test]
    fn tail_click_pops_exactly_one_element() {
        let mut chain = SelectionChain::default();
        chain.apply_click((0, 0), number(1));
        chain.apply_click((0, 1), number(2));
        chain.apply_click((0, 2), number(3));

        assert_eq!(chain.apply_click((0, 2), number(3)), ChainMove::Undone);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.sum(), 3);
    }

    #[test]
    fn earlier_element_click_resets_the_whole_chain() {
        let mut chain = SelectionChain::default();
        chain.apply_click((0, 0), number(1));
        chain.apply_click((0, 1), number(2));
        chain.apply_click((0, 2), number(3));

        assert_eq!(chain.apply_click((0, 0), number(1)), ChainMove::Reset);
        assert!(chain.is_empty());
    }

    #[test]
    fn beach_ball_snapshots_contribute_zero() {
        let mut chain = SelectionChain::default();
        chain.apply_click((0, 0), CellFace::BeachBall);
        chain.apply_click((0, 1), number(4));

        assert_eq!(chain.sum(), 4);
        assert!(chain.has_beach_ball());
        assert!(!chain.has_gold());
    }

    #[test]
    fn snapshots_keep_gold_captured_at_click_time() {
        let mut chain = SelectionChain::default();
        chain.apply_click((1, 1), CellFace::Gold(6));
        assert!(chain.has_gold());
        assert_eq!(chain.sum(), 6);
    }
}
