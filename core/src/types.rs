/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Board height, fixed for the life of every grid.
pub const ROWS: Coord = 4;

/// Board width, fixed for the life of every grid.
pub const COLS: Coord = 4;

/// Inclusive bounds of the value a numbered cell can hold.
pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 9;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// 8-connectivity: two distinct cells at Chebyshev distance 1.
pub fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    let row_diff = a.0.abs_diff(b.0);
    let col_diff = a.1.abs_diff(b.1);
    row_diff <= 1 && col_diff <= 1 && (row_diff, col_diff) != (0, 0)
}

/// All board coordinates in row-major order.
pub fn iter_all() -> impl Iterator<Item = Coord2> {
    (0..ROWS).flat_map(|row| (0..COLS).map(move |col| (row, col)))
}

/// The 3x3 box centered on `center`, clipped to the board, center included.
pub fn iter_box(center: Coord2) -> impl Iterator<Item = Coord2> {
    let row_start = center.0.saturating_sub(1);
    let row_end = (center.0 + 1).min(ROWS - 1);
    let col_start = center.1.saturating_sub(1);
    let col_end = (center.1 + 1).min(COLS - 1);
    (row_start..=row_end).flat_map(move |row| (col_start..=col_end).map(move |col| (row, col)))
}

/// Every cell sharing `center`'s row or column, `center` included.
pub fn iter_cross(center: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    (0..COLS)
        .map(move |c| (row, c))
        .chain((0..ROWS).filter(move |&r| r != row).map(move |r| (r, col)))
}
