//! Fixed-size 2D grids.

use itertools::Itertools;

use crate::coord::{Coord, Edges, MOORE_OFFSETS};
use crate::error::{BoundsError, ValidationError};

/// 2D array of values of type `T` with a fixed width and height.
///
/// Cells are stored in row-major order. Every access is checked against the
/// grid extent before touching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Box<[T]>,
}

impl<T> Grid<T> {
    /// Creates a grid by calling `init` once for every coordinate, in
    /// row-major order.
    pub fn new(
        width: usize,
        height: usize,
        mut init: impl FnMut(Coord) -> T,
    ) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptyGrid { width, height });
        }
        let data = (0..height as isize)
            .cartesian_product(0..width as isize)
            .map(|(row, col)| init(Coord::new(row, col)))
            .collect_vec()
            .into_boxed_slice();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a grid from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ValidationError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ValidationError::EmptyGrid { width, height });
        }
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != width) {
            return Err(ValidationError::RaggedRow {
                row,
                len: r.len(),
                width,
            });
        }
        let data = rows.into_iter().flatten().collect_vec().into_boxed_slice();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    /// Returns the number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `pos` lies inside the grid.
    #[inline]
    pub fn is_valid(&self, pos: Coord) -> bool {
        self.flatten_idx(pos).is_some()
    }

    /// Returns a reference to the cell at `pos`.
    pub fn get(&self, pos: Coord) -> Result<&T, BoundsError> {
        let idx = self.flatten_idx(pos).ok_or_else(|| self.bounds_error(pos))?;
        Ok(&self.data[idx])
    }
    /// Returns a mutable reference to the cell at `pos`.
    pub fn get_mut(&mut self, pos: Coord) -> Result<&mut T, BoundsError> {
        let idx = self.flatten_idx(pos).ok_or_else(|| self.bounds_error(pos))?;
        Ok(&mut self.data[idx])
    }
    /// Sets the cell at `pos` and returns the previous value.
    pub fn set(&mut self, pos: Coord, value: T) -> Result<T, BoundsError> {
        Ok(std::mem::replace(self.get_mut(pos)?, value))
    }

    /// Returns an iterator over all cell values in row-major order.
    ///
    /// Each call starts a fresh traversal over the grid's current contents.
    #[inline]
    pub fn values(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
    /// Returns a mutable iterator over all cell values in row-major order.
    #[inline]
    pub fn values_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
    /// Returns an iterator over every coordinate in row-major order.
    ///
    /// The iterator does not borrow the grid, so the grid may be modified
    /// while iterating.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width as isize;
        (0..self.height as isize).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }
    /// Returns an iterator over all the cells in the grid, enumerated by their
    /// positions.
    #[inline]
    pub fn iter_enumerated(&self) -> impl '_ + Iterator<Item = (Coord, &T)> {
        self.coords().zip(self.values())
    }
    /// Returns an iterator over the rows of the grid, top to bottom.
    #[inline]
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.width)
    }

    /// Creates a new grid of the same size by applying a function to every
    /// cell.
    #[must_use = "This method returns a new value instead of mutating its input"]
    pub fn map<U>(&self, mut f: impl FnMut(Coord, &T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self
                .iter_enumerated()
                .map(|(pos, cell)| f(pos, cell))
                .collect_vec()
                .into_boxed_slice(),
        }
    }

    /// Resolves the cell `drow` rows and `dcol` columns away from `pos`.
    ///
    /// Returns `None` if the result lies past a bounded edge, or if the
    /// displacement overflows a coordinate.
    pub fn neighbor(&self, pos: Coord, drow: isize, dcol: isize, edges: Edges) -> Option<Coord> {
        let target = pos.offset(drow, dcol)?;
        match edges {
            Edges::Wrap => Some(Coord::new(
                target.row.rem_euclid(self.height as isize),
                target.col.rem_euclid(self.width as isize),
            )),
            Edges::Bounded => Some(target).filter(|&p| self.is_valid(p)),
        }
    }
    /// Returns the resolved Moore neighbors of `pos` in row-major order.
    ///
    /// On a wrapping grid narrower or shorter than 3 cells, a neighbor may be
    /// yielded more than once.
    pub fn moore_neighbors(&self, pos: Coord, edges: Edges) -> impl '_ + Iterator<Item = Coord> {
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(drow, dcol)| self.neighbor(pos, drow, dcol, edges))
    }

    /// Returns the index into `data` corresponding to `pos`, or `None` if
    /// `pos` is outside of the grid.
    fn flatten_idx(&self, pos: Coord) -> Option<usize> {
        if (0..self.height as isize).contains(&pos.row) && (0..self.width as isize).contains(&pos.col)
        {
            Some(pos.row as usize * self.width + pos.col as usize)
        } else {
            None
        }
    }

    fn bounds_error(&self, pos: Coord) -> BoundsError {
        BoundsError {
            pos,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, ValidationError> {
        Self::new(width, height, |_| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROWS: usize = 3;
    const COLS: usize = 2;

    fn counting_grid() -> Grid<usize> {
        let mut n = 0;
        Grid::new(COLS, ROWS, |_| {
            n += 1;
            n
        })
        .unwrap()
    }

    #[test]
    fn test_grid_dimensions() {
        let grid = counting_grid();
        assert_eq!(COLS, grid.width());
        assert_eq!(ROWS, grid.height());
        assert!(Grid::filled(0, 3, 0_u8).is_err());
        assert!(Grid::filled(3, 0, 0_u8).is_err());
    }

    #[test]
    fn test_grid_initializer_called_row_major() {
        let mut seen = vec![];
        Grid::new(COLS, ROWS, |pos| seen.push(pos)).unwrap();
        assert_eq!(
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
                Coord::new(2, 0),
                Coord::new(2, 1),
            ],
            seen
        );
    }

    #[test]
    fn test_grid_values_restartable() {
        let grid = counting_grid();
        let first = grid.values().copied().collect_vec();
        let second = grid.values().copied().collect_vec();
        assert_eq!(vec![1, 2, 3, 4, 5, 6], first);
        assert_eq!(first, second);
        assert_eq!(vec![&[1, 2][..], &[3, 4], &[5, 6]], grid.rows().collect_vec());
    }

    #[test]
    fn test_grid_is_valid() {
        let grid = counting_grid();
        for pos in grid.coords() {
            assert!(grid.is_valid(pos));
        }
        assert!(!grid.is_valid(Coord::new(-1, 0)));
        assert!(!grid.is_valid(Coord::new(0, -1)));
        assert!(!grid.is_valid(Coord::new(ROWS as isize, 0)));
        assert!(!grid.is_valid(Coord::new(0, COLS as isize)));
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!((3, 2), (grid.width(), grid.height()));
        assert_eq!(Ok(&6), grid.get(Coord::new(1, 2)));
        assert_eq!(
            Err(ValidationError::RaggedRow {
                row: 1,
                len: 1,
                width: 2
            }),
            Grid::from_rows(vec![vec![1, 2], vec![3]])
        );
    }

    #[test]
    fn test_grid_neighbors() {
        let grid = Grid::filled(4, 3, ()).unwrap();
        let corner = Coord::new(0, 0);
        assert_eq!(3, grid.moore_neighbors(corner, Edges::Bounded).count());
        assert_eq!(8, grid.moore_neighbors(corner, Edges::Wrap).count());
        assert_eq!(
            Some(Coord::new(2, 3)),
            grid.neighbor(corner, -1, -1, Edges::Wrap)
        );
        assert_eq!(None, grid.neighbor(corner, -1, -1, Edges::Bounded));

        let far = Coord::new(isize::MAX, isize::MIN);
        assert_eq!(0, grid.moore_neighbors(far, Edges::Bounded).count());
        // Only the steps that neither go down nor left stay representable.
        assert_eq!(3, grid.moore_neighbors(far, Edges::Wrap).count());
        assert_eq!(None, grid.neighbor(far, 1, 0, Edges::Wrap));
    }

    proptest! {
        #[test]
        fn test_grid_bounds_checked(row in -5..10_isize, col in -5..10_isize, value: u16) {
            let mut grid = Grid::filled(COLS, ROWS, 0_u16).unwrap();
            let pos = Coord::new(row, col);
            let inside = (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col);
            prop_assert_eq!(inside, grid.is_valid(pos));
            if inside {
                prop_assert_eq!(Ok(0), grid.set(pos, value));
                prop_assert_eq!(Ok(&value), grid.get(pos));
            } else {
                let err = BoundsError { pos, width: COLS, height: ROWS };
                prop_assert_eq!(Err(err), grid.get(pos));
                prop_assert_eq!(Err(err), grid.set(pos, value));
                prop_assert!(grid.values().all(|&v| v == 0));
            }
        }
    }
}
