//! Dense tile storage for the dungeon.

use crate::{Coordinate, Tile};

/// Width × height array of tiles addressed by [`Coordinate`].
///
/// Cells are stored row by row starting at `y = 0`. All access is bounds
/// checked: reads outside the grid return `None` and writes outside the grid
/// are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid whose outer ring is wall and whose interior is
    /// [`Tile::Nothing`].
    #[must_use]
    pub fn bordered(width: u32, height: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut grid = Self {
            width,
            height,
            tiles: vec![Tile::Nothing; capacity],
        };

        let cells: Vec<Coordinate> = grid.cells().filter(|cell| grid.is_border(*cell)).collect();
        for cell in cells {
            grid.set(cell, Tile::Wall);
        }
        grid
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Largest valid `x` coordinate, which lies on the border.
    #[must_use]
    pub fn max_x(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX) - 1
    }

    /// Largest valid `y` coordinate, which lies on the border.
    #[must_use]
    pub fn max_y(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX) - 1
    }

    /// Reports whether the coordinate addresses a cell of the grid.
    #[must_use]
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.index(cell).is_some()
    }

    /// Reports whether the coordinate lies on the outermost ring.
    #[must_use]
    pub fn is_border(&self, cell: Coordinate) -> bool {
        self.contains(cell)
            && (cell.x() == 0
                || cell.y() == 0
                || cell.x() == self.max_x()
                || cell.y() == self.max_y())
    }

    /// Reports whether the coordinate lies strictly inside the border ring.
    #[must_use]
    pub fn is_interior(&self, cell: Coordinate) -> bool {
        self.contains(cell) && !self.is_border(cell)
    }

    /// Tile stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, cell: Coordinate) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the cell holds exactly the provided tile.
    #[must_use]
    pub fn is(&self, cell: Coordinate, tile: Tile) -> bool {
        self.get(cell) == Some(tile)
    }

    /// Stores a tile at the coordinate. Writes outside the grid are ignored.
    pub fn set(&mut self, cell: Coordinate, tile: Tile) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Iterator over every coordinate, row by row from the bottom.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let width = i32::try_from(self.width).unwrap_or(0);
        let height = i32::try_from(self.height).unwrap_or(0);
        (0..height).flat_map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }

    /// Iterator over every coordinate paired with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Tile)> + '_ {
        self.cells().zip(self.tiles.iter().copied())
    }

    /// Counts the cells holding the provided tile.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|candidate| **candidate == tile).count()
    }

    fn index(&self, cell: Coordinate) -> Option<usize> {
        let column = u32::try_from(cell.x()).ok()?;
        let row = u32::try_from(cell.y()).ok()?;
        if column < self.width && row < self.height {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
