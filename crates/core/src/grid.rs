use crate::rect::Rect;

/// What a cell does when the body touches it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TileKind {
    #[default]
    Empty,
    Solid,
    /// Solid, and reports its id when the body is pushed out of it.
    Trigger(u8),
    /// Not solid; reports contact while the body overlaps it.
    Hazard,
}

impl TileKind {
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Solid | TileKind::Trigger(_))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tile {
    pub rect: Rect,
    pub kind: TileKind,
}

impl Tile {
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.kind.is_solid()
    }
}

/// Returned for any lookup outside the grid.
pub static OUTSIDE: Tile = Tile {
    rect: Rect::new(0.0, 0.0, 0.0, 0.0),
    kind: TileKind::Empty,
};

/// Fixed-size tile grid, stored row-major. Read-only once the map is loaded.
#[derive(Clone, Debug)]
pub struct Grid {
    cols: usize,
    rows: usize,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize, tile_size: f32) -> Self {
        let mut tiles = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                tiles.push(Tile {
                    rect: Rect::new(
                        col as f32 * tile_size,
                        row as f32 * tile_size,
                        tile_size,
                        tile_size,
                    ),
                    kind: TileKind::Empty,
                });
            }
        }
        Self { cols, rows, tile_size, tiles }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Bounds-checked lookup. Cells outside the grid read as `OUTSIDE`.
    #[inline]
    pub fn tile(&self, col: i32, row: i32) -> &Tile {
        match self.index(col, row) {
            Some(i) => &self.tiles[i],
            None => &OUTSIDE,
        }
    }

    #[inline]
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.tile(col, row).is_solid()
    }

    /// Returns false if the cell is outside the grid.
    pub fn set(&mut self, col: usize, row: usize, kind: TileKind) -> bool {
        if col >= self.cols || row >= self.rows {
            return false;
        }
        self.tiles[row * self.cols + col].kind = kind;
        true
    }

    pub fn set_solid(&mut self, col: usize, row: usize) -> bool {
        self.set(col, row, TileKind::Solid)
    }

    pub fn solid_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| t.is_solid())
    }
}
