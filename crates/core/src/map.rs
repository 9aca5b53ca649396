//! Text map format, one grid row per line:
//!
//! ```text
//! .  empty        #  solid        ^  hazard
//! 1-9  solid trigger with that id
//! *  end of map, anything after it is ignored
//! ```
//!
//! Every row must have exactly `cols` cells and there must be exactly
//! `rows` rows. A trailing newline is fine; `\r` is ignored.

use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::grid::{Grid, TileKind};
use crate::params::Params;

const END: char = '*';

fn token_kind(ch: char) -> Option<TileKind> {
    match ch {
        '.' => Some(TileKind::Empty),
        '#' => Some(TileKind::Solid),
        '^' => Some(TileKind::Hazard),
        '1'..='9' => Some(TileKind::Trigger(ch as u8 - b'0')),
        _ => None,
    }
}

pub fn parse_map(src: &str, params: &Params) -> Result<Grid, MapError> {
    params.validate()?;
    let cols = params.cols as usize;
    let rows = params.rows as usize;
    let mut grid = Grid::new(cols, rows, params.tile_size);

    let mut row = 0usize;
    let mut col = 0usize;

    for ch in src.chars() {
        match ch {
            END => break,
            '\r' => {}
            '\n' => {
                if col != cols {
                    return Err(MapError::RowLength { row, expected: cols, found: col });
                }
                row += 1;
                col = 0;
            }
            _ => {
                let kind = token_kind(ch).ok_or(MapError::UnknownToken {
                    line: row + 1,
                    column: col + 1,
                    token: ch,
                })?;
                if row < rows && col < cols {
                    grid.set(col, row, kind);
                }
                col += 1;
            }
        }
    }

    // Last row without a trailing newline, or cut short by the end marker.
    if col > 0 {
        if col != cols {
            return Err(MapError::RowLength { row, expected: cols, found: col });
        }
        row += 1;
    }

    if row != rows {
        return Err(MapError::RowCount { expected: rows, found: row });
    }

    log::debug!(
        "parsed {}x{} map with {} solid tiles",
        cols,
        rows,
        grid.solid_tiles().count()
    );
    Ok(grid)
}

pub fn load_map(path: impl AsRef<Path>, params: &Params) -> Result<Grid, MapError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loading map from {}", path.display());
    parse_map(&src, params)
}
