use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown map token {token:?} at line {line}, column {column}")]
    UnknownToken { line: usize, column: usize, token: char },
    #[error("map row {row} has {found} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },
    #[error("map has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },
    #[error("spawn cell ({col}, {row}) is solid")]
    SpawnBlocked { col: u32, row: u32 },
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("grid is {found_cols}x{found_rows}, params expect {expected_cols}x{expected_rows}")]
    Dimensions {
        expected_cols: usize,
        expected_rows: usize,
        found_cols: usize,
        found_rows: usize,
    },
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("invalid params json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("param `{name}` must be finite and non-negative, got {value}")]
    BadValue { name: &'static str, value: f32 },
    #[error("tile size must be positive, got {0}")]
    TileSize(f32),
    #[error("grid must have at least one column and one row, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("grid {cols}x{rows} exceeds the {max} cell limit")]
    GridTooLarge { cols: u32, rows: u32, max: usize },
    #[error("body {w}x{h} must be positive and strictly smaller than a {tile} tile")]
    BodySize { w: f32, h: f32, tile: f32 },
    #[error("spawn cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    SpawnOutside { col: u32, row: u32, cols: u32, rows: u32 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Params(#[from] ParamsError),
}
