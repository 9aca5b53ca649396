use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Upper bound on `cols * rows`.
pub const MAX_CELLS: usize = 1 << 20;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    // Horizontal
    pub max_vx: f32,
    pub accel: f32,
    pub decel: f32,

    // Vertical (jump_velocity is applied upward, i.e. vy = -jump_velocity)
    pub jump_velocity: f32,
    pub gravity: f32,

    // World
    pub tile_size: f32,
    pub cols: u32,
    pub rows: u32,

    // Body
    pub body_w: f32,
    pub body_h: f32,
    pub spawn_col: u32,
    pub spawn_row: u32,

    // 0 = resolve diagonals like orthogonals, 1 = skip diagonals shadowed by a solid orthogonal
    pub corner_correction: u8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_vx: 200.0,
            accel: 500.0,
            decel: 600.0,

            jump_velocity: 450.0,
            gravity: 1000.0,

            tile_size: 32.0,
            cols: 20,
            rows: 15,

            body_w: 28.0,
            body_h: 28.0,
            spawn_col: 10,
            spawn_row: 13,

            corner_correction: 0,
        }
    }
}

impl Params {
    /// Partial JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        let params: Params = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("max_vx", self.max_vx),
            ("accel", self.accel),
            ("decel", self.decel),
            ("jump_velocity", self.jump_velocity),
            ("gravity", self.gravity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::BadValue { name, value });
            }
        }
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return Err(ParamsError::TileSize(self.tile_size));
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(ParamsError::EmptyGrid { cols: self.cols, rows: self.rows });
        }
        let cells = (self.cols as usize).checked_mul(self.rows as usize);
        if !cells.is_some_and(|n| n <= MAX_CELLS) {
            return Err(ParamsError::GridTooLarge {
                cols: self.cols,
                rows: self.rows,
                max: MAX_CELLS,
            });
        }
        let body_ok = |d: f32| d.is_finite() && d > 0.0 && d < self.tile_size;
        if !body_ok(self.body_w) || !body_ok(self.body_h) {
            return Err(ParamsError::BodySize {
                w: self.body_w,
                h: self.body_h,
                tile: self.tile_size,
            });
        }
        if self.spawn_col >= self.cols || self.spawn_row >= self.rows {
            return Err(ParamsError::SpawnOutside {
                col: self.spawn_col,
                row: self.spawn_row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn corner_correction_enabled(&self) -> bool {
        self.corner_correction != 0
    }

    /// Bottom edge of the world in pixels; a body whose top reaches it is lost.
    #[inline]
    pub fn world_height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::{Params, MAX_CELLS};
    use crate::error::ParamsError;

    #[test]
    fn defaults_are_valid() {
        Params::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = Params::from_json(r#"{ "gravity": 1200, "max_vx": 150.5 }"#).unwrap();
        assert_eq!(p.gravity, 1200.0);
        assert_eq!(p.max_vx, 150.5);
        assert_eq!(p.accel, Params::default().accel);
        assert_eq!(p.cols, 20);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Params::from_json(r#"{ "gravty": 10 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::Json(_)));
    }

    #[test]
    fn body_must_fit_in_a_tile() {
        let err = Params::from_json(r#"{ "body_w": 32 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::BodySize { .. }));
    }

    #[test]
    fn spawn_must_be_inside_grid() {
        let err = Params::from_json(r#"{ "spawn_col": 20 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::SpawnOutside { col: 20, .. }));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let err = Params::from_json(r#"{ "cols": 4000000000, "rows": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::GridTooLarge { .. }));

        let err = Params::from_json(r#"{ "cols": 2048, "rows": 1024 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::GridTooLarge { max: MAX_CELLS, .. }));

        Params::from_json(r#"{ "cols": 1024, "rows": 1024 }"#).unwrap();
    }

    #[test]
    fn negative_gravity_is_rejected() {
        let err = Params::from_json(r#"{ "gravity": -1 }"#).unwrap_err();
        assert!(matches!(err, ParamsError::BadValue { name: "gravity", .. }));
    }
}
