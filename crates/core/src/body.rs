use crate::params::Params;
use crate::rect::Rect;

/// Horizontal movement intent currently held.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
}

/// The player's rectangle plus kinematic state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub ax: f32,
    pub on_ground: bool,
    pub can_jump_again: bool,
    pub direction: Direction,
}

impl Body {
    /// At rest at `(x, y)`, airborne, with a jump available.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            on_ground: false,
            can_jump_again: true,
            direction: Direction::None,
        }
    }

    /// Centered in the spawn cell.
    pub fn spawn(params: &Params) -> Self {
        let t = params.tile_size;
        let x = params.spawn_col as f32 * t + 0.5 * (t - params.body_w);
        let y = params.spawn_row as f32 * t + 0.5 * (t - params.body_h);
        Self::new(x, y, params.body_w, params.body_h)
    }
}
