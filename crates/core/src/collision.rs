//! Axis-separated resolution against the 3x3 tile neighborhood around the
//! body's center cell.

use crate::body::Body;
use crate::grid::{Grid, Tile, TileKind};
use crate::params::Params;
use crate::rect::{rects_intersect, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Neighbor {
    Down,
    Up,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Neighbor {
    /// Resolution order. Later entries can override earlier corrections in
    /// the same pass, so this order is part of the observable behavior.
    pub const ORDER: [Neighbor; 8] = [
        Neighbor::Down,
        Neighbor::Up,
        Neighbor::Left,
        Neighbor::Right,
        Neighbor::UpLeft,
        Neighbor::UpRight,
        Neighbor::DownLeft,
        Neighbor::DownRight,
    ];

    /// `(dcol, drow)`, rows growing downward.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Neighbor::Down => (0, 1),
            Neighbor::Up => (0, -1),
            Neighbor::Left => (-1, 0),
            Neighbor::Right => (1, 0),
            Neighbor::UpLeft => (-1, -1),
            Neighbor::UpRight => (1, -1),
            Neighbor::DownLeft => (-1, 1),
            Neighbor::DownRight => (1, 1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (dc, dr) = self.offset();
        dc != 0 && dr != 0
    }
}

/// Cell containing the center of `rect`.
#[inline]
pub fn center_cell(rect: &Rect, tile_size: f32) -> (i32, i32) {
    let (cx, cy) = rect.center();
    ((cx / tile_size).floor() as i32, (cy / tile_size).floor() as i32)
}

/// The 8 cells around the body's center cell, in resolution order. Cells
/// outside the grid come back as the non-solid sentinel.
pub fn neighborhood<'g>(grid: &'g Grid, rect: &Rect) -> [(Neighbor, &'g Tile); 8] {
    let (col, row) = center_cell(rect, grid.tile_size());
    Neighbor::ORDER.map(|n| {
        let (dc, dr) = n.offset();
        (n, grid.tile(col.saturating_add(dc), row.saturating_add(dr)))
    })
}

/// What a single resolution pass did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    /// Pushed up out of a tile below (Y pass only).
    pub landed: bool,
    /// Pushed down out of a tile above (Y pass only).
    pub bonked: bool,
    /// Pushed out sideways (X pass only).
    pub walled: bool,
    /// Id of the last trigger tile corrected against.
    pub trigger: Option<u8>,
}

#[inline]
fn sign(x: f32) -> i32 {
    if x < 0.0 { -1 } else if x > 0.0 { 1 } else { 0 }
}

/// Corner-corrected filter: a pass only resolves neighbors on the side the
/// body is moving toward, and skips a diagonal whose facing edge is shared
/// with a solid orthogonal neighbor (an internal seam, e.g. between two
/// floor tiles).
fn skipped(grid: &Grid, center: (i32, i32), n: Neighbor, axis: Axis, body: &Body) -> bool {
    let (dc, dr) = n.offset();
    let (col, row) = center;
    match axis {
        Axis::X => dc != sign(body.vx) || (n.is_diagonal() && grid.is_solid(col, row.saturating_add(dr))),
        Axis::Y => dr != sign(body.vy) || (n.is_diagonal() && grid.is_solid(col.saturating_add(dc), row)),
    }
}

/// Push the body out of overlapping solid neighbors along one axis.
///
/// Each overlapping neighbor is corrected in `Neighbor::ORDER` against the
/// body's current rect; there is no second sweep. The Y pass clears
/// `on_ground` first and sets it again only on a downward correction.
pub fn resolve_axis(params: &Params, grid: &Grid, body: &mut Body, axis: Axis) -> Contact {
    let mut contact = Contact::default();
    if axis == Axis::Y {
        body.on_ground = false;
    }

    let center = center_cell(&body.rect, grid.tile_size());
    for (n, tile) in neighborhood(grid, &body.rect) {
        if !tile.is_solid() || !rects_intersect(&body.rect, &tile.rect) {
            continue;
        }
        if params.corner_correction_enabled() && skipped(grid, center, n, axis, body) {
            continue;
        }

        let t = &tile.rect;
        let corrected = match axis {
            Axis::X => {
                let moving = body.vx != 0.0;
                if body.vx > 0.0 {
                    body.rect.x = t.x - body.rect.w;
                } else if body.vx < 0.0 {
                    body.rect.x = t.right();
                }
                body.vx = 0.0;
                contact.walled |= moving;
                moving
            }
            Axis::Y => {
                if body.vy > 0.0 {
                    body.rect.y = t.y - body.rect.h;
                    body.vy = 0.0;
                    body.on_ground = true;
                    contact.landed = true;
                    true
                } else if body.vy < 0.0 {
                    body.rect.y = t.bottom();
                    body.vy = 0.0;
                    contact.bonked = true;
                    true
                } else {
                    false
                }
            }
        };

        if corrected {
            log::trace!(
                "{:?} pass: corrected against {:?} tile at ({}, {}) -> ({}, {})",
                axis,
                n,
                t.x,
                t.y,
                body.rect.x,
                body.rect.y
            );
            if let TileKind::Trigger(id) = tile.kind {
                contact.trigger = Some(id);
            }
        }
    }
    contact
}

/// True if the body overlaps a hazard in its center cell or any neighbor.
pub fn touches_hazard(grid: &Grid, rect: &Rect) -> bool {
    let (col, row) = center_cell(rect, grid.tile_size());
    (-1..=1).any(|dr: i32| {
        (-1..=1).any(|dc: i32| {
            let tile = grid.tile(col.saturating_add(dc), row.saturating_add(dr));
            tile.kind == TileKind::Hazard && rects_intersect(rect, &tile.rect)
        })
    })
}
