use std::path::Path;

use crate::body::Body;
use crate::collision::{resolve_axis, touches_hazard, Axis};
use crate::error::{Error, MapError};
use crate::grid::Grid;
use crate::input::{apply_intent, intents_from_buttons, Buttons, Intent};
use crate::map::{load_map, parse_map};
use crate::params::Params;
use crate::physics::{integrate_x, integrate_y};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Events {
    pub landed: u8,
    pub bonked: u8,
    pub lost: u8,
    pub hazard: u8,
    /// Id of the trigger tile touched this tick, 0 if none.
    pub trigger: u8,
}

/// Owns the grid and the body. Each `tick` is one complete, synchronous
/// step; the grid is never mutated after construction.
#[derive(Clone, Debug)]
pub struct Simulation {
    params: Params,
    grid: Grid,
    body: Body,
    buttons: Buttons,
    lost: bool,
    ticks: u64,
}

impl Simulation {
    pub fn new(params: Params, grid: Grid) -> Result<Self, Error> {
        params.validate()?;
        if grid.cols() != params.cols as usize
            || grid.rows() != params.rows as usize
            || grid.tile_size() != params.tile_size
        {
            return Err(MapError::Dimensions {
                expected_cols: params.cols as usize,
                expected_rows: params.rows as usize,
                found_cols: grid.cols(),
                found_rows: grid.rows(),
            }
            .into());
        }
        if grid.is_solid(params.spawn_col as i32, params.spawn_row as i32) {
            return Err(MapError::SpawnBlocked {
                col: params.spawn_col,
                row: params.spawn_row,
            }
            .into());
        }
        let body = Body::spawn(&params);
        log::debug!(
            "simulation ready: {}x{} grid, spawn at ({}, {})",
            grid.cols(),
            grid.rows(),
            body.rect.x,
            body.rect.y
        );
        Ok(Self {
            params,
            grid,
            body,
            buttons: Buttons::empty(),
            lost: false,
            ticks: 0,
        })
    }

    pub fn from_map_str(params: Params, src: &str) -> Result<Self, Error> {
        params.validate()?;
        let grid = parse_map(src, &params)?;
        Self::new(params, grid)
    }

    pub fn load(params: Params, path: impl AsRef<Path>) -> Result<Self, Error> {
        params.validate()?;
        let grid = load_map(path, &params)?;
        Self::new(params, grid)
    }

    /// Back to the spawn cell, at rest, not lost.
    pub fn reset(&mut self) {
        self.body = Body::spawn(&self.params);
        self.buttons = Buttons::empty();
        self.lost = false;
        self.ticks = 0;
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// For hosts and tests that place the body directly.
    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Apply intents, then X integrate/resolve, Y integrate/resolve, and the
    /// fall-out-of-world check. `dt` is in seconds and is not clamped.
    pub fn tick<I>(&mut self, dt: f32, intents: I) -> Events
    where
        I: IntoIterator<Item = Intent>,
    {
        let mut ev = Events::default();
        if self.lost {
            return ev;
        }
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring tick with invalid dt {dt}");
            return ev;
        }

        let was_grounded = self.body.on_ground;
        for intent in intents {
            apply_intent(&self.params, &mut self.body, intent);
        }
        if dt == 0.0 {
            return ev;
        }

        integrate_x(&self.params, &mut self.body, dt);
        let cx = resolve_axis(&self.params, &self.grid, &mut self.body, Axis::X);
        integrate_y(&self.params, &mut self.body, dt);
        let cy = resolve_axis(&self.params, &self.grid, &mut self.body, Axis::Y);

        ev.landed = (self.body.on_ground && !was_grounded) as u8;
        ev.bonked = cy.bonked as u8;
        ev.trigger = cy.trigger.or(cx.trigger).unwrap_or(0);
        ev.hazard = touches_hazard(&self.grid, &self.body.rect) as u8;
        self.ticks += 1;

        if self.body.rect.y >= self.params.world_height() {
            self.lost = true;
            ev.lost = 1;
            log::info!(
                "body fell out of the world at x={} after {} ticks",
                self.body.rect.x,
                self.ticks
            );
        }
        ev
    }

    /// `tick` driven by held-button state; edges since the previous call
    /// become intents. A rejected tick keeps the previous state so its edges
    /// are not lost.
    pub fn step_buttons(&mut self, dt: f32, buttons: Buttons) -> Events {
        let prev = self.buttons;
        if !self.lost && dt.is_finite() && dt >= 0.0 {
            self.buttons = buttons;
        }
        self.tick(dt, intents_from_buttons(prev, buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::{Events, Simulation};
    use crate::body::{Body, Direction};
    use crate::error::{Error, MapError};
    use crate::grid::{Grid, TileKind};
    use crate::input::{Buttons, Intent};
    use crate::params::Params;
    use crate::DT;

    fn level() -> Simulation {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/maps/level1.txt");
        Simulation::load(Params::default(), path).unwrap()
    }

    fn settle(sim: &mut Simulation) {
        for _ in 0..60 {
            sim.tick(DT, []);
        }
    }

    #[test]
    fn spawned_body_settles_on_the_floor() {
        let mut sim = level();
        let mut landed = 0;
        for _ in 0..60 {
            landed += sim.tick(DT, []).landed as u32;
        }
        let b = sim.body();
        assert_eq!(landed, 1);
        assert!(b.on_ground);
        assert_eq!(b.vy, 0.0);
        assert_eq!(b.rect.y, 14.0 * 32.0 - 28.0);
        assert_eq!(sim.ticks(), 60);
    }

    #[test]
    fn grid_size_mismatch_is_rejected() {
        let err = Simulation::new(Params::default(), Grid::new(10, 15, 32.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Map(MapError::Dimensions { found_cols: 10, .. })
        ));
    }

    #[test]
    fn solid_spawn_cell_is_rejected() {
        let mut grid = Grid::new(20, 15, 32.0);
        grid.set_solid(10, 13);
        grid.set_solid(10, 14);
        let err = Simulation::new(Params::default(), grid).unwrap_err();
        assert!(matches!(
            err,
            Error::Map(MapError::SpawnBlocked { col: 10, row: 13 })
        ));

        let mut grid = Grid::new(20, 15, 32.0);
        grid.set(10, 13, TileKind::Trigger(2));
        assert!(Simulation::new(Params::default(), grid).is_err());

        let mut grid = Grid::new(20, 15, 32.0);
        grid.set(10, 13, TileKind::Hazard);
        grid.set_solid(10, 14);
        Simulation::new(Params::default(), grid).unwrap();
    }

    #[test]
    fn oversized_params_never_allocate() {
        let params = Params { cols: 4_000_000_000, rows: 4_000_000_000, ..Params::default() };
        let err = Simulation::from_map_str(params, "").unwrap_err();
        assert!(matches!(err, Error::Params(_)));
    }

    #[test]
    fn partial_map_never_starts() {
        let err = Simulation::from_map_str(Params::default(), "....\n").unwrap_err();
        assert!(matches!(err, Error::Map(MapError::RowLength { .. })));
    }

    #[test]
    fn jump_bonks_the_tunnel_ceiling_and_needs_a_release() {
        let mut sim = level();
        settle(&mut sim);

        // One-tile tunnel: the ceiling row is hit on the jump tick itself.
        let ev = sim.tick(DT, [Intent::JumpBegin]);
        assert_eq!(ev.bonked, 1);
        assert!(!sim.body().on_ground);
        assert_eq!(sim.body().vy, 0.0);
        assert_eq!(sim.body().rect.y, 13.0 * 32.0);

        settle(&mut sim);
        assert!(sim.body().on_ground);
        assert!(!sim.body().can_jump_again);

        sim.tick(DT, [Intent::JumpBegin]);
        assert!(sim.body().on_ground);

        let ev = sim.tick(DT, [Intent::JumpEnd, Intent::JumpBegin]);
        assert_eq!(ev.bonked, 1);
    }

    #[test]
    fn holding_right_runs_into_the_wall() {
        let mut sim = level();
        settle(&mut sim);
        sim.tick(DT, [Intent::MoveRightBegin]);
        for _ in 0..240 {
            sim.tick(DT, []);
        }
        let b = sim.body();
        // Solid tile at column 15 of the tunnel row.
        assert_eq!(b.rect.x, 15.0 * 32.0 - 28.0);
        assert_eq!(b.vx, 0.0);
        assert!(b.on_ground);
        assert_eq!(b.direction, Direction::Right);
    }

    #[test]
    fn release_decelerates_to_a_stop() {
        let mut sim = level();
        settle(&mut sim);
        sim.tick(DT, [Intent::MoveLeftBegin]);
        for _ in 0..10 {
            sim.tick(DT, []);
        }
        assert!(sim.body().vx < 0.0);
        sim.tick(DT, [Intent::MoveLeftEnd]);
        for _ in 0..60 {
            sim.tick(DT, []);
            assert!(sim.body().vx <= 0.0);
        }
        let b = sim.body();
        assert_eq!(b.vx, 0.0);
        assert_eq!(b.ax, 0.0);
        assert_eq!(b.direction, Direction::None);
    }

    #[test]
    fn zero_dt_applies_intents_but_not_physics() {
        let mut sim = level();
        settle(&mut sim);
        let before = *sim.body();
        let ev = sim.tick(0.0, [Intent::MoveRightBegin]);
        assert_eq!(ev, Events::default());
        let b = sim.body();
        assert_eq!(b.rect, before.rect);
        assert!(b.on_ground);
        assert_eq!(b.ax, 500.0);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut sim = level();
        let before = *sim.body();
        sim.tick(-DT, [Intent::MoveRightBegin]);
        sim.tick(f32::NAN, []);
        assert_eq!(*sim.body(), before);
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn hazards_and_triggers_are_reported() {
        let params = Params::default();
        let mut grid = Grid::new(20, 15, 32.0);
        grid.set(3, 5, TileKind::Trigger(4));
        grid.set(8, 5, TileKind::Hazard);
        grid.set_solid(8, 6);
        let mut sim = Simulation::new(params, grid).unwrap();

        *sim.body_mut() = Body::new(98.0, 100.0, 28.0, 28.0);
        let mut trigger = 0;
        for _ in 0..60 {
            let ev = sim.tick(DT, []);
            if ev.trigger != 0 {
                trigger = ev.trigger;
            }
        }
        assert_eq!(trigger, 4);

        *sim.body_mut() = Body::new(258.0, 120.0, 28.0, 28.0);
        let mut hazard = false;
        for _ in 0..60 {
            hazard |= sim.tick(DT, []).hazard != 0;
        }
        assert!(hazard);
    }

    #[test]
    fn buttons_drive_the_same_intents() {
        let mut a = level();
        let mut b = level();
        settle(&mut a);
        settle(&mut b);

        let script = |frame: usize| {
            let mut buttons = Buttons::empty();
            if frame < 40 {
                buttons |= Buttons::LEFT;
            }
            if (5..8).contains(&frame) {
                buttons |= Buttons::JUMP;
            }
            buttons
        };

        let mut prev = Buttons::empty();
        for frame in 0..90 {
            let now = script(frame);
            let ea = a.step_buttons(DT, now);
            let eb = b.tick(DT, crate::input::intents_from_buttons(prev, now));
            prev = now;
            assert_eq!(ea, eb);
            assert_eq!(a.body(), b.body());
        }
    }

    #[test]
    fn reset_returns_to_spawn() {
        let mut sim = level();
        settle(&mut sim);
        sim.tick(DT, [Intent::MoveRightBegin]);
        sim.reset();
        assert_eq!(*sim.body(), Body::spawn(sim.params()));
        assert_eq!(sim.ticks(), 0);
        assert!(!sim.is_lost());
    }
}
