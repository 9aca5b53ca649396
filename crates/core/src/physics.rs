use crate::body::{Body, Direction};
use crate::params::Params;

#[inline]
fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// Horizontal velocity and position. Deceleration that has cancelled the
/// held direction's motion stops the body dead instead of reversing it.
pub fn integrate_x(params: &Params, body: &mut Body, dt: f32) {
    body.vx += body.ax * dt;
    body.vx = clamp(body.vx, -params.max_vx, params.max_vx);

    let settled = match body.direction {
        Direction::Right => body.ax < 0.0 && body.vx <= 0.0,
        Direction::Left => body.ax > 0.0 && body.vx >= 0.0,
        Direction::None => false,
    };
    if settled {
        body.vx = 0.0;
        body.ax = 0.0;
        body.direction = Direction::None;
    }

    body.rect.x += body.vx * dt;
}

/// Gravity is applied every tick; landing is what cancels it.
pub fn integrate_y(params: &Params, body: &mut Body, dt: f32) {
    body.vy += params.gravity * dt;
    body.rect.y += body.vy * dt;
}
