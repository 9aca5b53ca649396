use crate::body::{Body, Direction};
use crate::params::Params;

/// Discrete input events the simulation consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    MoveLeftBegin,
    MoveLeftEnd,
    MoveRightBegin,
    MoveRightEnd,
    JumpBegin,
    JumpEnd,
}

bitflags::bitflags! {
    /// Held-button state for hosts that poll instead of sending events.
    #[repr(transparent)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP  = 1 << 4;
    }
}

pub fn apply_intent(params: &Params, body: &mut Body, intent: Intent) {
    match intent {
        Intent::MoveLeftBegin => {
            body.ax = -params.accel;
            body.direction = Direction::Left;
        }
        Intent::MoveRightBegin => {
            body.ax = params.accel;
            body.direction = Direction::Right;
        }
        Intent::MoveLeftEnd => {
            if body.direction == Direction::Left {
                body.ax = params.decel;
            }
        }
        Intent::MoveRightEnd => {
            if body.direction == Direction::Right {
                body.ax = -params.decel;
            }
        }
        Intent::JumpBegin => {
            if body.on_ground && body.can_jump_again {
                body.vy = -params.jump_velocity;
                body.on_ground = false;
                body.can_jump_again = false;
            }
        }
        Intent::JumpEnd => body.can_jump_again = true,
    }
}

/// Press/release edges between two button states, releases first.
pub fn intents_from_buttons(prev: Buttons, now: Buttons) -> impl Iterator<Item = Intent> {
    let released = prev.difference(now);
    let pressed = now.difference(prev);
    [
        (released, Buttons::LEFT, Intent::MoveLeftEnd),
        (released, Buttons::RIGHT, Intent::MoveRightEnd),
        (released, Buttons::JUMP, Intent::JumpEnd),
        (pressed, Buttons::LEFT, Intent::MoveLeftBegin),
        (pressed, Buttons::RIGHT, Intent::MoveRightBegin),
        (pressed, Buttons::JUMP, Intent::JumpBegin),
    ]
    .into_iter()
    .filter_map(|(edges, flag, intent)| edges.contains(flag).then_some(intent))
}
