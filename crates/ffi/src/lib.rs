use std::ptr;

use tilejump_core::{Buttons, Events, Params, Simulation};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct BodyView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub ax: f32,
    pub on_ground: u8,
    pub can_jump_again: u8,
    /// 0 = none, 1 = left, 2 = right
    pub direction: u8,
    pub lost: u8,
}

#[no_mangle]
pub extern "C" fn tj_default_params(out: *mut Params) {
    if out.is_null() {
        return;
    }
    unsafe { *out = Params::default(); }
}

/// Returns null if the params are invalid or the map text does not parse.
/// The map text is not retained.
#[no_mangle]
pub extern "C" fn tj_sim_new(params: *const Params, map_text: *const u8, map_len: usize) -> *mut Simulation {
    if params.is_null() || map_text.is_null() {
        return ptr::null_mut();
    }
    let p = unsafe { *params };
    let bytes = unsafe { std::slice::from_raw_parts(map_text, map_len) };
    let Ok(text) = std::str::from_utf8(bytes) else {
        return ptr::null_mut();
    };
    match Simulation::from_map_str(p, text) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn tj_sim_free(sim: *mut Simulation) {
    if !sim.is_null() {
        drop(unsafe { Box::from_raw(sim) });
    }
}

#[no_mangle]
pub extern "C" fn tj_sim_reset(sim: *mut Simulation) {
    if let Some(s) = unsafe { sim.as_mut() } {
        s.reset();
    }
}

#[no_mangle]
pub extern "C" fn tj_sim_step(sim: *mut Simulation, dt: f32, input_bits: u8) -> Events {
    let Some(s) = (unsafe { sim.as_mut() }) else {
        return Events::default();
    };
    s.step_buttons(dt, Buttons::from_bits_truncate(input_bits))
}

#[no_mangle]
pub extern "C" fn tj_sim_body(sim: *const Simulation, out: *mut BodyView) {
    let (Some(s), false) = (unsafe { sim.as_ref() }, out.is_null()) else {
        return;
    };
    let b = s.body();
    let view = BodyView {
        x: b.rect.x,
        y: b.rect.y,
        w: b.rect.w,
        h: b.rect.h,
        vx: b.vx,
        vy: b.vy,
        ax: b.ax,
        on_ground: b.on_ground as u8,
        can_jump_again: b.can_jump_again as u8,
        direction: b.direction as u8,
        lost: s.is_lost() as u8,
    };
    unsafe { *out = view; }
}
