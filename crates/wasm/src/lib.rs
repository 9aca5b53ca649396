use wasm_bindgen::prelude::*;
use tilejump_core::{neighborhood, Buttons, Params, Simulation};

const DEFAULT_LEVEL: &str = include_str!("../../core/maps/level1.txt");

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The 8 cells the resolver checks around the body, in resolution order,
/// packed as `[x,y,w,h,solid, ...]`. Cells outside the grid come out
/// zero-sized with `solid = 0`.
fn pack_neighborhood(sim: &Simulation) -> Vec<f32> {
    neighborhood(sim.grid(), &sim.body().rect)
        .iter()
        .flat_map(|(_, t)| [t.rect.x, t.rect.y, t.rect.w, t.rect.h, t.is_solid() as u8 as f32])
        .collect()
}

#[wasm_bindgen]
pub struct Core {
    map_text: String,
    sim: Simulation,
}

#[wasm_bindgen]
impl Core {
    /// Empty `map_text` loads the bundled level.
    #[wasm_bindgen(constructor)]
    pub fn new(map_text: &str) -> Result<Core, JsValue> {
        let map_text = if map_text.is_empty() { DEFAULT_LEVEL } else { map_text };
        let sim = Simulation::from_map_str(Params::default(), map_text).map_err(js_err)?;
        Ok(Core { map_text: map_text.to_owned(), sim })
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    /// Partial JSON with `Params` field names. Rebuilds the simulation; on
    /// error the current one is kept.
    pub fn set_params_json(&mut self, json: &str) -> Result<(), JsValue> {
        let params = Params::from_json(json).map_err(js_err)?;
        self.sim = Simulation::from_map_str(params, &self.map_text).map_err(js_err)?;
        Ok(())
    }

    /// Step once and return body state + events as a JS object.
    pub fn step(&mut self, dt: f32, input_bits: u8) -> Result<JsValue, JsValue> {
        let buttons = Buttons::from_bits_truncate(input_bits);
        let ev = self.sim.step_buttons(dt, buttons);
        let b = self.sim.body();

        let obj = js_sys::Object::new();
        let set = |k: &str, v: JsValue| js_sys::Reflect::set(&obj, &k.into(), &v);
        set("x", JsValue::from_f64(b.rect.x as f64))?;
        set("y", JsValue::from_f64(b.rect.y as f64))?;
        set("vx", JsValue::from_f64(b.vx as f64))?;
        set("vy", JsValue::from_f64(b.vy as f64))?;
        set("on_ground", JsValue::from_bool(b.on_ground))?;
        set("landed", JsValue::from_bool(ev.landed != 0))?;
        set("bonked", JsValue::from_bool(ev.bonked != 0))?;
        set("lost", JsValue::from_bool(ev.lost != 0))?;
        set("hazard", JsValue::from_bool(ev.hazard != 0))?;
        set("trigger", JsValue::from_f64(ev.trigger as f64))?;

        Ok(JsValue::from(obj))
    }

    /// Solid tiles packed as `[x,y,w,h, x,y,w,h, ...]` for debug drawing.
    pub fn solid_rects(&self) -> Box<[f32]> {
        self.sim
            .grid()
            .solid_tiles()
            .flat_map(|t| [t.rect.x, t.rect.y, t.rect.w, t.rect.h])
            .collect()
    }

    /// Neighbor cells for the collision debug overlay, 5 floats per cell.
    pub fn neighborhood_rects(&self) -> Box<[f32]> {
        pack_neighborhood(&self.sim).into_boxed_slice()
    }
}
