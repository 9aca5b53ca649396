use tilejump_core::{Buttons, Params, Simulation, DT};

const LEVEL: &str = include_str!("../maps/level1.txt");

fn main() -> Result<(), tilejump_core::Error> {
    let mut sim = Simulation::from_map_str(Params::default(), LEVEL)?;

    let mut landed: u32 = 0;
    let mut bonked: u32 = 0;

    for frame in 0..180 {
        let mut buttons = Buttons::empty();
        if frame < 120 {
            buttons |= Buttons::RIGHT;
        }
        if frame == 10 {
            buttons |= Buttons::JUMP;
        }

        let ev = sim.step_buttons(DT, buttons);
        landed += ev.landed as u32;
        bonked += ev.bonked as u32;
    }

    let b = sim.body();
    println!(
        "{}",
        serde_json::json!({
            "x": b.rect.x,
            "y": b.rect.y,
            "vx": b.vx,
            "vy": b.vy,
            "on_ground": b.on_ground,
            "landed": landed,
            "bonked": bonked,
        })
    );
    Ok(())
}
