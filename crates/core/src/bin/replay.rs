//! Replays recorded button bits against a map and prints a CSV trace.
//!
//! ```text
//! cargo run -p tilejump_core --bin replay -- replays/walk.json
//! ```

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tilejump_core::{Buttons, Params, Simulation, DT};

fn default_dt() -> f32 {
    DT
}

#[derive(Debug, Deserialize)]
struct Start {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
struct Replay {
    /// Relative paths are resolved against the replay file's directory.
    map_path: PathBuf,
    #[serde(default)]
    params: Params,
    #[serde(default = "default_dt")]
    dt: f32,
    #[serde(default)]
    start: Option<Start>,
    inputs: Vec<u8>,
}

fn load_replay(path: &Path) -> Result<Replay, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read replay {}: {e}", path.display()))?;
    let mut replay: Replay = serde_json::from_str(&raw)?;
    if replay.map_path.is_relative() {
        if let Some(dir) = path.parent() {
            replay.map_path = dir.join(&replay.map_path);
        }
    }
    Ok(replay)
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: cargo run -p tilejump_core --bin replay -- <replay.json>")?;
    let replay = load_replay(&path)?;

    let mut sim = Simulation::load(replay.params, &replay.map_path)?;
    if let Some(start) = replay.start {
        let body = sim.body_mut();
        body.rect.x = start.x;
        body.rect.y = start.y;
    }

    println!("frame,x,y,vx,vy,on_ground");
    for (frame, bits) in replay.inputs.iter().enumerate() {
        let buttons = Buttons::from_bits_truncate(*bits);
        let ev = sim.step_buttons(replay.dt, buttons);
        let b = sim.body();
        println!(
            "{},{},{},{},{},{}",
            frame, b.rect.x, b.rect.y, b.vx, b.vy, b.on_ground as u8
        );
        if ev.lost != 0 {
            eprintln!("lost at frame {frame}");
            break;
        }
    }
    Ok(())
}
