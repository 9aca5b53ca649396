//! Platformer physics core: one body moving through a static tile grid,
//! integrated per axis and pushed out of solid tiles after each axis.

pub mod body;
pub mod collision;
pub mod error;
pub mod grid;
pub mod input;
pub mod map;
pub mod params;
pub mod physics;
pub mod rect;
pub mod sim;

pub use body::{Body, Direction};
pub use collision::{center_cell, neighborhood, resolve_axis, Axis, Contact, Neighbor};
pub use error::{Error, MapError, ParamsError};
pub use grid::{Grid, Tile, TileKind};
pub use input::{apply_intent, intents_from_buttons, Buttons, Intent};
pub use map::{load_map, parse_map};
pub use params::Params;
pub use physics::{integrate_x, integrate_y};
pub use rect::{rects_intersect, Rect};
pub use sim::{Events, Simulation};

pub const HZ: f32 = 60.0;
pub const DT: f32 = 1.0 / HZ;
