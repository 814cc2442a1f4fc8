pub mod canvas;
pub mod scene;
pub mod shader;

pub use canvas::Canvas;
pub use scene::{draw_scene, vehicle_color, DrawCmd, DrawList};
