pub mod arena;

pub use arena::{ordered_obstacles, spawn_arena};
