mod collision;
mod physics;

pub use physics::{physics_step, StepReport, MAX_DAMAGE, PHYSICS_DT};
