mod collision;
mod input;
mod movement;
mod scoring;

pub use collision::check_collisions;
pub use input::apply_inputs;
pub use movement::{move_ball, move_paddles};
pub use scoring::check_scoring;
