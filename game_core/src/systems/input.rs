use hecs::World;

use crate::components::{HumanControl, Paddle, PaddleIntent};
use crate::resources::InputState;

/// Translate the match-owned held-key tables into per-paddle movement
/// intents. AI paddles are skipped here; their intents are written by
/// the AI pilot system.
pub fn apply_inputs(world: &mut World, input: &InputState) {
    for (_e, (paddle, _human, intent)) in
        world.query_mut::<(&Paddle, &HumanControl, &mut PaddleIntent)>()
    {
        intent.dir = input.dir_for(paddle.slot, paddle.edge);
    }
}
