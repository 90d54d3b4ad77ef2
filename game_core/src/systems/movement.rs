use hecs::World;

use crate::components::{Ball, Kinematics, Paddle, PaddleIntent};
use crate::config::Config;

/// Step every paddle along its travel axis. A paddle already inside the
/// wall-offset margin and still pushing into it does not move this tick.
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_e, (paddle, intent, kin)) in
        world.query_mut::<(&Paddle, &PaddleIntent, &mut Kinematics)>()
    {
        // vel mirrors the intent so the collision system can read the
        // paddle's own motion when folding spin into the ball
        let step = intent.dir as f32 * config.paddle_speed;
        if paddle.edge.travels_vertically() {
            kin.vel.y = intent.dir as f32;
            if intent.dir != 0 {
                kin.pos.y = config.clamp_paddle(kin.pos.y + step, config.court_height);
            }
        } else {
            kin.vel.x = intent.dir as f32;
            if intent.dir != 0 {
                kin.pos.x = config.clamp_paddle(kin.pos.x + step, config.court_width);
            }
        }
    }
}

/// Advance the ball and ramp its speed. Every tick in play accelerates
/// the rally; the ramp has no cap and resets only when a point lands.
pub fn move_ball(world: &mut World, config: &Config) {
    for (_e, (_ball, kin)) in world.query_mut::<(&Ball, &mut Kinematics)>() {
        kin.advance();
        kin.speed += config.ball_speed_ramp;
    }
}
