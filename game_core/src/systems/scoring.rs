use hecs::World;

use crate::components::{serve_ball, Ball, Kinematics};
use crate::config::{Config, GameKind};
use crate::resources::{Events, GameRng, ScoreBoard};

/// Detect the ball crossing an open boundary. The participant owning
/// that wall concedes: every *other* participant's counter goes up by
/// one, then the ball re-serves from center at the configured start
/// speed. Wall ownership: left 0, right 1, top 2, bottom 3.
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut ScoreBoard,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_e, (_ball, kin)) in world.query_mut::<(&Ball, &mut Kinematics)>() {
        let conceder = if kin.pos.x + kin.size.x < 0.0 {
            Some(0)
        } else if kin.pos.x > config.court_width {
            Some(1)
        } else if config.kind == GameKind::FourPlayer && kin.pos.y + kin.size.y < 0.0 {
            Some(2)
        } else if config.kind == GameKind::FourPlayer && kin.pos.y > config.court_height {
            Some(3)
        } else {
            None
        };

        if let Some(slot) = conceder {
            score.award_others(slot);
            events.conceded_by = Some(slot);
            serve_ball(kin, config, rng);
        }
    }
}
