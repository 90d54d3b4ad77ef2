use hecs::World;

use crate::components::{Ball, Kinematics, Paddle};
use crate::config::{Config, GameKind};
use crate::params::Params;
use crate::resources::Events;

/// Resolve ball-vs-wall and ball-vs-paddle collisions for this tick.
///
/// Wall contact is a rule, not an elastic reflection: after touching
/// the top wall the vertical sign is forced downward, after the bottom
/// wall upward, regardless of the incoming vector. In the four-player
/// court the top and bottom walls are open (they score instead).
pub fn check_collisions(world: &mut World, config: &Config, events: &mut Events) {
    let ball_entity = world
        .query_mut::<(&Ball, &Kinematics)>()
        .into_iter()
        .next()
        .map(|(e, (_b, kin))| (e, *kin));
    let (entity, mut ball) = match ball_entity {
        Some(found) => found,
        None => return,
    };

    if config.kind != GameKind::FourPlayer {
        if ball.pos.y <= 0.0 {
            ball.pos.y = 0.0;
            ball.vel.y = ball.vel.y.abs();
            events.ball_hit_wall = true;
        } else if ball.pos.y + ball.size.y >= config.court_height {
            ball.pos.y = config.court_height - ball.size.y;
            ball.vel.y = -ball.vel.y.abs();
            events.ball_hit_wall = true;
        }
    }

    let paddles: Vec<(Paddle, Kinematics)> = world
        .query_mut::<(&Paddle, &Kinematics)>()
        .into_iter()
        .map(|(_e, (p, k))| (*p, *k))
        .collect();

    for (paddle, pkin) in paddles {
        if !ball.overlaps(&pkin) {
            continue;
        }
        // Only deflect a ball travelling into the paddle; one already
        // heading away was handled on a previous tick
        let away = paddle.edge.bounce_away_sign();
        if paddle.edge.travels_vertically() {
            if ball.vel.x * away > 0.0 {
                continue;
            }
            ball.vel.x = away * ball.vel.x.abs().max(1.0);
            ball.vel.y += Params::PADDLE_SPIN * pkin.vel.y;
            // Push flush with the paddle's inner face
            ball.pos.x = if away > 0.0 {
                pkin.pos.x + pkin.size.x
            } else {
                pkin.pos.x - ball.size.x
            };
        } else {
            if ball.vel.y * away > 0.0 {
                continue;
            }
            ball.vel.y = away * ball.vel.y.abs().max(1.0);
            ball.vel.x += Params::PADDLE_SPIN * pkin.vel.x;
            ball.pos.y = if away > 0.0 {
                pkin.pos.y + pkin.size.y
            } else {
                pkin.pos.y - ball.size.y
            };
        }
        events.ball_hit_paddle = Some(paddle.slot);
        break;
    }

    if let Ok(kin) = world.query_one_mut::<&mut Kinematics>(entity) {
        *kin = ball;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Edge;
    use crate::config::Difficulty;
    use glam::Vec2;

    fn duel_config() -> Config {
        Config::new(GameKind::TwoPlayer, Difficulty::Medium)
    }

    fn spawn_ball(world: &mut World, pos: Vec2, vel: Vec2) -> hecs::Entity {
        let mut kin = Kinematics::new(pos, Vec2::splat(10.0), 3.0);
        kin.vel = vel;
        world.spawn((Ball, kin))
    }

    fn spawn_paddle(
        world: &mut World,
        slot: u8,
        edge: Edge,
        pos: Vec2,
        vel: Vec2,
    ) -> hecs::Entity {
        let size = if edge.travels_vertically() {
            Vec2::new(10.0, 100.0)
        } else {
            Vec2::new(100.0, 10.0)
        };
        let mut kin = Kinematics::new(pos, size, 8.0);
        kin.vel = vel;
        world.spawn((Paddle { slot, edge }, kin))
    }

    #[test]
    fn test_top_wall_forces_downward_sign() {
        let config = duel_config();
        let mut world = World::new();
        let mut events = Events::default();
        let e = spawn_ball(&mut world, Vec2::new(400.0, -2.0), Vec2::new(1.0, -0.7));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(kin.pos.y, 0.0);
        assert!(kin.vel.y > 0.0, "must move downward after top wall");
        assert!(events.ball_hit_wall);
    }

    #[test]
    fn test_bottom_wall_forces_upward_sign() {
        let config = duel_config();
        let mut world = World::new();
        let mut events = Events::default();
        let e = spawn_ball(&mut world, Vec2::new(400.0, 595.0), Vec2::new(1.0, 0.7));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(kin.pos.y, config.court_height - kin.size.y);
        assert!(kin.vel.y < 0.0, "must move upward after bottom wall");
    }

    #[test]
    fn test_four_player_walls_are_open() {
        let config = Config::new(GameKind::FourPlayer, Difficulty::Medium);
        let mut world = World::new();
        let mut events = Events::default();
        let e = spawn_ball(&mut world, Vec2::new(400.0, -2.0), Vec2::new(1.0, -0.7));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert!(kin.vel.y < 0.0, "no bounce on an open wall");
        assert!(!events.ball_hit_wall);
    }

    #[test]
    fn test_right_paddle_hit_flips_away_and_adds_spin() {
        let config = duel_config();
        let mut world = World::new();
        let mut events = Events::default();
        spawn_paddle(
            &mut world,
            1,
            Edge::Right,
            Vec2::new(775.0, 250.0),
            Vec2::new(0.0, 1.0), // paddle moving down
        );
        let e = spawn_ball(&mut world, Vec2::new(770.0, 290.0), Vec2::new(1.0, 0.2));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert!(kin.vel.x < 0.0, "ball must leave a right paddle leftward");
        assert_eq!(kin.vel.y, 0.2 + 0.5);
        assert_eq!(kin.pos.x, 775.0 - kin.size.x);
        assert_eq!(events.ball_hit_paddle, Some(1));
    }

    #[test]
    fn test_ball_moving_away_is_ignored() {
        let config = duel_config();
        let mut world = World::new();
        let mut events = Events::default();
        spawn_paddle(
            &mut world,
            0,
            Edge::Left,
            Vec2::new(15.0, 250.0),
            Vec2::ZERO,
        );
        let e = spawn_ball(&mut world, Vec2::new(20.0, 290.0), Vec2::new(1.0, 0.0));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert_eq!(kin.vel.x, 1.0);
        assert_eq!(events.ball_hit_paddle, None);
    }

    #[test]
    fn test_top_paddle_hit_forces_downward() {
        let config = Config::new(GameKind::FourPlayer, Difficulty::Medium);
        let mut world = World::new();
        let mut events = Events::default();
        spawn_paddle(
            &mut world,
            2,
            Edge::Top,
            Vec2::new(350.0, 15.0),
            Vec2::new(-1.0, 0.0), // paddle sliding left
        );
        let e = spawn_ball(&mut world, Vec2::new(380.0, 20.0), Vec2::new(0.4, -1.0));

        check_collisions(&mut world, &config, &mut events);

        let kin = *world.get::<&Kinematics>(e).unwrap();
        assert!(kin.vel.y > 0.0, "ball must leave a top paddle downward");
        assert_eq!(kin.vel.x, 0.4 - 0.5);
        assert_eq!(events.ball_hit_paddle, Some(2));
    }
}
