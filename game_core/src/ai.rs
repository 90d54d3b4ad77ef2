//! AI paddle pilot.
//!
//! The pilot never reads the live ball position every frame. It makes a
//! decision at most once per update interval, commits to a movement plan
//! (a direction and a frame count), and blindly executes that plan until
//! the frames run out or a wall stops it. Stale plans between decisions
//! are the point: they are what make the opponent feel human instead of
//! perfectly reactive. Difficulty scales only the error injected into
//! the plan, never the algorithm.

use hecs::World;
use rand::Rng;

use crate::components::{Ball, Edge, Kinematics, Paddle, PaddleIntent};
use crate::config::{Config, Difficulty};
use crate::params::Params;
use crate::resources::{GameRng, Time};

/// Committed movement direction for the current plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMove {
    Up,
    Down,
    #[default]
    Idle,
}

impl AiMove {
    pub fn dir(self) -> i8 {
        match self {
            AiMove::Up => -1,
            AiMove::Down => 1,
            AiMove::Idle => 0,
        }
    }
}

/// Decision state for an AI-piloted paddle
#[derive(Debug, Clone, Copy)]
pub struct AiPilot {
    pub difficulty: Difficulty,
    pub update_interval_ms: f64,
    pub last_decision_ms: f64,
    pub decision: AiMove,
    pub target: f32,
    pub frames_left: u32,
}

impl AiPilot {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            update_interval_ms: Params::AI_UPDATE_INTERVAL_MS,
            // First tick always decides
            last_decision_ms: f64::NEG_INFINITY,
            decision: AiMove::Idle,
            target: 0.0,
            frames_left: 0,
        }
    }
}

/// Per-tick AI system: runs the decision cycle when the interval has
/// elapsed, then executes one step of whatever plan is current.
pub fn drive_ai(world: &mut World, time: &Time, config: &Config, rng: &mut GameRng) {
    let ball = world
        .query_mut::<(&Ball, &Kinematics)>()
        .into_iter()
        .next()
        .map(|(_e, (_b, kin))| *kin);
    let ball = match ball {
        Some(b) => b,
        None => return,
    };

    for (_e, (paddle, kin, pilot, intent)) in
        world.query_mut::<(&Paddle, &Kinematics, &mut AiPilot, &mut PaddleIntent)>()
    {
        if time.now_ms - pilot.last_decision_ms >= pilot.update_interval_ms {
            decide(pilot, paddle.edge, kin, &ball, config, rng);
            pilot.last_decision_ms = time.now_ms;
        }
        intent.dir = execute_step(pilot, kin, config);
    }
}

/// Execute one frame of the committed plan. Returns the intent for this
/// tick. The plan aborts early only when the paddle is pinned against a
/// wall, never because the ball moved.
fn execute_step(pilot: &mut AiPilot, kin: &Kinematics, config: &Config) -> i8 {
    if pilot.frames_left == 0 {
        return 0;
    }
    pilot.frames_left -= 1;

    let dir = pilot.decision.dir();
    let (lo, hi) = config.paddle_travel_range(config.court_height);
    let at_wall = (dir < 0 && kin.pos.y <= lo) || (dir > 0 && kin.pos.y >= hi);
    if at_wall {
        pilot.frames_left = 0;
        return 0;
    }
    dir
}

/// One decision cycle: pick a target y, plan a duration, distort it.
fn decide(
    pilot: &mut AiPilot,
    edge: Edge,
    paddle: &Kinematics,
    ball: &Kinematics,
    config: &Config,
    rng: &mut GameRng,
) {
    let approaching = match edge {
        Edge::Right => ball.vel.x > 0.0,
        Edge::Left => ball.vel.x < 0.0,
        // Only side paddles carry an AI pilot
        Edge::Top | Edge::Bottom => false,
    };

    let (lo, hi) = config.paddle_center_band(config.court_height);
    let target = if approaching {
        let paddle_line = match edge {
            Edge::Right => paddle.pos.x,
            _ => paddle.pos.x + paddle.size.x,
        };
        let predicted = predict_intercept(ball, paddle_line, edge, config);
        let error = (rng.0.gen::<f32>() - 0.5) * pilot.difficulty.predict_error_span();
        (predicted + error).clamp(lo, hi)
    } else {
        idle_target(ball, config, pilot.difficulty, rng).clamp(lo, hi)
    };

    let paddle_center = paddle.center().y;
    let distance = target - paddle_center;

    pilot.target = target;
    if distance.abs() <= Params::AI_TARGET_TOLERANCE {
        pilot.decision = AiMove::Idle;
        pilot.frames_left = 0;
        return;
    }

    let mut frames = (distance.abs() / config.paddle_speed).ceil() as u32;
    frames = distort_duration(frames, pilot.difficulty, rng);

    pilot.decision = if distance < 0.0 { AiMove::Up } else { AiMove::Down };
    pilot.frames_left = frames;
}

/// Receding ball: drift toward the court center, pulled toward where
/// the ball will roughly be a second from now, with difficulty-scaled
/// jitter on top.
fn idle_target(ball: &Kinematics, config: &Config, difficulty: Difficulty, rng: &mut GameRng) -> f32 {
    let center = config.court_height / 2.0;
    let drift = ball.center().y + ball.vel.y * ball.speed * Params::AI_IDLE_LOOKAHEAD_TICKS;
    let jitter = (rng.0.gen::<f32>() - 0.5) * difficulty.idle_jitter_span();
    center + (drift - center) * 0.25 + jitter
}

/// Deliberate imperfection: with `overshoot_chance` probability the plan
/// either runs long or stops short, one or the other with equal odds.
/// An undershoot always leaves at least one frame.
fn distort_duration(frames: u32, difficulty: Difficulty, rng: &mut GameRng) -> u32 {
    if rng.0.gen::<f32>() >= difficulty.overshoot_chance() {
        return frames;
    }
    if rng.0.gen_bool(0.5) {
        frames + rng.0.gen_range(1..=difficulty.overshoot_frames_max())
    } else {
        let cut = (frames as f32 * rng.0.gen::<f32>() * difficulty.undershoot_fraction_max())
            .floor() as u32;
        frames.saturating_sub(cut).max(1)
    }
}

/// Forward-simulate a disposable copy of the ball until it reaches the
/// paddle line, applying the real wall-bounce and speed-ramp rules.
/// A ball with no horizontal motion is returned unprocessed.
pub fn predict_intercept(ball: &Kinematics, paddle_line: f32, edge: Edge, config: &Config) -> f32 {
    if ball.vel.x == 0.0 {
        return ball.center().y;
    }

    let mut sim = *ball;
    for _ in 0..Params::AI_PREDICT_MAX_STEPS {
        sim.advance();
        sim.speed += config.ball_speed_ramp;

        // Same forced-sign wall rule as the live ball
        if sim.pos.y <= 0.0 {
            sim.pos.y = 0.0;
            sim.vel.y = sim.vel.y.abs();
        } else if sim.pos.y + sim.size.y >= config.court_height {
            sim.pos.y = config.court_height - sim.size.y;
            sim.vel.y = -sim.vel.y.abs();
        }

        let arrived = match edge {
            Edge::Right => sim.vel.x > 0.0 && sim.pos.x + sim.size.x >= paddle_line - Params::AI_PREDICT_MARGIN,
            _ => sim.vel.x < 0.0 && sim.pos.x <= paddle_line + Params::AI_PREDICT_MARGIN,
        };
        if arrived {
            break;
        }
    }
    sim.center().y
}
