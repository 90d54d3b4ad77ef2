//! One playthrough of a Pong variant, from construction to the tick
//! that pushes a score counter past the win threshold.

use glam::Vec2;
use hecs::World;
use tracing::{debug, warn};

use crate::ai::{drive_ai, AiPilot};
use crate::components::{serve_ball, Ball, Edge, HumanControl, Kinematics, Paddle, PaddleIntent};
use crate::config::{Config, Difficulty, GameKind};
use crate::report::{MatchOutcome, ResultsReporter, SessionValidator};
use crate::resources::{Events, GameRng, InputState, ScoreBoard, Time};
use crate::systems::{apply_inputs, check_collisions, check_scoring, move_ball, move_paddles};

const DEFAULT_NAMES: [&str; 4] = ["Player 1", "Player 2", "Player 3", "Player 4"];

/// Match lifecycle. The tick that causes `Running → Ended` is the last
/// tick that performs any movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Running,
    Ended { winner: u8 },
    /// Torn down early (navigation away, restart with new difficulty)
    Destroyed,
}

/// A single match instance. Owns its entities, score counters, and
/// input tables outright; nothing here is shared across instances, so
/// constructing a new match can never trample a live one.
pub struct Match {
    world: World,
    config: Config,
    time: Time,
    score: ScoreBoard,
    events: Events,
    input: InputState,
    rng: GameRng,
    phase: MatchPhase,
    players: Vec<String>,
    validator: Box<dyn SessionValidator>,
    reporter: Box<dyn ResultsReporter>,
}

impl Match {
    /// Build a match. `names` entries that are missing or empty fall
    /// back to a literal default; difficulty is fixed for the lifetime
    /// of the match (restarting with a new one means a new instance).
    pub fn new(
        kind: GameKind,
        difficulty: Difficulty,
        seed: u64,
        names: &[&str],
        validator: Box<dyn SessionValidator>,
        reporter: Box<dyn ResultsReporter>,
    ) -> Self {
        let config = Config::new(kind, difficulty);
        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        spawn_paddles(&mut world, &config);

        let mut ball = Kinematics::new(
            Vec2::ZERO,
            Vec2::splat(config.ball_size),
            config.ball_speed_initial,
        );
        serve_ball(&mut ball, &config, &mut rng);
        world.spawn((Ball, ball));

        let players = (0..kind.participants())
            .map(|i| match names.get(i) {
                Some(n) if !n.trim().is_empty() => n.trim().to_string(),
                _ => DEFAULT_NAMES[i].to_string(),
            })
            .collect();

        Self {
            world,
            score: ScoreBoard::new(kind.participants()),
            config,
            time: Time::default(),
            events: Events::default(),
            input: InputState::default(),
            rng,
            phase: MatchPhase::Running,
            players,
            validator,
            reporter,
        }
    }

    /// Advance the simulation one frame. `now_ms` comes from whatever
    /// scheduler drives the loop; tests pass a synthetic clock. Paddles
    /// always move before the ball within a tick. A no-op once the
    /// match has ended or been destroyed.
    pub fn tick(&mut self, now_ms: f64) {
        if self.phase != MatchPhase::Running {
            return;
        }
        self.time.tick += 1;
        self.time.now_ms = now_ms;
        self.events.clear();

        apply_inputs(&mut self.world, &self.input);
        drive_ai(&mut self.world, &self.time, &self.config, &mut self.rng);
        move_paddles(&mut self.world, &self.config);
        move_ball(&mut self.world, &self.config);
        check_collisions(&mut self.world, &self.config, &mut self.events);
        check_scoring(
            &mut self.world,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );

        if let Some(winner) = self.score.winner(self.config.win_score) {
            self.finish(winner);
        }
    }

    /// Threshold reached: freeze the state machine and hand the score
    /// tuple to the external collaborators, exactly once.
    fn finish(&mut self, winner: u8) {
        self.phase = MatchPhase::Ended { winner };

        if !self.validator.session_is_valid() {
            debug!("session no longer valid, skipping result submission");
            return;
        }
        let outcome = MatchOutcome {
            game_type: self.config.kind,
            scores: self
                .players
                .iter()
                .zip(self.score.as_slice())
                .map(|(name, &s)| (name.clone(), s))
                .collect(),
            winner: self.players[winner as usize].clone(),
        };
        if let Err(err) = self.reporter.submit(&outcome) {
            // Fire-and-forget: a broken result POST must never trap the
            // player on a frozen end screen
            warn!(%err, "match result submission failed");
        }
    }

    /// Tear the match down early. Clears the score counters and input
    /// tables so nothing leaks into a successor instance. Idempotent.
    pub fn destroy(&mut self) {
        if self.phase == MatchPhase::Destroyed {
            return;
        }
        self.input.clear();
        self.score.reset();
        self.phase = MatchPhase::Destroyed;
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    /// Held-key tables for this instance; the input collaborator writes
    /// key-down/key-up transitions here
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn display_name(&self, slot: u8) -> &str {
        &self.players[slot as usize]
    }

    pub fn winner_name(&self) -> Option<&str> {
        match self.phase {
            MatchPhase::Ended { winner } => Some(self.display_name(winner)),
            _ => None,
        }
    }

    /// Snapshot of every paddle, slot order
    pub fn paddles(&self) -> Vec<(Paddle, Kinematics)> {
        let mut out: Vec<(Paddle, Kinematics)> = self
            .world
            .query::<(&Paddle, &Kinematics)>()
            .iter()
            .map(|(_e, (p, k))| (*p, *k))
            .collect();
        out.sort_by_key(|(p, _)| p.slot);
        out
    }

    pub fn ball(&self) -> Option<Kinematics> {
        self.world
            .query::<(&Ball, &Kinematics)>()
            .iter()
            .next()
            .map(|(_e, (_b, k))| *k)
    }

    /// Reposition the ball with an explicit velocity and speed. Used by
    /// scripted scenarios and the integration tests; normal play only
    /// ever moves the ball through the tick pipeline.
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2, speed: f32) {
        for (_e, (_b, kin)) in self.world.query_mut::<(&Ball, &mut Kinematics)>() {
            kin.pos = pos;
            kin.vel = vel;
            kin.speed = speed;
        }
    }
}

fn spawn_paddles(world: &mut World, config: &Config) {
    let v_size = Vec2::new(config.paddle_thickness, config.paddle_len);
    let h_size = Vec2::new(config.paddle_len, config.paddle_thickness);
    let mid_y = (config.court_height - config.paddle_len) / 2.0;
    let mid_x = (config.court_width - config.paddle_len) / 2.0;

    let left = Kinematics::new(Vec2::new(config.wall_offset, mid_y), v_size, config.paddle_speed);
    let right = Kinematics::new(
        Vec2::new(
            config.court_width - config.wall_offset - config.paddle_thickness,
            mid_y,
        ),
        v_size,
        config.paddle_speed,
    );

    world.spawn((
        Paddle {
            slot: 0,
            edge: Edge::Left,
        },
        HumanControl,
        left,
        PaddleIntent::default(),
    ));

    let right_paddle = Paddle {
        slot: 1,
        edge: Edge::Right,
    };
    if config.kind == GameKind::PlayerVsAi {
        world.spawn((
            right_paddle,
            AiPilot::new(config.difficulty),
            right,
            PaddleIntent::default(),
        ));
    } else {
        world.spawn((right_paddle, HumanControl, right, PaddleIntent::default()));
    }

    if config.kind == GameKind::FourPlayer {
        let top = Kinematics::new(Vec2::new(mid_x, config.wall_offset), h_size, config.paddle_speed);
        let bottom = Kinematics::new(
            Vec2::new(
                mid_x,
                config.court_height - config.wall_offset - config.paddle_thickness,
            ),
            h_size,
            config.paddle_speed,
        );
        world.spawn((
            Paddle {
                slot: 2,
                edge: Edge::Top,
            },
            HumanControl,
            top,
            PaddleIntent::default(),
        ));
        world.spawn((
            Paddle {
                slot: 3,
                edge: Edge::Bottom,
            },
            HumanControl,
            bottom,
            PaddleIntent::default(),
        ));
    }
}
