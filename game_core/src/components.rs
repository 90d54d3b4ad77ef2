use glam::Vec2;

use crate::config::Config;
use crate::resources::GameRng;

/// Court edge a paddle is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Left/Right paddles travel along y; Top/Bottom along x
    pub fn travels_vertically(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }

    /// Sign a ball's perpendicular velocity must take after a hit on
    /// this paddle (away from the wall the paddle defends)
    pub fn bounce_away_sign(&self) -> f32 {
        match self {
            Edge::Left | Edge::Top => 1.0,
            Edge::Right | Edge::Bottom => -1.0,
        }
    }
}

/// Shared motion state: position is the top-left corner in court pixel
/// space, `vel` carries direction signs (not necessarily unit length),
/// and `speed` is the scalar distance-per-tick multiplier.
#[derive(Debug, Clone, Copy)]
pub struct Kinematics {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub speed: f32,
}

impl Kinematics {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0);
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            speed,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Advance one tick along the current direction
    pub fn advance(&mut self) {
        self.pos += self.vel * self.speed;
    }

    pub fn overlaps(&self, other: &Kinematics) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Paddle component. `slot` is the participant index owning it (and,
/// in the four-player variant, the wall behind it).
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub slot: u8,
    pub edge: Edge,
}

/// Marker for paddles driven by the match-owned input tables
#[derive(Debug, Clone, Copy)]
pub struct HumanControl;

/// Ball marker
#[derive(Debug, Clone, Copy)]
pub struct Ball;

/// One-tick movement intent along the paddle's travel axis
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: i8, // -1 toward origin, 0 idle, +1 away
}

/// Serve the ball from court center: horizontal sign 50/50, vertical
/// component a random magnitude biased up or down with equal odds.
pub fn serve_ball(kin: &mut Kinematics, config: &Config, rng: &mut GameRng) {
    use rand::Rng;

    kin.pos = Vec2::new(
        (config.court_width - kin.size.x) / 2.0,
        (config.court_height - kin.size.y) / 2.0,
    );
    kin.speed = config.ball_speed_initial;

    let x_sign = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
    let y_sign = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
    kin.vel = Vec2::new(x_sign, y_sign * rng.0.gen_range(0.25..1.0));
}
