use crate::params::Params;

/// Match topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// Left paddle human, right paddle AI-piloted
    PlayerVsAi,
    /// Two human paddles, left and right
    TwoPlayer,
    /// Four paddles, one per wall; top and bottom travel horizontally
    FourPlayer,
}

impl GameKind {
    pub fn participants(&self) -> usize {
        match self {
            GameKind::PlayerVsAi | GameKind::TwoPlayer => 2,
            GameKind::FourPlayer => 4,
        }
    }

    /// Stable label used in outbound result submissions
    pub fn label(&self) -> &'static str {
        match self {
            GameKind::PlayerVsAi => "pong-ai",
            GameKind::TwoPlayer => "pong-1v1",
            GameKind::FourPlayer => "pong-1v1v1v1",
        }
    }
}

/// Opponent strength, read once at match construction from externally
/// persisted preference. Only the *error* injected into the AI scales
/// with this; the decision algorithm is identical across levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy = 1,
    #[default]
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    /// Resolve a persisted preference value, falling back to Medium
    /// when the preference is absent or out of range.
    pub fn from_pref(pref: Option<u8>) -> Self {
        match pref {
            Some(1) => Difficulty::Easy,
            Some(3) => Difficulty::Hard,
            Some(2) => Difficulty::Medium,
            _ => Difficulty::default(),
        }
    }

    /// Probability that a decision cycle distorts its movement plan
    pub fn overshoot_chance(self) -> f32 {
        match self {
            Difficulty::Easy => 0.40,
            Difficulty::Medium => 0.25,
            Difficulty::Hard => 0.15,
        }
    }

    /// Full span of the uniform error added to a predicted intercept,
    /// i.e. `(rand - 0.5) * span` yields ±span/2 pixels
    pub fn predict_error_span(self) -> f32 {
        match self {
            Difficulty::Easy => 120.0,
            Difficulty::Medium => 80.0,
            Difficulty::Hard => 40.0,
        }
    }

    /// Full span of the random offset in the receding-ball heuristic
    pub fn idle_jitter_span(self) -> f32 {
        match self {
            Difficulty::Easy => 200.0,
            Difficulty::Medium => 150.0,
            Difficulty::Hard => 100.0,
        }
    }

    /// Upper bound on extra frames appended by an overshoot
    pub fn overshoot_frames_max(self) -> u32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 12,
            Difficulty::Hard => 6,
        }
    }

    /// Largest fraction of a movement plan an undershoot may cut
    pub fn undershoot_fraction_max(self) -> f32 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.20,
            Difficulty::Hard => 0.10,
        }
    }
}

/// Per-match configuration derived from kind and difficulty
#[derive(Debug, Clone)]
pub struct Config {
    pub court_width: f32,
    pub court_height: f32,
    pub wall_offset: f32,
    pub paddle_len: f32,
    pub paddle_thickness: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_ramp: f32,
    pub win_score: u8,
    pub difficulty: Difficulty,
    pub kind: GameKind,
}

impl Config {
    pub fn new(kind: GameKind, difficulty: Difficulty) -> Self {
        let paddle_speed = match difficulty {
            Difficulty::Easy => 6.0,
            Difficulty::Medium => 8.0,
            Difficulty::Hard => 12.0,
        };
        // The free-for-all serves a slightly faster Easy ball so four
        // paddles still see action; the duel variants keep the slow one.
        let ball_speed_initial = match difficulty {
            Difficulty::Easy if kind == GameKind::FourPlayer => 3.0,
            Difficulty::Easy => 2.0,
            Difficulty::Medium => 3.0,
            Difficulty::Hard => 4.0,
        };
        let win_score = match kind {
            GameKind::FourPlayer => Params::WIN_SCORE_FFA,
            _ => Params::WIN_SCORE_DUEL,
        };
        Self {
            court_width: Params::COURT_WIDTH,
            court_height: Params::COURT_HEIGHT,
            wall_offset: Params::WALL_OFFSET,
            paddle_len: Params::PADDLE_LEN,
            paddle_thickness: Params::PADDLE_THICKNESS,
            paddle_speed,
            ball_size: Params::BALL_SIZE,
            ball_speed_initial,
            ball_speed_ramp: Params::BALL_SPEED_RAMP,
            win_score,
            difficulty,
            kind,
        }
    }

    /// Valid range of a paddle's free-axis coordinate (top-left corner)
    pub fn paddle_travel_range(&self, court_extent: f32) -> (f32, f32) {
        (
            self.wall_offset,
            court_extent - self.wall_offset - self.paddle_len,
        )
    }

    /// Clamp a vertical paddle's y (or a horizontal paddle's x)
    pub fn clamp_paddle(&self, coord: f32, court_extent: f32) -> f32 {
        let (lo, hi) = self.paddle_travel_range(court_extent);
        coord.clamp(lo, hi)
    }

    /// Band of legal paddle *centers*, used to clamp AI targets
    pub fn paddle_center_band(&self, court_extent: f32) -> (f32, f32) {
        let half = self.paddle_len / 2.0;
        (
            self.wall_offset + half,
            court_extent - self.wall_offset - half,
        )
    }
}
