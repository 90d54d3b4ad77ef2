/// Fixed tuning parameters shared by every match variant
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Court (canvas pixel space, top-left origin, y grows downward)
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 600.0;
    /// Margin from a court edge that no paddle may cross
    pub const WALL_OFFSET: f32 = 15.0;

    // Paddle
    pub const PADDLE_LEN: f32 = 100.0;
    pub const PADDLE_THICKNESS: f32 = 10.0;

    // Ball
    pub const BALL_SIZE: f32 = 10.0;
    /// Added to the ball's scalar speed every tick it is in play (uncapped)
    pub const BALL_SPEED_RAMP: f32 = 0.005;
    /// Fraction of the striking paddle's velocity folded into the ball
    pub const PADDLE_SPIN: f32 = 0.5;

    // Score thresholds
    pub const WIN_SCORE_DUEL: u8 = 5;
    pub const WIN_SCORE_FFA: u8 = 2;

    // AI controller
    pub const AI_UPDATE_INTERVAL_MS: f64 = 1000.0;
    /// Distance to target below which a decision cycle yields Idle
    pub const AI_TARGET_TOLERANCE: f32 = 5.0;
    /// Hard cap on forward-simulation steps in the trajectory predictor
    pub const AI_PREDICT_MAX_STEPS: u32 = 6000;
    /// The predictor stops once the simulated ball is this close to the paddle line
    pub const AI_PREDICT_MARGIN: f32 = 5.0;
    /// Lookahead horizon (ticks) for the receding-ball positional heuristic
    pub const AI_IDLE_LOOKAHEAD_TICKS: f32 = 60.0;
}
