//! Headless real-time simulation core for the Pong variants: a
//! fixed-entity physics model, a scoring state machine, and an AI
//! opponent that plans from periodic trajectory predictions instead of
//! tracking the ball every frame.
//!
//! The crate owns no clock, no render backend, and no transport. The
//! embedding client drives [`Match::tick`] from its frame scheduler,
//! implements [`render::Surface`] over whatever it draws to, and
//! injects the session/reporting collaborators at construction.

pub mod ai;
pub mod components;
pub mod config;
pub mod params;
pub mod render;
pub mod report;
pub mod resources;
pub mod session;
pub mod systems;

pub use ai::{AiMove, AiPilot};
pub use components::{Ball, Edge, HumanControl, Kinematics, Paddle, PaddleIntent};
pub use config::{Config, Difficulty, GameKind};
pub use params::Params;
pub use report::{AlwaysValid, MatchOutcome, ReportError, ResultsReporter, SessionValidator};
pub use resources::{Events, GameRng, HeldKey, InputState, ScoreBoard, Time};
pub use session::{Match, MatchPhase};
