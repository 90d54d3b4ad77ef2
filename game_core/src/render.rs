//! Drawing seam. The core draws in court pixel space against a small
//! 2D-canvas-shaped trait; any backend that can fill rectangles and
//! circles and place text qualifies. Absence of a render target is the
//! caller's retry problem, never a core error.

use crate::session::{Match, MatchPhase};

/// Minimal 2D drawing surface in court pixel coordinates
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
}

/// Render one frame of the match: court outline, paddles, ball, the
/// score line, and the winner banner once the match has ended.
pub fn draw_match(game: &Match, surface: &mut dyn Surface) {
    let config = game.config();
    surface.stroke_rect(0.0, 0.0, config.court_width, config.court_height);

    for (_paddle, kin) in game.paddles() {
        surface.fill_rect(kin.pos.x, kin.pos.y, kin.size.x, kin.size.y);
    }

    let score_line = game
        .score()
        .as_slice()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" : ");
    surface.draw_text(&score_line, config.court_width / 2.0, 20.0);

    match game.phase() {
        MatchPhase::Running => {
            if let Some(ball) = game.ball() {
                let c = ball.center();
                surface.fill_circle(c.x, c.y, ball.size.x / 2.0);
            }
        }
        MatchPhase::Ended { .. } => {
            if let Some(winner) = game.winner_name() {
                surface.draw_text(
                    &format!("{winner} wins!"),
                    config.court_width / 2.0,
                    config.court_height / 2.0,
                );
            }
        }
        MatchPhase::Destroyed => {}
    }
}
