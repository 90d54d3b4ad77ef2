use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use game_core::render::{draw_match, Surface};
use game_core::{
    AlwaysValid, Difficulty, GameKind, HeldKey, Match, MatchOutcome, MatchPhase, ReportError,
    ResultsReporter, SessionValidator,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Default)]
struct RecordingReporter {
    submissions: Rc<RefCell<Vec<MatchOutcome>>>,
}

impl ResultsReporter for RecordingReporter {
    fn submit(&self, outcome: &MatchOutcome) -> Result<(), ReportError> {
        self.submissions.borrow_mut().push(outcome.clone());
        Ok(())
    }
}

struct ExpiredSession;
impl SessionValidator for ExpiredSession {
    fn session_is_valid(&self) -> bool {
        false
    }
}

struct FailingReporter;
impl ResultsReporter for FailingReporter {
    fn submit(&self, _outcome: &MatchOutcome) -> Result<(), ReportError> {
        Err(ReportError::Transport("connection refused".into()))
    }
}

fn new_match(kind: GameKind, difficulty: Difficulty) -> (Match, Rc<RefCell<Vec<MatchOutcome>>>) {
    let reporter = RecordingReporter::default();
    let submissions = reporter.submissions.clone();
    let game = Match::new(
        kind,
        difficulty,
        4242,
        &["Alice", "Bob", "Carol", "Dave"],
        Box::new(AlwaysValid),
        Box::new(reporter),
    );
    (game, submissions)
}

fn run_ticks(game: &mut Match, n: u64) {
    for i in 0..n {
        game.tick((i + 1) as f64 * FRAME_MS);
    }
}

/// Score one point against `conceder` by parking the ball past the wall
fn force_concession(game: &mut Match, conceder: u8) {
    let pos = match conceder {
        0 => Vec2::new(-20.0, 300.0),
        1 => Vec2::new(820.0, 300.0),
        2 => Vec2::new(400.0, -20.0),
        _ => Vec2::new(400.0, 620.0),
    };
    game.place_ball(pos, Vec2::ZERO, 5.0);
    game.tick(1.0);
}

#[test]
fn paddle_never_crosses_wall_offset() {
    let (mut game, _) = new_match(GameKind::TwoPlayer, Difficulty::Hard);
    game.input_mut().press(0, HeldKey::Up);
    game.input_mut().press(1, HeldKey::Down);

    for i in 0..600 {
        game.tick((i + 1) as f64 * FRAME_MS);
        let config = game.config().clone();
        let (lo, hi) = config.paddle_travel_range(config.court_height);
        for (_p, kin) in game.paddles() {
            assert!(kin.pos.y >= lo && kin.pos.y <= hi);
        }
    }

    // Held long enough, both paddles are pinned at their margins
    let paddles = game.paddles();
    let config = game.config();
    assert_eq!(paddles[0].1.pos.y, config.wall_offset);
    assert_eq!(
        paddles[1].1.pos.y,
        config.court_height - config.wall_offset - config.paddle_len
    );
}

#[test]
fn ball_speed_monotone_until_score_then_reset() {
    let (mut game, _) = new_match(GameKind::TwoPlayer, Difficulty::Medium);
    let mut last_speed = game.ball().unwrap().speed;
    assert_eq!(last_speed, game.config().ball_speed_initial);

    for i in 0..120 {
        game.tick((i + 1) as f64 * FRAME_MS);
        let speed = game.ball().unwrap().speed;
        if game.events().conceded_by.is_none() {
            assert!(speed >= last_speed, "rally speed must not decay");
        } else {
            assert_eq!(speed, game.config().ball_speed_initial);
        }
        last_speed = speed;
    }

    // Force a score and check the explicit reset
    game.place_ball(Vec2::new(-20.0, 300.0), Vec2::new(-1.0, 0.2), 9.0);
    game.tick(10_000.0);
    assert_eq!(game.ball().unwrap().speed, game.config().ball_speed_initial);
}

#[test]
fn destroy_is_idempotent_and_clears_state() {
    let (mut game, submissions) = new_match(GameKind::PlayerVsAi, Difficulty::Easy);
    game.input_mut().press(0, HeldKey::Down);
    run_ticks(&mut game, 10);

    game.destroy();
    game.destroy();

    assert_eq!(game.phase(), MatchPhase::Destroyed);
    assert!(game.input_mut().is_cleared());
    assert!(game.score().as_slice().iter().all(|&s| s == 0));
    assert!(submissions.borrow().is_empty());

    // Ticking a destroyed match moves nothing
    let before = game.paddles();
    game.input_mut().press(0, HeldKey::Down);
    game.tick(99_999.0);
    let after = game.paddles();
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.1.pos, a.1.pos);
    }
}

#[test]
fn difficulty_speed_table_round_trip() {
    for (difficulty, expected) in [
        (Difficulty::Easy, (6.0, 2.0)),
        (Difficulty::Medium, (8.0, 3.0)),
        (Difficulty::Hard, (12.0, 4.0)),
    ] {
        let (game, _) = new_match(GameKind::PlayerVsAi, difficulty);
        let config = game.config();
        assert_eq!(
            (config.paddle_speed, config.ball_speed_initial),
            expected,
            "{difficulty:?}"
        );
        assert_eq!(game.ball().unwrap().speed, expected.1);
    }
    // The free-for-all table differs only in the Easy ball speed
    let (game, _) = new_match(GameKind::FourPlayer, Difficulty::Easy);
    assert_eq!(game.config().ball_speed_initial, 3.0);
}

#[test]
fn covered_interception_deflects_without_scoring() {
    let (mut game, _) = new_match(GameKind::TwoPlayer, Difficulty::Medium);
    // Dead-center ball moving straight right; the untouched right paddle
    // already covers the interception line
    let config = game.config().clone();
    game.place_ball(
        Vec2::new(
            (config.court_width - config.ball_size) / 2.0,
            (config.court_height - config.ball_size) / 2.0,
        ),
        Vec2::new(1.0, 0.0),
        config.ball_speed_initial,
    );

    let mut deflected = false;
    for i in 0..400 {
        game.tick((i + 1) as f64 * FRAME_MS);
        if game.ball().unwrap().vel.x < 0.0 {
            deflected = true;
            break;
        }
    }
    assert!(deflected, "ball must come back off the covering paddle");
    assert_eq!(game.score().as_slice(), &[0, 0]);
}

#[test]
fn left_exit_scores_exactly_one_and_recenters() {
    let (mut game, _) = new_match(GameKind::TwoPlayer, Difficulty::Medium);
    let config = game.config().clone();
    game.place_ball(Vec2::new(-20.0, 120.0), Vec2::new(-1.0, 0.4), 8.5);

    game.tick(1.0);

    assert_eq!(game.score().as_slice(), &[0, 1]);
    let ball = game.ball().unwrap();
    assert_eq!(ball.pos.x, (config.court_width - config.ball_size) / 2.0);
    assert_eq!(ball.pos.y, (config.court_height - config.ball_size) / 2.0);
    assert_eq!(ball.speed, config.ball_speed_initial);
}

#[test]
fn four_player_top_exit_scores_other_three_at_once() {
    let (mut game, _) = new_match(GameKind::FourPlayer, Difficulty::Medium);
    game.place_ball(Vec2::new(400.0, -20.0), Vec2::new(0.3, -1.0), 4.0);

    game.tick(1.0);

    assert_eq!(game.score().as_slice(), &[1, 1, 0, 1]);
}

#[test]
fn threshold_ends_match_same_tick_with_one_submission() {
    let (mut game, submissions) = new_match(GameKind::TwoPlayer, Difficulty::Medium);
    let win = game.config().win_score;

    for _ in 0..win {
        assert_eq!(game.phase(), MatchPhase::Running);
        force_concession(&mut game, 0);
    }

    assert_eq!(game.phase(), MatchPhase::Ended { winner: 1 });
    assert_eq!(submissions.borrow().len(), 1);

    let outcome = submissions.borrow()[0].clone();
    assert_eq!(outcome.winner, "Bob");
    assert_eq!(outcome.game_type, GameKind::TwoPlayer);
    assert_eq!(
        outcome.scores,
        vec![("Alice".to_string(), 0), ("Bob".to_string(), win)]
    );

    // No physics after the threshold tick, and no second submission
    let before = game.ball().unwrap();
    game.tick(1_000_000.0);
    let after = game.ball().unwrap();
    assert_eq!(before.pos, after.pos);
    assert_eq!(submissions.borrow().len(), 1);
}

#[test]
fn four_player_threshold_uses_ffa_table() {
    let (mut game, submissions) = new_match(GameKind::FourPlayer, Difficulty::Medium);
    assert_eq!(game.config().win_score, 2);

    force_concession(&mut game, 3);
    force_concession(&mut game, 3);

    // Slots 0..2 all reached 2; the first one past the post wins
    assert_eq!(game.phase(), MatchPhase::Ended { winner: 0 });
    assert_eq!(submissions.borrow().len(), 1);
}

#[test]
fn expired_session_suppresses_submission() {
    let reporter = RecordingReporter::default();
    let submissions = reporter.submissions.clone();
    let mut game = Match::new(
        GameKind::TwoPlayer,
        Difficulty::Medium,
        7,
        &["Alice", "Bob"],
        Box::new(ExpiredSession),
        Box::new(reporter),
    );

    for _ in 0..game.config().win_score {
        force_concession(&mut game, 0);
    }

    assert!(matches!(game.phase(), MatchPhase::Ended { .. }));
    assert!(submissions.borrow().is_empty());
}

#[test]
fn failed_submission_never_blocks_the_end_state() {
    let mut game = Match::new(
        GameKind::TwoPlayer,
        Difficulty::Medium,
        7,
        &["Alice", "Bob"],
        Box::new(AlwaysValid),
        Box::new(FailingReporter),
    );

    for _ in 0..game.config().win_score {
        force_concession(&mut game, 0);
    }

    assert_eq!(game.phase(), MatchPhase::Ended { winner: 1 });
}

#[test]
fn ai_match_runs_and_ai_paddle_stays_legal() {
    let (mut game, _) = new_match(GameKind::PlayerVsAi, Difficulty::Medium);
    let config = game.config().clone();
    let (lo, hi) = config.paddle_travel_range(config.court_height);

    // Several seconds of play so multiple AI decision cycles fire
    for i in 0..1200 {
        game.tick((i + 1) as f64 * FRAME_MS);
        if game.phase() != MatchPhase::Running {
            break;
        }
        let paddles = game.paddles();
        let ai = &paddles[1].1;
        assert!(ai.pos.y >= lo && ai.pos.y <= hi);
        // AI paddles never leave their wall line
        assert_eq!(
            ai.pos.x,
            config.court_width - config.wall_offset - config.paddle_thickness
        );
    }
}

#[test]
fn missing_names_fall_back_to_defaults() {
    let reporter = RecordingReporter::default();
    let game = Match::new(
        GameKind::FourPlayer,
        Difficulty::Medium,
        1,
        &["Alice", ""],
        Box::new(AlwaysValid),
        Box::new(reporter),
    );
    assert_eq!(game.display_name(0), "Alice");
    assert_eq!(game.display_name(1), "Player 2");
    assert_eq!(game.display_name(3), "Player 4");
}

#[test]
fn ended_match_renders_winner_banner() {
    struct TextOnly(Vec<String>);
    impl Surface for TextOnly {
        fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn fill_circle(&mut self, _: f32, _: f32, _: f32) {}
        fn stroke_rect(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn draw_text(&mut self, text: &str, _: f32, _: f32) {
            self.0.push(text.to_string());
        }
    }

    let (mut game, _) = new_match(GameKind::TwoPlayer, Difficulty::Medium);
    for _ in 0..game.config().win_score {
        force_concession(&mut game, 1);
    }
    assert_eq!(game.phase(), MatchPhase::Ended { winner: 0 });

    let mut surface = TextOnly(Vec::new());
    draw_match(&game, &mut surface);
    assert!(surface.0.iter().any(|t| t == "Alice wins!"));
}
