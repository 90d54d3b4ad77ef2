use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use tracing::info;

use game_core::{AlwaysValid, Difficulty, GameKind, Match, MatchPhase};

use crate::input::KeyTracker;
use crate::reporter::LoggingReporter;
use crate::surface::CellSurface;

const FRAME: Duration = Duration::from_micros(16_667);

const VARIANTS: [(&str, GameKind); 3] = [
    ("Player vs AI", GameKind::PlayerVsAi),
    ("Two Player Duel", GameKind::TwoPlayer),
    ("Four Player Free-for-all", GameKind::FourPlayer),
];

const DIFFICULTIES: [(&str, Difficulty); 3] = [
    ("Easy", Difficulty::Easy),
    ("Medium", Difficulty::Medium),
    ("Hard", Difficulty::Hard),
];

enum Screen {
    Menu,
    DifficultyPick,
    Game,
}

pub struct App {
    exit: bool,
    screen: Screen,
    menu_selected: usize,
    difficulty_selected: usize,
    game: Option<Match>,
    started_at: Instant,
    last_tick: Instant,
    keys: KeyTracker,
}

impl App {
    pub fn new() -> Self {
        Self {
            exit: false,
            screen: Screen::Menu,
            menu_selected: 0,
            difficulty_selected: 1,
            game: None,
            started_at: Instant::now(),
            last_tick: Instant::now(),
            keys: KeyTracker::default(),
        }
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.exit {
            match self.screen {
                Screen::Menu => {
                    self.handle_menu_events()?;
                    terminal.draw(|frame| self.draw_menu(frame))?;
                }
                Screen::DifficultyPick => {
                    self.handle_difficulty_events()?;
                    terminal.draw(|frame| self.draw_difficulty(frame))?;
                }
                Screen::Game => {
                    self.handle_game_events()?;
                    self.advance_game();
                    terminal.draw(|frame| self.draw_game(frame))?;
                }
            }
        }
        Ok(())
    }

    fn start_match(&mut self) {
        let (_, kind) = VARIANTS[self.menu_selected];
        let (_, difficulty) = DIFFICULTIES[self.difficulty_selected];
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let names: &[&str] = match kind {
            GameKind::PlayerVsAi => &["Player 1", "Computer"],
            _ => &[],
        };
        info!(?kind, ?difficulty, seed, "starting match");
        self.game = Some(Match::new(
            kind,
            difficulty,
            seed,
            names,
            Box::new(AlwaysValid),
            Box::new(LoggingReporter::from_env()),
        ));
        self.keys.reset();
        self.started_at = Instant::now();
        self.last_tick = Instant::now();
        self.screen = Screen::Game;
    }

    fn leave_match(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.destroy();
        }
        self.game = None;
        self.screen = Screen::Menu;
    }

    fn advance_game(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if self.last_tick.elapsed() < FRAME {
            return;
        }
        self.last_tick = Instant::now();
        self.keys.sync(game.input_mut());
        let now_ms = self.started_at.elapsed().as_secs_f64() * 1000.0;
        game.tick(now_ms);
    }

    fn handle_menu_events(&mut self) -> Result<()> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                KeyCode::Up => {
                    self.menu_selected = self.menu_selected.checked_sub(1).unwrap_or(VARIANTS.len());
                }
                KeyCode::Down => {
                    self.menu_selected = (self.menu_selected + 1) % (VARIANTS.len() + 1);
                }
                KeyCode::Enter => {
                    if self.menu_selected < VARIANTS.len() {
                        self.screen = Screen::DifficultyPick;
                    } else {
                        self.exit = true;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_difficulty_events(&mut self) -> Result<()> {
        if !event::poll(Duration::from_millis(50))? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            match key.code {
                KeyCode::Esc => self.screen = Screen::Menu,
                KeyCode::Up => {
                    self.difficulty_selected =
                        self.difficulty_selected.checked_sub(1).unwrap_or(2);
                }
                KeyCode::Down => {
                    self.difficulty_selected = (self.difficulty_selected + 1) % 3;
                }
                KeyCode::Enter => self.start_match(),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_game_events(&mut self) -> Result<()> {
        if !event::poll(Duration::from_millis(5))? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            let ended = self
                .game
                .as_ref()
                .is_some_and(|g| matches!(g.phase(), MatchPhase::Ended { .. }));
            match key.code {
                KeyCode::Esc => self.leave_match(),
                KeyCode::Enter if ended => self.leave_match(),
                code => self.keys.note_press(code),
            }
        }
        Ok(())
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let [title_area, list_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length((VARIANTS.len() + 3) as u16),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());

        let title = Paragraph::new("P O N G".bold().cyan()).alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        let [block_area] = Layout::horizontal([Constraint::Length(40)])
            .flex(Flex::Center)
            .areas(list_area);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Cyan)),
            block_area,
        );

        let labels: Vec<&str> = VARIANTS
            .iter()
            .map(|(label, _)| *label)
            .chain(std::iter::once("Exit"))
            .collect();
        self.draw_options(frame, block_area, &labels, self.menu_selected);

        let hint = Paragraph::new("Up/Down to choose, Enter to confirm, Q to quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }

    fn draw_difficulty(&self, frame: &mut Frame) {
        let [block_area] = Layout::horizontal([Constraint::Length(30)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [block_area] = Layout::vertical([Constraint::Length(6)])
            .flex(Flex::Center)
            .areas(block_area);
        frame.render_widget(
            Block::default()
                .title("Difficulty")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .style(Style::default().fg(Color::Cyan)),
            block_area,
        );
        let labels: Vec<&str> = DIFFICULTIES.iter().map(|(label, _)| *label).collect();
        self.draw_options(frame, block_area, &labels, self.difficulty_selected);
    }

    fn draw_options(&self, frame: &mut Frame, block: Rect, labels: &[&str], selected: usize) {
        let inner = Rect {
            x: block.x + 1,
            y: block.y + 1,
            width: block.width.saturating_sub(2),
            height: block.height.saturating_sub(2),
        };
        for (i, label) in labels.iter().enumerate() {
            let row = Rect {
                x: inner.x,
                y: inner.y + i as u16,
                width: inner.width,
                height: 1,
            };
            if row.y >= inner.y + inner.height {
                break;
            }
            let style = if i == selected {
                Style::default().fg(Color::White).bold()
            } else {
                Style::default().fg(Color::Green)
            };
            let text = if i == selected {
                format!("> {label} <")
            } else {
                label.to_string()
            };
            frame.render_widget(
                Paragraph::new(text).style(style).alignment(Alignment::Center),
                row,
            );
        }
    }

    fn draw_game(&mut self, frame: &mut Frame) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let [court_area, footer_area] =
            Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).areas(frame.area());

        let config = game.config();
        let (court_w, court_h) = (config.court_width, config.court_height);
        let buf = frame.buffer_mut();
        let mut surface = CellSurface::new(buf, court_area, court_w, court_h);
        game_core::render::draw_match(game, &mut surface);

        let footer = match game.phase() {
            MatchPhase::Ended { .. } => "Enter to return to the menu",
            _ => "W/S and arrows to move, Esc to abandon",
        };
        frame.render_widget(
            Paragraph::new(footer)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            footer_area,
        );
    }
}
