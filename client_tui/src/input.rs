//! Terminal keyboards report key repeats, not key-up transitions. A
//! key therefore counts as held while its press events keep arriving
//! and is released once they stop for a short window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use game_core::{HeldKey, InputState};

/// Repeat gap above which a key is considered released. Terminal
/// auto-repeat delays vary; half a second covers the slow ones.
const HOLD_WINDOW: Duration = Duration::from_millis(500);

/// Maps a key press to the slot it steers.
///
/// Left paddle on W/S, right paddle on the up/down arrows. In the
/// four-player court the top paddle takes A/D and the bottom paddle
/// the left/right arrows.
pub fn key_binding(code: KeyCode) -> Option<(u8, HeldKey)> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some((0, HeldKey::Up)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some((0, HeldKey::Down)),
        KeyCode::Up => Some((1, HeldKey::Up)),
        KeyCode::Down => Some((1, HeldKey::Down)),
        KeyCode::Char('a') | KeyCode::Char('A') => Some((2, HeldKey::Left)),
        KeyCode::Char('d') | KeyCode::Char('D') => Some((2, HeldKey::Right)),
        KeyCode::Left => Some((3, HeldKey::Left)),
        KeyCode::Right => Some((3, HeldKey::Right)),
        _ => None,
    }
}

/// Tracks when each bound key was last seen and mirrors the derived
/// held state into a match's input tables every frame.
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<(u8, HeldKey), Instant>,
}

impl KeyTracker {
    pub fn note_press(&mut self, code: KeyCode) {
        if let Some(binding) = key_binding(code) {
            self.last_seen.insert(binding, Instant::now());
        }
    }

    /// Push held/released transitions into `input`, dropping entries
    /// whose repeats have gone quiet.
    pub fn sync(&mut self, input: &mut InputState) {
        let now = Instant::now();
        self.last_seen.retain(|&(slot, key), seen| {
            if now.duration_since(*seen) <= HOLD_WINDOW {
                input.press(slot, key);
                true
            } else {
                input.release(slot, key);
                false
            }
        });
    }

    pub fn reset(&mut self) {
        self.last_seen.clear();
    }
}
