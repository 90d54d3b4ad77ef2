use crate::components::Edge;

/// Simulation clock. `now_ms` is supplied by whoever drives the tick
/// loop; the core never reads a wall clock of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub tick: u64,
    pub now_ms: f64,
}

/// Seeded RNG so matches are reproducible under test
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

/// Per-participant score counters, instance-owned by the match
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBoard {
    scores: [u8; 4],
    participants: usize,
}

impl ScoreBoard {
    pub fn new(participants: usize) -> Self {
        debug_assert!((2..=4).contains(&participants));
        Self {
            scores: [0; 4],
            participants,
        }
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    pub fn get(&self, slot: u8) -> u8 {
        self.scores[slot as usize]
    }

    /// A conceded wall scores a point for every *other* participant
    pub fn award_others(&mut self, conceder: u8) {
        for slot in 0..self.participants {
            if slot != conceder as usize {
                self.scores[slot] += 1;
            }
        }
    }

    /// First participant at or past the threshold, if any
    pub fn winner(&self, threshold: u8) -> Option<u8> {
        self.scores[..self.participants]
            .iter()
            .position(|&s| s >= threshold)
            .map(|i| i as u8)
    }

    pub fn reset(&mut self) {
        self.scores = [0; 4];
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.scores[..self.participants]
    }
}

/// What happened during the current tick
#[derive(Debug, Clone, Copy, Default)]
pub struct Events {
    /// Slot whose wall the ball crossed this tick
    pub conceded_by: Option<u8>,
    pub ball_hit_paddle: Option<u8>,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Held-state key flags, as produced by a collaborator translating raw
/// key-down/key-up events. Not single-shot: a flag stays set while the
/// key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeldKey {
    Up,
    Down,
    Left,
    Right,
}

/// Per-slot input tables. Owned by the match instance so two live
/// matches can never trample each other's key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: [[bool; 4]; 4], // [slot][HeldKey]
}

impl InputState {
    pub fn press(&mut self, slot: u8, key: HeldKey) {
        self.held[slot as usize][key as usize] = true;
    }

    pub fn release(&mut self, slot: u8, key: HeldKey) {
        self.held[slot as usize][key as usize] = false;
    }

    pub fn is_held(&self, slot: u8, key: HeldKey) -> bool {
        self.held[slot as usize][key as usize]
    }

    pub fn clear(&mut self) {
        self.held = [[false; 4]; 4];
    }

    pub fn is_cleared(&self) -> bool {
        self.held.iter().flatten().all(|&h| !h)
    }

    /// Resolve the held flags for `slot` into a travel direction for a
    /// paddle on `edge`. Up beats down and left beats right when both
    /// flags are set (the first-checked key wins).
    pub fn dir_for(&self, slot: u8, edge: Edge) -> i8 {
        let (neg, pos) = if edge.travels_vertically() {
            (HeldKey::Up, HeldKey::Down)
        } else {
            (HeldKey::Left, HeldKey::Right)
        };
        if self.is_held(slot, neg) {
            -1
        } else if self.is_held(slot, pos) {
            1
        } else {
            0
        }
    }
}
