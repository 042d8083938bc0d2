//! Game module - the complete rules state machine
//!
//! Ties together the playfield, pieces, RNG, and scoring. Each public command is a
//! discrete step the external driver calls once per input event or gravity tick:
//! move left/right, rotate, and move down (which locks, clears lines, scores and
//! promotes the next piece when the active piece cannot fall further).

use serde::Serialize;

use crate::pieces::Piece;
use crate::playfield::Playfield;
use crate::rng::PieceRng;
use crate::scoring::{level_for_lines, line_clear_points};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::GameAction;

/// Outcome of the most recent lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points awarded by this lock's line clear.
    pub points: u32,
    /// The next piece could not spawn.
    pub top_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    playfield: Playfield,
    active: Piece,
    next: Piece,
    rng: PieceRng,
    score: u32,
    lines: u32,
    top_out: bool,
    /// Last lock event (consumed by the driver).
    last_event: Option<LockEvent>,
}

impl Game {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(PieceRng::new(seed))
    }

    /// Create a new game seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::with_rng(PieceRng::from_entropy())
    }

    fn with_rng(mut rng: PieceRng) -> Self {
        let active = Piece::spawn(rng.draw());
        let next = Piece::spawn(rng.draw());
        Self {
            playfield: Playfield::new(),
            active,
            next,
            rng,
            score: 0,
            lines: 0,
            top_out: false,
            last_event: None,
        }
    }

    /// Start over: empty playfield, zeroed counters, two fresh pieces
    ///
    /// The RNG stream continues, so the new game gets new pieces.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lines = 0;
        self.top_out = false;
        self.last_event = None;
        self.playfield.clear();
        self.active = self.create_piece();
        self.next = self.create_piece();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Derived from total cleared lines, never stored
    pub fn level(&self) -> u32 {
        level_for_lines(self.lines)
    }

    pub fn is_game_over(&self) -> bool {
        self.top_out
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn active_piece(&self) -> &Piece {
        &self.active
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Draw a random kind and place it at the spawn position
    pub fn create_piece(&mut self) -> Piece {
        Piece::spawn(self.rng.draw())
    }

    /// Whether the active piece collides with the walls, floor or locked cells
    pub fn has_collision(&self) -> bool {
        self.playfield.collides(&self.active)
    }

    /// Move one column left, reverted on collision
    ///
    /// Not gated on top-out: the driver may keep moving the last piece after a loss.
    pub fn move_piece_left(&mut self) {
        self.active.x -= 1;
        if self.has_collision() {
            self.active.x += 1;
        }
    }

    /// Move one column right, reverted on collision
    pub fn move_piece_right(&mut self) {
        self.active.x += 1;
        if self.has_collision() {
            self.active.x -= 1;
        }
    }

    /// Gravity tick: fall one row, or lock when blocked
    ///
    /// A lock runs line clearing, scoring and next-piece promotion in that order.
    /// No-op once the game is over.
    pub fn move_piece_down(&mut self) {
        if self.top_out {
            return;
        }

        self.active.y += 1;
        if self.has_collision() {
            self.active.y -= 1;
            self.lock_piece();
            let cleared = self.clear_lines();
            let points = self.update_score(cleared);
            self.update_pieces();

            self.last_event = Some(LockEvent {
                lines_cleared: cleared as u32,
                points,
                top_out: self.top_out,
            });
        }
    }

    /// Rotate clockwise; a colliding rotation is undone by rotating back
    ///
    /// There are no wall kicks: the position never changes.
    pub fn rotate_piece(&mut self) {
        self.active.rotate(true);
        if self.has_collision() {
            self.active.rotate(false);
        }
    }

    /// Write the active piece into the playfield at its current position
    ///
    /// A piece that locks with any block above row 0 ends the game (lock-out).
    pub fn lock_piece(&mut self) {
        if !self.playfield.lock(&self.active) {
            self.top_out = true;
        }
    }

    /// Remove full rows and compact the playfield; returns the number removed
    pub fn clear_lines(&mut self) -> usize {
        self.playfield.clear_full_rows().len()
    }

    /// Add line-clear points and cleared lines; returns the points awarded
    ///
    /// The multiplier uses the level before this clear is counted.
    pub fn update_score(&mut self, cleared_lines: usize) -> u32 {
        if cleared_lines == 0 {
            return 0;
        }

        let points = line_clear_points(cleared_lines, self.level());
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared_lines as u32);
        points
    }

    /// Promote the next piece, draw a new one, and flag top-out if the spawn is blocked
    pub fn update_pieces(&mut self) {
        self.active = self.next;
        self.next = self.create_piece();

        if self.has_collision() {
            self.top_out = true;
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.playfield.write_u8_grid(&mut out.playfield);
        Playfield::overlay(&mut out.playfield, &self.active);

        out.score = self.score;
        out.level = self.level();
        out.lines = self.lines;
        out.is_game_over = self.top_out;
        out.next_piece = PieceSnapshot::from(self.next);
    }

    /// Read-only view: playfield copy with the active piece painted in, plus counters
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_piece_left(),
            GameAction::MoveRight => self.move_piece_right(),
            GameAction::MoveDown => self.move_piece_down(),
            GameAction::Rotate => self.rotate_piece(),
            GameAction::Reset => self.reset(),
        }
    }

    #[cfg(test)]
    pub(crate) fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
