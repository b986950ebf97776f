//! Live game session: the board, the pair in play, the queue and the turn state machine.
//!
//! The driver issues discrete intents and reads state back each frame. Every
//! command applies atomically and returns what happened; pacing, lock delay and
//! animation stay on the driver side.

use std::collections::VecDeque;

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use tsumo_core::{ActivePiece, Board, ColorPair, Move, Orientation};

use crate::apply::{lock_piece, spawn_row};
use crate::bag::TsumoBag;
use crate::chain::{find_clearable, resolve_step, resolve_to_fixpoint, ChainResult};
use crate::collision::{landing_row, piece_fits};
use crate::config::{ConfigError, SessionConfig};
use crate::gravity::apply_gravity;
use crate::movement::{can_advance, try_fall, try_move, try_rotate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active piece")]
    NoActivePiece,
    #[error("a piece is already in play")]
    PieceAlreadyActive,
    #[error("game is over")]
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// A pair is in play and accepts intents.
    Controllable,
    /// The pair was written to the board; chains and the next spawn are pending.
    Locked,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockOutcome {
    /// Board is settled with nothing to clear; spawn next.
    Locked,
    /// Cells need to fall or groups need clearing before the next spawn.
    ChainsPending,
    /// A dead cell is occupied.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(ActivePiece),
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Fell,
    Turn(TurnReport),
}

/// Summary of one completed turn: lock, chains, spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub chain: ChainResult,
    pub game_over: bool,
}

/// Serializable view handed to renderers.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub queue: Vec<ColorPair>,
    pub dead_cells: Vec<(usize, usize)>,
    pub last_chain: ChainResult,
    pub phase: Phase,
}

pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    /// Back is the pair in play, the one before it is next.
    queue: VecDeque<ColorPair>,
    scripted: VecDeque<ColorPair>,
    bag: TsumoBag,
    phase: Phase,
    last_chain: ChainResult,
    pieces_placed: u32,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_pairs(config, &[])
    }

    /// Start with known pairs: `pairs[0]` is played first, then `pairs[1]`, and so on.
    /// The bag takes over once they run out.
    pub fn with_pairs(config: SessionConfig, pairs: &[ColorPair]) -> Result<Self, ConfigError> {
        config.validate()?;
        let bag = TsumoBag::new(config.palette, config.opening, config.seed);
        let mut session = Self {
            board: config.empty_board(),
            active: None,
            queue: VecDeque::with_capacity(config.queue_depth),
            scripted: pairs.iter().copied().collect(),
            bag,
            phase: Phase::Locked,
            last_chain: ChainResult::NONE,
            pieces_placed: 0,
            config,
        };
        session.replenish();
        session.spawn_active();
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn queue(&self) -> &VecDeque<ColorPair> {
        &self.queue
    }

    /// Pair in play, or about to be spawned.
    pub fn current_pair(&self) -> Option<ColorPair> {
        self.queue.back().copied()
    }

    /// Pair that follows the current one.
    pub fn next_pair(&self) -> Option<ColorPair> {
        let len = self.queue.len();
        (len >= 2).then(|| self.queue[len - 2])
    }

    pub fn dead_cells(&self) -> &[(usize, usize)] {
        &self.config.dead_cells
    }

    /// Tally of the most recent resolve, reset on every lock.
    pub fn last_chain(&self) -> ChainResult {
        self.last_chain
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.clone(),
            active: self.active,
            queue: self.queue.iter().copied().collect(),
            dead_cells: self.config.dead_cells.clone(),
            last_chain: self.last_chain,
            phase: self.phase,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_counter_clockwise(&mut self) -> bool {
        self.rotate(false)
    }

    /// Advance one row. False means the pair rests on something; locking is the driver's call.
    pub fn fall_one_step(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        match try_fall(&self.board, &piece) {
            Some(next) => {
                self.active = Some(next);
                true
            }
            None => false,
        }
    }

    /// Could the pair still fall? No side effects, safe to poll during a lock delay.
    pub fn can_advance(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| can_advance(&self.board, piece))
    }

    /// Write the pair into the board where it is.
    pub fn lock(&mut self) -> Result<LockOutcome, SessionError> {
        if self.phase == Phase::GameOver {
            return Err(SessionError::GameOver);
        }
        let piece = self.active.take().ok_or(SessionError::NoActivePiece)?;
        lock_piece(&mut self.board, &piece);
        self.queue.pop_back();
        self.pieces_placed += 1;
        self.last_chain = ChainResult::NONE;
        self.phase = Phase::Locked;

        if !self.board.is_settled() || !find_clearable(&self.board).is_empty() {
            return Ok(LockOutcome::ChainsPending);
        }
        if self.dead_cell_occupied() {
            self.end_game();
            return Ok(LockOutcome::GameOver);
        }
        Ok(LockOutcome::Locked)
    }

    /// Drop straight to the landing row and lock.
    pub fn hard_drop(&mut self) -> Result<LockOutcome, SessionError> {
        if self.phase == Phase::GameOver {
            return Err(SessionError::GameOver);
        }
        let piece = self.active.as_mut().ok_or(SessionError::NoActivePiece)?;
        piece.y = landing_row(&self.board, piece.x, piece.y, piece.orientation);
        self.lock()
    }

    /// Compact every column once. Returns whether any cell moved.
    pub fn apply_gravity_once(&mut self) -> bool {
        apply_gravity(&mut self.board)
    }

    /// Clear every group that is currently clearable, without settling afterwards.
    /// Call `apply_gravity_once` between steps. None when nothing fired.
    pub fn resolve_chain_step(&mut self) -> Option<usize> {
        let cleared = resolve_step(&mut self.board);
        if cleared == 0 {
            return None;
        }
        self.last_chain.record_step(cleared);
        debug!("chain {}: cleared {} cells", self.last_chain.chains, cleared);
        Some(cleared)
    }

    /// Clear and settle until nothing fires. Returns the tally since the last lock.
    /// A split pair left floating by `lock` needs `apply_gravity_once` first.
    pub fn resolve_chains_to_fixpoint(&mut self) -> ChainResult {
        let result = resolve_to_fixpoint(&mut self.board);
        self.last_chain.chains += result.chains;
        self.last_chain.cleared += result.cleared;
        self.last_chain
    }

    /// Bring the next pair into play, or end the game if a dead cell is filled
    /// or the spawn position is blocked. Like every command, fails once the game is over.
    pub fn spawn_next(&mut self) -> Result<SpawnOutcome, SessionError> {
        if self.phase == Phase::GameOver {
            return Err(SessionError::GameOver);
        }
        if self.active.is_some() {
            return Err(SessionError::PieceAlreadyActive);
        }
        if self.dead_cell_occupied() {
            self.end_game();
            return Ok(SpawnOutcome::GameOver);
        }
        self.replenish();
        Ok(match self.spawn_active() {
            Some(piece) => SpawnOutcome::Spawned(piece),
            None => SpawnOutcome::GameOver,
        })
    }

    /// One gravity tick for headless drivers: fall, or finish the turn when resting.
    pub fn step(&mut self) -> Result<StepOutcome, SessionError> {
        if self.phase == Phase::GameOver {
            return Err(SessionError::GameOver);
        }
        if self.active.is_none() {
            return Err(SessionError::NoActivePiece);
        }
        if self.fall_one_step() {
            return Ok(StepOutcome::Fell);
        }
        self.lock()?;
        self.finish_turn().map(StepOutcome::Turn)
    }

    /// Steer the pair to `mv` with rotate and move intents, hard drop, then finish the turn.
    /// The pair drops wherever it got to if the path is blocked.
    pub fn play(&mut self, mv: Move) -> Result<TurnReport, SessionError> {
        if self.phase == Phase::GameOver {
            return Err(SessionError::GameOver);
        }
        let piece = self.active.ok_or(SessionError::NoActivePiece)?;
        match (mv.orientation.index() + 4 - piece.orientation.index()) % 4 {
            1 => {
                self.rotate_clockwise();
            }
            2 => {
                self.rotate_clockwise();
                self.rotate_clockwise();
            }
            3 => {
                self.rotate_counter_clockwise();
            }
            _ => {}
        }
        self.steer_to(mv.column as i32);
        self.hard_drop()?;
        self.finish_turn()
    }

    fn steer_to(&mut self, column: i32) {
        while let Some(piece) = self.active {
            let moved = match piece.x.cmp(&column) {
                std::cmp::Ordering::Less => self.move_right(),
                std::cmp::Ordering::Greater => self.move_left(),
                std::cmp::Ordering::Equal => break,
            };
            if !moved {
                break;
            }
        }
    }

    fn finish_turn(&mut self) -> Result<TurnReport, SessionError> {
        self.apply_gravity_once();
        let chain = self.resolve_chains_to_fixpoint();
        if self.is_game_over() {
            return Ok(TurnReport {
                chain,
                game_over: true,
            });
        }
        let game_over = matches!(self.spawn_next()?, SpawnOutcome::GameOver);
        Ok(TurnReport { chain, game_over })
    }

    fn shift(&mut self, dx: i32) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        match try_move(&self.board, &piece, dx) {
            Some(next) => {
                self.active = Some(next);
                true
            }
            None => false,
        }
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        match try_rotate(&self.board, &piece, clockwise) {
            Some(result) => {
                self.active = Some(result.piece);
                true
            }
            None => false,
        }
    }

    fn replenish(&mut self) {
        while self.queue.len() < self.config.queue_depth {
            let pair = match self.scripted.pop_front() {
                Some(pair) => pair,
                None => self.bag.next_pair(),
            };
            self.queue.push_front(pair);
        }
    }

    fn spawn_active(&mut self) -> Option<ActivePiece> {
        let colors = self.queue.back().copied()?;
        let piece = ActivePiece {
            x: self.config.spawn_column as i32,
            y: spawn_row(&self.board),
            orientation: Orientation::Up,
            colors,
        };
        if !piece_fits(&self.board, &piece) {
            self.end_game();
            return None;
        }
        self.active = Some(piece);
        self.phase = Phase::Controllable;
        Some(piece)
    }

    fn dead_cell_occupied(&self) -> bool {
        self.config
            .dead_cells
            .iter()
            .any(|&(x, y)| self.board.cell(x, y).is_filled())
    }

    fn end_game(&mut self) {
        if self.phase != Phase::GameOver {
            info!("game over after {} pieces", self.pieces_placed);
        }
        self.active = None;
        self.phase = Phase::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsumo_core::Cell;

    fn session_with(pairs: &[ColorPair]) -> Session {
        Session::with_pairs(SessionConfig::default(), pairs).expect("valid config")
    }

    #[test]
    fn test_spawn_position() {
        let session = session_with(&[ColorPair::new(1, 2)]);
        let piece = session.active().expect("spawned");
        assert_eq!((piece.x, piece.y), (2, 1));
        assert_eq!(piece.orientation, Orientation::Up);
        assert_eq!(piece.colors, ColorPair::new(1, 2));
        assert_eq!(session.phase(), Phase::Controllable);
    }

    #[test]
    fn test_queue_order() {
        let pairs = [ColorPair::new(1, 1), ColorPair::new(2, 2), ColorPair::new(3, 3)];
        let session = session_with(&pairs);
        assert_eq!(session.queue().len(), 3);
        assert_eq!(session.current_pair(), Some(pairs[0]));
        assert_eq!(session.next_pair(), Some(pairs[1]));
    }

    #[test]
    fn test_queue_depth_constant_across_turns() {
        let mut session = Session::new(SessionConfig::default().with_seed(3)).expect("valid config");
        for _ in 0..5 {
            session.play(Move::new(Orientation::Up, 0)).ok();
            if session.is_game_over() {
                break;
            }
            assert_eq!(session.queue().len(), 3);
        }
    }

    #[test]
    fn test_move_blocked_returns_false() {
        let mut session = session_with(&[]);
        assert!(session.move_left());
        assert!(session.move_left());
        assert!(!session.move_left());
        assert_eq!(session.active().map(|p| p.x), Some(0));
    }

    #[test]
    fn test_fall_and_lock() {
        let mut session = session_with(&[ColorPair::new(1, 2)]);
        let mut steps = 0;
        while session.fall_one_step() {
            steps += 1;
        }
        assert_eq!(steps, 12);
        assert!(!session.can_advance());
        assert_eq!(session.lock(), Ok(LockOutcome::Locked));
        assert_eq!(session.board().cell(2, 13), Cell::new(1));
        assert_eq!(session.board().cell(2, 12), Cell::new(2));
        assert!(session.active().is_none());
        assert_eq!(session.phase(), Phase::Locked);
        assert!(matches!(session.spawn_next(), Ok(SpawnOutcome::Spawned(_))));
    }

    #[test]
    fn test_lock_without_piece_is_an_error() {
        let mut session = session_with(&[]);
        session.hard_drop().expect("piece in play");
        assert_eq!(session.lock(), Err(SessionError::NoActivePiece));
    }

    #[test]
    fn test_spawn_twice_is_an_error() {
        let mut session = session_with(&[]);
        assert_eq!(session.spawn_next(), Err(SessionError::PieceAlreadyActive));
    }

    #[test]
    fn test_split_pair_reports_pending() {
        let mut session = session_with(&[ColorPair::new(1, 2), ColorPair::new(3, 4)]);
        session.play(Move::new(Orientation::Up, 0)).expect("turn");
        session.rotate_clockwise();
        while session.move_left() {}
        assert_eq!(session.hard_drop(), Ok(LockOutcome::ChainsPending));
        assert!(session.apply_gravity_once());
        assert!(!session.apply_gravity_once());
    }

    #[test]
    fn test_play_settles_split_pair() {
        let mut session = session_with(&[ColorPair::new(1, 2), ColorPair::new(3, 4)]);
        session.play(Move::new(Orientation::Up, 0)).expect("turn");
        let report = session.play(Move::new(Orientation::Right, 0)).expect("turn");
        assert_eq!(report.chain, ChainResult::NONE);
        assert!(session.board().is_settled());
        assert_eq!(session.board().cell(1, 13), Cell::new(4));
    }

    #[test]
    fn test_commands_after_game_over_fail() {
        let mut config = SessionConfig::default();
        config.dead_cells = vec![(2, 13)];
        let mut session =
            Session::with_pairs(config, &[ColorPair::new(1, 2)]).expect("valid config");
        let report = session.play(Move::new(Orientation::Up, 2)).expect("turn");
        assert!(report.game_over);
        assert!(session.is_game_over());

        assert_eq!(session.spawn_next(), Err(SessionError::GameOver));
        assert_eq!(session.lock(), Err(SessionError::GameOver));
        assert_eq!(session.hard_drop(), Err(SessionError::GameOver));
        assert_eq!(session.step(), Err(SessionError::GameOver));
        assert_eq!(session.play(Move::new(Orientation::Up, 0)), Err(SessionError::GameOver));
    }

    #[test]
    fn test_stepwise_chain() {
        let pairs = [ColorPair::new(1, 1), ColorPair::new(1, 1)];
        let mut session = session_with(&pairs);
        let first = session.play(Move::new(Orientation::Up, 0)).expect("turn");
        assert_eq!(first.chain, ChainResult::NONE);
        while session.move_left() {}
        assert_eq!(session.hard_drop().ok(), Some(LockOutcome::ChainsPending));
        assert_eq!(session.resolve_chain_step(), Some(4));
        assert!(!session.apply_gravity_once());
        assert_eq!(session.resolve_chain_step(), None);
        assert_eq!(
            session.last_chain(),
            ChainResult {
                chains: 1,
                cleared: 4
            }
        );
    }

    #[test]
    fn test_step_finishes_turn() {
        let mut session = session_with(&[ColorPair::new(1, 2), ColorPair::new(3, 4)]);
        let mut turns = 0;
        for _ in 0..20 {
            if let Ok(StepOutcome::Turn(report)) = session.step() {
                assert!(!report.game_over);
                turns += 1;
                break;
            }
        }
        assert_eq!(turns, 1);
        assert_eq!(session.current_pair(), Some(ColorPair::new(3, 4)));
        assert_eq!(session.pieces_placed(), 1);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let session = session_with(&[ColorPair::new(1, 2)]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.active, session.active().copied());
        assert_eq!(snapshot.queue.len(), 3);
        assert_eq!(snapshot.phase, Phase::Controllable);
        assert_eq!(snapshot.dead_cells, vec![(2, 2)]);
    }
}
