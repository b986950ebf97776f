//! Tsumo search crate - greedy and two-ply move selection.

mod beam;
mod lookahead;

pub use beam::BeamSearch;
pub use lookahead::{think_next_move, LookaheadSearch, Plan};

use serde::{Deserialize, Serialize};
use tsumo_core::{Board, ColorPair, Move};
use tsumo_engine::{simulate_placement, ChainResult};
use tsumo_eval::{EvalConfig, EvalStrategy, Evaluator};

/// First-ply candidates carried into the second ply.
pub const DEFAULT_BEAM_WIDTH: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub beam_width: usize,
    pub strategy: EvalStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: DEFAULT_BEAM_WIDTH,
            strategy: EvalStrategy::General,
        }
    }
}

impl SearchConfig {
    pub fn evaluator(&self) -> EvalConfig {
        EvalConfig {
            strategy: self.strategy,
            ..EvalConfig::default()
        }
    }
}

/// One simulated placement.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub mv: Move,
    pub board: Board,
    pub chain: ChainResult,
    pub score: f32,
}

/// Drop `colors` with `mv` on a copy of `board`, resolve chains and score the result.
/// None when the pair cannot spawn in that column.
pub fn simulate<E: Evaluator + ?Sized>(
    board: &Board,
    colors: ColorPair,
    mv: Move,
    evaluator: &E,
) -> Option<Candidate> {
    let (board, chain) = simulate_placement(board, colors, &mv)?;
    let score = evaluator.evaluate(&board, chain);
    Some(Candidate {
        mv,
        board,
        chain,
        score,
    })
}
