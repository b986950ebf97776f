use std::cmp::Ordering;

use log::trace;
use tsumo_core::{Board, ColorPair};
use tsumo_engine::enumerate_moves;
use tsumo_eval::{EvalConfig, Evaluator};

use crate::{simulate, Candidate, DEFAULT_BEAM_WIDTH};

/// Single-ply search: every legal placement of one pair, scored.
pub struct BeamSearch<E = EvalConfig> {
    pub beam_width: usize,
    pub evaluator: E,
}

impl<E: Evaluator> BeamSearch<E> {
    pub fn new(beam_width: usize, evaluator: E) -> Self {
        Self {
            beam_width: beam_width.max(1),
            evaluator,
        }
    }

    /// All placements in enumeration order. Moves that cannot spawn are skipped.
    pub fn candidates(&self, board: &Board, colors: ColorPair) -> Vec<Candidate> {
        enumerate_moves(board)
            .into_iter()
            .filter_map(|mv| {
                let candidate = simulate(board, colors, mv, &self.evaluator)?;
                trace!(
                    "candidate {:?} col {} -> {:.2}",
                    mv.orientation,
                    mv.column,
                    candidate.score
                );
                Some(candidate)
            })
            .collect()
    }

    /// Highest-scoring placement; the first one enumerated wins ties.
    pub fn best_single_move(&self, board: &Board, colors: ColorPair) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for candidate in self.candidates(board, colors) {
            if best.as_ref().map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Placements sorted by descending score, cut to the beam width.
    /// Equal scores keep enumeration order.
    pub fn top_candidates(&self, board: &Board, colors: ColorPair) -> Vec<Candidate> {
        let mut scored = self.candidates(board, colors);
        scored.sort_by(|a, b| score_cmp(a.score, b.score));
        scored.truncate(self.beam_width);
        scored
    }
}

impl Default for BeamSearch {
    fn default() -> Self {
        Self::new(DEFAULT_BEAM_WIDTH, EvalConfig::default())
    }
}

fn score_cmp(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
