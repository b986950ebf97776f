//! Tsumo eval crate - heuristics for scoring a board after a placement.
//!
//! Two interchangeable strategies sit behind [`Evaluator`]: a general
//! shape/risk heuristic and a GTR-opening heuristic that reserves the left
//! columns for the named shape. Neither is tuned for anything but 6-wide fields.

mod gtr;
mod potential;
mod risk;

pub use gtr::{gtr_pattern_score, GtrWeights};
pub use potential::{shape_potential, shape_potential_from};
pub use risk::risk_penalty;

use serde::{Deserialize, Serialize};
use tsumo_core::Board;
use tsumo_engine::ChainResult;

/// Scores a post-placement board together with the chains the placement fired.
/// Implementations are pure.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, result: ChainResult) -> f32;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Multiplier on chains^3.
    pub chain: f32,
    pub cleared_cell: f32,
    /// Per cell stacked on a different color.
    pub interleave: f32,
    /// Multiplier on the squared height of each 3-cell group.
    pub triple: f32,
    /// Max height above which the height penalty applies.
    pub height_threshold: usize,
    pub height_exponent: f32,
    /// Max height above which the flat danger penalty applies.
    pub danger_height: usize,
    pub danger: f32,
    pub buried_cell: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            chain: 100.0,
            cleared_cell: 20.0,
            interleave: 20.0,
            triple: 1.0,
            height_threshold: 3,
            height_exponent: 2.8,
            danger_height: 8,
            danger: 350.0,
            buried_cell: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalStrategy {
    #[default]
    General,
    Gtr {
        /// Left columns kept for the opening shape and skipped by the shape scan.
        reserved_columns: usize,
    },
}

impl EvalStrategy {
    pub const GTR: Self = Self::Gtr {
        reserved_columns: 3,
    };
}

/// Strategy plus the weights it reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub strategy: EvalStrategy,
    pub weights: EvalWeights,
    pub gtr: GtrWeights,
}

impl EvalConfig {
    pub fn general() -> Self {
        Self::default()
    }

    pub fn gtr() -> Self {
        Self {
            strategy: EvalStrategy::GTR,
            ..Self::default()
        }
    }
}

impl Evaluator for EvalConfig {
    fn evaluate(&self, board: &Board, result: ChainResult) -> f32 {
        match self.strategy {
            EvalStrategy::General => evaluate_general(board, result, &self.weights),
            EvalStrategy::Gtr { reserved_columns } => {
                evaluate_gtr(board, result, &self.weights, &self.gtr, reserved_columns)
            }
        }
    }
}

/// Reward for chains that already fired. Dominates every shape term.
pub fn chain_score(result: ChainResult, weights: &EvalWeights) -> f32 {
    let chains = result.chains as f32;
    chains.powi(3) * weights.chain + result.cleared as f32 * weights.cleared_cell
}

pub fn evaluate_general(board: &Board, result: ChainResult, weights: &EvalWeights) -> f32 {
    if result.is_chain() {
        return chain_score(result, weights);
    }
    shape_potential(board, weights) - risk_penalty(board, weights)
}

pub fn evaluate_gtr(
    board: &Board,
    result: ChainResult,
    weights: &EvalWeights,
    gtr: &GtrWeights,
    reserved_columns: usize,
) -> f32 {
    if result.is_chain() {
        return chain_score(result, weights);
    }
    gtr_pattern_score(board, gtr, reserved_columns)
        + shape_potential_from(board, reserved_columns, weights)
        - risk_penalty(board, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_score_is_super_linear() {
        let weights = EvalWeights::default();
        let one = chain_score(ChainResult { chains: 1, cleared: 4 }, &weights);
        let two = chain_score(ChainResult { chains: 2, cleared: 8 }, &weights);
        assert_eq!(one, 180.0);
        assert_eq!(two, 960.0);
        assert!(two > 2.0 * one);
    }

    #[test]
    fn test_chain_short_circuits_shape() {
        let board = Board::from_rows(6, 12, 2, &["12....", "21...."]).expect("valid rows");
        let result = ChainResult { chains: 1, cleared: 4 };
        let config = EvalConfig::general();
        assert_eq!(config.evaluate(&board, result), 180.0);
        assert_eq!(EvalConfig::gtr().evaluate(&board, result), 180.0);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::default();
        assert_eq!(EvalConfig::general().evaluate(&board, ChainResult::NONE), 0.0);
    }

    #[test]
    fn test_pure_function() {
        let board = Board::from_rows(6, 12, 2, &["1.....", "2....."]).expect("valid rows");
        let before = board.clone();
        let config = EvalConfig::general();
        let a = config.evaluate(&board, ChainResult::NONE);
        let b = config.evaluate(&board, ChainResult::NONE);
        assert_eq!(a, b);
        assert_eq!(board, before);
    }

    #[test]
    fn test_strategy_from_json() {
        let config: EvalConfig =
            serde_json::from_str(r#"{"strategy": {"kind": "gtr", "reserved_columns": 3}}"#)
                .expect("valid json");
        assert_eq!(config.strategy, EvalStrategy::GTR);
        assert_eq!(config.weights, EvalWeights::default());

        let general: EvalConfig =
            serde_json::from_str(r#"{"strategy": {"kind": "general"}}"#).expect("valid json");
        assert_eq!(general.strategy, EvalStrategy::General);
    }
}
