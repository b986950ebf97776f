use log::debug;
use tsumo_core::{Board, ColorPair, Move};
use tsumo_engine::Session;
use tsumo_eval::{EvalConfig, Evaluator};

use crate::beam::BeamSearch;
use crate::SearchConfig;

/// Chosen first move with its combined two-ply score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plan {
    pub mv: Move,
    pub score: f32,
    /// Best placement of the next pair on the resulting board, when one was searched.
    pub follow_up: Option<Move>,
}

/// Two-ply search: the best few placements of the current pair, each
/// extended by the greedy best placement of the next pair.
pub struct LookaheadSearch<E = EvalConfig> {
    beam: BeamSearch<E>,
}

impl LookaheadSearch {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.beam_width, config.evaluator())
    }
}

impl Default for LookaheadSearch {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl<E: Evaluator> LookaheadSearch<E> {
    pub fn new(beam_width: usize, evaluator: E) -> Self {
        Self {
            beam: BeamSearch::new(beam_width, evaluator),
        }
    }

    pub fn beam(&self) -> &BeamSearch<E> {
        &self.beam
    }

    /// None when no placement of `current` can spawn.
    pub fn plan(&self, board: &Board, current: ColorPair, next: Option<ColorPair>) -> Option<Plan> {
        let Some(next) = next else {
            let best = self.beam.best_single_move(board, current)?;
            return Some(Plan {
                mv: best.mv,
                score: best.score,
                follow_up: None,
            });
        };

        let mut best: Option<Plan> = None;
        for candidate in self.beam.top_candidates(board, current) {
            let second = self.beam.best_single_move(&candidate.board, next);
            let score = candidate.score + second.as_ref().map_or(f32::NEG_INFINITY, |s| s.score);
            debug!(
                "plan {:?} col {}: {:.2} + {:.2}",
                candidate.mv.orientation,
                candidate.mv.column,
                candidate.score,
                score - candidate.score
            );
            // A candidate whose follow-up has no placement only stands when nothing beats it.
            if best.map_or(true, |b| score > b.score) {
                best = Some(Plan {
                    mv: candidate.mv,
                    score,
                    follow_up: second.map(|s| s.mv),
                });
            }
        }
        best
    }

    /// Move to play, falling back to the center column when nothing fits.
    pub fn think(&self, board: &Board, current: ColorPair, next: Option<ColorPair>) -> Move {
        match self.plan(board, current, next) {
            Some(plan) => {
                debug!(
                    "chose {:?} col {} score {:.2}",
                    plan.mv.orientation, plan.mv.column, plan.score
                );
                plan.mv
            }
            None => {
                debug!("no placement fits, falling back to center");
                Move::center(board.width())
            }
        }
    }

    pub fn think_next_move(&self, session: &Session) -> Move {
        match session.current_pair() {
            Some(current) => self.think(session.board(), current, session.next_pair()),
            None => Move::center(session.board().width()),
        }
    }
}

/// Decide the next move for the session's current pair.
pub fn think_next_move(session: &Session, config: &SearchConfig) -> Move {
    LookaheadSearch::from_config(config).think_next_move(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsumo_core::Orientation;
    use tsumo_engine::{simulate_placement, SessionConfig};

    const FIRST: ColorPair = ColorPair::new(2, 3);
    const SECOND: ColorPair = ColorPair::new(1, 1);

    /// Three 1s in column 1 capped by a 2; two 2s in column 0 capped by 3s.
    /// A 2 on the floor of column 2 turns the next 1-clear into a 2-chain.
    fn setup_board() -> Board {
        Board::from_rows(6, 12, 2, &["32....", "31....", "21.4..", "21.4.."]).expect("valid rows")
    }

    /// Pairs that build `setup_board` when played in order, then FIRST and SECOND.
    fn setup_pairs() -> Vec<ColorPair> {
        vec![
            ColorPair::new(2, 2),
            ColorPair::new(1, 1),
            ColorPair::new(1, 2),
            ColorPair::new(3, 3),
            ColorPair::new(4, 4),
            FIRST,
            SECOND,
        ]
    }

    const SETUP_MOVES: [Move; 5] = [
        Move::new(Orientation::Up, 0),
        Move::new(Orientation::Up, 1),
        Move::new(Orientation::Up, 1),
        Move::new(Orientation::Up, 0),
        Move::new(Orientation::Up, 3),
    ];

    fn setup_session(queue_depth: usize) -> Session {
        let config = SessionConfig {
            queue_depth,
            ..SessionConfig::default()
        };
        let mut session = Session::with_pairs(config, &setup_pairs()).expect("valid config");
        for mv in SETUP_MOVES {
            let report = session.play(mv).expect("active pair");
            assert!(!report.chain.is_chain());
            assert!(!report.game_over);
        }
        assert_eq!(session.board(), &setup_board());
        session
    }

    #[test]
    fn test_greedy_misses_setup() {
        let search = LookaheadSearch::default();
        let greedy = search
            .beam()
            .best_single_move(&setup_board(), FIRST)
            .expect("expected a move");
        // two fresh interleaves on column 3
        assert_eq!(greedy.mv, Move::new(Orientation::Up, 3));
        assert!((greedy.score - (84.0 - 4f32.powf(2.8))).abs() < 1e-3);
    }

    #[test]
    fn test_two_ply_finds_setup() {
        let board = setup_board();
        let search = LookaheadSearch::default();

        let plan = search
            .plan(&board, FIRST, Some(SECOND))
            .expect("expected a plan");
        assert_eq!(plan.mv, Move::new(Orientation::Up, 2));
        assert_eq!(plan.follow_up, Some(Move::new(Orientation::Up, 2)));

        let (after, first) = simulate_placement(&board, FIRST, &plan.mv).expect("fits");
        assert!(!first.is_chain());
        let follow_up = plan.follow_up.expect("follow-up searched");
        let (_, second) = simulate_placement(&after, SECOND, &follow_up).expect("fits");
        assert_eq!(second.chains, 2);
        assert_eq!(second.cleared, 9);

        // first ply: two interleaves on the board, one added, the 1-triple; height 4
        let first_score = 64.0 - 4f32.powf(2.8);
        let second_score = 100.0 * 8.0 + 20.0 * 9.0;
        assert!((plan.score - (first_score + second_score)).abs() < 1e-3);
    }

    #[test]
    fn test_other_candidates_reach_one_chain_at_most() {
        let board = setup_board();
        let search = LookaheadSearch::default();
        let candidates = search.beam().top_candidates(&board, FIRST);
        assert_eq!(candidates.len(), 4);

        let mut setups = 0;
        for candidate in &candidates {
            let best = search
                .beam()
                .best_single_move(&candidate.board, SECOND)
                .expect("expected a move");
            if candidate.mv == Move::new(Orientation::Up, 2) {
                assert_eq!(best.chain.chains, 2);
                setups += 1;
            } else {
                assert!(best.chain.chains <= 1, "{:?} chains {}", candidate.mv, best.chain.chains);
            }
        }
        assert_eq!(setups, 1);
    }

    #[test]
    fn test_no_next_pair_is_greedy() {
        let board = setup_board();
        let search = LookaheadSearch::default();
        let mv = search.think(&board, FIRST, None);
        assert_eq!(mv, Move::new(Orientation::Up, 3));
    }

    #[test]
    fn test_full_board_falls_back_to_center() {
        let rows: Vec<&str> = (0..14)
            .map(|i| if i % 2 == 0 { "121212" } else { "212121" })
            .collect();
        let board = Board::from_rows(6, 12, 2, &rows).expect("valid rows");
        let search = LookaheadSearch::default();

        assert!(search
            .plan(&board, ColorPair::new(1, 2), Some(ColorPair::new(3, 4)))
            .is_none());
        assert_eq!(
            search.think(&board, ColorPair::new(1, 2), Some(ColorPair::new(3, 4))),
            Move::new(Orientation::Up, 2)
        );
    }

    #[test]
    fn test_think_next_move_with_two_queued() {
        let session = setup_session(2);
        assert_eq!(session.queue().len(), 2);
        assert_eq!(session.current_pair(), Some(FIRST));
        assert_eq!(session.next_pair(), Some(SECOND));

        let mv = think_next_move(&session, &SearchConfig::default());
        assert_eq!(mv, Move::new(Orientation::Up, 2));
    }

    #[test]
    fn test_think_next_move_with_one_queued_is_greedy() {
        let session = setup_session(1);
        assert_eq!(session.current_pair(), Some(FIRST));
        assert_eq!(session.next_pair(), None);

        let mv = think_next_move(&session, &SearchConfig::default());
        assert_eq!(mv, Move::new(Orientation::Up, 3));
    }

    #[test]
    fn test_played_plan_fires_two_chain() {
        let mut session = setup_session(2);
        let config = SearchConfig::default();

        let first = session.play(think_next_move(&session, &config)).expect("turn");
        assert!(!first.chain.is_chain());
        let second = session.play(think_next_move(&session, &config)).expect("turn");
        assert_eq!(second.chain.chains, 2);
    }

    #[test]
    fn test_gtr_strategy_keeps_trigger_open() {
        let config = SearchConfig {
            strategy: tsumo_eval::EvalStrategy::GTR,
            ..SearchConfig::default()
        };
        let search = LookaheadSearch::from_config(&config);
        let board = Board::default();
        let mv = search.think(&board, ColorPair::new(1, 2), Some(ColorPair::new(3, 4)));
        let (after, _) = simulate_placement(&board, ColorPair::new(1, 2), &mv).expect("fits");
        // (0, 2) from the floor
        assert!(after.cell(0, after.rows() - 3).is_empty());
    }
}
