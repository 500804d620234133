//! Depth-limited negamax search with alpha-beta pruning.
//!
//! Scores are always from the perspective of the player to move:
//! [`SCORE_WIN`] for a forced win within the horizon, [`SCORE_LOSS`] for a
//! forced loss and [`SCORE_NEUTRAL`] for a draw or an undecided position at
//! the depth horizon.
//!
//! The search mutates the board in place. Every tentative move goes through
//! `Board::place`, whose guard empties the cell again when it goes out of
//! scope, so the board is exactly as it was when [`search`] returns.
//!
//! Moves are tried lowest index first and only a strictly better score
//! replaces the best move, so among equally good moves the lowest index is
//! chosen.

use tracing::{debug, instrument};

use crate::board::{Board, Mark, Outcome, Player};
use crate::constants::{SCORE_LOSS, SCORE_NEUTRAL, SCORE_WIN, WINDOW_FLOOR};
use crate::depth::DepthPolicy;

/// Result of a search from the root position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best cell for the player to move, `None` if the position is already
    /// decided or the depth budget was zero. Callers must not touch the
    /// board in that case.
    pub best_move: Option<usize>,
    /// Evaluation of the position for the player to move.
    pub score: i8,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Search `board` for `mover`, looking at most `depth` plies ahead.
pub fn search(board: &mut Board, mover: Player, depth: u32) -> SearchResult {
    let mut searcher = Searcher { nodes: 0 };
    let (best_move, score) = searcher.negamax(board, mover, WINDOW_FLOOR, WINDOW_FLOOR, depth);
    SearchResult {
        best_move,
        score,
        nodes: searcher.nodes,
    }
}

struct Searcher {
    nodes: u64,
}

impl Searcher {
    /// `alpha` is the best score found so far at this node. `beta` is the
    /// parent's best score so far, from the parent's point of view; children
    /// get the pair swapped.
    fn negamax(
        &mut self,
        board: &mut Board,
        mover: Player,
        mut alpha: i8,
        beta: i8,
        depth: u32,
    ) -> (Option<usize>, i8) {
        self.nodes += 1;

        match board.outcome() {
            Outcome::Won(winner) if winner == mover => return (None, SCORE_WIN),
            Outcome::Won(_) => return (None, SCORE_LOSS),
            Outcome::Draw => return (None, SCORE_NEUTRAL),
            Outcome::InProgress => {}
        }
        if depth == 0 {
            return (None, SCORE_NEUTRAL);
        }

        let opponent = mover.opponent();
        let mut best_move = None;
        let mut best_score = WINDOW_FLOOR;

        for index in 0..board.len() {
            if board.get(index) != Some(Mark::Empty) {
                continue;
            }

            let score = {
                let mut placed = board.place(index, mover);
                let (_, reply) = self.negamax(&mut placed, opponent, beta, alpha, depth - 1);
                -reply
            };

            if score > best_score {
                best_move = Some(index);
                best_score = score;
                alpha = score;
            }

            // The parent already has a move at least this good for it.
            if -alpha < beta {
                break;
            }
        }

        match best_move {
            Some(_) => (best_move, best_score),
            None => (None, SCORE_NEUTRAL),
        }
    }
}

/// Search front end that picks the depth budget from a [`DepthPolicy`].
#[derive(Clone, Debug, Default)]
pub struct Engine {
    policy: DepthPolicy,
}

impl Engine {
    pub fn new(policy: DepthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DepthPolicy {
        &self.policy
    }

    /// Best move for `mover`, searched as deep as the policy allows for the
    /// number of empty cells left.
    #[instrument(skip(self, board), fields(board = %board.encode()))]
    pub fn choose(&self, board: &mut Board, mover: Player) -> SearchResult {
        let depth = self.policy.max_depth(board.empty_count());
        let result = search(board, mover, depth);
        debug!(
            depth,
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            "search finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn decode(text: &str, n: usize) -> (Board, Player) {
        Board::decode(text, BoardSize::new(n).unwrap())
    }

    /// Unpruned negamax with the same move order and tie-break.
    fn plain_negamax(board: &mut Board, mover: Player, depth: u32) -> (Option<usize>, i8) {
        match board.outcome() {
            Outcome::Won(winner) if winner == mover => return (None, SCORE_WIN),
            Outcome::Won(_) => return (None, SCORE_LOSS),
            Outcome::Draw => return (None, SCORE_NEUTRAL),
            Outcome::InProgress => {}
        }
        if depth == 0 {
            return (None, SCORE_NEUTRAL);
        }
        let mut best = (None, WINDOW_FLOOR);
        for index in 0..board.len() {
            if board.get(index) != Some(Mark::Empty) {
                continue;
            }
            let mut placed = board.place(index, mover);
            let (_, reply) = plain_negamax(&mut placed, mover.opponent(), depth - 1);
            if -reply > best.1 {
                best = (Some(index), -reply);
            }
        }
        match best {
            (Some(_), _) => best,
            (None, _) => (None, SCORE_NEUTRAL),
        }
    }

    /// Alternating random moves from a blank board, stopping once decided.
    fn random_position(n: usize, plies: usize, rng: &mut fastrand::Rng) -> Board {
        let mut board = Board::new(BoardSize::new(n).unwrap());
        for _ in 0..plies {
            if board.outcome().is_over() {
                break;
            }
            let empties: Vec<usize> = board.empty_cells().collect();
            let index = empties[rng.usize(..empties.len())];
            let mover = board.next_player();
            board.play(index, mover).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let (mut board, mover) = decode("_________", 3);
        let result = search(&mut board, mover, 9);
        assert_eq!(result.score, SCORE_NEUTRAL);
        // Every opening draws, so the lowest index is kept.
        assert_eq!(result.best_move, Some(0));
        assert_eq!(board.encode(), "_________");
    }

    #[test]
    fn test_takes_immediate_win() {
        let (mut board, mover) = decode("XX_OO____", 3);
        assert_eq!(mover, Player::X);
        let result = search(&mut board, mover, 9);
        assert_eq!(result.best_move, Some(2));
        assert_eq!(result.score, SCORE_WIN);
    }

    #[test]
    fn test_blocks_opponent() {
        let (mut board, mover) = decode("OO_X_X__X", 3);
        assert_eq!(mover, Player::O);
        // O wins at 2 immediately.
        assert_eq!(search(&mut board, mover, 9).best_move, Some(2));

        let (mut board, mover) = decode("OO_X_____", 3);
        let (mut expected, _) = decode("OO_X_____", 3);
        assert_eq!(mover, Player::X);
        let result = search(&mut board, mover, 9);
        assert_eq!(result.best_move, Some(2));
        assert_eq!(board, expected);
        expected.play(2, Player::X).unwrap();
        assert_eq!(expected.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_terminal_positions_return_no_move() {
        let (mut board, _) = decode("XXXOO____", 3);
        let result = search(&mut board, Player::O, 9);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, SCORE_LOSS);
        assert_eq!(result.nodes, 1);

        let (mut board, mover) = decode("XOXOXOOXO", 3);
        let result = search(&mut board, mover, 9);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, SCORE_NEUTRAL);
    }

    #[test]
    fn test_zero_depth_is_neutral() {
        let (mut board, mover) = decode("XX_OO____", 3);
        let result = search(&mut board, mover, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, SCORE_NEUTRAL);
    }

    #[test]
    fn test_forced_loss_still_moves() {
        // X threatens both 6 and 8; O cannot stop both.
        let (mut board, mover) = decode("XOX_X__O_", 3);
        assert_eq!(mover, Player::O);
        let result = search(&mut board, mover, 9);
        assert_eq!(result.best_move, Some(3));
        assert_eq!(result.score, SCORE_LOSS);
    }

    #[test]
    fn test_matches_unpruned_search() {
        let mut rng = fastrand::Rng::with_seed(7);
        for (n, depth) in [(3, 9), (4, 4), (5, 3)] {
            for _ in 0..40 {
                let plies = rng.usize(..n * n);
                let mut board = random_position(n, plies, &mut rng);
                let mover = board.next_player();
                let result = search(&mut board, mover, depth);
                let expected = plain_negamax(&mut board, mover, depth);
                assert_eq!(
                    (result.best_move, result.score),
                    expected,
                    "pruned and unpruned differ on {}",
                    board.encode()
                );
            }
        }
    }

    #[test]
    fn test_engine_uses_policy_depth() {
        let (mut board, mover) = decode("XO__O_X__", 3);
        let engine = Engine::default();
        let via_engine = engine.choose(&mut board, mover);
        let direct = search(&mut board, mover, 6);
        assert_eq!(via_engine, direct);
    }
}
