use std::time::Instant;

use crate::prelude::*;

mod alpha;
pub mod neural;
mod tree;

pub use alpha::AlphaMctsEvaluator;
pub use neural::NeuralEvaluator;

use tree::Tree;

/// Classic UCT search over board states (§4.G), offered alongside `StrongestEvaluator` as an
/// alternative search family. `main` still wires up `StrongestEvaluator` as the default; this
/// one exists so a caller can ask for pure Monte-Carlo play instead of alpha-beta.
pub struct MctsEvaluator
{
    exploration: f64,
    rollout_cap: u32,
    simulations_per_depth: u64,
}

impl MctsEvaluator
{
    /// The standard UCT exploration constant, c ≈ √2.
    const EXPLORATION: f64 = 1.41;

    /// A random playout longer than this is cut off and scored as a draw, so one rollout can't
    /// wander through hundreds of plies of beetles shuffling on top of the hive.
    const ROLLOUT_CAP: u32 = 200;

    /// How many simulations one unit of `SearchArgs::Depth` buys, since MCTS has no notion of
    /// a ply-limited horizon the way alpha-beta does.
    const SIMULATIONS_PER_DEPTH: u64 = 500;
}

impl Evaluator for MctsEvaluator
{
    type Generator<'b> = McstMoveGenerator<'b>;

    /// Runs UCT simulations under the given time/depth budget and returns the root move with
    /// the best pure-exploitation score, per §4.G.
    fn best_move(&self, board: &Board, args: SearchArgs) -> Move
    {
        if matches!(board.state(), GameState::WhiteWins | GameState::BlackWins | GameState::Draw)
        {
            return Move::Pass;
        }

        let moves = board.generate_moves(false);
        if moves.is_empty()
        {
            return Move::Pass;
        }
        if moves.len() == 1
        {
            return moves[0];
        }

        let mut tree = Tree::new(board.clone(), self.exploration);

        match args
        {
            | SearchArgs::Time(duration) =>
            {
                let deadline = Instant::now() + duration;
                while Instant::now() < deadline
                {
                    tree.iterate(self.rollout_cap);
                }
            }
            | SearchArgs::Depth(depth) =>
            {
                let budget = depth.floor().max(1) as u64 * self.simulations_per_depth;
                for _ in 0..budget
                {
                    tree.iterate(self.rollout_cap);
                }
            }
        }

        tree.best_move()
    }

    fn generate_moves<'b>(&'b self, board: &'b Board) -> Self::Generator<'b>
    {
        McstMoveGenerator::new(board)
    }

    fn new(_options: UhpOptions) -> Self
    {
        MctsEvaluator {
            exploration: Self::EXPLORATION,
            rollout_cap: Self::ROLLOUT_CAP,
            simulations_per_depth: Self::SIMULATIONS_PER_DEPTH,
        }
    }
}

/// An iterator over every legal move in a position, with no preferred ordering — mirrors
/// `BasicMoveGenerator`, since MCTS has no table-driven ordering to offer move generation
/// callers the way the alpha-beta evaluator does.
pub struct McstMoveGenerator<'a>
{
    _board: &'a Board,
    moves:  std::vec::IntoIter<Move>,
}

impl<'a> Iterator for McstMoveGenerator<'a>
{
    type Item = Move;
    fn next(&mut self) -> Option<Move>
    {
        self.moves.next()
    }
}

impl<'a> McstMoveGenerator<'a>
{
    fn new(board: &'a Board) -> Self
    {
        let mut moves = board.generate_moves(false);
        if moves.is_empty()
        {
            moves.push(Move::Pass);
        }

        McstMoveGenerator { _board: board, moves: moves.into_iter() }
    }
}
