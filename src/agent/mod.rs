use crate::prelude::*;

pub mod evaluators;
pub mod scalars;
pub mod searchargs;
pub mod table;
pub mod variation;

pub use scalars::{scores, Depth, MINIMUM_LOSS, MINIMUM_WIN};
pub use searchargs::SearchArgs;
pub use table::*;
pub use variation::Variation;

/// A trait representing a collection of policies by which we can evaluate a board position and find the best continuations.
pub trait Evaluator
{
    type Generator<'b>: MoveGenerator
    where
        Self: 'b;

    /// Returns the best move in the current position.
    fn best_move(&self, board: &Board, args: SearchArgs) -> Move;

    /// Generates all valid moves on the given board.
    /// For performance reasons, this should be as lazy as possible!
    fn generate_moves<'b>(&'b self, board: &'b Board) -> Self::Generator<'b>;

    /// Returns a new evaluator. Evaluators should be instanced so that they can support internal state.
    fn new(options: UhpOptions) -> Self;
}

/// A trait alias that represents a forward iterator on a collection of moves.
pub trait MoveGenerator = Iterator<Item = Move>;
