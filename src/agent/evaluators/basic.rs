use crate::prelude::*;

#[derive(Clone, Debug, Default)]
/// An evaluator with absolutely no policy.
///
/// This evaluator is only useful for lazy move generation, and should **not** be used for anything else!
pub struct BasicEvaluator;

impl Evaluator for BasicEvaluator
{
    type Generator<'b> = BasicMoveGenerator<'b>;

    fn best_move(&self, _board: &Board, _args: SearchArgs) -> Move
    {
        // This one is *really** not implemented. Don't use it!
        let _ = Error::not_implemented();
        Move::Pass
    }

    fn generate_moves<'b>(&'b self, board: &'b Board) -> Self::Generator<'b>
    {
        BasicMoveGenerator::new(board)
    }

    fn new(_options: UhpOptions) -> Self
    {
        BasicEvaluator
    }
}

/// An iterator over every legal move in a position, with no preferred ordering.
///
/// Moves are generated eagerly up front (the rules engine has no cheaper way to produce
/// them one at a time), but consumers should still treat this as a forward-only stream.
pub struct BasicMoveGenerator<'a>
{
    _board: &'a Board,
    moves:  std::vec::IntoIter<Move>,
}

impl<'a> Iterator for BasicMoveGenerator<'a>
{
    type Item = Move;
    fn next(&mut self) -> Option<Move>
    {
        self.moves.next()
    }
}

impl<'a> BasicMoveGenerator<'a>
{
    fn new(board: &'a Board) -> Self
    {
        let mut moves = board.generate_moves(false);
        if moves.is_empty()
        {
            moves.push(Move::Pass);
        }

        BasicMoveGenerator { _board: board, moves: moves.into_iter() }
    }
}
