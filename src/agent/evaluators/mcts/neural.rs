use crate::prelude::*;

/// One side of the board window the policy tensor covers.
pub const WINDOW: usize = 14;

/// The number of bug-identity planes in the policy tensor.
pub const PLANES: usize = 7;

/// The policy head's output shape, channel-major.
pub type PolicyTensor = [[[f32; WINDOW]; WINDOW]; PLANES];

/// The external policy/value network the neural-guided variant of MCTS defers to.
///
/// Per §4.G this network (a ResNet with policy and value heads, fixed input 7×14×14) is not
/// specified by the rules themselves — only its call signature is. Any concrete model, loaded
/// however its weights dictate, plugs in by implementing this trait.
pub trait NeuralEvaluator
{
    /// Runs inference on `board`, returning a policy tensor (indexed by [`move_to_index`]) and
    /// a value estimate in `[-1, 1]` from the perspective of the side to move.
    fn forward(&self, board: &Board) -> (PolicyTensor, f32);
}

/// Projects a move onto a `(channel, q, r)` index into a [`PolicyTensor`], using `board` in
/// the state the move would be played *from* — the reference piece a placement or movement is
/// made relative to is always already on the board, so no resolution of the move's exact
/// destination hex is needed.
///
/// The channel is the moved bug's kind, folding `Spider` onto `Queen`'s plane since the tensor
/// has only 7 planes for Hive's 8 bug kinds; `q`/`r` are the reference hex's axial coordinates,
/// shifted so the board's usual playing window lands inside `0..WINDOW`. This mapping is this
/// crate's own choice, not a requirement of the wire protocol — a network trained against a
/// different convention needs a different projection.
pub fn move_to_index(mv: Move, board: &Board) -> Option<(usize, usize, usize)>
{
    let (kind, hex) = match mv
    {
        | Move::Pass => return None,
        | Move::Place(piece, Some(nextto)) => (piece.kind, board.location(&nextto.piece)?),
        | Move::Place(piece, None) => (piece.kind, hex::consts::ROOT),
        | Move::Move(piece, nextto) => (piece.kind, board.location(&nextto.piece)?),
    };

    let axial = Axial::from(hex);

    let channel = (kind as usize).min(PLANES - 1);
    let q = (axial.q as i32 + WINDOW as i32 / 2).clamp(0, WINDOW as i32 - 1) as usize;
    let r = (axial.r as i32 + WINDOW as i32 / 2).clamp(0, WINDOW as i32 - 1) as usize;

    Some((channel, q, r))
}
