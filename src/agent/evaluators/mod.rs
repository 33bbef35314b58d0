mod basic;
mod mcts;
mod strongest;

pub use basic::{BasicEvaluator, BasicMoveGenerator};
pub use mcts::{neural, AlphaMctsEvaluator, McstMoveGenerator, MctsEvaluator, NeuralEvaluator};
pub use strongest::StrongestEvaluator;
