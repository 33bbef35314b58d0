use dashmap::DashMap;

use crate::prelude::*;

/// The history heuristic: a lock-free accumulator of how often a move has caused a
/// beta cutoff, weighted more heavily the deeper the cutoff occurred.
///
/// Unlike the transposition table this is never invalidated by position; the same
/// physical move (e.g. "slide wA1 onto the hex east of wQ") tends to be good across many
/// sibling nodes regardless of which exact position produced the cutoff.
#[derive(Debug, Default)]
pub struct HistoryTable
{
    scores: DashMap<MoveToken, i32>,
}

impl HistoryTable
{
    /// Rewards a move that produced a cutoff at the given depth.
    ///
    /// The bonus is `2^depth`, per the usual history heuristic weighting, so that cutoffs
    /// found deep in the tree (which are rarer and more informative) dominate shallow ones.
    pub fn bump(&self, mv: Move, depth: Depth)
    {
        let bonus = 1i32 << depth.clamp().clamp(0, 30);
        *self.scores.entry(mv.into()).or_insert(0) += bonus;
    }

    /// Returns the accumulated score for this move, or 0 if it has never caused a cutoff.
    pub fn score(&self, mv: Move) -> i32
    {
        self.scores.get(&MoveToken::from(mv)).map(|e| *e).unwrap_or(0)
    }

    /// Clears all accumulated scores; done once per new search so stale games don't bias fresh ones.
    pub fn reset(&self)
    {
        self.scores.clear();
    }
}
