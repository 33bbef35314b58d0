use std::sync::RwLock;

use crate::prelude::*;

/// Tracks up to three killer moves observed at each search depth.
///
/// A killer move is a non-winning move that produced a beta cutoff in a sibling node at the
/// same depth; trying it first against other siblings is cheap and often pays off again.
#[derive(Debug)]
pub struct KillerTable
{
    slots: Vec<RwLock<[Option<Move>; Self::WIDTH]>>,
}

impl Default for KillerTable
{
    fn default() -> Self
    {
        KillerTable::new()
    }
}

impl KillerTable
{
    /// The number of killer moves remembered per depth.
    pub const WIDTH: usize = 3;

    /// Creates a table with one empty slot-set per possible ply.
    pub fn new() -> KillerTable
    {
        let depths = scalars::MAXIMUM_PLY + 1;
        KillerTable {
            slots: (0..depths).map(|_| RwLock::new([None; Self::WIDTH])).collect(),
        }
    }

    /// Returns the killer moves recorded at this depth, most-recent first.
    pub fn get(&self, depth: Depth) -> [Option<Move>; Self::WIDTH]
    {
        let i = self.index(depth);
        *self.slots[i].read().unwrap()
    }

    /// Determines how many killer slots (0, 1, 2, or 3) this move fills at the given depth.
    pub fn rank(&self, depth: Depth, mv: Move) -> Option<usize>
    {
        let killers = self.get(depth);
        killers.iter().position(|k| *k == Some(mv))
    }

    /// Records a cutoff-producing move at this depth as the newest killer, evicting the oldest.
    pub fn record(&self, depth: Depth, mv: Move)
    {
        let i = self.index(depth);
        let mut slot = self.slots[i].write().unwrap();

        if slot.contains(&Some(mv))
        {
            return;
        }

        slot.rotate_right(1);
        slot[0] = Some(mv);
    }

    /// Clears every depth's killer list; done once per new search.
    pub fn reset(&self)
    {
        for slot in &self.slots
        {
            *slot.write().unwrap() = [None; Self::WIDTH];
        }
    }

    fn index(&self, depth: Depth) -> usize
    {
        (depth.clamp() as usize).min(self.slots.len() - 1)
    }
}
