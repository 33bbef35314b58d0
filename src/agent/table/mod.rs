use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use dashmap::DashMap;

use crate::prelude::*;

mod entry;
mod history;
mod killer;
mod token;

pub use entry::{TTAge, TTBound, TTEntry, TTEntryData};
pub use history::HistoryTable;
pub use killer::KillerTable;
pub use token::MoveToken;

#[derive(Debug)]
/// A lockfree, concurrent implementation of a transposition table.
pub struct TranspositionTable
{
    map: Arc<DashMap<u128, TTEntryData>>,
    age: AtomicU8,
    cap: usize,
}

/// The sort of reference we get into the dashmap, but we want to hold onto it as little as possible.
type TTRef<'a> = dashmap::mapref::one::Ref<'a, u128, TTEntryData>;

impl TranspositionTable
{
    /// The upper bound on the table's age.
    const EXTENT_AGE: u8 = 0x3F;

    ///
    pub const DEPTH_DECREMENT_THRESHOLD: Depth = Depth::new(4);

    /// Increments the age of the table.
    pub fn increment(&self)
    {
        let new = Self::EXTENT_AGE & (self.age.load(Ordering::Relaxed) + 1);
        self.age.store(new, Ordering::Relaxed);
    }

    /// Finds the entry associated with this board state, if one exists and its key matches.
    pub fn load(&self, key: ZobristHash) -> Option<TTEntry>
    {
        self.get(&key).map(|e| e.to_owned().into()).filter(|entry: &TTEntry| entry.key == key)
    }

    /// Probes the table for a node at `key`, using it either as an immediate cutoff or to
    /// narrow the `alpha`/`beta` window and recover a move-ordering candidate.
    ///
    /// Returns `Some(score)` when the stored entry alone resolves this node; otherwise updates
    /// `candidate`/`alpha`/`beta` in place and returns `None` so the caller continues searching.
    pub fn check(&self, key: ZobristHash, depth: Depth, candidate: &mut Option<Move>, alpha: &mut i32, beta: &mut i32) -> Option<i32>
    {
        let entry = self.load(key)?;
        *candidate = entry.mv.into();

        if entry.depth < depth
        {
            return None;
        }

        match entry.age.bound
        {
            | TTBound::Exact => return Some(entry.score),
            | TTBound::Lower => *alpha = (*alpha).max(entry.score),
            | TTBound::Upper => *beta = (*beta).min(entry.score),
            | TTBound::None => {}
        }

        if *alpha >= *beta
        {
            Some(entry.score)
        }
        else
        {
            None
        }
    }

    /// Creates a new transposition table with the given memory constraints.
    pub fn new(bytes: usize) -> TranspositionTable
    {
        // Get the number of entries that fit in our table.
        let cap = bytes / TTEntry::SIZE;
        log::debug!("Allocated a TranspositionTable with {} entries. ({} bytes)", cap, bytes);

        TranspositionTable {
            map: Arc::new(DashMap::with_capacity(cap)),
            age: AtomicU8::new(0),
            cap,
        }
    }

    /// Stores a new evaluation into the transposition table.
    pub fn store(&self, entry: &TTEntry)
    {
        let mut entry = *entry;
        let existing: Option<TTEntry> = self.get(&entry.key).map(|e| e.to_owned().into());

        match existing
        {
            | Some(prev) =>
            {
                entry.mv = if entry.mv.is_some() { entry.mv } else { prev.mv };
                entry.score = scores::normalize(entry.score);

                if entry.key != prev.key
                    || entry.age.bound == TTBound::Exact && prev.age.bound != TTBound::Exact
                    || self.should_overwrite(&prev, &entry)
                {
                    let data: TTEntryData = entry.into();
                    self.map.insert(entry.key, data);
                }
            }
            | None =>
            {
                let data: TTEntryData = entry.into();
                self.put(&entry.key, data);
            }
        };
    }

    /// Walks the principal variation out of the table starting from `board`'s current
    /// position, playing each stored best move on a scratch copy until the table runs dry,
    /// a position repeats, or we exceed the maximum line length.
    pub fn get_principal_variation(&self, board: &Board, variation: &mut Variation)
    {
        variation.moves.clear();

        let mut scratch = board.clone();
        let mut seen = std::collections::HashSet::new();

        while variation.moves.len() < scalars::MAXIMUM_PLY
        {
            let Some(entry) = self.load(scratch.zobrist())
            else
            {
                break;
            };

            let Some(mv) = entry.mv.into()
            else
            {
                break;
            };

            if scratch.check(&mv).is_err()
            {
                break;
            }

            if !seen.insert(scratch.zobrist())
            {
                break;
            }

            let _ = scratch.play(&mv);
            if variation.moves.try_push(mv).is_err()
            {
                break;
            }
        }
    }
}

/// Private mapping implementation for the table.
impl TranspositionTable
{
    /// Returns the key modulo the maximum number of entries, avoiding reallocation.
    fn capacity_hash(&self, key: &ZobristHash) -> u128
    {
        key % (self.cap as u128)
    }

    /// Gets an entry from the table, ensuring we don't overdo the capacity.
    fn get(&self, key: &ZobristHash) -> Option<TTRef<'_>>
    {
        let meta_key = self.capacity_hash(key);
        self.map.get(&meta_key)
    }

    /// Puts an entry into the table, ensuring we don't overdo the capacity.
    fn put(&self, key: &ZobristHash, data: TTEntryData)
    {
        let meta_key = self.capacity_hash(key);
        self.map.insert(meta_key, data);
    }

    /// Whether or not to overwrite an entry based on age priority.
    fn should_overwrite(&self, prev: &TTEntry, next: &TTEntry) -> bool
    {
        let insert_bonus: i32 = next.age.bound.into();
        let record_bonus: i32 = prev.age.bound.into();

        let aged: i32 = self.age.load(Ordering::Relaxed) as i32;
        let diff: i32 = (aged + 64 - prev.age.age as i32) & Self::EXTENT_AGE as i32;

        let insert_prio: Depth = next.depth + insert_bonus + (diff * diff) / 4;
        let record_prio: Depth = prev.depth + record_bonus;

        insert_prio * 3 >= record_prio * 2
    }
}

/// Because the LSP isn't giving me confidence that this is true!
unsafe impl std::marker::Sync for TranspositionTable {}

impl Clone for TranspositionTable
{
    /// Shares the underlying map (so entries persist across searches) while snapshotting the
    /// current age into a fresh atomic, since `AtomicU8` itself isn't `Clone`.
    fn clone(&self) -> Self
    {
        TranspositionTable {
            map: Arc::clone(&self.map),
            age: AtomicU8::new(self.age.load(Ordering::Relaxed)),
            cap: self.cap,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn entry(key: ZobristHash, depth: Depth, bound: TTBound) -> TTEntry
    {
        TTEntry {
            key,
            mv: MoveToken::from(Move::Pass),
            depth,
            score: 0,
            age: TTAge { age: 0, bound },
        }
    }

    #[test]
    fn store_and_load_round_trips()
    {
        let table = TranspositionTable::new(64 * TTEntry::SIZE);
        let e = entry(7, Depth::new(3), TTBound::Exact);
        table.store(&e);

        let loaded = table.load(7).unwrap();
        assert_eq!(loaded.key, 7);
        assert_eq!(loaded.depth, Depth::new(3));
        assert_eq!(loaded.age.bound, TTBound::Exact);
    }

    #[test]
    fn load_rejects_a_slot_stolen_by_a_colliding_key()
    {
        let table = TranspositionTable::new(1 * TTEntry::SIZE);
        table.store(&entry(1, Depth::new(2), TTBound::Exact));
        // Every key maps into the same single-entry table, so this overwrites the slot.
        table.store(&entry(2, Depth::new(2), TTBound::Exact));

        assert!(table.load(1).is_none());
        assert_eq!(table.load(2).unwrap().key, 2);
    }

    #[test]
    fn deeper_search_overwrites_shallower_at_the_same_age()
    {
        let table = TranspositionTable::new(1 * TTEntry::SIZE);
        table.store(&entry(1, Depth::new(2), TTBound::Exact));
        table.store(&entry(1, Depth::new(6), TTBound::Exact));

        assert_eq!(table.load(1).unwrap().depth, Depth::new(6));
    }

    #[test]
    fn an_exact_bound_replaces_a_non_exact_bound_at_equal_depth()
    {
        let table = TranspositionTable::new(1 * TTEntry::SIZE);
        table.store(&entry(1, Depth::new(4), TTBound::Upper));
        table.store(&entry(1, Depth::new(4), TTBound::Exact));

        assert_eq!(table.load(1).unwrap().age.bound, TTBound::Exact);
    }

    #[test]
    fn check_returns_the_score_on_an_exact_hit_at_sufficient_depth()
    {
        let table = TranspositionTable::new(64 * TTEntry::SIZE);
        let mut e = entry(9, Depth::new(5), TTBound::Exact);
        e.score = 42;
        table.store(&e);

        let mut candidate = None;
        let mut alpha = -1000;
        let mut beta = 1000;
        let hit = table.check(9, Depth::new(3), &mut candidate, &mut alpha, &mut beta);
        assert_eq!(hit, Some(42));
    }

    #[test]
    fn check_refuses_to_resolve_a_shallower_entry()
    {
        let table = TranspositionTable::new(64 * TTEntry::SIZE);
        table.store(&entry(9, Depth::new(2), TTBound::Exact));

        let mut candidate = None;
        let mut alpha = -1000;
        let mut beta = 1000;
        let hit = table.check(9, Depth::new(5), &mut candidate, &mut alpha, &mut beta);
        assert_eq!(hit, None);
    }

    #[test]
    fn increment_wraps_at_the_age_extent()
    {
        let table = TranspositionTable::new(TTEntry::SIZE);
        for _ in 0..=(TranspositionTable::EXTENT_AGE as u32 + 1)
        {
            table.increment();
        }
        assert!(table.age.load(Ordering::Relaxed) <= TranspositionTable::EXTENT_AGE);
    }
}
