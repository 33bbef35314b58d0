use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

use mini_moka::sync::Cache;

use crate::prelude::*;

/// The cached static evaluation of a position, keyed by its Zobrist hash.
///
/// This is the "second aging table" alongside the transposition table: mini-moka evicts
/// entries on its own schedule, so we never have to manage an explicit age counter for it.
pub type ScoreCache = Cache<ZobristHash, i32>;

#[derive(Debug)]
/// State shared between every thread of a single `best_move` search.
///
/// Everything here is cheap to clone (an `Arc` or a handle into a concurrent map), so a fresh
/// `GlobalData` is built for each search while the underlying tables persist across searches.
pub struct GlobalData
{
    pub args:          SearchArgs,
    pub deadline:       Option<Instant>,
    pub max_branching: usize,
    pub max_depth:     AtomicU64,
    pub stopped:       AtomicBool,

    pub transpositions: TranspositionTable,
    pub cache:          ScoreCache,
    pub killers:        Arc<KillerTable>,
    pub history:        Arc<HistoryTable>,
}

impl GlobalData
{
    /// Builds the shared state for one `best_move` call.
    pub fn new(
        args: SearchArgs,
        max_branching: usize,
        transpositions: TranspositionTable,
        cache: ScoreCache,
        killers: Arc<KillerTable>,
        history: Arc<HistoryTable>,
    ) -> GlobalData
    {
        let deadline = match args
        {
            | SearchArgs::Time(duration) => Some(Instant::now() + duration),
            | SearchArgs::Depth(_) => None,
        };

        GlobalData {
            args,
            deadline,
            max_branching,
            max_depth: AtomicU64::new(0),
            stopped: AtomicBool::new(false),
            transpositions,
            cache,
            killers,
            history,
        }
    }

    /// Whether the search should unwind immediately: either told to by the root (time budget
    /// elapsed, or another thread found a decisive result) or because the wall clock ran out.
    pub fn should_stop(&self) -> bool
    {
        if self.stopped.load(Ordering::Relaxed)
        {
            return true;
        }

        if let Some(deadline) = self.deadline
        {
            if Instant::now() >= deadline
            {
                self.stopped.store(true, Ordering::Relaxed);
                return true;
            }
        }

        false
    }

    /// Tells every thread sharing this search to stop at the next node entry.
    pub fn stop(&self)
    {
        self.stopped.store(true, Ordering::Relaxed);
    }
}

#[derive(Clone, Debug)]
/// Per-thread scratch state for one `best_move` search.
///
/// Each thread owns a private `Board` clone; moves are played/unplayed on it directly rather
/// than deep-copying on every recursive call, since `Board` is already cheap to clone wholesale.
pub struct ThreadData
{
    pub id:         usize,
    pub board:      Board,
    pub variation:  Variation,
    pub target:     i32,
    pub best_move:  Move,
    pub leaf_count: u64,
    pub stem_count: u64,
}

impl ThreadData
{
    /// Creates a new thread's scratch state from the root position.
    pub fn new(board: &Board, id: usize) -> ThreadData
    {
        ThreadData {
            id,
            board: board.clone(),
            variation: Variation::default(),
            target: 0,
            best_move: Move::Pass,
            leaf_count: 0,
            stem_count: 0,
        }
    }

    /// Plays a move on this thread's board. The caller is responsible for restoring the prior
    /// board (by cloning it back in) once the recursive call returns.
    pub fn play(&mut self, mv: &Move)
    {
        self.board.play_unchecked(mv);
    }
}
