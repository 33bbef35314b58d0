use std::{sync::Arc, thread};

use mini_moka::sync::Cache;

use crate::prelude::*;

mod data;
mod evaluate;
mod search;

use data::{GlobalData, ThreadData};
pub use data::ScoreCache;

/// Iterative-deepening negamax alpha-beta over a shared transposition table, with killer and
/// history move ordering and a cached static evaluator.
///
/// The tables below are the only state that outlives a single `best_move` call: a fresh
/// `GlobalData` wraps cheap handles onto them (an `Arc::clone`, or a manual `Clone` that shares
/// the underlying map) for the duration of one search, so concurrent search threads never touch
/// `&mut self`.
pub struct StrongestEvaluator
{
    ttable:        TranspositionTable,
    cache:         ScoreCache,
    killers:       Arc<KillerTable>,
    history:       Arc<HistoryTable>,
    max_branching: usize,
    num_threads:   usize,
}

impl Evaluator for StrongestEvaluator
{
    type Generator<'b> = PrioritizingMoveGenerator<'b>;

    /// Runs iterative deepening under the given time/depth budget and returns the best move
    /// found at the root, per §4.F. A single legal move (or none) is returned without search.
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

        // Age the table once per root search, per the "flush at the top of each root search"
        // rule in §4.F, then hand a snapshot of it (and the other shared tables) to this search.
        self.ttable.increment();
        self.killers.reset();
        self.history.reset();

        let global_data = Arc::new(GlobalData::new(
            args,
            self.max_branching,
            self.ttable.clone(),
            self.cache.clone(),
            self.killers.clone(),
            self.history.clone(),
        ));

        let num_threads = self.num_threads.max(1);
        let handles: Vec<_> = (0..num_threads)
            .map(|id| {
                let global_data = global_data.clone();
                let mut thread_data = ThreadData::new(board, id);
                thread::spawn(move || {
                    Self::iterative_search(&global_data, &mut thread_data);
                    thread_data
                })
            })
            .collect();

        let mut best: Option<ThreadData> = None;
        for handle in handles
        {
            let Ok(thread_data) = handle.join()
            else
            {
                log::warn!("a search thread panicked; discarding its result");
                continue;
            };

            best = match &best
            {
                | Some(current) if current.target >= thread_data.target => best,
                | _ => Some(thread_data),
            };
        }

        // Every thread already saw `global_data.should_stop()` go true on its own deadline; this
        // just makes sure a thread still mid-iteration when another found a mate unwinds too.
        global_data.stop();

        best.map(|t| t.best_move).unwrap_or(Move::Pass)
    }

    fn generate_moves<'b>(&'b self, board: &'b Board) -> Self::Generator<'b>
    {
        PrioritizingMoveGenerator::new(board, false)
    }

    fn new(options: UhpOptions) -> Self
    {
        let table_bytes = (options.table_memory * 1e9) as usize;
        let cache_entries = ((options.cache_memory * 1e9) as u64 / 32).max(1024);

        StrongestEvaluator {
            ttable:        TranspositionTable::new(table_bytes),
            cache:         Cache::builder().max_capacity(cache_entries).build(),
            killers:       Arc::new(KillerTable::new()),
            history:       Arc::new(HistoryTable::default()),
            max_branching: options.max_branching_factor,
            num_threads:   options.num_threads,
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// A move paired with its score from the previous iteration's root search, so the next
/// iteration can try the best-looking moves first.
pub(super) struct ScoredMove
{
    pub mv:    Move,
    pub score: i32,
}

/// A move generator that yields every legal move in the position (or the lone `Pass` when
/// none exist), in no particular order; callers needing ordering (the search itself) collect
/// and sort separately using the killer/history tables.
///
/// `root` mirrors `Board::generate_moves`'s `standard_position` flag: the search root collapses
/// the six symmetric opening placements on turn 1 into the single canonical one, while internal
/// nodes always expand the full legal set a real opponent could have played.
pub struct PrioritizingMoveGenerator<'a>
{
    _board: &'a Board,
    moves:  std::vec::IntoIter<Move>,
}

impl<'a> Iterator for PrioritizingMoveGenerator<'a>
{
    type Item = Move;
    fn next(&mut self) -> Option<Self::Item>
    {
        self.moves.next()
    }
}

impl<'a> PrioritizingMoveGenerator<'a>
{
    pub fn new(board: &'a Board, root: bool) -> Self
    {
        let mut moves = board.generate_moves(root);
        if moves.is_empty()
        {
            moves.push(Move::Pass);
        }

        PrioritizingMoveGenerator { _board: board, moves: moves.into_iter() }
    }
}
