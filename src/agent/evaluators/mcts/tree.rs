use rand::seq::SliceRandom;

use crate::prelude::*;

/// One node of the search tree, stored by index in `Tree::arena` rather than behind a pointer
/// so the whole tree can be dropped in one deallocation and nodes can reference their parent
/// without a `Rc`/`RefCell` cycle.
struct Node
{
    _parent:  Option<usize>,
    children: Vec<usize>,
    mv:       Option<Move>,
    to_move:  Player,
    untried:  Vec<Move>,
    terminal: Option<GameState>,
    visits:   u32,
    wins:     f64,
}

/// A UCT search tree over one `Board`.
///
/// Simulation plays moves on a single shared board rather than cloning a fresh `Board` per
/// node: `iterate` walks down by calling `play_unchecked`, then undoes every move it played
/// before returning, so the board is never actually copied during a search.
pub(super) struct Tree
{
    arena:       Vec<Node>,
    scratch:     Board,
    exploration: f64,
}

impl Tree
{
    pub fn new(board: Board, exploration: f64) -> Tree
    {
        let to_move = board.to_move();
        let untried = Self::legal_moves(&board);
        let root = Node {
            _parent: None,
            children: Vec::new(),
            mv: None,
            to_move,
            untried,
            terminal: None,
            visits: 0,
            wins: 0.0,
        };

        Tree { arena: vec![root], scratch: board, exploration }
    }

    /// Runs one selection / expansion / rollout / backpropagation cycle.
    pub fn iterate(&mut self, rollout_cap: u32)
    {
        let mut path = vec![0usize];
        let mut played = 0u32;

        // Selection: descend while the node is fully expanded and not itself a terminal state.
        loop
        {
            let current = *path.last().unwrap();
            if self.arena[current].terminal.is_some() || !self.arena[current].untried.is_empty()
            {
                break;
            }

            let child = self.select_child(current);
            let mv = self.arena[child].mv.unwrap();
            self.scratch.play_unchecked(&mv);
            played += 1;
            path.push(child);
        }

        let leaf = *path.last().unwrap();
        let winner = match self.arena[leaf].terminal
        {
            | Some(state) => Self::winner_of(state),
            | None =>
            {
                let expanded = self.expand(leaf);
                played += 1;
                path.push(expanded);

                let (winner, rollout_plies) = self.rollout(rollout_cap);
                played += rollout_plies;
                winner
            }
        };

        for &idx in path.iter()
        {
            let node = &mut self.arena[idx];
            node.visits += 1;
            match winner
            {
                | Some(player) if player == node.to_move => node.wins += 1.0,
                | None => node.wins += 0.5,
                | _ => {}
            }
        }

        for _ in 0..played
        {
            let _ = self.scratch.undo_one();
        }
    }

    /// The move at the root judged best by a pure-exploitation (`c = 0`) pass over the UCB
    /// formula, per §4.G; falls back to `Pass` if the root was never expanded.
    ///
    /// Per §4.G, "the first child of the winner is reported" — ties (routine early in search,
    /// when several children still share `f64::INFINITY`) must resolve to the first-seen
    /// maximum, not the last, so this folds manually instead of using `Iterator::max_by`, whose
    /// documented tie-break keeps the *last* maximal element.
    pub fn best_move(&self) -> Move
    {
        let parent_visits = self.arena[0].visits.max(1);
        let mut best: Option<(usize, f64)> = None;

        for &idx in &self.arena[0].children
        {
            let score = self.ucb(idx, parent_visits, 0.0);
            let replace = match best
            {
                | Some((_, best_score)) => score > best_score,
                | None => true,
            };
            if replace
            {
                best = Some((idx, score));
            }
        }

        best.and_then(|(idx, _)| self.arena[idx].mv).unwrap_or(Move::Pass)
    }

    /// Pops one untried move off `leaf`, plays it on the scratch board, and records the
    /// resulting position as a new child node.
    fn expand(&mut self, leaf: usize) -> usize
    {
        let mv = self.arena[leaf].untried.pop().unwrap();
        self.scratch.play_unchecked(&mv);

        let to_move = self.scratch.to_move();
        let state = self.scratch.state();
        let (terminal, untried) = if Self::is_terminal(state)
        {
            (Some(state), Vec::new())
        }
        else
        {
            (None, Self::legal_moves(&self.scratch))
        };

        let child = Node {
            _parent: Some(leaf),
            children: Vec::new(),
            mv: Some(mv),
            to_move,
            untried,
            terminal,
            visits: 0,
            wins: 0.0,
        };

        let idx = self.arena.len();
        self.arena.push(child);
        self.arena[leaf].children.push(idx);
        idx
    }

    fn is_terminal(state: GameState) -> bool
    {
        matches!(state, GameState::WhiteWins | GameState::BlackWins | GameState::Draw)
    }

    /// Collects every legal move in the position (or the lone `Pass`, when stunlocked).
    fn legal_moves(board: &Board) -> Vec<Move>
    {
        let moves = board.generate_moves(false);
        if moves.is_empty() { vec![Move::Pass] } else { moves }
    }

    /// Plays uniformly random moves from the current scratch position until the game ends or
    /// `cap` plies have elapsed, returning the winner (`None` for a draw or an uncapped cutoff)
    /// and how many moves were played, so the caller can undo exactly that many.
    fn rollout(&mut self, cap: u32) -> (Option<Player>, u32)
    {
        let mut rng = rand::thread_rng();
        let mut plies = 0u32;

        loop
        {
            let state = self.scratch.state();
            if Self::is_terminal(state)
            {
                return (Self::winner_of(state), plies);
            }
            if plies >= cap
            {
                return (None, plies);
            }

            let moves = Self::legal_moves(&self.scratch);
            let mv = *moves.choose(&mut rng).unwrap();
            self.scratch.play_unchecked(&mv);
            plies += 1;
        }
    }

    /// Picks the child maximizing the UCB formula from §4.G using this tree's exploration
    /// constant.
    fn select_child(&self, idx: usize) -> usize
    {
        let parent_visits = self.arena[idx].visits.max(1);
        self.arena[idx]
            .children
            .iter()
            .copied()
            .max_by(|&a, &b| self.ucb(a, parent_visits, self.exploration).total_cmp(&self.ucb(b, parent_visits, self.exploration)))
            .unwrap()
    }

    /// `UCB = (1 - (wins/visits + 1)/2) + c*sqrt(ln(parent.visits) / visits)`.
    ///
    /// The win-rate term is inverted because a node's `wins` are credited to whichever player
    /// is to move *there*, i.e. the opponent of whoever chose to play into it; a parent wants
    /// to pick the child that's worst for that opponent.
    fn ucb(&self, idx: usize, parent_visits: u32, exploration: f64) -> f64
    {
        let node = &self.arena[idx];
        if node.visits == 0
        {
            return f64::INFINITY;
        }

        let win_rate = node.wins / node.visits as f64;
        let exploitation = 1.0 - (win_rate + 1.0) / 2.0;
        let exploration_term = exploration * ((parent_visits as f64).ln() / node.visits as f64).sqrt();
        exploitation + exploration_term
    }

    fn winner_of(state: GameState) -> Option<Player>
    {
        match state
        {
            | GameState::WhiteWins => Some(Player::White),
            | GameState::BlackWins => Some(Player::Black),
            | _ => None,
        }
    }
}
