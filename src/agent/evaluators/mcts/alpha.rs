use super::neural::{move_to_index, NeuralEvaluator};
use crate::prelude::*;

/// The neural-guided MCTS variant from §4.G.
///
/// This does not implement the crate's [`Evaluator`] trait: `Evaluator::new` only takes a
/// [`UhpOptions`], which has nowhere to name a network's weight file or encode an arbitrary
/// `N: NeuralEvaluator`. Construct one directly with [`AlphaMctsEvaluator::new`] instead; it
/// exposes the same `search` shape as `Evaluator::best_move` for callers that have a network
/// in hand.
pub struct AlphaMctsEvaluator<N>
where
    N: NeuralEvaluator,
{
    network:     N,
    simulations: u64,
}

struct Node
{
    children: Vec<usize>,
    mv:       Option<Move>,
    to_move:  Player,
    untried:  Vec<(Move, f32)>,
    terminal: Option<GameState>,
    visits:   u32,
    value:    f64,
}

impl<N> AlphaMctsEvaluator<N>
where
    N: NeuralEvaluator,
{
    /// The exploration constant used in the same UCB formula as the classic variant, since the
    /// value head already supplies what a prior-weighted PUCT term would otherwise add.
    const EXPLORATION: f64 = 1.41;

    pub fn new(network: N, simulations: u64) -> Self
    {
        AlphaMctsEvaluator { network, simulations }
    }

    /// Runs `simulations` guided playouts from `board` and returns the move judged best.
    ///
    /// Unlike the classic variant, an expansion never falls back to a uniform random rollout:
    /// the network's value head supplies the leaf estimate directly, so every simulation is a
    /// single selection + one inference, not a full random playout to a terminal state.
    pub fn search(&self, board: &Board) -> Move
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

        let mut arena = vec![self.make_node(None, board.to_move(), board)];
        let mut scratch = board.clone();

        for _ in 0..self.simulations.max(1)
        {
            self.simulate(&mut arena, &mut scratch);
        }

        // Per §4.G, "the first child of the winner is reported". `Iterator::max_by` keeps the
        // *last* maximal element on a tie (routine early in search, while several children
        // still share `f64::INFINITY`), so the root is picked with a manual fold that only
        // replaces on a strictly greater score instead.
        let parent_visits = arena[0].visits.max(1);
        let mut best: Option<(usize, f64)> = None;

        for &idx in &arena[0].children
        {
            let score = Self::ucb(&arena, idx, parent_visits);
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

        best.and_then(|(idx, _)| arena[idx].mv).unwrap_or(Move::Pass)
    }

    /// Builds a node for the position `board` is currently sitting at, reached by `mv` (`None`
    /// for the root). Only moves with a strictly positive policy entry become `untried`
    /// children, per §4.G's "neural-guided" rule.
    fn make_node(&self, mv: Option<Move>, to_move: Player, board: &Board) -> Node
    {
        let state = board.state();
        if matches!(state, GameState::WhiteWins | GameState::BlackWins | GameState::Draw)
        {
            return Node {
                children: Vec::new(),
                mv,
                to_move,
                untried: Vec::new(),
                terminal: Some(state),
                visits: 0,
                value: 0.0,
            };
        }

        let (policy, _) = self.network.forward(board);
        let mut legal = board.generate_moves(false);
        if legal.is_empty()
        {
            legal.push(Move::Pass);
        }

        let priors: Vec<(Move, f32)> = legal
            .iter()
            .map(|&candidate| {
                let prior = move_to_index(candidate, board)
                    .map(|(c, q, r)| policy[c][q][r])
                    .unwrap_or(0.0);
                (candidate, prior)
            })
            .collect();

        // Only expand moves the network actually favours, but if it favours none of them
        // (an untrained or degenerate network), fall back to the full legal set so the tree
        // can still make progress instead of stranding this node with no children.
        let untried = if priors.iter().any(|(_, prior)| *prior > 0.0)
        {
            priors.into_iter().filter(|(_, prior)| *prior > 0.0).collect()
        }
        else
        {
            priors
        };

        Node {
            children: Vec::new(),
            mv,
            to_move,
            untried,
            terminal: None,
            visits: 0,
            value: 0.0,
        }
    }

    fn simulate(&self, arena: &mut Vec<Node>, scratch: &mut Board)
    {
        let mut path = vec![0usize];
        let mut played = 0u32;

        loop
        {
            let current = *path.last().unwrap();
            if arena[current].terminal.is_some() || !arena[current].untried.is_empty()
            {
                break;
            }

            let parent_visits = arena[current].visits.max(1);
            let child = arena[current]
                .children
                .iter()
                .copied()
                .max_by(|&a, &b| Self::ucb(arena, a, parent_visits).total_cmp(&Self::ucb(arena, b, parent_visits)))
                .unwrap();

            let mv = arena[child].mv.unwrap();
            scratch.play_unchecked(&mv);
            played += 1;
            path.push(child);
        }

        let leaf = *path.last().unwrap();
        let value = match arena[leaf].terminal
        {
            | Some(state) => Self::terminal_value(state, arena[leaf].to_move),
            | None =>
            {
                let (mv, _prior) = arena[leaf].untried.pop().unwrap();
                scratch.play_unchecked(&mv);
                played += 1;

                let to_move = scratch.to_move();
                let child = self.make_node(Some(mv), to_move, scratch);
                let (_, value) = self.network.forward(scratch);

                let idx = arena.len();
                arena.push(child);
                arena[leaf].children.push(idx);
                path.push(idx);

                value as f64
            }
        };

        // Values alternate sign by ply: a position good for the side to move there is bad for
        // whoever moved into it.
        let mut v = value;
        for &idx in path.iter().rev()
        {
            let node = &mut arena[idx];
            node.visits += 1;
            node.value += v;
            v = -v;
        }

        for _ in 0..played
        {
            let _ = scratch.undo_one();
        }
    }

    fn terminal_value(state: GameState, to_move: Player) -> f64
    {
        match state
        {
            | GameState::WhiteWins if to_move == Player::White => 1.0,
            | GameState::BlackWins if to_move == Player::Black => 1.0,
            | GameState::WhiteWins | GameState::BlackWins => -1.0,
            | _ => 0.0,
        }
    }

    fn ucb(arena: &[Node], idx: usize, parent_visits: u32) -> f64
    {
        let node = &arena[idx];
        if node.visits == 0
        {
            return f64::INFINITY;
        }

        let mean_value = node.value / node.visits as f64;
        let exploitation = 1.0 - (mean_value + 1.0) / 2.0;
        let exploration = Self::EXPLORATION * ((parent_visits as f64).ln() / node.visits as f64).sqrt();
        exploitation + exploration
    }
}
