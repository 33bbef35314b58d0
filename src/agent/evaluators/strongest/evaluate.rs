use super::*;

const K_QUEEN: i32 = 10;
const K_MATERIAL: i32 = 2;

impl StrongestEvaluator
{
    /// Returns a score for the board from the perspective of the side to move.
    ///
    /// Terminal positions return the (ply-adjusted) win/loss bound; a drawn or not-yet-started
    /// game is neutral. Otherwise the feature-minimal formula below is used, cached per Zobrist
    /// hash since the same position is reached repeatedly by transposition.
    pub(super) fn evaluate_board(global_data: &GlobalData, board: &Board) -> i32
    {
        match board.state()
        {
            | GameState::NotStarted | GameState::Draw => 0,
            | GameState::WhiteWins => Self::signed_win(board, Player::White),
            | GameState::BlackWins => Self::signed_win(board, Player::Black),
            | _ =>
            {
                let key = board.zobrist();
                if let Some(score) = global_data.cache.get(&key)
                {
                    return score;
                }

                let score = Self::evaluate_features(board);
                global_data.cache.insert(key, score);
                score
            }
        }
    }

    /// Queen safety plus a material term counted over *unpinned* pieces only, since a pinned
    /// bug cannot yet join an attack on either queen.
    fn evaluate_features(board: &Board) -> i32
    {
        let to_move = board.to_move();
        let opp = to_move.flip();

        let my_queen_neighbors = Self::queen_neighbors(board, to_move);
        let opp_queen_neighbors = Self::queen_neighbors(board, opp);

        let my_material = Self::unpinned_in_play(board, to_move);
        let opp_material = Self::unpinned_in_play(board, opp);

        let score = K_QUEEN * (opp_queen_neighbors - my_queen_neighbors) + K_MATERIAL * (my_material - opp_material);
        score.clamp(MINIMUM_LOSS + 1, MINIMUM_WIN - 1)
    }

    /// Counts the occupied neighbours of `player`'s queen (0 if it hasn't been placed yet).
    fn queen_neighbors(board: &Board, player: Player) -> i32
    {
        match board.queen(player)
        {
            | Some(hex) => board.neighbours(hex).len() as i32,
            | None => 0,
        }
    }

    /// The number of `player`'s bugs in play that are not pinned by the one-hive rule.
    fn unpinned_in_play(board: &Board, player: Player) -> i32
    {
        let pouch = board.pouch();
        let placed: i32 = pouch
            .extents()
            .iter()
            .zip(pouch.hand(player).iter())
            .map(|(total, remaining)| (total - remaining) as i32)
            .sum();

        let pinned = board.pinned_pieces(player).len() as i32;
        placed - pinned
    }

    /// A terminal score, from the perspective of the side to move.
    fn signed_win(board: &Board, winner: Player) -> i32
    {
        if board.to_move() == winner { MINIMUM_WIN } else { MINIMUM_LOSS }
    }
}
