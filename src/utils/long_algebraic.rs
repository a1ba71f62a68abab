//! Position-aware coordinate notation: turn protocol tokens into validated
//! moves and play whole move lists.

use crate::chess_errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::move_validator::validate_move;
use crate::moves::move_intent::{MoveIntent, ValidatedMove};

/// Parse a token such as `e7e8q` and validate it against `position`.
pub fn long_algebraic_to_move(token: &str, position: &Position) -> ChessResult<ValidatedMove> {
    let intent = MoveIntent::from_token(token, None)?;
    validate_move(position, intent)
}

pub fn move_to_long_algebraic(mv: &ValidatedMove) -> String {
    mv.intent().to_token()
}

/// Play a sequence of tokens from `position`. Stops at the first token that
/// does not parse or validate and reports it; the input position is never
/// altered.
pub fn apply_long_algebraic_moves<'a, I>(position: &Position, tokens: I) -> ChessResult<Position>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().try_fold(position.clone(), |current, token| {
        let mv = long_algebraic_to_move(token, &current)?;
        Ok(apply_move(&current, &mv).0)
    })
}

#[cfg(test)]
mod tests {
    use super::{apply_long_algebraic_moves, long_algebraic_to_move, move_to_long_algebraic};
    use crate::chess_errors::ChessError;
    use crate::game_state::position::Position;
    use crate::utils::fen_generator::generate_fen;

    #[test]
    fn round_trip_simple_move() {
        let position = Position::initial();
        let mv = long_algebraic_to_move("g1f3", &position).expect("legal move");
        assert_eq!(move_to_long_algebraic(&mv), "g1f3");
    }

    #[test]
    fn plays_a_move_list() {
        let position = apply_long_algebraic_moves(
            &Position::initial(),
            ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"],
        )
        .expect("legal line");
        assert_eq!(
            generate_fen(&position),
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
        assert_eq!(position.history().len(), 7);
    }

    #[test]
    fn illegal_token_stops_the_line() {
        let err = apply_long_algebraic_moves(&Position::initial(), ["e2e4", "e2e4"])
            .expect_err("second move has no piece");
        assert!(matches!(err, ChessError::EmptySourceSquare(_)));
    }
}
