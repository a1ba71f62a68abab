//! On-demand rook attacks by ray casting.
//!
//! Each ray walks one square at a time and stops on the first occupied square,
//! which is included whatever its color. Own-piece filtering happens in move
//! generation.

use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn rook_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    ROOK_DIRECTIONS
        .iter()
        .fold(SquareSet::EMPTY, |acc, &(df, dr)| {
            acc | trace_ray(square, df, dr, occupied)
        })
}

pub(crate) fn trace_ray(
    square: Square,
    file_step: i8,
    rank_step: i8,
    occupied: SquareSet,
) -> SquareSet {
    let mut attacks = SquareSet::EMPTY;
    let mut cursor = square.offset(file_step, rank_step);

    while let Some(target) = cursor {
        attacks.insert(target);
        if occupied.contains(target) {
            break;
        }
        cursor = target.offset(file_step, rank_step);
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;
    use crate::game_state::square::Square;
    use crate::game_state::square_set::SquareSet;

    #[test]
    fn open_board_rook_sees_fourteen_squares() {
        let d4 = Square::new(27).expect("d4");
        assert_eq!(rook_attacks(d4, SquareSet::EMPTY).count(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = Square::new(0).expect("a1");
        let blocker_on_a4 = SquareSet(1u64 << 24);
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert!(attacks.contains(Square::new(24).expect("a4")));
        assert!(!attacks.contains(Square::new(32).expect("a5")));
    }
}
