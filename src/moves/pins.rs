//! Checkers, pins and check-evasion masks.
//!
//! Computed once per legal-move-generation call instead of re-derived by
//! make/unmake on every candidate move: the move generator asks "does this
//! destination square resolve the check and respect any pin" as a pair of
//! bitboard tests instead of playing the move out and asking `in_check`.

use crate::bitboard::{BitboardExt, between};
use crate::board::{Board, Color, Piece};
use crate::moves::king::KING_ATTACKS;
use crate::moves::knight::KNIGHT_ATTACKS;
use crate::moves::magic::MagicTables;
use crate::moves::pawn::pawn_attacks;
use crate::square::Square;

pub const ALL_SQUARES: u64 = u64::MAX;

#[derive(Debug, Clone)]
pub struct CheckInfo {
    /// Enemy pieces currently attacking `side`'s king.
    pub checkers: u64,
    /// `side`'s own pieces that are pinned to their king.
    pub pinned: u64,
    /// Per-square allowed-destination mask for a pinned piece on that
    /// square (the full line through the king and the pinner). Only valid
    /// to read when the corresponding bit is set in `pinned`.
    pub pin_ray: [u64; 64],
    /// Squares a non-king move must land on to resolve check: the checker
    /// itself plus (for a single sliding checker) the squares between it
    /// and the king. `ALL_SQUARES` when not in check, `0` when in double
    /// check (only king moves are legal).
    pub check_mask: u64,
}

impl CheckInfo {
    #[inline]
    pub fn in_check(&self) -> bool {
        self.checkers != 0
    }

    #[inline]
    pub fn double_check(&self) -> bool {
        self.checkers.popcount() >= 2
    }
}

fn attackers_to_square(board: &Board, sq: Square, attacker: Color, tables: &MagicTables) -> u64 {
    let idx = sq.index() as usize;
    let occ = board.occupied();

    let mut attackers = 0u64;
    attackers |= pawn_attacks(sq.index(), attacker.opposite()) & board.pieces(Piece::Pawn, attacker);
    attackers |= KNIGHT_ATTACKS[idx] & board.pieces(Piece::Knight, attacker);
    attackers |= KING_ATTACKS[idx] & board.pieces(Piece::King, attacker);

    let rook_queen = board.pieces(Piece::Rook, attacker) | board.pieces(Piece::Queen, attacker);
    let bishop_queen = board.pieces(Piece::Bishop, attacker) | board.pieces(Piece::Queen, attacker);
    attackers |= tables.rook.get_attacks(idx, occ) & rook_queen;
    attackers |= tables.bishop.get_attacks(idx, occ) & bishop_queen;

    attackers
}

/// Computes checkers, pins and the evasion mask for the side to move.
pub fn compute_check_info(board: &Board, side: Color, tables: &MagicTables) -> CheckInfo {
    let king_sq = board.king_square(side);
    let enemy = side.opposite();
    let checkers = attackers_to_square(board, king_sq, enemy, tables);

    let check_mask = match checkers.popcount() {
        0 => ALL_SQUARES,
        1 => {
            let checker_sq = Square::from_index(checkers.lsb());
            checkers | between(king_sq, checker_sq)
        }
        _ => 0,
    };

    let mut pinned = 0u64;
    let mut pin_ray = [0u64; 64];

    let own = board.occupancy(side);
    let occ_without_own = board.occupied() & !own;

    let rook_queen = board.pieces(Piece::Rook, enemy) | board.pieces(Piece::Queen, enemy);
    let bishop_queen = board.pieces(Piece::Bishop, enemy) | board.pieces(Piece::Queen, enemy);

    let king_idx = king_sq.index() as usize;
    let xray_rook = tables.rook.get_attacks(king_idx, occ_without_own) & rook_queen;
    let xray_bishop = tables.bishop.get_attacks(king_idx, occ_without_own) & bishop_queen;

    for pinner_sq in (xray_rook | xray_bishop).squares() {
        let line = between(king_sq, pinner_sq);
        let blockers = line & own;
        if blockers.popcount() == 1 {
            let blocker_sq = blockers.lsb();
            pinned |= blockers;
            pin_ray[blocker_sq as usize] = line | pinner_sq.bit() | king_sq.bit();
        }
    }

    CheckInfo {
        checkers,
        pinned,
        pin_ray,
        check_mask,
    }
}

/// Whether a non-king move from `from` to `to` both resolves any existing
/// check and respects the moving piece's pin, without playing the move out.
#[inline]
pub fn resolves_check_and_pin(info: &CheckInfo, from: Square, to: Square) -> bool {
    if info.check_mask & to.bit() == 0 {
        return false;
    }
    if info.pinned & from.bit() != 0 {
        return info.pin_ray[from.index() as usize] & to.bit() != 0;
    }
    true
}
