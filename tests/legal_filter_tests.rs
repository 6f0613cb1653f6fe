use std::str::FromStr;

use vantage::board::Board;
use vantage::moves::execute::{generate_evasions, generate_legal, generate_quiet_checks};
use vantage::moves::magic::MagicTables;
use vantage::moves::magic::loader::load_magic_tables;
use vantage::moves::square_control::in_check;
use vantage::moves::types::Move;
use vantage::square::Square;

fn tables() -> MagicTables {
    load_magic_tables()
}

fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    let f = Square::from_str(from).unwrap();
    let t = Square::from_str(to).unwrap();
    moves.iter().any(|m| m.from == f && m.to == t)
}

#[test]
fn self_check_is_filtered_out() {
    // White: Ke1, Re2. Black: Re8. Moving Re2->f2 exposes e-file → illegal.
    let fen = "4r3/8/8/8/8/8/4R3/4K3 w - - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &t, &mut legal, &mut scratch);

    assert!(
        !has_move(&legal, "e2", "f2"),
        "Move e2f2 should be filtered (self-check)."
    );
    assert!(
        has_move(&legal, "e2", "e3"),
        "Blocking move e2e3 should remain legal."
    );
}

#[test]
fn checking_moves_are_kept() {
    // White: Re1, Kh1. Black: Ke8, Ne7. Re1xE7+ should be legal.
    let fen = "4k3/4n3/8/8/8/8/8/4R2K w - - 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let t = tables();

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &t, &mut legal, &mut scratch);

    assert!(
        has_move(&legal, "e1", "e7"),
        "Checking capture e1e7 should not be filtered out."
    );
}

#[test]
fn en_passant_is_illegal_when_pawn_is_pinned_opening_file_on_own_king() {
    // Position: White king e1, White pawn e5; Black rook e8; Black pawn d5.
    // EP square = d6; White to move. If White plays e5xd6 e.p., the e-file opens and K on e1 is in check -> illegal.
    //
    // Board:
    // 8: k . . . r . . .
    // 7: . . . . . . . .
    // 6: . . . . . . . .
    // 5: . . . p P . . .
    // 4: . . . . . . . .
    // 3: . . . . . . . .
    // 2: . . . . . . . .
    // 1: . . . . K . . R
    // FEN with EP target d6 and white to move:
    let fen = "k3r3/8/8/3pP3/8/8/8/4K2R w - d6 0 1";
    let mut b = Board::from_str(fen).unwrap();
    let tables = load_magic_tables();

    let mut moves = Vec::with_capacity(64);
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut b, &tables, &mut moves, &mut scratch);

    // Ensure no legal EP move from e5 to d6 exists
    assert!(
        !moves.iter().any(|m| m.is_en_passant()
            && m.from == Square::from_str("e5").unwrap()
            && m.to == Square::from_str("d6").unwrap()),
        "EP capture that exposes own king must be filtered out by the legality checker"
    );
}

fn sorted(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_by_key(|m| (m.from.index(), m.to.index(), m.promotion.map(|p| p as u8)));
    moves
}

#[test]
fn evasions_match_legal_moves_when_in_check() {
    // White Ke1 in check from a black rook on e8; White pawn can block on e2/e3 paths blocked,
    // so only king moves and blocking with the d-pawn (if any) apply. Keep it simple: single checker.
    let fen = "4r1k1/8/8/8/8/8/4P3/4K3 w - - 0 1";
    let t = tables();

    let mut legal_b = Board::from_str(fen).unwrap();
    let mut evasion_b = Board::from_str(fen).unwrap();
    assert!(in_check(&legal_b, legal_b.side_to_move, &t));

    let mut legal = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_legal(&mut legal_b, &t, &mut legal, &mut scratch);

    let mut evasions = vec![];
    generate_evasions(&mut evasion_b, &t, &mut evasions, &mut scratch);

    assert_eq!(
        sorted(legal),
        sorted(evasions),
        "legal moves while in check must equal the evasion set"
    );
}

#[test]
fn evasions_only_move_king_out_of_double_check() {
    // Engineer a double check: Black king h8, checked by a rook on the h-file and a bishop
    // on the long diagonal simultaneously.
    let fen = "7k/8/8/8/8/6B1/8/6KR b - - 0 1";
    let t = tables();
    let mut b = Board::from_str(fen).unwrap();
    assert!(in_check(&b, b.side_to_move, &t));

    let mut evasions = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_evasions(&mut b, &t, &mut evasions, &mut scratch);

    assert!(
        evasions.iter().all(|m| m.piece == vantage::board::Piece::King),
        "double check must only allow king moves"
    );
}

#[test]
fn quiet_checks_give_check_and_are_not_captures() {
    // White rook on a1 can quietly slide to give check along the back rank... use a simpler
    // discovered-check-free setup: Ra1, black king on a8's file is blocked; instead check a
    // direct rook lift that gives check without capturing.
    let fen = "1k6/8/8/8/8/8/8/R3K3 w - - 0 1";
    let t = tables();
    let mut b = Board::from_str(fen).unwrap();

    let mut checks = vec![];
    let mut scratch = Vec::with_capacity(256);
    generate_quiet_checks(&mut b, &t, &mut checks, &mut scratch);

    assert!(!checks.is_empty(), "expected at least one quiet checking move");
    for mv in &checks {
        assert!(!mv.is_capture(), "quiet-checks genre must not include captures");
        assert!(!mv.is_promotion(), "quiet-checks genre must not include promotions");
    }
}
