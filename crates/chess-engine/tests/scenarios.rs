//! End-to-end game scenarios played through the public API.

use chess_core::{Color, Move, PieceKind, Square};
use chess_engine::{
    create_initial_state, is_checkmate, is_in_check, is_stalemate, legal_moves, GameState,
    GameStatus,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

/// Plays UCI moves, asserting each one is legal for the side to move.
fn play(state: GameState, moves: &[&str]) -> GameState {
    moves.iter().fold(state, |s, uci| {
        let mv = Move::from_uci(uci).unwrap();
        let piece = s.board().get(mv.from).expect("no piece on from square");
        assert_eq!(piece.color, s.current_player(), "{} moves out of turn", uci);
        assert!(legal_moves(&s, mv.from).contains(&mv.to), "{} is not legal", uci);
        s.apply_move(mv.from, mv.to)
    })
}

#[test]
fn opening_sequence() {
    let state = play(create_initial_state(), &["e2e4", "e7e5", "f1c4", "f8c5"]);
    assert_eq!(state.current_player(), Color::White);
    assert_eq!(state.status(), GameStatus::Active);
    assert_eq!(state.history().len(), 4);
    assert_eq!(state.last_move().map(|m| m.as_move().to_uci()), Some("f8c5".to_string()));
}

#[test]
fn e2_e4_uses_row_col_coordinates() {
    let state = create_initial_state();
    let next = state.apply_move(Square::at(6, 4), Square::at(4, 4));
    assert!(next.board().is_empty(Square::at(6, 4)));
    assert_eq!(next.board().get(Square::at(4, 4)).map(|p| p.kind), Some(PieceKind::Pawn));
}

#[test]
fn kingside_castling() {
    let state = play(
        create_initial_state(),
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"],
    );
    assert!(legal_moves(&state, Square::E1).contains(&Square::G1));

    let castled = state.apply_move(Square::E1, Square::G1);
    let king = castled.board().get(Square::G1).unwrap();
    let rook = castled.board().get(Square::F1).unwrap();
    assert_eq!((king.kind, king.color), (PieceKind::King, Color::White));
    assert_eq!((rook.kind, rook.color), (PieceKind::Rook, Color::White));
    assert!(castled.board().is_empty(Square::E1));
    assert!(castled.board().is_empty(Square::H1));
    assert!(!castled.castling().can_castle_kingside(Color::White));
    assert!(!castled.castling().can_castle_queenside(Color::White));
    assert!(castled.castling().can_castle_kingside(Color::Black));
    assert!(castled.last_move().unwrap().is_castle);
}

#[test]
fn en_passant_capture() {
    let state = play(
        create_initial_state(),
        &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"],
    );
    assert_eq!(state.en_passant(), Some(sq("e3")));

    let black_pawn = sq("d4");
    assert!(legal_moves(&state, black_pawn).contains(&sq("e3")));

    let captured = state.apply_move(black_pawn, sq("e3"));
    assert!(captured.board().is_empty(sq("e4")), "white pawn on row 4 must be removed");
    let capturer = captured.board().get(sq("e3")).unwrap();
    assert_eq!((capturer.kind, capturer.color), (PieceKind::Pawn, Color::Black));

    let record = captured.last_move().unwrap();
    assert!(record.is_en_passant);
    assert_eq!(record.captured.map(|p| (p.kind, p.color)), Some((PieceKind::Pawn, Color::White)));
    assert_eq!(captured.en_passant(), None);
}

#[test]
fn en_passant_expires_after_one_move() {
    let state = play(
        create_initial_state(),
        &["a2a3", "d7d5", "a3a4", "d5d4", "e2e4", "h7h6", "h2h3"],
    );
    assert!(!legal_moves(&state, sq("d4")).contains(&sq("e3")));
}

#[test]
fn fools_mate() {
    let state = play(create_initial_state(), &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(state.status(), GameStatus::Checkmate);
    assert_eq!(state.current_player(), Color::White);
    assert!(state.in_check());
    assert!(is_checkmate(&state));
    assert!(!is_stalemate(&state));

    let record = state.last_move().unwrap();
    assert!(record.is_check);
    assert!(record.is_checkmate);
}

#[test]
fn scholars_mate() {
    let state = play(
        create_initial_state(),
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );
    assert_eq!(state.status(), GameStatus::Checkmate);
    assert_eq!(state.current_player(), Color::Black);
    assert!(is_in_check(state.board(), Color::Black));
}

#[test]
fn stalemate_after_quiet_move() {
    // Queen to g6 leaves the h8 king without a move.
    let state = GameState::from_fen("7k/8/8/6Q1/8/8/8/K7 w - - 0 1").unwrap();
    let next = state.apply_move(sq("g5"), sq("g6"));
    assert_eq!(next.status(), GameStatus::Stalemate);
    assert!(!next.in_check());
    assert!(is_stalemate(&next));
    assert!(!next.last_move().unwrap().is_checkmate);
}

#[test]
fn promotion_can_deliver_mate() {
    let state = GameState::from_fen("k7/7P/1K6/8/8/8/8/8 w - - 0 1").unwrap();
    let next = state.apply_move(sq("h7"), sq("h8"));
    assert_eq!(next.board().get(sq("h8")).map(|p| p.kind), Some(PieceKind::Queen));
    assert_eq!(next.status(), GameStatus::Checkmate);
    assert_eq!(next.last_move().unwrap().promotion, Some(PieceKind::Queen));
}
