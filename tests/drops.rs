use tinyhouse::{square, Color, Crazyhouse, Outcome, PlayError, Role};

#[test]
fn captures_go_to_the_capturers_pocket() {
    let mut pos = Crazyhouse::default();
    pos.play(square::E2, square::E4, None).unwrap();
    pos.play(square::D7, square::D5, None).unwrap();
    pos.play(square::E4, square::D5, None).unwrap();
    assert_eq!(pos.pockets().white.by_role(Role::Pawn), 1);
    assert_eq!(pos.pockets().black.count(), 0);

    pos.play(square::D8, square::D5, None).unwrap();
    assert_eq!(pos.pockets().black.by_role(Role::Pawn), 1);
}

#[test]
fn dropping_places_a_fresh_piece() {
    let mut pos = Crazyhouse::default();
    pos.play(square::E2, square::E4, None).unwrap();
    pos.play(square::D7, square::D5, None).unwrap();
    pos.play(square::E4, square::D5, None).unwrap();
    pos.play(square::D8, square::D5, None).unwrap();
    pos.play(square::G1, square::F3, None).unwrap();

    pos.drop_piece(Role::Pawn, square::E4).unwrap();
    let pawn = pos.board().piece_at(square::E4).unwrap();
    assert_eq!(pawn.color, Color::Black);
    assert_eq!(pawn.role, Role::Pawn);
    assert!(!pawn.moved);
    assert_eq!(pos.pockets().black.by_role(Role::Pawn), 0);
    assert_eq!(pos.turn(), Color::White);
}

#[test]
fn dropping_from_an_empty_pocket_fails() {
    let mut pos = Crazyhouse::default();
    assert!(pos.legal_drops(Role::Queen).is_empty());
    assert_eq!(
        pos.drop_piece(Role::Queen, square::E4).unwrap_err(),
        PlayError::EmptyPocket(Role::Queen)
    );
}

#[test]
fn drops_only_land_on_empty_squares() {
    let mut pos = Crazyhouse::default();
    pos.pocket_mut(Color::White).add(Role::Knight);

    let targets = pos.legal_drops(Role::Knight);
    assert_eq!(targets.len(), 32);
    assert!(targets.contains(&square::E4));
    assert!(!targets.contains(&square::E2));
    assert!(!targets.contains(&square::E7));

    assert_eq!(
        pos.drop_piece(Role::Knight, square::E2).unwrap_err(),
        PlayError::IllegalMove
    );
}

#[test]
fn pawns_never_drop_on_a_back_rank() {
    let mut pos = Crazyhouse::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    pos.pocket_mut(Color::White).add(Role::Pawn);

    let targets = pos.legal_drops(Role::Pawn);
    assert_eq!(targets.len(), 48);
    assert!(targets.contains(&square::D2));
    assert!(targets.contains(&square::D7));
    assert!(!targets.contains(&square::D1));
    assert!(!targets.contains(&square::D8));

    assert_eq!(
        pos.drop_piece(Role::Pawn, square::A1).unwrap_err(),
        PlayError::IllegalMove
    );
    assert_eq!(
        pos.drop_piece(Role::Pawn, square::A8).unwrap_err(),
        PlayError::IllegalMove
    );
}

#[test]
fn dropped_pawn_gains_the_double_step() {
    let mut pos = Crazyhouse::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    pos.pocket_mut(Color::White).add(Role::Pawn);
    pos.drop_piece(Role::Pawn, square::D2).unwrap();

    // Dummy reply so it is White's turn again.
    pos.play(square::E8, square::E7, None).unwrap();

    let moves = pos.legal_moves(square::D2);
    assert!(moves.contains(&square::D3));
    assert!(moves.contains(&square::D4));
}

#[test]
fn pawn_dropped_off_its_start_rank_walks() {
    let mut pos = Crazyhouse::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    pos.pocket_mut(Color::White).add(Role::Pawn);
    pos.drop_piece(Role::Pawn, square::D3).unwrap();
    pos.play(square::E8, square::E7, None).unwrap();

    let moves = pos.legal_moves(square::D3);
    assert_eq!(moves.as_slice(), [square::D4]);
}

#[test]
fn a_drop_can_block_checkmate() {
    let board = "4R2k/6pp/8/8/8/8/8/6K1".parse().unwrap();
    let mut pos = Crazyhouse::from_board(board, Color::Black).unwrap();
    assert!(pos.is_check());
    assert_eq!(pos.outcome(), Outcome::Checkmate);

    // A piece in hand turns the mate into a mere check.
    pos.pocket_mut(Color::Black).add(Role::Knight);
    assert_eq!(pos.outcome(), Outcome::Ongoing);

    let blocks = pos.legal_drops(Role::Knight);
    assert_eq!(blocks.len(), 2);
    assert!(blocks.contains(&square::F8));
    assert!(blocks.contains(&square::G8));

    // Block, get captured, and the knight changes hands.
    pos.drop_piece(Role::Knight, square::G8).unwrap();
    pos.play(square::E8, square::G8, None).unwrap();
    assert_eq!(pos.pockets().white.by_role(Role::Knight), 1);
    assert_eq!(pos.pockets().black.by_role(Role::Knight), 0);

    pos.play(square::H8, square::G8, None).unwrap();
    assert_eq!(pos.pockets().black.by_role(Role::Rook), 1);
    assert_eq!(pos.board().role_at(square::G8), Some(Role::King));
}

#[test]
fn drops_may_not_expose_the_king() {
    // The e-file is frozen: a drop elsewhere would leave the king in check.
    let board = "4r2k/8/8/8/8/8/8/4K3".parse().unwrap();
    let mut pos = Crazyhouse::from_board(board, Color::White).unwrap();
    pos.pocket_mut(Color::White).add(Role::Bishop);
    assert!(pos.is_check());

    let drops = pos.legal_drops(Role::Bishop);
    assert!(!drops.is_empty());
    assert!(drops.iter().all(|sq| sq.file() == 4));
}
