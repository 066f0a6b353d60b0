use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.row, 7);
    assert_eq!(pos.col, 7);
    assert_eq!(pos, Pos::CENTER);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(pos.to_index(), 112);

    let pos2 = Pos::from_index(112);
    assert_eq!(pos2.row, 7);
    assert_eq!(pos2.col, 7);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(Pos::is_valid(7, 7));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(15, 0));
    assert!(!Pos::is_valid(0, 15));
    assert_eq!(Pos::try_new(15, 3), None);
    assert_eq!(Pos::try_new(2, 3), Some(Pos::new(2, 3)));
}

#[test]
fn test_pos_offset_and_center_distance() {
    assert_eq!(Pos::new(0, 0).offset(-1, 0), None);
    assert_eq!(Pos::new(0, 0).offset(1, 1), Some(Pos::new(1, 1)));
    assert_eq!(Pos::CENTER.center_distance(), 0);
    assert_eq!(Pos::new(0, 0).center_distance(), 14);
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 15);
    assert_eq!(TOTAL_CELLS, 225);
    assert_eq!(WIN_LENGTH, 5);
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_corner_indices() {
    assert_eq!(Pos::new(0, 0).to_index(), 0);
    assert_eq!(Pos::new(0, 14).to_index(), 14);
    assert_eq!(Pos::new(14, 0).to_index(), 210);
    assert_eq!(Pos::new(14, 14).to_index(), 224);
}

#[test]
fn test_game_status_win_for() {
    assert_eq!(GameStatus::win_for(Stone::Black), GameStatus::BlackWin);
    assert_eq!(GameStatus::win_for(Stone::White), GameStatus::WhiteWin);
    assert!(!GameStatus::Ongoing.is_terminal());
    assert!(GameStatus::Draw.is_terminal());
}

#[test]
fn test_board_invariant_counts_match() {
    let board = Board::from_moves(&[(7, 7), (7, 8), (8, 8), (6, 6)]).unwrap();
    assert_eq!(board.occupied().count() as usize, board.move_count());
    assert_eq!(board.history().len(), board.move_count());
}
