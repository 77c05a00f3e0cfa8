use minesweeper_engine::{
    Board, CellView, ConfigError, GameParams, GameSession, GameStatus, Pos, SessionError,
    Transition, score,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn all_positions(params: GameParams) -> impl Iterator<Item = Pos> {
    (0..params.height).flat_map(move |y| (0..params.width).map(move |x| Pos::new(x, y)))
}

/// Reveals every safe cell the way a player who knows the layout would.
fn play_perfect_game(seed: u64, params: GameParams, first: Pos) -> GameSession {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = GameSession::new(params).unwrap();
    session.reveal(first, &mut rng);

    for pos in all_positions(params) {
        if session.game_over() {
            break;
        }
        if !session.board().cell(pos).unwrap().is_mine() {
            session.tick();
            session.reveal(pos, &mut rng);
        }
    }

    session
}

#[test]
fn perfect_play_always_wins() {
    for seed in 0..25 {
        let session = play_perfect_game(seed, GameParams::default(), Pos::new(3, 12));

        assert_eq!(session.status(), GameStatus::Won, "seed {}", seed);
        assert!(session.game_over());
        assert_eq!(session.revealed_safe_count(), session.total_safe_cells());
        assert_eq!(session.correct_flags(), 40);
        assert_eq!(session.mines_left(), 0);
    }
}

#[test]
fn first_click_never_detonates() {
    let params = GameParams::new(9, 9, 72).unwrap();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = GameSession::new(params).unwrap();

        let transition = session.reveal(Pos::new(4, 4), &mut rng);
        assert_ne!(transition, Transition::Finished { won: false });
        // 72 mines leave only the 3x3 safe zone, so the first click opens it all.
        assert_eq!(transition, Transition::Finished { won: true });
        assert_eq!(session.revealed_safe_count(), 9);
    }
}

#[test]
fn losing_exposes_mines_in_view_only() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = GameSession::new(GameParams::default()).unwrap();
    session.reveal(Pos::new(0, 0), &mut rng);

    let mine = session.board().mine_positions()[0];
    let before = session.revealed_safe_count();
    assert_eq!(session.reveal(mine, &mut rng), Transition::Finished { won: false });
    assert_eq!(session.revealed_safe_count(), before);

    let view = session.view();
    let shown_mines = view
        .iter()
        .flatten()
        .filter(|cell| **cell == CellView::Mine)
        .count();
    assert_eq!(shown_mines, 40);

    let revealed_mines = session
        .board()
        .cells()
        .iter()
        .filter(|cell| cell.is_mine() && cell.is_revealed())
        .count();
    assert_eq!(revealed_mines, 1);
}

#[test]
fn single_mine_example_board() {
    let mut rng = StdRng::seed_from_u64(0);
    let board = Board::with_mines(4, 4, &[Pos::new(0, 0)]).unwrap();
    let mut session = GameSession::with_board(board).unwrap();

    assert_eq!(
        session.reveal(Pos::new(3, 3), &mut rng),
        Transition::Finished { won: true }
    );
    assert_eq!(session.revealed_safe_count(), 15);
    assert_eq!(session.score(), score(15, 1, 0));
}

#[test]
fn resumed_session_keeps_playing() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut session = GameSession::new(GameParams::default()).unwrap();
    session.reveal(Pos::new(10, 10), &mut rng);
    session.tick();

    let mut resumed = GameSession::from_json(&session.to_json().unwrap()).unwrap();
    assert_eq!(resumed.id(), session.id());
    assert_eq!(resumed.tick(), Transition::Updated);
    assert_eq!(resumed.elapsed_seconds(), 2);

    let safe = all_positions(resumed.params())
        .find(|&pos| {
            let cell = resumed.board().cell(pos).unwrap();
            !cell.is_mine() && !cell.is_revealed()
        })
        .unwrap();
    assert!(resumed.reveal(safe, &mut rng).changed());
}

#[test]
fn overfull_params_never_reach_play() {
    let params = GameParams {
        width: 4,
        height: 4,
        mines: 10,
    };
    assert!(matches!(
        GameSession::new(params),
        Err(ConfigError::TooManyMines { mines: 10, max: 7 })
    ));

    let json = GameSession::new(GameParams::new(4, 4, 7).unwrap())
        .unwrap()
        .to_json()
        .unwrap()
        .replace("\"mines\":7", "\"mines\":10");
    assert!(matches!(
        GameSession::from_json(&json),
        Err(SessionError::Config(ConfigError::TooManyMines { .. }))
    ));
}
