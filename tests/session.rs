// Exercises the library surface the terminal front end is built on.

use bingo_board::app::session::Session;
use bingo_board::bingo::board::{BOARD_STATE_KEY, FREE_INDEX, FREE_LABEL, TOTAL_CELLS};
use bingo_board::bingo::presenter::PRESENTER_STATE_KEY;
use bingo_board::bingo::{
    BingoError, BoardData, Draw, FileStore, MemoryStore, Pool, PresenterPhase, StateChange,
    StateStore,
};
use std::collections::HashSet;
use tempfile::TempDir;

fn pool(n: usize) -> Pool {
    Pool::new((0..n).map(|i| format!("task {}", i)))
}

mod board_lifecycle {
    use super::*;

    #[test]
    fn highlights_survive_a_restart_but_layout_does_not_need_to() {
        let store = MemoryStore::new();
        let mut session = Session::start(Pool::builtin(), store.clone());
        session.toggle_cell(0).unwrap();
        session.toggle_cell(FREE_INDEX).unwrap();
        session.toggle_cell(24).unwrap();
        session.toggle_cell(0).unwrap();

        let resumed = Session::start(Pool::builtin(), store.clone());
        let board = resumed.board().unwrap();
        assert_eq!(board.selected_count(), 2);
        assert!(!board.is_highlighted(0));
        assert!(board.is_highlighted(FREE_INDEX));
        assert!(board.is_highlighted(24));
        assert_eq!(board.board().cell(FREE_INDEX), Some(FREE_LABEL));

        let raw = store.raw(BOARD_STATE_KEY).unwrap();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["highlighted"].as_array().unwrap().len(), TOTAL_CELLS);
        assert_eq!(record["selectedCount"], 2);
    }

    #[test]
    fn malformed_record_is_replaced_on_start() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer
            .set(BOARD_STATE_KEY, r#"{"highlighted":[true,false]}"#)
            .unwrap();

        let mut session = Session::start(Pool::builtin(), store.clone());
        assert_eq!(session.board().unwrap().selected_count(), 0);
        assert!(session
            .drain_changes()
            .contains(&StateChange::BoardLoaded {
                restored: false,
                selected: 0
            }));

        let raw = store.raw(BOARD_STATE_KEY).unwrap();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["highlighted"].as_array().unwrap().len(), TOTAL_CELLS);
        assert_eq!(record["selectedCount"], 0);
    }

    #[test]
    fn replace_board_accepts_flat_and_grid_forms() {
        let mut session = Session::start(Pool::builtin(), MemoryStore::new());
        let cells: Vec<String> = (0..TOTAL_CELLS).map(|i| format!("c{}", i)).collect();
        let grid: Vec<Vec<String>> = cells.chunks(5).map(|row| row.to_vec()).collect();

        let mgr = session.board.ready_mut().unwrap();
        mgr.replace_board(BoardData::Flat(cells.clone())).unwrap();
        let from_flat = mgr.board_data();
        mgr.replace_board(BoardData::Grid(grid)).unwrap();
        assert_eq!(mgr.board_data(), from_flat);
        assert_eq!(mgr.board().cells(), cells.as_slice());

        let short = BoardData::Grid(vec![vec!["x".to_string(); 5]; 4]);
        assert!(matches!(
            mgr.replace_board(short),
            Err(BingoError::InvalidShape { .. })
        ));
        assert_eq!(mgr.board_data(), from_flat);
    }

    #[test]
    fn reshuffle_keeps_selections() {
        let mut session = Session::start(pool(40), MemoryStore::new());
        session.toggle_cell(7).unwrap();
        session.reshuffle().unwrap();
        let board = session.board().unwrap();
        assert!(board.is_highlighted(7));
        assert_eq!(board.board().cell(FREE_INDEX), Some(FREE_LABEL));
    }
}

mod presenter_lifecycle {
    use super::*;

    #[test]
    fn draws_every_item_once_then_reports_exhaustion() {
        let mut session = Session::start(pool(6), MemoryStore::new());
        let mut seen = HashSet::new();
        for _ in 0..6 {
            match session.draw_next().unwrap() {
                Draw::Item(item) => assert!(seen.insert(item)),
                Draw::Exhausted => panic!("exhausted early"),
            }
        }
        assert_eq!(session.draw_next().unwrap(), Draw::Exhausted);
        assert_eq!(session.draw_next().unwrap(), Draw::Exhausted);

        let presenter = session.presenter().unwrap();
        assert_eq!(presenter.phase(), PresenterPhase::Exhausted);
        assert_eq!(presenter.shown_count(), 6);
        assert_eq!(presenter.remaining(), 0);
    }

    #[test]
    fn restart_resumes_without_repeats() {
        let store = MemoryStore::new();
        let mut first = Session::start(pool(4), store.clone());
        let Draw::Item(drawn) = first.draw_next().unwrap() else {
            panic!("pool should not be exhausted");
        };

        let mut second = Session::start(pool(4), store);
        assert_eq!(second.presenter().unwrap().shown_count(), 1);
        assert!(second.presenter().unwrap().current().is_none());
        for _ in 0..3 {
            assert_ne!(second.draw_next().unwrap(), Draw::Item(drawn.clone()));
        }
        assert_eq!(second.draw_next().unwrap(), Draw::Exhausted);
    }

    #[test]
    fn corrupt_presenter_record_starts_over() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set(PRESENTER_STATE_KEY, "not json at all").unwrap();

        let session = Session::start(pool(3), store.clone());
        assert_eq!(session.presenter().unwrap().shown_count(), 0);
        let raw = store.raw(PRESENTER_STATE_KEY).unwrap();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(record["shownItems"], serde_json::json!([]));
    }

    #[test]
    fn missing_presenter_record_is_not_written() {
        let store = MemoryStore::new();
        let session = Session::start(pool(3), store.clone());
        assert_eq!(
            session.presenter().unwrap().phase(),
            PresenterPhase::Empty
        );
        assert!(store.raw(PRESENTER_STATE_KEY).is_none());
    }
}

mod file_persistence {
    use super::*;

    #[test]
    fn state_round_trips_through_the_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("state");

        let mut session = Session::start(pool(30), FileStore::new(&data_dir));
        session.toggle_cell(3).unwrap();
        session.draw_next().unwrap();
        session.draw_next().unwrap();

        assert!(data_dir.join("bingoState.json").exists());
        assert!(data_dir.join("bingoPresenterState.json").exists());

        let resumed = Session::start(pool(30), FileStore::new(&data_dir));
        assert!(resumed.board().unwrap().is_highlighted(3));
        assert_eq!(resumed.presenter().unwrap().shown_count(), 2);
        assert_eq!(resumed.presenter().unwrap().phase(), PresenterPhase::Partial);
    }

    #[test]
    fn undecodable_files_are_overwritten_on_start() {
        let dir = TempDir::new().unwrap();
        let presenter_file = dir.path().join("bingoPresenterState.json");
        let board_file = dir.path().join("bingoState.json");
        std::fs::write(&presenter_file, [0xff, 0xfe, b'{']).unwrap();
        std::fs::write(&board_file, [0xff, 0xfe, b'{']).unwrap();

        let session = Session::start(pool(30), FileStore::new(dir.path()));
        assert_eq!(session.presenter().unwrap().shown_count(), 0);
        assert_eq!(session.board().unwrap().selected_count(), 0);

        assert_eq!(
            std::fs::read_to_string(&presenter_file).unwrap(),
            r#"{"shownItems":[]}"#
        );
        let board: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&board_file).unwrap()).unwrap();
        assert_eq!(board["highlighted"].as_array().unwrap().len(), TOTAL_CELLS);
    }

    #[test]
    fn unavailable_components_leave_storage_alone() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::start(pool(0), FileStore::new(dir.path()));
        assert!(session.board().is_none());
        assert!(session.presenter().is_none());
        assert!(matches!(
            session.draw_next(),
            Err(BingoError::Configuration { .. })
        ));
        assert!(!dir.path().join("bingoState.json").exists());
    }
}
