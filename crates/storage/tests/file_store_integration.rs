use storage::{FileScoreStore, LoadedScore, ScoreRepository};

#[test]
fn missing_file_loads_as_session_only_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileScoreStore::new(dir.path().join("high_score.txt"));

    let loaded = store.load();
    assert_eq!(loaded.value, 0);
    assert!(loaded.is_session_only());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileScoreStore::new(dir.path().join("high_score.txt"));

    store.save(12).unwrap();
    assert_eq!(store.load(), LoadedScore::persisted(12));
}

#[test]
fn save_overwrites_previous_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileScoreStore::new(dir.path().join("high_score.txt"));

    store.save(5).unwrap();
    store.save(12).unwrap();

    assert_eq!(store.load(), LoadedScore::persisted(12));
    let text = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, "12");
}

#[test]
fn tolerates_surrounding_whitespace_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_score.txt");
    std::fs::write(&path, "7\n").unwrap();

    let store = FileScoreStore::new(path);
    assert_eq!(store.load(), LoadedScore::persisted(7));
}

#[test]
fn corrupt_file_loads_as_session_only_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("high_score.txt");
    std::fs::write(&path, "not a number").unwrap();

    let store = FileScoreStore::new(path);
    let loaded = store.load();
    assert_eq!(loaded.value, 0);
    assert!(loaded.is_session_only());
}

#[test]
fn write_to_unwritable_path_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileScoreStore::new(dir.path().join("missing").join("high_score.txt"));

    assert!(store.save(1).is_err());
}
