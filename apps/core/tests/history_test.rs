use tickerlink_core::config::Config;
use tickerlink_core::history::{HistoryStore, HISTORY_CAPACITY, HISTORY_SLOT_KEY};
use tickerlink_core::model::{HistoryEntry, SortOrder};
use tickerlink_core::slot_store::{open_from_config, open_memory, read_slot, write_slot};

fn entry(code: &str, name: &str) -> HistoryEntry {
    HistoryEntry {
        code: code.to_string(),
        name: name.to_string(),
    }
}

fn codes(entries: &[HistoryEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.code.as_str()).collect()
}

#[test]
fn reselecting_moves_entry_to_front_without_duplicates() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("7203", "トヨタ自動車")).unwrap();
    store.add(entry("9984", "ソフトバンクグループ")).unwrap();
    store.add(entry("7203", "トヨタ自動車")).unwrap();

    assert_eq!(codes(store.entries()), ["7203", "9984"]);
}

#[test]
fn adding_the_newest_entry_again_changes_nothing() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("9984", "ソフトバンクグループ")).unwrap();
    store.add(entry("7203", "トヨタ自動車")).unwrap();
    let before = store.entries().to_vec();

    store.add(entry("7203", "トヨタ自動車")).unwrap();
    assert_eq!(store.entries(), before.as_slice());
}

#[test]
fn history_is_capped_and_evicts_oldest() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    for n in 0..HISTORY_CAPACITY + 5 {
        store.add(entry(&format!("{}", 1000 + n), &format!("Company {n}"))).unwrap();
    }

    assert_eq!(store.len(), HISTORY_CAPACITY);
    assert_eq!(store.entries()[0].code, "1024");
    assert!(store.entries().iter().all(|entry| entry.code != "1004"));
    assert_eq!(store.entries().last().unwrap().code, "1005");
}

#[test]
fn removed_entry_stays_gone_after_reload() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("7203", "トヨタ自動車")).unwrap();
    store.add(entry("9984", "ソフトバンクグループ")).unwrap();

    assert!(store.remove("7203").unwrap());
    store.reload();
    assert_eq!(codes(store.entries()), ["9984"]);
}

#[test]
fn removing_unknown_code_is_a_noop() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("7203", "トヨタ自動車")).unwrap();

    assert!(!store.remove("0000").unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn malformed_slot_starts_empty_and_recovers_on_next_write() {
    let db = open_memory().unwrap();
    write_slot(&db, HISTORY_SLOT_KEY, "{not json").unwrap();

    let mut store = HistoryStore::load(db);
    assert!(store.is_empty());

    store.add(entry("7203", "トヨタ自動車")).unwrap();
    let db = store.into_connection();
    let raw = read_slot(&db, HISTORY_SLOT_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"[{"code":"7203","name":"トヨタ自動車"}]"#);
}

#[test]
fn loaded_duplicates_are_collapsed() {
    let db = open_memory().unwrap();
    write_slot(
        &db,
        HISTORY_SLOT_KEY,
        r#"[{"code":"7203","name":"トヨタ自動車"},{"code":"9984","name":"ソフトバンクグループ"},{"code":"7203","name":"トヨタ"}]"#,
    )
    .unwrap();

    let store = HistoryStore::load(db);
    assert_eq!(codes(store.entries()), ["7203", "9984"]);
    assert_eq!(store.entries()[0].name, "トヨタ自動車");
}

#[test]
fn alphabetical_view_leaves_stored_order_alone() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("9433", "KDDI")).unwrap();
    store.add(entry("7974", "任天堂")).unwrap();
    store.add(entry("1000", "あおぞら")).unwrap();
    store.add(entry("2000", "アイフル")).unwrap();

    let sorted = store.sorted(SortOrder::Alphabetical);
    // Katakana アイ folds to あい, which sorts before あお.
    assert_eq!(codes(&sorted), ["9433", "2000", "1000", "7974"]);

    assert_eq!(codes(store.entries()), ["2000", "1000", "7974", "9433"]);
    assert_eq!(store.sorted(SortOrder::Recent), store.entries());
}

#[test]
fn alphabetical_view_uses_japanese_ordering() {
    let mut store = HistoryStore::load(open_memory().unwrap());
    store.add(entry("4063", "信越化学工業")).unwrap();
    store.add(entry("7974", "任天堂")).unwrap();
    store.add(entry("6501", "日立製作所")).unwrap();
    store.add(entry("8058", "三菱商事")).unwrap();
    store.add(entry("7867", "タカラトミー")).unwrap();
    store.add(entry("6367", "ダイキン工業")).unwrap();

    let sorted = store.sorted(SortOrder::Alphabetical);
    assert_eq!(
        codes(&sorted),
        ["6367", "7867", "8058", "4063", "6501", "7974"]
    );
}

#[test]
fn history_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        storage_path: dir.path().join("nested").join("history.sqlite3"),
        ..Config::default()
    };

    {
        let mut store = HistoryStore::load(open_from_config(&cfg).unwrap());
        store.add(entry("7203", "トヨタ自動車")).unwrap();
        store.add(entry("9984", "ソフトバンクグループ")).unwrap();
    }

    let store = HistoryStore::load(open_from_config(&cfg).unwrap());
    assert_eq!(codes(store.entries()), ["9984", "7203"]);
}
