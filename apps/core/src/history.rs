use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use rusqlite::Connection;

use crate::model::{HistoryEntry, SortOrder};
use crate::slot_store::{self, StoreError};

pub const HISTORY_SLOT_KEY: &str = "searchHistory";
pub const HISTORY_CAPACITY: usize = 20;

pub struct HistoryStore {
    db: Connection,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn load(db: Connection) -> Self {
        let entries = load_entries(&db);
        Self { db, entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.entries.retain(|existing| existing.code != entry.code);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    pub fn remove(&mut self, code: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|existing| existing.code != code);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn sorted(&self, order: SortOrder) -> Vec<HistoryEntry> {
        let mut out = self.entries.clone();
        if order == SortOrder::Alphabetical {
            out.sort_by(|a, b| {
                compare_names(&a.name, &b.name).then_with(|| a.code.cmp(&b.code))
            });
        }
        out
    }

    pub fn reload(&mut self) {
        self.entries = load_entries(&self.db);
    }

    pub fn into_connection(self) -> Connection {
        self.db
    }

    fn persist(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.entries)?;
        slot_store::write_slot(&self.db, HISTORY_SLOT_KEY, &encoded)?;
        Ok(())
    }
}

fn load_entries(db: &Connection) -> Vec<HistoryEntry> {
    let raw = match slot_store::read_slot(db, HISTORY_SLOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            tracing::warn!(%error, "history slot unreadable; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(entries) => normalize_loaded(entries),
        Err(error) => {
            tracing::warn!(%error, "history slot malformed; starting empty");
            Vec::new()
        }
    }
}

fn normalize_loaded(entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    let mut out: Vec<HistoryEntry> = Vec::with_capacity(entries.len().min(HISTORY_CAPACITY));
    for entry in entries {
        if entry.code.is_empty() || out.iter().any(|kept| kept.code == entry.code) {
            continue;
        }
        out.push(entry);
        if out.len() == HISTORY_CAPACITY {
            break;
        }
    }
    out
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    JA_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
    .then_with(|| a.cmp(b))
}

thread_local! {
    static JA_COLLATOR: Option<CollatorBorrowed<'static>> =
        match Collator::try_new(locale!("ja").into(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(error) => {
                tracing::warn!(%error, "ja collation data unavailable; sorting by code point");
                None
            }
        };
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{compare_names, normalize_loaded, HISTORY_CAPACITY};
    use crate::model::HistoryEntry;

    fn entry(code: &str) -> HistoryEntry {
        HistoryEntry {
            code: code.to_string(),
            name: format!("name-{code}"),
        }
    }

    #[test]
    fn katakana_and_hiragana_sort_together() {
        assert_eq!(compare_names("アサヒ", "いすゞ"), Ordering::Less);
        assert_eq!(compare_names("イオン", "あさひ"), Ordering::Greater);
    }

    #[test]
    fn voiced_kana_sort_next_to_unvoiced() {
        assert_eq!(compare_names("ガス", "カメラ"), Ordering::Less);
        assert_eq!(compare_names("ダイキン工業", "タカラトミー"), Ordering::Less);
    }

    #[test]
    fn kanji_follow_japanese_reading_order() {
        let mut names = vec!["任天堂", "日立製作所", "東京エレクトロン", "信越化学工業", "三菱商事"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(
            names,
            ["三菱商事", "信越化学工業", "東京エレクトロン", "日立製作所", "任天堂"]
        );
    }

    #[test]
    fn fullwidth_latin_compares_like_ascii() {
        assert_eq!(compare_names("ＫＤＤＩ", "LINE"), Ordering::Less);
    }

    #[test]
    fn loaded_entries_are_deduplicated_and_capped() {
        let mut raw: Vec<HistoryEntry> = (0..30).map(|i| entry(&i.to_string())).collect();
        raw.insert(1, entry("0"));
        let normalized = normalize_loaded(raw);
        assert_eq!(normalized.len(), HISTORY_CAPACITY);
        assert_eq!(normalized[0].code, "0");
        assert_eq!(normalized[1].code, "1");
    }
}
