use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::clipboard::{copied_message, ClipboardService, CopyOutcome};
use crate::directory::Directory;
use crate::history::HistoryStore;
use crate::links::{derive_links, LinkKind, OutboundLink, OutboundLinks};
use crate::model::{CompanyRecord, HistoryEntry, SortOrder};
use crate::open_schedule::{OpenSchedule, PendingOpen};
use crate::search::{filter_suggestions, find_best_match};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    ResultAvailable,
    HistoryChanged,
    Notify(String),
}

pub fn no_match_message(query: &str) -> String {
    format!("No company matches \"{query}\".")
}

pub const REMOVED_FROM_HISTORY_MESSAGE: &str = "Removed from history.";

pub struct SelectionController {
    directory: Directory,
    history: HistoryStore,
    clipboard: ClipboardService,
    opens: OpenSchedule,
    current: Option<CompanyRecord>,
    links: Option<OutboundLinks>,
}

impl SelectionController {
    pub fn new(
        directory: Directory,
        db: Connection,
        clipboard: ClipboardService,
        open_stagger: Duration,
    ) -> Self {
        Self {
            directory,
            history: HistoryStore::load(db),
            clipboard,
            opens: OpenSchedule::new(open_stagger),
            current: None,
            links: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn current(&self) -> Option<&CompanyRecord> {
        self.current.as_ref()
    }

    pub fn links(&self) -> Option<&OutboundLinks> {
        self.links.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn sorted_history(&self, order: SortOrder) -> Vec<HistoryEntry> {
        self.history.sorted(order)
    }

    pub fn pending_opens(&self) -> &[PendingOpen] {
        self.opens.pending()
    }

    pub fn suggestions(&self, query: &str) -> Vec<CompanyRecord> {
        filter_suggestions(self.directory.records(), query)
    }

    pub fn search(&mut self, raw_query: &str) -> Vec<Signal> {
        let trimmed = raw_query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        match find_best_match(self.directory.records(), trimmed) {
            Some(record) => self.select(record),
            None => {
                tracing::debug!(query = trimmed, "no directory match");
                vec![Signal::Notify(no_match_message(trimmed))]
            }
        }
    }

    pub fn select(&mut self, record: CompanyRecord) -> Vec<Signal> {
        tracing::info!(code = %record.code, name = %record.name, "company selected");
        let mut signals = Vec::with_capacity(3);
        let entry = record.to_history_entry();
        let links = derive_links(&record);
        let name = record.name.clone();
        self.current = Some(record);

        if let Err(error) = self.history.add(entry) {
            tracing::error!(%error, "failed to persist history");
        }
        signals.push(Signal::HistoryChanged);

        self.links = Some(links);

        // Every selection copies; the name is what the disclosure portal needs.
        if let Some(message) = self.copy_name(&name) {
            signals.push(Signal::Notify(message));
        }

        signals.push(Signal::ResultAvailable);
        signals
    }

    /// History rows are snapshots; prefer the live directory record and fall
    /// back to the snapshot when the code has left the directory.
    pub fn select_code(&mut self, code: &str) -> Vec<Signal> {
        let record = match self.directory.get(code) {
            Some(record) => record.clone(),
            None => match self.history.entries().iter().find(|entry| entry.code == code) {
                Some(entry) => CompanyRecord::from(entry),
                None => return Vec::new(),
            },
        };
        self.select(record)
    }

    pub fn remove_history(&mut self, code: &str) -> Vec<Signal> {
        match self.history.remove(code) {
            Ok(true) => vec![
                Signal::HistoryChanged,
                Signal::Notify(REMOVED_FROM_HISTORY_MESSAGE.to_string()),
            ],
            Ok(false) => Vec::new(),
            Err(error) => {
                tracing::error!(%error, code, "failed to persist history removal");
                vec![
                    Signal::HistoryChanged,
                    Signal::Notify(REMOVED_FROM_HISTORY_MESSAGE.to_string()),
                ]
            }
        }
    }

    pub fn open_all(&mut self, now: Instant) -> Vec<Signal> {
        let (Some(record), Some(links)) = (self.current.as_ref(), self.links.as_ref()) else {
            return Vec::new();
        };
        let name = record.name.clone();
        let cancelled = self.opens.schedule(links.open_order(), now);
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled pending opens from previous batch");
        }

        let mut signals = Vec::new();
        if let Some(message) = self.copy_name(&name) {
            signals.push(Signal::Notify(message));
        }
        signals
    }

    pub fn open_link(&mut self, kind: LinkKind) -> (Option<OutboundLink>, Vec<Signal>) {
        let Some(link) = self.links.as_ref().map(|links| links.get(kind).clone()) else {
            return (None, Vec::new());
        };

        let mut signals = Vec::new();
        if kind == LinkKind::Disclosure {
            let name = self.current.as_ref().map(|record| record.name.clone());
            if let Some(message) = name.and_then(|name| self.copy_name(&name)) {
                signals.push(Signal::Notify(message));
            }
        }
        (Some(link), signals)
    }

    pub fn take_due_opens(&mut self, now: Instant) -> Vec<PendingOpen> {
        self.opens.take_due(now)
    }

    pub fn cancel_pending_opens(&mut self) -> usize {
        self.opens.cancel()
    }

    pub fn reload_history(&mut self) {
        self.history.reload();
    }

    fn copy_name(&mut self, name: &str) -> Option<String> {
        match self.clipboard.copy(name) {
            CopyOutcome::Copied(path) => {
                tracing::debug!(?path, "name copied");
                Some(copied_message(name))
            }
            CopyOutcome::Failed => None,
        }
    }
}
