use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::action_executor::LaunchError;
use crate::command::Command;
use crate::controller::{SelectionController, Signal};
use crate::links::OutboundLink;
use crate::model::{CompanyRecord, HistoryEntry, SortOrder};
use crate::panels::{ClickTarget, Focus, PanelState};
use crate::toast::Toaster;
use crate::view::{self, Hit};

pub struct App {
    controller: SelectionController,
    query: String,
    suggestions: Vec<CompanyRecord>,
    suggestion_cursor: Option<usize>,
    history_cursor: usize,
    sort_order: SortOrder,
    panels: PanelState,
    toaster: Toaster,
    pending_removal: Option<HistoryEntry>,
    launches: Vec<OutboundLink>,
    viewport: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(controller: SelectionController, toast_duration: Duration) -> Self {
        Self {
            controller,
            query: String::new(),
            suggestions: Vec::new(),
            suggestion_cursor: None,
            history_cursor: 0,
            sort_order: SortOrder::default(),
            panels: PanelState::default(),
            toaster: Toaster::new(toast_duration),
            pending_removal: None,
            launches: Vec::new(),
            viewport: Rect::default(),
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[CompanyRecord] {
        &self.suggestions
    }

    pub fn suggestion_cursor(&self) -> Option<usize> {
        self.suggestion_cursor
    }

    pub fn history_cursor(&self) -> usize {
        self.history_cursor
    }

    pub fn history_rows(&self) -> Vec<HistoryEntry> {
        self.controller.sorted_history(self.sort_order)
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    pub fn toast(&self) -> Option<&str> {
        self.toaster.message()
    }

    pub fn pending_removal(&self) -> Option<&HistoryEntry> {
        self.pending_removal.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn take_launches(&mut self) -> Vec<OutboundLink> {
        std::mem::take(&mut self.launches)
    }

    pub fn report_launch_failure(&mut self, link: &OutboundLink, error: &LaunchError, now: Instant) {
        tracing::warn!(url = %link.url, %error, "failed to open link");
        self.toaster
            .show(format!("Could not open {}: {error}", link.label()), now);
    }

    pub fn dispatch(&mut self, command: Command, now: Instant) {
        if self.pending_removal.is_some()
            && !matches!(
                command,
                Command::ConfirmRemove
                    | Command::CancelRemove
                    | Command::Tick
                    | Command::Resize(..)
                    | Command::Quit
            )
        {
            return;
        }

        match command {
            Command::Insert(c) => {
                self.query.push(c);
                self.refresh_suggestions();
            }
            Command::Backspace => {
                self.query.pop();
                self.refresh_suggestions();
            }
            Command::ClearInput => {
                self.query.clear();
                self.refresh_suggestions();
            }
            Command::Submit => self.submit(now),
            Command::MoveUp => self.move_cursor(-1),
            Command::MoveDown => self.move_cursor(1),
            Command::PickSuggestion(index) => {
                if let Some(record) = self.suggestions.get(index).cloned() {
                    let signals = self.controller.select(record);
                    self.apply(signals, now);
                }
            }
            Command::PickHistory(index) => {
                if let Some(entry) = self.history_rows().get(index) {
                    let signals = self.controller.select_code(&entry.code);
                    self.apply(signals, now);
                }
            }
            Command::FocusInput => self.panels.on_typing(!self.suggestions.is_empty()),
            Command::ToggleHistory => {
                self.panels.on_toggle_history();
                self.history_cursor = 0;
            }
            Command::CycleSort => self.set_sort(self.sort_order.toggled()),
            Command::SetSort(order) => self.set_sort(order),
            Command::RequestRemoveHistory => self.request_removal(),
            Command::ConfirmRemove => {
                if let Some(entry) = self.pending_removal.take() {
                    let signals = self.controller.remove_history(&entry.code);
                    self.apply(signals, now);
                }
            }
            Command::CancelRemove => self.pending_removal = None,
            Command::OpenAll => {
                let signals = self.controller.open_all(now);
                self.apply(signals, now);
                self.collect_due_opens(now);
            }
            Command::OpenLink(kind) => {
                let (link, signals) = self.controller.open_link(kind);
                self.apply(signals, now);
                self.launches.extend(link);
            }
            Command::ClickAt(column, row) => self.click(column, row, now),
            Command::Escape => {
                self.panels.on_escape();
            }
            Command::Resize(width, height) => self.viewport = Rect::new(0, 0, width, height),
            Command::Tick => {
                self.toaster.tick(now);
                self.collect_due_opens(now);
            }
            Command::Quit => {
                let cancelled = self.controller.cancel_pending_opens();
                if cancelled > 0 {
                    tracing::debug!(cancelled, "dropped pending opens on quit");
                }
                self.should_quit = true;
            }
            Command::None => {}
        }
    }

    fn submit(&mut self, now: Instant) {
        if self.panels.focus() == Focus::History && self.panels.history_visible() {
            let index = self.history_cursor;
            self.dispatch(Command::PickHistory(index), now);
            return;
        }

        match self.suggestion_cursor {
            Some(index) if self.panels.suggestions_visible() => {
                self.dispatch(Command::PickSuggestion(index), now);
            }
            _ => {
                let query = self.query.clone();
                let signals = self.controller.search(&query);
                self.apply(signals, now);
            }
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        if self.panels.focus() == Focus::History && self.panels.history_visible() {
            let len = self.controller.history().len();
            self.history_cursor = step(Some(self.history_cursor), len, delta).unwrap_or(0);
            return;
        }

        if self.panels.suggestions_visible() {
            self.suggestion_cursor = step(self.suggestion_cursor, self.suggestions.len(), delta);
        }
    }

    fn set_sort(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.history_cursor = 0;
    }

    fn request_removal(&mut self) {
        if !self.panels.history_visible() {
            return;
        }
        self.pending_removal = self.history_rows().get(self.history_cursor).cloned();
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        let hit = view::hit_test(self, self.viewport, column, row);
        self.panels.on_click(click_target(hit));

        match hit {
            Hit::Input => self.dispatch(Command::FocusInput, now),
            Hit::Suggestion(Some(index)) => self.dispatch(Command::PickSuggestion(index), now),
            Hit::History(Some(index)) => {
                self.history_cursor = index;
                self.dispatch(Command::PickHistory(index), now);
            }
            Hit::HistoryToggle => self.dispatch(Command::ToggleHistory, now),
            Hit::SortToggle => self.dispatch(Command::CycleSort, now),
            Hit::Link(kind) => self.dispatch(Command::OpenLink(kind), now),
            Hit::OpenAll => self.dispatch(Command::OpenAll, now),
            Hit::Suggestion(None) | Hit::History(None) | Hit::Elsewhere => {}
        }
    }

    fn collect_due_opens(&mut self, now: Instant) {
        let due = self.controller.take_due_opens(now);
        self.launches.extend(due.into_iter().map(|pending| pending.link));
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self.controller.suggestions(&self.query);
        self.suggestion_cursor = None;
        self.panels.on_typing(!self.suggestions.is_empty());
    }

    fn apply(&mut self, signals: Vec<Signal>, now: Instant) {
        for signal in signals {
            match signal {
                Signal::ResultAvailable => {
                    if let Some(record) = self.controller.current() {
                        self.query = record.name.clone();
                    }
                    self.suggestions.clear();
                    self.suggestion_cursor = None;
                    self.panels.on_selection();
                }
                Signal::HistoryChanged => {
                    let len = self.controller.history().len();
                    self.history_cursor = self.history_cursor.min(len.saturating_sub(1));
                }
                Signal::Notify(message) => self.toaster.show(message, now),
            }
        }
    }
}

fn click_target(hit: Hit) -> ClickTarget {
    match hit {
        Hit::Input => ClickTarget::Input,
        Hit::Suggestion(_) => ClickTarget::Suggestions,
        Hit::History(_) | Hit::HistoryToggle | Hit::SortToggle => ClickTarget::History,
        Hit::Link(_) | Hit::OpenAll | Hit::Elsewhere => ClickTarget::Elsewhere,
    }
}

fn step(current: Option<usize>, len: usize, delta: i32) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let max = len - 1;
    let next = match current {
        None if delta > 0 => 0,
        None => return None,
        Some(index) if delta < 0 => index.saturating_sub(1),
        Some(index) if delta > 0 => (index + 1).min(max),
        Some(index) => index.min(max),
    };
    Some(next)
}
