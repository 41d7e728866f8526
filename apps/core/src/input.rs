use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::command::Command;
use crate::links::LinkKind;
use crate::panels::Focus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Input,
    History,
    ConfirmRemoval,
}

impl InputMode {
    pub fn for_app(app: &App) -> Self {
        if app.pending_removal().is_some() {
            return Self::ConfirmRemoval;
        }
        if app.panels().history_visible() && app.panels().focus() == Focus::History {
            return Self::History;
        }
        Self::Input
    }
}

pub fn link_shortcut(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Social => "^X",
        LinkKind::Disclosure => "^T",
        LinkKind::Quote => "^Y",
        LinkKind::WebSearch => "^G",
    }
}

pub fn map_event(event: &Event, mode: InputMode) -> Command {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return map_control(key);
            }

            match mode {
                InputMode::ConfirmRemoval => map_key_confirm(key),
                InputMode::History => map_key_history(key),
                InputMode::Input => map_key_input(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(width, height) => Command::Resize(*width, *height),
        _ => Command::None,
    }
}

fn map_control(key: &KeyEvent) -> Command {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('r') => Command::ToggleHistory,
        KeyCode::Char('s') => Command::CycleSort,
        KeyCode::Char('o') => Command::OpenAll,
        KeyCode::Char('u') => Command::ClearInput,
        KeyCode::Char('x') => Command::OpenLink(LinkKind::Social),
        KeyCode::Char('t') => Command::OpenLink(LinkKind::Disclosure),
        KeyCode::Char('y') => Command::OpenLink(LinkKind::Quote),
        KeyCode::Char('g') => Command::OpenLink(LinkKind::WebSearch),
        _ => Command::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Command {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Command::ClickAt(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => Command::MoveDown,
        MouseEventKind::ScrollUp => Command::MoveUp,
        _ => Command::None,
    }
}

fn map_key_input(key: &KeyEvent) -> Command {
    match key.code {
        KeyCode::Enter => Command::Submit,
        KeyCode::Up => Command::MoveUp,
        KeyCode::Down => Command::MoveDown,
        KeyCode::Tab => Command::ToggleHistory,
        KeyCode::Esc => Command::Escape,
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Char(c) => Command::Insert(c),
        _ => Command::None,
    }
}

fn map_key_history(key: &KeyEvent) -> Command {
    match key.code {
        KeyCode::Enter => Command::Submit,
        KeyCode::Up => Command::MoveUp,
        KeyCode::Down => Command::MoveDown,
        KeyCode::Delete => Command::RequestRemoveHistory,
        KeyCode::Tab | KeyCode::Esc => Command::ToggleHistory,
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Char(c) => Command::Insert(c),
        _ => Command::None,
    }
}

fn map_key_confirm(key: &KeyEvent) -> Command {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Command::ConfirmRemove,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Command::CancelRemove,
        _ => Command::None,
    }
}
