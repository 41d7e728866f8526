#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Suggestions,
    History,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    suggestions_visible: bool,
    history_visible: bool,
    focus: Focus,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            suggestions_visible: false,
            history_visible: false,
            focus: Focus::Input,
        }
    }
}

impl PanelState {
    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn history_visible(&self) -> bool {
        self.history_visible
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn on_typing(&mut self, has_suggestions: bool) {
        self.focus = Focus::Input;
        self.suggestions_visible = has_suggestions;
    }

    pub fn on_toggle_history(&mut self) -> bool {
        self.history_visible = !self.history_visible;
        self.focus = if self.history_visible {
            Focus::History
        } else {
            Focus::Input
        };
        self.history_visible
    }

    pub fn on_selection(&mut self) {
        self.suggestions_visible = false;
        self.history_visible = false;
        self.focus = Focus::Input;
    }

    pub fn on_click(&mut self, target: ClickTarget) {
        if !matches!(target, ClickTarget::Input | ClickTarget::Suggestions) {
            self.suggestions_visible = false;
        }
        if target != ClickTarget::History {
            self.history_visible = false;
        }
        self.focus = match target {
            ClickTarget::History if self.history_visible => Focus::History,
            _ => Focus::Input,
        };
    }

    pub fn on_escape(&mut self) -> bool {
        if self.history_visible {
            self.history_visible = false;
            self.focus = Focus::Input;
            return true;
        }
        if self.suggestions_visible {
            self.suggestions_visible = false;
            return true;
        }
        false
    }
}
