use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::input::link_shortcut;
use crate::links::LinkKind;
use crate::model::SortOrder;
use crate::panels::Focus;

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;
const HIGHLIGHT_BG: Color = Color::Rgb(30, 50, 70);
const HISTORY_PANEL_WIDTH: u16 = 56;

// Row offsets inside the result panel's border.
const LINK_FIRST_ROW: u16 = 3;
const OPEN_ALL_ROW: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    Suggestion(Option<usize>),
    History(Option<usize>),
    HistoryToggle,
    SortToggle,
    Link(LinkKind),
    OpenAll,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub input: Rect,
    pub result: Rect,
    pub history_bar: Rect,
    pub toast: Rect,
    pub footer: Rect,
    pub suggestions: Option<Rect>,
    pub history: Option<Rect>,
}

pub fn regions(app: &App, area: Rect) -> Regions {
    let [header, input, result, history_bar, toast, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let suggestions = (app.panels().suggestions_visible() && !app.suggestions().is_empty())
        .then(|| Rect {
            x: input.x,
            y: result.y,
            width: input.width,
            height: bordered_height(app.suggestions().len(), result.height),
        });

    let history = app.panels().history_visible().then(|| {
        let height = bordered_height(app.controller().history().len().max(1), result.height);
        let width = result.width.min(HISTORY_PANEL_WIDTH);
        Rect {
            x: result.x + result.width - width,
            y: history_bar.y.saturating_sub(height),
            width,
            height,
        }
    });

    Regions {
        header,
        input,
        result,
        history_bar,
        toast,
        footer,
        suggestions,
        history,
    }
}

pub fn hit_test(app: &App, area: Rect, column: u16, row: u16) -> Hit {
    let regions = regions(app, area);
    let position = Position::new(column, row);

    if let Some(rect) = regions.history.filter(|rect| rect.contains(position)) {
        let len = app.controller().history().len();
        let start = window_start(Some(app.history_cursor()), inner_rows(rect));
        return Hit::History(row_index(rect, row, start, len));
    }

    if let Some(rect) = regions.suggestions.filter(|rect| rect.contains(position)) {
        let start = window_start(app.suggestion_cursor(), inner_rows(rect));
        return Hit::Suggestion(row_index(rect, row, start, app.suggestions().len()));
    }

    if regions.input.contains(position) {
        return Hit::Input;
    }

    if regions.history_bar.contains(position) {
        let bar = regions.history_bar;
        if column >= bar.x + bar.width / 2 {
            return Hit::SortToggle;
        }
        return Hit::HistoryToggle;
    }

    if regions.result.contains(position) {
        if let Some(links) = app.controller().links() {
            let offset = row.saturating_sub(regions.result.y + 1);
            let link_rows = LINK_FIRST_ROW..LINK_FIRST_ROW + 4;
            if link_rows.contains(&offset) {
                let link = links.panel_order()[usize::from(offset - LINK_FIRST_ROW)];
                return Hit::Link(link.kind);
            }
            if offset == OPEN_ALL_ROW {
                return Hit::OpenAll;
            }
        }
    }

    Hit::Elsewhere
}

pub fn render(f: &mut Frame, app: &App) {
    let regions = regions(app, f.area());

    render_header(f, regions.header);
    render_input(f, app, regions.input);
    render_result(f, app, regions.result);
    render_history_bar(f, app, regions.history_bar);
    render_toast(f, app, regions.toast);
    render_footer(f, app, regions.footer);

    if let Some(rect) = regions.suggestions {
        render_suggestions(f, app, rect);
    }
    if let Some(rect) = regions.history {
        render_history(f, app, rect);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " tickerlink ",
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" company search · disclosure shortcuts", Style::default().fg(DIM)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.panels().focus() == Focus::Input;
    let border = if focused { ACCENT } else { DIM };
    let text = if app.query().is_empty() {
        Line::from(Span::styled("Company name or code", Style::default().fg(DIM)))
    } else {
        Line::from(app.query())
    };
    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Search "),
    );
    f.render_widget(input, area);

    if focused && app.pending_removal().is_none() {
        let typed = Span::raw(app.query()).width() as u16;
        let x = (area.x + 1 + typed).min(area.right().saturating_sub(2));
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM))
        .title(" Result ");

    let (Some(record), Some(links)) = (app.controller().current(), app.controller().links())
    else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Type a company name or ticker code and press Enter.",
            Style::default().fg(DIM),
        )))
        .block(block);
        f.render_widget(hint, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            record.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Code: {}", record.code),
            Style::default().fg(DIM),
        )),
        Line::from(""),
    ];
    for link in links.panel_order() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", link_shortcut(link.kind)),
                Style::default().fg(ACCENT),
            ),
            Span::styled(
                format!("{:<16}", link.label()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(link.url.as_str(), Style::default().fg(DIM)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[^O] ", Style::default().fg(ACCENT)),
        Span::styled(
            "Open all links",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history_bar(f: &mut Frame, app: &App, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let arrow = if app.panels().history_visible() { "▴" } else { "▾" };
    let toggle = Line::from(vec![
        Span::styled("[^R] ", Style::default().fg(ACCENT)),
        Span::raw(format!(
            "History ({}) {arrow}",
            app.controller().history().len()
        )),
    ]);
    f.render_widget(Paragraph::new(toggle), left);

    let radio = |order: SortOrder| {
        let mark = if app.sort_order() == order { "●" } else { "○" };
        format!("{mark} {}", order.label())
    };
    let sort = Line::from(vec![
        Span::styled("[^S] ", Style::default().fg(ACCENT)),
        Span::raw(format!(
            "Sort: {}  {}",
            radio(SortOrder::Recent),
            radio(SortOrder::Alphabetical)
        )),
    ]);
    f.render_widget(Paragraph::new(sort), right);
}

fn render_toast(f: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = app.toast() {
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(line), area);
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.pending_removal() {
        Some(entry) => Line::from(Span::styled(
            format!(" Remove \"{}\" from history? (y/n)", entry.name),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            " Enter search · ↑↓ select · Tab history · Del remove · ^O open all · Esc close · ^C quit",
            Style::default().fg(DIM),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let visible = inner_rows(area);
    let start = window_start(app.suggestion_cursor(), visible);
    let lines: Vec<Line> = app
        .suggestions()
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(index, record)| {
            let line = Line::from(vec![
                Span::raw(record.name.as_str()),
                Span::styled(format!("  {}", record.code), Style::default().fg(DIM)),
            ]);
            if app.suggestion_cursor() == Some(index) {
                line.style(Style::default().bg(HIGHLIGHT_BG))
            } else {
                line
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} matches ", app.suggestions().len()));
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.history_rows();
    let focused = app.panels().focus() == Focus::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { ACCENT } else { DIM }))
        .title(format!(" History · {} ", app.sort_order().label()));

    f.render_widget(Clear, area);
    if rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No history yet.",
            Style::default().fg(DIM),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let visible = inner_rows(area);
    let start = window_start(Some(app.history_cursor()), visible);
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(index, entry)| {
            let line = Line::from(vec![
                Span::raw(entry.name.as_str()),
                Span::styled(format!("  {}", entry.code), Style::default().fg(DIM)),
            ]);
            if focused && index == app.history_cursor() {
                line.style(Style::default().bg(HIGHLIGHT_BG))
            } else {
                line
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn bordered_height(rows: usize, available: u16) -> u16 {
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_add(2).min(available)
}

fn inner_rows(rect: Rect) -> usize {
    usize::from(rect.height.saturating_sub(2))
}

fn window_start(cursor: Option<usize>, visible: usize) -> usize {
    match cursor {
        Some(cursor) if visible > 0 => (cursor + 1).saturating_sub(visible),
        _ => 0,
    }
}

fn row_index(rect: Rect, row: u16, start: usize, len: usize) -> Option<usize> {
    let inner_top = rect.y + 1;
    let inner_bottom = rect.bottom().saturating_sub(1);
    if row < inner_top || row >= inner_bottom {
        return None;
    }
    let index = start + usize::from(row - inner_top);
    (index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{row_index, window_start};

    #[test]
    fn window_keeps_cursor_visible() {
        assert_eq!(window_start(None, 5), 0);
        assert_eq!(window_start(Some(3), 5), 0);
        assert_eq!(window_start(Some(7), 5), 3);
        assert_eq!(window_start(Some(7), 0), 0);
    }

    #[test]
    fn row_index_ignores_borders_and_blank_rows() {
        let rect = Rect::new(0, 4, 20, 6);
        assert_eq!(row_index(rect, 4, 0, 10), None);
        assert_eq!(row_index(rect, 5, 0, 10), Some(0));
        assert_eq!(row_index(rect, 8, 2, 10), Some(5));
        assert_eq!(row_index(rect, 9, 0, 10), None);
        assert_eq!(row_index(rect, 6, 0, 1), None);
    }
}
