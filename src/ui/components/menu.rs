use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Resume,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 3] = [MenuAction::Play, MenuAction::Resume, MenuAction::Quit];

    fn key(self) -> &'static str {
        match self {
            MenuAction::Play => "1",
            MenuAction::Resume => "2",
            MenuAction::Quit => "q",
        }
    }
}

/// Home screen. Word positions are 1-based for display.
pub struct Menu<'a> {
    pub selected: usize,
    pub theme: &'a Theme,
    pub start_at: usize,
    pub resume_at: usize,
    pub total: usize,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            selected: 0,
            theme,
            start_at: 1,
            resume_at: 1,
            total: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % MenuAction::ALL.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = MenuAction::ALL.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        MenuAction::ALL[self.selected.min(MenuAction::ALL.len() - 1)]
    }

    fn label(&self, action: MenuAction) -> (String, String) {
        match action {
            MenuAction::Play => (
                t!("menu.play").into_owned(),
                t!("menu.play_desc", start = self.start_at).into_owned(),
            ),
            MenuAction::Resume => (
                t!("menu.resume").into_owned(),
                t!("menu.resume_desc", current = self.resume_at, total = self.total).into_owned(),
            ),
            MenuAction::Quit => (
                t!("menu.quit").into_owned(),
                t!("menu.quit_desc").into_owned(),
            ),
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").into_owned(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.tagline").into_owned(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(MenuAction::ALL.map(|_| Constraint::Length(3)))
            .split(layout[2]);

        for (i, action) in MenuAction::ALL.into_iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let (label, description) = self.label(action);

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(
                    format!(" {indicator} [{}] {label}", action.key()),
                    label_style,
                )),
                Line::from(Span::styled(
                    format!("     {description}"),
                    Style::default().fg(colors.muted()),
                )),
            ];
            if let Some(row) = rows.get(i) {
                Paragraph::new(lines).render(*row, buf);
            }
        }
    }
}
