use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
    Warning,
    Info,
}

/// What dismissing the notice does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    Dismiss,
    GoHome,
}

/// Blocking message box; it must be acknowledged before play continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub action: NoticeAction,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            action: NoticeAction::Dismiss,
        }
    }

    pub fn then(mut self, action: NoticeAction) -> Self {
        self.action = action;
        self
    }

    pub fn speech_unsupported() -> Self {
        Self::new(
            NoticeKind::Warning,
            &t!("notice.speech_title"),
            &t!("notice.speech_unsupported"),
        )
    }

    pub fn completed() -> Self {
        Self::new(
            NoticeKind::Success,
            &t!("notice.completed_title"),
            &t!("notice.completed"),
        )
        .then(NoticeAction::GoHome)
    }

    fn color(&self, theme: &Theme) -> Color {
        let colors = &theme.colors;
        match self.kind {
            NoticeKind::Error => colors.error(),
            NoticeKind::Success => colors.success(),
            NoticeKind::Warning => colors.warning(),
            NoticeKind::Info => colors.accent(),
        }
    }
}

pub struct NoticeBox<'a> {
    pub notice: &'a Notice,
    pub theme: &'a Theme,
}

impl Widget for NoticeBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let accent = self.notice.color(self.theme);

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", self.notice.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.notice.message.clone(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("[Enter] {}", t!("notice.ok")),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_notice_returns_home() {
        let notice = Notice::completed();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.action, NoticeAction::GoHome);
        assert!(!notice.message.is_empty());
    }

    #[test]
    fn speech_notice_only_dismisses() {
        let notice = Notice::speech_unsupported();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.action, NoticeAction::Dismiss);
    }

    #[test]
    fn renders_message() {
        let theme = Theme::default();
        let notice = Notice::new(NoticeKind::Info, "Aviso", "hola");
        let area = Rect::new(0, 0, 30, 7);
        let mut buf = Buffer::empty(area);
        NoticeBox {
            notice: &notice,
            theme: &theme,
        }
        .render(area, &mut buf);
        let row: String = (0..30).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("hola"));
    }
}
