use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::format::highlight_segments;
use crate::session::sentence::{SentenceExercise, Transcript};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// The sentence to repeat, with the word highlighted, and what was heard.
pub struct SentencePanel<'a> {
    exercise: &'a SentenceExercise,
    theme: &'a Theme,
}

impl<'a> SentencePanel<'a> {
    pub fn new(exercise: &'a SentenceExercise, theme: &'a Theme) -> Self {
        Self { exercise, theme }
    }

    fn sentence_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        match self.exercise.sentence() {
            None => Line::from(Span::styled(
                t!("sentence.loading").into_owned(),
                Style::default()
                    .fg(colors.muted())
                    .add_modifier(Modifier::ITALIC),
            )),
            Some(sentence) => {
                let plain = Style::default().fg(colors.fg());
                let marked = Style::default()
                    .fg(colors.highlight())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                let spans: Vec<Span<'a>> = highlight_segments(sentence, self.exercise.word())
                    .into_iter()
                    .map(|(text, hit)| Span::styled(text, if hit { marked } else { plain }))
                    .collect();
                Line::from(spans)
            }
        }
    }

    fn transcript_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        match self.exercise.transcript() {
            Transcript::Prompt => Line::from(Span::styled(
                t!("sentence.prompt").into_owned(),
                Style::default().fg(colors.muted()),
            )),
            Transcript::Listening => Line::from(Span::styled(
                t!("sentence.listening").into_owned(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Transcript::Heard(text) => Line::from(Span::styled(
                text.clone(),
                Style::default().fg(colors.fg()),
            )),
            Transcript::Failed => Line::from(Span::styled(
                t!("sentence.failed").into_owned(),
                Style::default().fg(colors.warning()),
            )),
        }
    }

    pub fn footer(exercise: &SentenceExercise) -> String {
        if exercise.is_loading() {
            t!("sentence.footer_loading").into_owned()
        } else {
            t!("sentence.footer").into_owned()
        }
    }
}

impl Widget for SentencePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(5)])
            .split(area);

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", self.exercise.word().to_uppercase()),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(rows[0]);
        block.render(rows[0], buf);

        let pad = inner.height.saturating_sub(1) / 2;
        let text_area = Rect::new(inner.x, inner.y + pad, inner.width, inner.height - pad);
        Paragraph::new(self.sentence_line())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let heard = Block::bordered()
            .title(" 🎙️ ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let heard_inner = heard.inner(rows[1]);
        heard.render(rows[1], buf);
        Paragraph::new(self.transcript_line())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(heard_inner, buf);
    }
}

/// "Almost!" card shown after a mismatch.
pub struct RetryCard<'a> {
    pub theme: &'a Theme,
}

impl Widget for RetryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("retry.title").into_owned(),
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                t!("retry.text").into_owned(),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("[Enter] {}", t!("retry.action")),
                Style::default().fg(colors.accent()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

/// Typed stand-in for the microphone.
pub struct DictationBox<'a> {
    pub input: &'a LineInput,
    pub theme: &'a Theme,
}

impl Widget for DictationBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(t!("sentence.dictation_title").into_owned())
            .title_bottom(t!("sentence.dictation_footer").into_owned())
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (before, cursor, after) = self.input.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let line = Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
            Span::styled(cursor.unwrap_or(' ').to_string(), cursor_style),
            Span::styled(after.to_string(), Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
