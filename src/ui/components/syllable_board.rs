use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::syllable::SyllableExercise;
use crate::ui::theme::Theme;
use crate::words::record::BLANK;

/// The incomplete word, its caption and the row of syllable chips.
pub struct SyllableBoard<'a> {
    exercise: &'a SyllableExercise,
    theme: &'a Theme,
    show_media: bool,
}

impl<'a> SyllableBoard<'a> {
    pub fn new(exercise: &'a SyllableExercise, theme: &'a Theme) -> Self {
        Self {
            exercise,
            theme,
            show_media: true,
        }
    }

    pub fn show_media(mut self, show: bool) -> Self {
        self.show_media = show;
        self
    }

    /// Word line with the blank (or the picked syllable) emphasised.
    fn word_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let base = Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD);
        let blank = Style::default()
            .fg(colors.blank())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        let incomplete = &self.exercise.record().incomplete;
        let fill = self.exercise.selected().unwrap_or("___").to_string();
        let mut spans = Vec::new();
        match incomplete.split_once(BLANK) {
            Some((before, after)) => {
                spans.push(Span::styled(spaced(before), base));
                spans.push(Span::styled(spaced(&fill), blank));
                spans.push(Span::styled(spaced(after), base));
            }
            None => spans.push(Span::styled(spaced(incomplete), base)),
        }
        Line::from(spans)
    }

    fn option_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let mut spans = Vec::new();
        for (i, option) in self.exercise.options().iter().enumerate() {
            let is_selected = self.exercise.selected() == Some(option.as_str());
            let is_focused = self.exercise.focus() == i;

            let mut style = if is_selected {
                Style::default()
                    .fg(colors.option_selected_fg())
                    .bg(colors.option_selected_bg())
            } else {
                Style::default().fg(colors.option_fg()).bg(colors.option_bg())
            };
            if is_focused {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!(" {} {} ", i + 1, option), style));
        }
        Line::from(spans)
    }
}

/// Letter-spaced for a bigger look in the terminal.
fn spaced(text: &str) -> String {
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Widget for SyllableBoard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", t!("syllables.instruction")),
                Style::default().fg(colors.accent()),
            )))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let media_height = if self.show_media { 2 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(media_height),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(inner);

        if self.show_media {
            let record = self.exercise.record();
            let mut caption = vec![Line::from(Span::styled(
                t!("syllables.image", url = record.image).into_owned(),
                Style::default().fg(colors.muted()),
            ))];
            if record.audio.is_some() {
                caption.push(Line::from(Span::styled(
                    t!("syllables.audio").into_owned(),
                    Style::default().fg(colors.muted()),
                )));
            }
            Paragraph::new(caption)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(layout[0], buf);
        }

        let word_area = layout[1];
        let top_pad = word_area.height.saturating_sub(1) / 2;
        let word_rect = Rect::new(
            word_area.x,
            word_area.y + top_pad,
            word_area.width,
            word_area.height.min(1),
        );
        Paragraph::new(self.word_line())
            .alignment(Alignment::Center)
            .render(word_rect, buf);

        Paragraph::new(vec![Line::from(""), self.option_line()])
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        if self.exercise.selected().is_some() {
            let check = Line::from(Span::styled(
                format!("[c] {}", t!("syllables.check")),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(check)
                .alignment(Alignment::Center)
                .render(layout[3], buf);
        }
    }
}
