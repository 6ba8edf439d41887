use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::syllable::{MAX_ATTEMPTS, SyllableExercise, SyllablePhase};
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Popup shown after checking an answer: the success card with its
/// countdown, or the error card with the attempt bar.
pub struct Feedback<'a> {
    exercise: &'a SyllableExercise,
    theme: &'a Theme,
    now: Instant,
}

impl<'a> Feedback<'a> {
    pub fn new(exercise: &'a SyllableExercise, theme: &'a Theme, now: Instant) -> Self {
        Self {
            exercise,
            theme,
            now,
        }
    }

    /// Footer hint for the feedback currently on screen, if any.
    pub fn footer(exercise: &SyllableExercise, now: Instant) -> Option<String> {
        match exercise.phase() {
            SyllablePhase::Playing => None,
            SyllablePhase::Success(countdown) => {
                let seconds = countdown.remaining(now).as_secs_f32().ceil() as u64;
                Some(t!("success.footer", seconds = seconds).into_owned())
            }
            SyllablePhase::Error => {
                let action = if exercise.cap_reached() {
                    t!("error.continue_action")
                } else {
                    t!("error.retry_action")
                };
                Some(t!("error.footer", action = action).into_owned())
            }
        }
    }

    fn card(&self, accent: Color, lines: Vec<Line<'a>>, area: Rect, buf: &mut Buffer) -> Rect {
        let colors = &self.theme.colors;
        Clear.render(area, buf);
        let block = Block::bordered()
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
        inner
    }
}

impl Widget for Feedback<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let word = self.exercise.record().word.clone();
        let bold = Modifier::BOLD;

        match self.exercise.phase() {
            SyllablePhase::Playing => {}
            SyllablePhase::Success(_) => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        t!("success.title").into_owned(),
                        Style::default().fg(colors.success()).add_modifier(bold),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        word.to_uppercase(),
                        Style::default().fg(colors.fg()).add_modifier(bold),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        t!("success.text").into_owned(),
                        Style::default().fg(colors.fg()),
                    )),
                ];
                self.card(colors.success(), lines, area, buf);
            }
            SyllablePhase::Error => {
                let mut lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        t!("error.title").into_owned(),
                        Style::default().fg(colors.error()).add_modifier(bold),
                    )),
                    Line::from(""),
                ];
                if self.exercise.cap_reached() {
                    lines.push(Line::from(Span::styled(
                        t!("error.reveal_text").into_owned(),
                        Style::default().fg(colors.fg()),
                    )));
                    lines.push(Line::from(Span::styled(
                        word.to_uppercase(),
                        Style::default().fg(colors.warning()).add_modifier(bold),
                    )));
                    self.card(colors.error(), lines, area, buf);
                } else {
                    lines.push(Line::from(Span::styled(
                        t!("error.retry_text").into_owned(),
                        Style::default().fg(colors.fg()),
                    )));
                    let inner = self.card(colors.error(), lines, area, buf);

                    let rows = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Min(0), Constraint::Length(3)])
                        .split(inner);
                    let bar_area = Rect {
                        x: rows[1].x + 2,
                        width: rows[1].width.saturating_sub(4),
                        ..rows[1]
                    };
                    ProgressBar::new(
                        &t!("error.attempts"),
                        self.exercise.attempts(),
                        MAX_ATTEMPTS,
                        self.theme,
                    )
                    .render(bar_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::time::Duration;

    use crate::words::testing::gato;

    fn exercise() -> SyllableExercise {
        let mut rng = SmallRng::seed_from_u64(3);
        SyllableExercise::new(&gato(), &mut rng, Duration::from_secs(3))
    }

    #[test]
    fn no_footer_while_playing() {
        assert!(Feedback::footer(&exercise(), Instant::now()).is_none());
    }

    #[test]
    fn footer_present_after_check() {
        let now = Instant::now();
        let mut ex = exercise();
        ex.select("ca");
        ex.check(now);
        assert!(Feedback::footer(&ex, now).is_some());

        let mut ex = exercise();
        ex.select("ga");
        ex.check(now);
        let footer = Feedback::footer(&ex, now).unwrap();
        assert!(footer.contains('3'));
    }

    fn miss(ex: &mut SyllableExercise, now: Instant) {
        let wrong = ex
            .options()
            .iter()
            .find(|o| !ex.record().is_correct(o))
            .cloned()
            .unwrap();
        ex.select(&wrong);
        ex.check(now);
    }

    fn screen(ex: &SyllableExercise, now: Instant) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        Feedback::new(ex, &theme, now).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn below_cap_offers_retry_with_attempts_bar() {
        let now = Instant::now();
        let mut ex = exercise();
        miss(&mut ex, now);

        let footer = Feedback::footer(&ex, now).unwrap();
        assert!(footer.contains(&*t!("error.retry_action")));
        assert!(!footer.contains(&*t!("error.continue_action")));

        let screen = screen(&ex, now);
        assert!(screen.contains("1/3"));
        assert!(!screen.contains("GATO"));
    }

    #[test]
    fn at_cap_reveals_word_without_bar() {
        let now = Instant::now();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ex = exercise();
        for _ in 0..3 {
            miss(&mut ex, now);
            if !ex.cap_reached() {
                ex.continue_after_error(&mut rng);
            }
        }
        assert!(ex.cap_reached());

        let footer = Feedback::footer(&ex, now).unwrap();
        assert!(footer.contains(&*t!("error.continue_action")));

        let screen = screen(&ex, now);
        assert!(screen.contains("GATO"));
        assert!(!screen.contains("3/3"));
    }
}
