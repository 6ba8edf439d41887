use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use rust_i18n::t;

use crate::app::{App, AppScreen};
use crate::session::sentence::SentenceState;
use crate::session::syllable::{MAX_ATTEMPTS, SyllablePhase};
use crate::ui::components::feedback::Feedback;
use crate::ui::components::notice::NoticeBox;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::components::sentence_panel::{DictationBox, RetryCard, SentencePanel};
use crate::ui::components::syllable_board::SyllableBoard;
use crate::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Home => render_home(frame, app),
        AppScreen::Syllables => render_syllables(frame, app),
        AppScreen::Sentence => render_sentence(frame, app),
    }

    if let Some(ref notice) = app.notice {
        let popup = centered_rect(50, 30, area);
        frame.render_widget(
            NoticeBox {
                notice,
                theme: app.theme,
            },
            popup,
        );
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let progress = t!(
        "app.progress",
        current = app.index + 1,
        total = app.catalog.len()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {progress}"),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect, hint: &str) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(&[hint.trim()], area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn footer_height(hint: &str, width: u16) -> u16 {
    pack_hint_lines(&[hint.trim()], width as usize).len().max(1) as u16
}

fn render_home(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", t!("app.title")),
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = centered_rect(50, 70, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    render_footer(frame, app, layout[2], &t!("menu.footer"));
}

fn render_syllables(frame: &mut Frame, app: &App) {
    let Some(ref exercise) = app.syllables else {
        return;
    };
    let area = frame.area();
    let now = Instant::now();

    let hint = Feedback::footer(exercise, now).unwrap_or_else(|| t!("syllables.footer").into_owned());
    let app_layout = AppLayout::new(area, footer_height(&hint, area.width));
    render_header(frame, app, app_layout.header);

    let show_media = app_layout.tier.show_media();
    let constraints = if show_media {
        vec![Constraint::Min(8), Constraint::Length(3)]
    } else {
        vec![Constraint::Min(6)]
    };
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    frame.render_widget(
        SyllableBoard::new(exercise, app.theme).show_media(show_media),
        main[0],
    );
    if show_media {
        frame.render_widget(
            ProgressBar::new(
                &t!("error.attempts"),
                exercise.attempts(),
                MAX_ATTEMPTS,
                app.theme,
            ),
            main[1],
        );
    }

    if exercise.phase() != SyllablePhase::Playing {
        let popup = centered_rect(50, 50, app_layout.main);
        frame.render_widget(Feedback::new(exercise, app.theme, now), popup);
    }

    render_footer(frame, app, app_layout.footer, &hint);
}

fn render_sentence(frame: &mut Frame, app: &App) {
    let Some(ref exercise) = app.sentence else {
        return;
    };
    let area = frame.area();

    let hint = if app.dictation.is_some() {
        t!("sentence.dictation_footer").into_owned()
    } else if exercise.state() == SentenceState::Retry {
        t!("retry.footer").into_owned()
    } else {
        SentencePanel::footer(exercise)
    };
    let app_layout = AppLayout::new(area, footer_height(&hint, area.width));
    render_header(frame, app, app_layout.header);

    frame.render_widget(SentencePanel::new(exercise, app.theme), app_layout.main);

    if exercise.state() == SentenceState::Retry {
        let popup = centered_rect(50, 40, app_layout.main);
        frame.render_widget(RetryCard { theme: app.theme }, popup);
    }

    if let Some(ref input) = app.dictation {
        let main = app_layout.main;
        let popup = Rect::new(
            main.x + 2,
            main.y + main.height.saturating_sub(4) / 2,
            main.width.saturating_sub(4),
            main.height.min(3),
        );
        frame.render_widget(
            DictationBox {
                input,
                theme: app.theme,
            },
            popup,
        );
    }

    render_footer(frame, app, app_layout.footer, &hint);
}
