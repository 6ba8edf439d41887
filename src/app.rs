use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::event::AppEvent;
use crate::generator::{self, SentenceGenerator, sentence_or_fallback};
use crate::session::Continuation;
use crate::session::sentence::{SentenceExercise, SentenceState, Verdict};
use crate::session::syllable::{SyllableExercise, SyllablePhase};
use crate::speech::{self, RecognitionSettings, SpeechBackend, SpeechEvent};
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::notice::{Notice, NoticeAction};
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;
use crate::words::catalog::Catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Syllables,
    Sentence,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    /// Position of the active record in `catalog`.
    pub index: usize,
    /// Where "play" starts from.
    pub start_index: usize,
    pub syllables: Option<SyllableExercise>,
    pub sentence: Option<SentenceExercise>,
    pub notice: Option<Notice>,
    pub dictation: Option<LineInput>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    generator: Arc<dyn SentenceGenerator>,
    speech: Option<SpeechBackend>,
    events: Sender<AppEvent>,
    rng: SmallRng,
    generation: u64,
}

impl App {
    pub fn new(config: Config, events: Sender<AppEvent>) -> Result<Self> {
        let catalog = Catalog::load(&config).context("could not load the word list")?;
        let generator = generator::from_config(&config, &catalog);
        let speech = SpeechBackend::detect(&config.speech);
        Ok(Self::with_parts(
            config,
            catalog,
            generator,
            speech,
            events,
            SmallRng::from_entropy(),
        ))
    }

    pub fn with_parts(
        config: Config,
        catalog: Catalog,
        generator: Arc<dyn SentenceGenerator>,
        speech: Option<SpeechBackend>,
        events: Sender<AppEvent>,
        rng: SmallRng,
    ) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let mut app = Self {
            screen: AppScreen::Home,
            catalog,
            index: 0,
            start_index: 0,
            syllables: None,
            sentence: None,
            notice: None,
            dictation: None,
            menu,
            theme,
            config,
            should_quit: false,
            generator,
            speech,
            events,
            rng,
            generation: 0,
        };
        app.refresh_menu();
        app
    }

    /// Where "play" begins; out-of-range values clamp to the last word.
    pub fn set_start(&mut self, index: usize) {
        let last = self.catalog.len().saturating_sub(1);
        self.start_index = index.min(last);
        self.index = self.start_index;
        self.refresh_menu();
    }

    fn refresh_menu(&mut self) {
        self.menu.start_at = self.start_index + 1;
        self.menu.resume_at = self.index + 1;
        self.menu.total = self.catalog.len();
    }

    pub fn has_speech(&self) -> bool {
        self.speech.is_some()
    }

    // --- navigation -------------------------------------------------------

    pub fn go_home(&mut self) {
        self.screen = AppScreen::Home;
        self.syllables = None;
        self.sentence = None;
        self.dictation = None;
        // Anything still in flight belongs to the exercise we just left.
        self.generation += 1;
        self.refresh_menu();
    }

    pub fn go_to_syllables(&mut self, index: usize) {
        let Some(record) = self.catalog.get(index) else {
            self.go_home();
            return;
        };
        info!(index, word = %record.word, "starting syllable exercise");
        let exercise = SyllableExercise::new(record, &mut self.rng, self.config.success_delay());
        self.index = index;
        self.sentence = None;
        self.dictation = None;
        self.syllables = Some(exercise);
        self.screen = AppScreen::Syllables;
    }

    pub fn go_to_sentence(&mut self) {
        let Some(record) = self.catalog.get(self.index) else {
            self.go_home();
            return;
        };
        self.generation += 1;
        let generation = self.generation;
        let word = record.word.clone();
        info!(index = self.index, word = %word, generation, "starting sentence exercise");

        self.syllables = None;
        self.dictation = None;
        self.sentence = Some(SentenceExercise::new(self.index, &word, generation));
        self.screen = AppScreen::Sentence;

        let generator = Arc::clone(&self.generator);
        let tx = self.events.clone();
        thread::spawn(move || {
            let sentence = sentence_or_fallback(generator.as_ref(), &word);
            let _ = tx.send(AppEvent::SentenceReady {
                generation,
                sentence,
            });
        });
    }

    /// The current word is done: next word, or the end-of-game notice.
    fn finish_word(&mut self) {
        if self.catalog.is_last(self.index) {
            info!(words = self.catalog.len(), "all words completed");
            self.index = 0;
            self.start_index = 0;
            self.go_home();
            self.notice = Some(Notice::completed());
        } else {
            self.go_to_syllables(self.index + 1);
        }
    }

    // --- events -----------------------------------------------------------

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
            AppEvent::SentenceReady {
                generation,
                sentence,
            } => self.receive_sentence(generation, sentence),
            AppEvent::Speech { generation, event } => self.receive_speech(generation, event),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.screen != AppScreen::Syllables {
            return;
        }
        let continuation = match self.syllables.as_mut() {
            Some(exercise) => exercise.poll(now),
            None => Continuation::Stay,
        };
        if continuation == Continuation::AdvanceToSentence {
            self.go_to_sentence();
        }
    }

    fn receive_sentence(&mut self, generation: u64, sentence: String) {
        let stored = match self.sentence.as_mut() {
            Some(exercise) => exercise.receive_sentence(generation, sentence),
            None => false,
        };
        if stored {
            debug!(generation, "sentence ready");
        } else {
            debug!(generation, "discarding stale sentence");
        }
    }

    fn receive_speech(&mut self, generation: u64, event: SpeechEvent) {
        let Some(exercise) = self.sentence.as_mut() else {
            return;
        };
        if exercise.generation() != generation {
            debug!(generation, "discarding stale speech event");
            return;
        }
        match event {
            SpeechEvent::Started => exercise.begin_listening(),
            SpeechEvent::Result(raw) => exercise.receive_transcript(&raw),
            SpeechEvent::Error(_) => exercise.recognition_failed(),
        }
    }

    // --- actions ------------------------------------------------------------

    /// Start a speech capture for the active sentence.
    pub fn activate_microphone(&mut self) {
        let Some(exercise) = self.sentence.as_mut() else {
            return;
        };
        if matches!(
            exercise.state(),
            SentenceState::Retry | SentenceState::AwaitingSpeech
        ) {
            return;
        }

        match self.speech.clone() {
            None => {
                self.notice = Some(Notice::speech_unsupported());
            }
            Some(SpeechBackend::Keyboard) => {
                exercise.begin_listening();
                self.dictation = Some(LineInput::new(""));
            }
            Some(SpeechBackend::Recognizer(recognizer)) => {
                // Listening from now on, so repeated presses cannot start a
                // second capture before the worker reports in.
                exercise.begin_listening();
                let generation = exercise.generation();
                let tx = self.events.clone();
                let settings = RecognitionSettings::single_shot(&self.config.speech.locale);
                speech::spawn_capture(recognizer, settings, move |event| {
                    let _ = tx.send(AppEvent::Speech { generation, event });
                });
            }
        }
    }

    pub fn validate_sentence(&mut self) {
        let Some(exercise) = self.sentence.as_mut() else {
            return;
        };
        match exercise.validate() {
            Some(Verdict::Matched) => {
                info!(index = self.index, "sentence repeated correctly");
                self.finish_word();
            }
            Some(Verdict::Mismatch) => info!(index = self.index, "sentence did not match"),
            None => {}
        }
    }

    pub fn check_answer(&mut self, now: Instant) {
        if let Some(exercise) = self.syllables.as_mut() {
            if let Some(correct) = exercise.check(now) {
                info!(
                    index = self.index,
                    correct,
                    attempts = exercise.attempts(),
                    "answer checked"
                );
            }
        }
    }

    pub fn continue_from_feedback(&mut self) {
        let continuation = match self.syllables.as_mut() {
            Some(exercise) => match exercise.phase() {
                SyllablePhase::Success(_) => exercise.continue_after_success(),
                SyllablePhase::Error => exercise.continue_after_error(&mut self.rng),
                SyllablePhase::Playing => Continuation::Stay,
            },
            None => Continuation::Stay,
        };
        if continuation == Continuation::AdvanceToSentence {
            self.go_to_sentence();
        }
    }

    // --- keys ---------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // A notice blocks everything behind it.
        if self.notice.is_some() {
            self.handle_notice_key(key);
            return;
        }

        if self.dictation.is_some() {
            self.handle_dictation_key(key);
            return;
        }

        match self.screen {
            AppScreen::Home => self.handle_home_key(key),
            AppScreen::Syllables => self.handle_syllable_key(key),
            AppScreen::Sentence => self.handle_sentence_key(key),
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) {
        if !matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('o')
        ) {
            return;
        }
        if let Some(notice) = self.notice.take() {
            match notice.action {
                NoticeAction::Dismiss => {}
                NoticeAction::GoHome => self.go_home(),
            }
        }
    }

    fn handle_dictation_key(&mut self, key: KeyEvent) {
        let Some(input) = self.dictation.as_mut() else {
            return;
        };
        match input.handle(key) {
            InputResult::Continue => {}
            InputResult::Submit => {
                let text = input.value().to_string();
                self.dictation = None;
                if let Some(exercise) = self.sentence.as_mut() {
                    if text.trim().is_empty() {
                        exercise.recognition_failed();
                    } else {
                        exercise.receive_transcript(&text);
                    }
                }
            }
            InputResult::Cancel => {
                self.dictation = None;
                if let Some(exercise) = self.sentence.as_mut() {
                    exercise.cancel_listening();
                }
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.menu.prev(),
            KeyCode::Down | KeyCode::Char('j') => self.menu.next(),
            KeyCode::Char('1') => self.run_menu_action(MenuAction::Play),
            KeyCode::Char('2') => self.run_menu_action(MenuAction::Resume),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let action = self.menu.selected_action();
                self.run_menu_action(action);
            }
            _ => {}
        }
    }

    fn run_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Play => self.go_to_syllables(self.start_index),
            MenuAction::Resume => self.go_to_syllables(self.index),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn handle_syllable_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.go_home();
            return;
        }
        let Some(exercise) = self.syllables.as_mut() else {
            return;
        };

        match exercise.phase() {
            SyllablePhase::Playing => match key.code {
                KeyCode::Left | KeyCode::BackTab => exercise.focus_prev(),
                KeyCode::Right | KeyCode::Tab => exercise.focus_next(),
                KeyCode::Char(' ') => {
                    exercise.select_focused();
                }
                KeyCode::Enter => {
                    let focused = exercise.options().get(exercise.focus()).cloned();
                    if focused.is_some() && exercise.selected() == focused.as_deref() {
                        self.check_answer(Instant::now());
                    } else {
                        exercise.select_focused();
                    }
                }
                KeyCode::Char('c') => self.check_answer(Instant::now()),
                KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
                    let idx = ch as usize - '1' as usize;
                    exercise.select_index(idx);
                }
                _ => {}
            },
            SyllablePhase::Success(_) | SyllablePhase::Error => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                    self.continue_from_feedback()
                }
                _ => {}
            },
        }
    }

    fn handle_sentence_key(&mut self, key: KeyEvent) {
        let Some(exercise) = self.sentence.as_mut() else {
            return;
        };

        if exercise.state() == SentenceState::Retry {
            match key.code {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') => exercise.retry(),
                KeyCode::Esc | KeyCode::Char('h') => self.go_home(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.go_home(),
            KeyCode::Char('m') | KeyCode::Char(' ') => self.activate_microphone(),
            KeyCode::Enter => self.validate_sentence(),
            _ => {}
        }
    }
}
