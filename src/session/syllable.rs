use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::Continuation;
use crate::words::record::WordRecord;

/// Wrong checks allowed before the exercise lets the player through anyway.
pub const MAX_ATTEMPTS: u32 = 3;

const EMPTY_BLANK: &str = "___";

/// Deadline for the success screen's automatic continue. It only exists
/// inside [`SyllablePhase::Success`], so leaving that phase drops it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    deadline: Instant,
}

impl Countdown {
    pub fn new(now: Instant, delay: Duration) -> Self {
        Self {
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyllablePhase {
    Playing,
    Success(Countdown),
    Error,
}

pub struct SyllableExercise {
    record: WordRecord,
    options: Vec<String>,
    selected: Option<String>,
    focus: usize,
    attempts: u32,
    phase: SyllablePhase,
    success_delay: Duration,
}

impl SyllableExercise {
    pub fn new<R: Rng + ?Sized>(record: &WordRecord, rng: &mut R, success_delay: Duration) -> Self {
        let mut exercise = Self {
            record: record.clone(),
            options: record.options.clone(),
            selected: None,
            focus: 0,
            attempts: 0,
            phase: SyllablePhase::Playing,
            success_delay,
        };
        exercise.options.shuffle(rng);
        exercise
    }

    pub fn record(&self) -> &WordRecord {
        &self.record
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn phase(&self) -> SyllablePhase {
        self.phase
    }

    pub fn cap_reached(&self) -> bool {
        self.attempts >= MAX_ATTEMPTS
    }

    /// The incomplete word with the pending selection (or a blank) filled in.
    pub fn display_word(&self) -> String {
        self.record
            .fill_blank(self.selected.as_deref().unwrap_or(EMPTY_BLANK))
    }

    /// Returns false when the option is not on offer or the exercise is not
    /// waiting for an answer.
    pub fn select(&mut self, option: &str) -> bool {
        if self.phase != SyllablePhase::Playing {
            return false;
        }
        match self.options.iter().position(|o| o == option) {
            Some(idx) => {
                self.focus = idx;
                self.selected = Some(option.to_string());
                true
            }
            None => false,
        }
    }

    pub fn select_index(&mut self, idx: usize) -> bool {
        match self.options.get(idx).cloned() {
            Some(option) => self.select(&option),
            None => false,
        }
    }

    pub fn select_focused(&mut self) -> bool {
        self.select_index(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.options.is_empty() {
            self.focus = (self.focus + 1) % self.options.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        if self.focus > 0 {
            self.focus -= 1;
        } else {
            self.focus = self.options.len() - 1;
        }
    }

    /// Grade the pending selection. `None` when there is nothing to grade.
    pub fn check(&mut self, now: Instant) -> Option<bool> {
        if self.phase != SyllablePhase::Playing {
            return None;
        }
        let selected = self.selected.as_deref()?;
        if self.record.is_correct(selected) {
            self.phase = SyllablePhase::Success(Countdown::new(now, self.success_delay));
            Some(true)
        } else {
            self.attempts = (self.attempts + 1).min(MAX_ATTEMPTS);
            self.phase = SyllablePhase::Error;
            Some(false)
        }
    }

    pub fn continue_after_success(&mut self) -> Continuation {
        if !matches!(self.phase, SyllablePhase::Success(_)) {
            return Continuation::Stay;
        }
        self.phase = SyllablePhase::Playing;
        self.selected = None;
        self.focus = 0;
        Continuation::AdvanceToSentence
    }

    /// At the attempt cap the player is passed through to the sentence;
    /// otherwise the options are reshuffled for another try.
    pub fn continue_after_error<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Continuation {
        if self.phase != SyllablePhase::Error {
            return Continuation::Stay;
        }
        if self.cap_reached() {
            self.phase = SyllablePhase::Playing;
            self.selected = None;
            return Continuation::AdvanceToSentence;
        }
        self.phase = SyllablePhase::Playing;
        self.selected = None;
        self.focus = 0;
        self.options.shuffle(rng);
        Continuation::Stay
    }

    /// Fire the success countdown once it is due.
    pub fn poll(&mut self, now: Instant) -> Continuation {
        match self.phase {
            SyllablePhase::Success(countdown) if countdown.is_due(now) => {
                self.continue_after_success()
            }
            _ => Continuation::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::catalog::Catalog;
    use crate::words::testing::gato;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const DELAY: Duration = Duration::from_millis(2000);

    fn exercise() -> (SyllableExercise, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(7);
        (SyllableExercise::new(&gato(), &mut rng, DELAY), rng)
    }

    fn wrong_option(ex: &SyllableExercise) -> String {
        ex.options()
            .iter()
            .find(|o| o.as_str() != ex.record().answer)
            .cloned()
            .unwrap()
    }

    #[test]
    fn options_are_a_permutation_for_every_record() {
        let catalog = Catalog::embedded().unwrap();
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            for record in catalog.records() {
                let ex = SyllableExercise::new(record, &mut rng, DELAY);
                let mut shown: Vec<&String> = ex.options().iter().collect();
                let mut defined: Vec<&String> = record.options.iter().collect();
                shown.sort();
                defined.sort();
                assert_eq!(shown, defined);
                assert!(ex.options().contains(&record.answer));
            }
        }
    }

    #[test]
    fn new_exercise_starts_clean() {
        let (ex, _) = exercise();
        assert_eq!(ex.phase(), SyllablePhase::Playing);
        assert_eq!(ex.attempts(), 0);
        assert!(ex.selected().is_none());
        assert_eq!(ex.display_word(), "___to");
    }

    #[test]
    fn select_only_accepts_offered_options() {
        let (mut ex, _) = exercise();
        assert!(!ex.select("zz"));
        assert!(ex.selected().is_none());
        assert!(ex.select("ca"));
        assert_eq!(ex.selected(), Some("ca"));
        assert_eq!(ex.display_word(), "cato");
    }

    #[test]
    fn check_without_selection_is_noop() {
        let (mut ex, _) = exercise();
        assert_eq!(ex.check(Instant::now()), None);
        assert_eq!(ex.phase(), SyllablePhase::Playing);
        assert_eq!(ex.attempts(), 0);
    }

    #[test]
    fn correct_selection_yields_success() {
        let (mut ex, _) = exercise();
        ex.select("ga");
        assert_eq!(ex.check(Instant::now()), Some(true));
        assert!(matches!(ex.phase(), SyllablePhase::Success(_)));
        assert_eq!(ex.attempts(), 0);
    }

    #[test]
    fn every_wrong_selection_yields_error() {
        let record = gato();
        for option in record.options.iter().filter(|o| **o != record.answer) {
            let (mut ex, _) = exercise();
            ex.select(option);
            assert_eq!(ex.check(Instant::now()), Some(false));
            assert_eq!(ex.phase(), SyllablePhase::Error);
            assert_eq!(ex.attempts(), 1);
        }
    }

    #[test]
    fn attempts_increment_and_force_advance_at_cap() {
        let (mut ex, mut rng) = exercise();
        for expected in 1..=MAX_ATTEMPTS {
            let wrong = wrong_option(&ex);
            ex.select(&wrong);
            ex.check(Instant::now());
            assert_eq!(ex.attempts(), expected);
            let next = ex.continue_after_error(&mut rng);
            if expected < MAX_ATTEMPTS {
                assert_eq!(next, Continuation::Stay);
                assert_eq!(ex.phase(), SyllablePhase::Playing);
                assert!(ex.selected().is_none());
            } else {
                assert_eq!(next, Continuation::AdvanceToSentence);
            }
        }
        assert!(ex.attempts() <= MAX_ATTEMPTS);
    }

    #[test]
    fn retry_reshuffles_but_keeps_option_set() {
        let (mut ex, mut rng) = exercise();
        let wrong = wrong_option(&ex);
        ex.select(&wrong);
        ex.check(Instant::now());
        ex.continue_after_error(&mut rng);
        let mut options = ex.options().to_vec();
        options.sort();
        assert_eq!(options, vec!["ca", "ga", "pa", "ta"]);
    }

    #[test]
    fn selection_is_locked_outside_playing() {
        let (mut ex, _) = exercise();
        ex.select("ta");
        ex.check(Instant::now());
        assert!(!ex.select("ga"));
        assert_eq!(ex.selected(), Some("ta"));
    }

    #[test]
    fn success_countdown_fires_only_when_due() {
        let (mut ex, _) = exercise();
        let start = Instant::now();
        ex.select("ga");
        ex.check(start);
        assert_eq!(ex.poll(start + Duration::from_millis(500)), Continuation::Stay);
        assert_eq!(ex.poll(start + DELAY), Continuation::AdvanceToSentence);
        assert_eq!(ex.phase(), SyllablePhase::Playing);
        // Already consumed: a second poll does nothing
        assert_eq!(ex.poll(start + DELAY * 2), Continuation::Stay);
    }

    #[test]
    fn manual_continue_consumes_countdown() {
        let (mut ex, _) = exercise();
        let start = Instant::now();
        ex.select("ga");
        ex.check(start);
        assert_eq!(ex.continue_after_success(), Continuation::AdvanceToSentence);
        assert_eq!(ex.poll(start + DELAY), Continuation::Stay);
    }

    #[test]
    fn keyboard_focus_wraps_and_selects() {
        let (mut ex, _) = exercise();
        ex.focus_prev();
        assert_eq!(ex.focus(), ex.options().len() - 1);
        ex.focus_next();
        assert_eq!(ex.focus(), 0);
        ex.focus_next();
        assert!(ex.select_focused());
        assert_eq!(ex.selected(), Some(ex.options()[1].as_str()));
    }

    #[test]
    fn countdown_remaining_saturates() {
        let start = Instant::now();
        let countdown = Countdown::new(start, DELAY);
        assert_eq!(countdown.remaining(start), DELAY);
        assert_eq!(countdown.remaining(start + DELAY * 3), Duration::ZERO);
    }
}
