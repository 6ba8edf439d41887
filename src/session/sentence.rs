use crate::session::format::{format_transcript, sentences_match};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transcript {
    /// Nothing captured yet.
    Prompt,
    Listening,
    /// Formatted recognizer output.
    Heard(String),
    /// Recognition failed; the player can try the microphone again.
    Failed,
}

/// Where the sentence exercise is; `comparing` happens inside
/// [`SentenceExercise::validate`] and is never observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentenceState {
    Fetching,
    Ready,
    AwaitingSpeech,
    Retry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Matched,
    Mismatch,
}

pub struct SentenceExercise {
    index: usize,
    word: String,
    generation: u64,
    sentence: Option<String>,
    transcript: Transcript,
    retry: bool,
}

impl SentenceExercise {
    /// A fresh exercise waiting for the sentence tagged `generation`.
    pub fn new(index: usize, word: &str, generation: u64) -> Self {
        Self {
            index,
            word: word.to_string(),
            generation,
            sentence: None,
            transcript: Transcript::Prompt,
            retry: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sentence(&self) -> Option<&str> {
        self.sentence.as_deref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.sentence.is_none()
    }

    pub fn state(&self) -> SentenceState {
        if self.retry {
            SentenceState::Retry
        } else if self.transcript == Transcript::Listening {
            SentenceState::AwaitingSpeech
        } else if self.is_loading() {
            SentenceState::Fetching
        } else {
            SentenceState::Ready
        }
    }

    /// Store the fetched sentence. Results for another generation are stale
    /// and ignored.
    pub fn receive_sentence(&mut self, generation: u64, sentence: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.sentence = Some(sentence);
        true
    }

    pub fn begin_listening(&mut self) {
        self.transcript = Transcript::Listening;
    }

    pub fn receive_transcript(&mut self, raw: &str) {
        self.transcript = Transcript::Heard(format_transcript(raw));
    }

    pub fn recognition_failed(&mut self) {
        self.transcript = Transcript::Failed;
    }

    /// Abandon a capture that never produced a result.
    pub fn cancel_listening(&mut self) {
        if self.transcript == Transcript::Listening {
            self.transcript = Transcript::Prompt;
        }
    }

    /// Compare the formatted sentence with the transcript. `None` while the
    /// sentence is still loading or the retry screen is up.
    pub fn validate(&mut self) -> Option<Verdict> {
        if self.retry {
            return None;
        }
        let sentence = self.sentence.as_deref()?;
        let matched = match &self.transcript {
            Transcript::Heard(text) => sentences_match(&format_transcript(sentence), text),
            _ => false,
        };
        if matched {
            Some(Verdict::Matched)
        } else {
            self.retry = true;
            Some(Verdict::Mismatch)
        }
    }

    pub fn retry(&mut self) {
        self.retry = false;
        self.transcript = Transcript::Prompt;
    }
}
