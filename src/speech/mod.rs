pub mod command;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{info, warn};

use crate::config::{SpeechBackendKind, SpeechConfig};
use crate::speech::command::CommandRecognizer;

/// How a single capture is run. The game always asks for one utterance and
/// only the final result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl RecognitionSettings {
    pub fn single_shot(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    /// Raw transcript, not yet formatted.
    Result(String),
    Error(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech recognizer {0:?} is not installed")]
    Unavailable(String),
    #[error("could not start speech recognizer: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("speech recognizer exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
    #[error("no speech was recognized")]
    NoSpeech,
}

pub trait SpeechRecognizer: Send + Sync {
    /// Capture one utterance and return its transcript. `on_start` runs once
    /// the recognizer is listening.
    fn recognize(
        &self,
        settings: &RecognitionSettings,
        on_start: &mut dyn FnMut(),
    ) -> Result<String, SpeechError>;
}

#[derive(Clone)]
pub enum SpeechBackend {
    Recognizer(Arc<dyn SpeechRecognizer>),
    /// The player types what they said.
    Keyboard,
}

impl SpeechBackend {
    /// `None` when speech capture is not available on this machine.
    pub fn detect(config: &SpeechConfig) -> Option<Self> {
        match config.backend {
            SpeechBackendKind::None => None,
            SpeechBackendKind::Keyboard => Some(SpeechBackend::Keyboard),
            SpeechBackendKind::Command => {
                let Some(program) = config.command.as_deref() else {
                    warn!("speech backend is 'command' but no command is configured");
                    return None;
                };
                let recognizer = CommandRecognizer::new(program, &config.args);
                if recognizer.is_available() {
                    info!(program, "using external speech recognizer");
                    Some(SpeechBackend::Recognizer(Arc::new(recognizer)))
                } else {
                    warn!(program, "speech recognizer not found");
                    None
                }
            }
        }
    }
}

/// Run one capture on a worker thread, reporting progress through `report`.
pub fn spawn_capture<F>(
    recognizer: Arc<dyn SpeechRecognizer>,
    settings: RecognitionSettings,
    report: F,
) -> JoinHandle<()>
where
    F: Fn(SpeechEvent) + Send + 'static,
{
    thread::spawn(move || {
        let mut on_start = || report(SpeechEvent::Started);
        let outcome = recognizer.recognize(&settings, &mut on_start);
        match outcome {
            Ok(transcript) => report(SpeechEvent::Result(transcript)),
            Err(err) => {
                warn!(error = %err, "speech recognition failed");
                report(SpeechEvent::Error(err.to_string()));
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct Echo(&'static str);

    impl SpeechRecognizer for Echo {
        fn recognize(
            &self,
            settings: &RecognitionSettings,
            on_start: &mut dyn FnMut(),
        ) -> Result<String, SpeechError> {
            assert!(!settings.continuous);
            assert!(!settings.interim_results);
            on_start();
            Ok(self.0.to_string())
        }
    }

    struct Silent;

    impl SpeechRecognizer for Silent {
        fn recognize(
            &self,
            _settings: &RecognitionSettings,
            on_start: &mut dyn FnMut(),
        ) -> Result<String, SpeechError> {
            on_start();
            Err(SpeechError::NoSpeech)
        }
    }

    fn capture(recognizer: Arc<dyn SpeechRecognizer>) -> Vec<SpeechEvent> {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_capture(recognizer, RecognitionSettings::single_shot("es-ES"), move |ev| {
            let _ = tx.send(ev);
        });
        handle.join().unwrap();
        rx.try_iter().collect()
    }

    #[test]
    fn capture_reports_start_then_result() {
        let events = capture(Arc::new(Echo("el sol brilla")));
        assert_eq!(
            events,
            vec![
                SpeechEvent::Started,
                SpeechEvent::Result("el sol brilla".to_string())
            ]
        );
    }

    #[test]
    fn capture_reports_errors() {
        let events = capture(Arc::new(Silent));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], SpeechEvent::Error(_)));
    }

    #[test]
    fn detect_respects_backend_kind() {
        let mut config = SpeechConfig::default();
        assert!(matches!(
            SpeechBackend::detect(&config),
            Some(SpeechBackend::Keyboard)
        ));

        config.backend = SpeechBackendKind::None;
        assert!(SpeechBackend::detect(&config).is_none());

        config.backend = SpeechBackendKind::Command;
        assert!(SpeechBackend::detect(&config).is_none());

        config.command = Some("/definitely/not/a/recognizer".to_string());
        assert!(SpeechBackend::detect(&config).is_none());
    }
}
