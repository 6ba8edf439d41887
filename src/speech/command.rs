use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::speech::{RecognitionSettings, SpeechError, SpeechRecognizer};

pub const LOCALE_ENV: &str = "SILABAS_SPEECH_LOCALE";
pub const INTERIM_ENV: &str = "SILABAS_SPEECH_INTERIM";

/// Delegates capture to an external program that records one utterance and
/// prints the transcript on stdout.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
        }
    }

    pub fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn recognize(
        &self,
        settings: &RecognitionSettings,
        on_start: &mut dyn FnMut(),
    ) -> Result<String, SpeechError> {
        let program = find_program(&self.program)
            .ok_or_else(|| SpeechError::Unavailable(self.program.clone()))?;

        let child = Command::new(&program)
            .args(&self.args)
            .env(LOCALE_ENV, &settings.locale)
            .env(INTERIM_ENV, if settings.interim_results { "1" } else { "0" })
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(SpeechError::Spawn)?;
        on_start();

        let output = child.wait_with_output().map_err(SpeechError::Spawn)?;
        if !output.status.success() {
            return Err(SpeechError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(program = %program.display(), bytes = output.stdout.len(), "recognizer finished");
        final_transcript(&stdout).ok_or(SpeechError::NoSpeech)
    }
}

/// Recognizers may print partial hypotheses first; the last non-empty line is
/// the final one.
fn final_transcript(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(str::to_string)
}

fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|p| p.is_file())
}
