use serde::{Deserialize, Serialize};

/// Marker for the hidden fragment inside `incomplete`.
pub const BLANK: &str = "__";

/// One exercise entry. Field names on the wire match the backend serializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "nombre")]
    pub word: String,
    #[serde(rename = "palabra_incompleta")]
    pub incomplete: String,
    #[serde(rename = "respuesta_correcta")]
    pub answer: String,
    #[serde(rename = "opciones")]
    pub options: Vec<String>,
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(rename = "oracion", default)]
    pub sentence: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordProblem {
    #[error("word is empty")]
    EmptyWord,
    #[error("incomplete form {0:?} must contain exactly one blank marker")]
    BlankMarker(String),
    #[error("record has no options")]
    NoOptions,
    #[error("option {0:?} is listed more than once")]
    DuplicateOption(String),
    #[error("correct fragment {0:?} is not among the options")]
    AnswerNotOffered(String),
}

impl WordRecord {
    pub fn validate(&self) -> Result<(), RecordProblem> {
        if self.word.trim().is_empty() {
            return Err(RecordProblem::EmptyWord);
        }
        let underscores = self.incomplete.chars().filter(|&c| c == '_').count();
        if underscores != BLANK.len() || !self.incomplete.contains(BLANK) {
            return Err(RecordProblem::BlankMarker(self.incomplete.clone()));
        }
        if self.options.is_empty() {
            return Err(RecordProblem::NoOptions);
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].contains(option) {
                return Err(RecordProblem::DuplicateOption(option.clone()));
            }
        }
        if !self.options.contains(&self.answer) {
            return Err(RecordProblem::AnswerNotOffered(self.answer.clone()));
        }
        Ok(())
    }

    /// The incomplete word with the blank replaced by `fill`.
    pub fn fill_blank(&self, fill: &str) -> String {
        self.incomplete.replacen(BLANK, fill, 1)
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::testing::gato;

    #[test]
    fn deserializes_backend_field_names() {
        let json = r#"{
            "id": 7,
            "nombre": "libro",
            "palabra_incompleta": "li__o",
            "respuesta_correcta": "br",
            "opciones": ["br", "pr", "tr", "cr"],
            "imagen": "https://example.org/libro.jpg",
            "audio": null
        }"#;
        let record: WordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.word, "libro");
        assert_eq!(record.answer, "br");
        assert_eq!(record.options.len(), 4);
        assert!(record.sentence.is_none());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn fill_blank_replaces_marker() {
        let record = gato();
        assert_eq!(record.fill_blank("ga"), "gato");
        assert_eq!(record.fill_blank("___"), "___to");
    }

    #[test]
    fn validate_rejects_answer_missing_from_options() {
        let mut record = gato();
        record.answer = "ma".to_string();
        assert_eq!(
            record.validate(),
            Err(RecordProblem::AnswerNotOffered("ma".to_string()))
        );
    }

    #[test]
    fn validate_rejects_missing_or_repeated_blank() {
        let mut record = gato();
        record.incomplete = "gato".to_string();
        assert!(matches!(record.validate(), Err(RecordProblem::BlankMarker(_))));
        record.incomplete = "____".to_string();
        assert!(matches!(record.validate(), Err(RecordProblem::BlankMarker(_))));
    }

    #[test]
    fn validate_rejects_overlong_or_stray_underscores() {
        let mut record = gato();
        for incomplete in ["___to", "__t_", "_ga__"] {
            record.incomplete = incomplete.to_string();
            assert_eq!(
                record.validate(),
                Err(RecordProblem::BlankMarker(incomplete.to_string()))
            );
        }
        record.incomplete = "__to".to_string();
        assert_eq!(record.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_duplicate_options() {
        let mut record = gato();
        record.options.push("ca".to_string());
        assert_eq!(
            record.validate(),
            Err(RecordProblem::DuplicateOption("ca".to_string()))
        );
    }
}
