pub mod catalog;
pub mod record;

#[cfg(test)]
pub(crate) mod testing {
    use super::record::WordRecord;

    pub fn gato() -> WordRecord {
        WordRecord {
            id: 1,
            word: "gato".to_string(),
            incomplete: "__to".to_string(),
            answer: "ga".to_string(),
            options: vec!["ga".into(), "ca".into(), "ta".into(), "pa".into()],
            image: "https://example.org/gato.jpg".to_string(),
            audio: None,
            sentence: Some("El gato está durmiendo en el sofá.".to_string()),
        }
    }
}
