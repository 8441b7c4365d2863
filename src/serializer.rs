use crate::error::TranslateError;
use crate::translations::Translations;

/// Converts translation data to and from cache payloads
pub trait Serializer: Send + Sync {
    fn serialize(&self, data: &Translations) -> Result<Vec<u8>, TranslateError>;

    fn unserialize(&self, bytes: &[u8]) -> Result<Translations, TranslateError>;
}

/// JSON object payloads, the host platform's default serializer format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, data: &Translations) -> Result<Vec<u8>, TranslateError> {
        Ok(serde_json::to_vec(data)?)
    }

    fn unserialize(&self, bytes: &[u8]) -> Result<Translations, TranslateError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_is_json_object() {
        let data: Translations = [("Hello", "Bonjour")].into_iter().collect();
        let bytes = JsonSerializer.serialize(&data).unwrap();

        assert_eq!(bytes, br#"{"Hello":"Bonjour"}"#);
    }

    #[test]
    fn test_round_trip_preserves_special_characters() {
        let data: Translations = [
            ("Say \"hi\"", "Dis \"salut\""),
            ("Line\nbreak", "Zeilen\numbruch"),
            ("Ünïcödé", "ユニコード"),
        ]
        .into_iter()
        .collect();

        let bytes = JsonSerializer.serialize(&data).unwrap();
        assert_eq!(JsonSerializer.unserialize(&bytes).unwrap(), data);
    }

    #[test]
    fn test_unserialize_malformed_fails() {
        let result = JsonSerializer.unserialize(b"{not json");
        assert!(matches!(result, Err(TranslateError::Serialization(_))));
    }

    #[test]
    fn test_unserialize_wrong_shape_fails() {
        assert!(JsonSerializer.unserialize(b"[1,2,3]").is_err());
    }
}
