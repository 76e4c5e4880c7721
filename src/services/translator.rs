//! Message translation

use std::collections::HashMap;

/// Looks up display strings by key. Misses never fail; callers fall back to
/// a default or the raw key.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> Option<String>;

    /// Translate `key`, falling back to `default`
    fn translate_or(&self, key: &str, default: &str) -> String {
        self.translate(key).unwrap_or_else(|| default.to_string())
    }

    /// Translate `key`, falling back to the key itself
    fn translate_key(&self, key: &str) -> String {
        self.translate_or(key, key)
    }
}

/// Translator backed by the `[translations]` configuration table
#[derive(Debug, Clone, Default)]
pub struct MapTranslator {
    messages: HashMap<String, String>,
}

impl MapTranslator {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_falls_back() {
        let translator = MapTranslator::new(HashMap::from([(
            "location_LS1".to_string(),
            "Lesesaal 1".to_string(),
        )]));

        assert_eq!(translator.translate_or("location_LS1", "LS1"), "Lesesaal 1");
        assert_eq!(translator.translate_or("location_LS2", "LS2"), "LS2");
        assert_eq!(translator.translate_key("Unknown"), "Unknown");
    }
}
