use serde::{Deserialize, Serialize};
use super::stroke::ReferenceStroke;

/// Script category of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterCategory {
    Vowel,
    Consonant,
    VowelSign,
    Conjunct,
    Number,
}

/// A traceable character with its ordered reference strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: u32,
    /// The glyph as displayed (e.g. "অ").
    pub glyph: String,
    pub romanized_name: String,
    pub display_name: String,
    pub category: CharacterCategory,
    /// Opaque pronunciation asset id, resolved by the host.
    #[serde(default)]
    pub audio_id: u32,
    pub strokes: Vec<ReferenceStroke>,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

fn default_difficulty() -> u8 {
    1
}

impl Character {
    /// Create a character. Strokes are sorted by their `order`.
    pub fn new(
        id: u32,
        glyph: impl Into<String>,
        romanized_name: impl Into<String>,
        category: CharacterCategory,
        mut strokes: Vec<ReferenceStroke>,
    ) -> Self {
        strokes.sort_by_key(|s| s.order);
        let glyph = glyph.into();
        Self {
            id,
            display_name: glyph.clone(),
            glyph,
            romanized_name: romanized_name.into(),
            category,
            audio_id: 0,
            strokes,
            difficulty: default_difficulty(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_audio(mut self, audio_id: u32) -> Self {
        self.audio_id = audio_id;
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn stroke(&self, index: usize) -> Option<&ReferenceStroke> {
        self.strokes.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::point::Point;

    fn line(id: u32, order: u32) -> ReferenceStroke {
        ReferenceStroke::from_points(id, order, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)])
    }

    #[test]
    fn new_sorts_strokes_by_order() {
        let c = Character::new(1, "ক", "ka", CharacterCategory::Consonant, vec![line(20, 2), line(10, 1)]);
        assert_eq!(c.strokes[0].id, 10);
        assert_eq!(c.strokes[1].id, 20);
        assert_eq!(c.display_name, "ক");
        assert_eq!(c.difficulty, 1);
    }

    #[test]
    fn category_uses_screaming_snake_case() {
        let json = serde_json::to_string(&CharacterCategory::VowelSign).unwrap();
        assert_eq!(json, "\"VOWEL_SIGN\"");
        let parsed: CharacterCategory = serde_json::from_str("\"CONJUNCT\"").unwrap();
        assert_eq!(parsed, CharacterCategory::Conjunct);
    }

    #[test]
    fn difficulty_defaults_to_one() {
        let json = r#"{
            "id": 3,
            "glyph": "১",
            "romanizedName": "ek",
            "displayName": "one",
            "category": "NUMBER",
            "strokes": []
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(c.difficulty, 1);
        assert_eq!(c.audio_id, 0);
        assert!(c.stroke(0).is_none());
    }
}
